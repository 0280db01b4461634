pub mod ease;
pub mod lerp;
pub mod ops;
pub mod property;
