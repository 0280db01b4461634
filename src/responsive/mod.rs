pub mod reveal;
pub mod selector;
pub mod tier;
