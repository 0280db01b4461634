pub mod controller;
pub mod pin;
pub mod progress;
pub mod region;
