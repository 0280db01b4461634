pub mod evaluator;
pub mod motion;
pub mod spec;
pub mod stage;
