pub mod runtime;
pub mod scheduler;
pub mod section;
