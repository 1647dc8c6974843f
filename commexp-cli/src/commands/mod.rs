pub mod analyze;
pub mod input;
pub mod trace;
