pub mod error;
pub mod evaluation;
