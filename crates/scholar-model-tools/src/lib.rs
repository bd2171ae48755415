pub mod convert;
pub mod error;
