pub mod generate;
pub mod history;
pub mod login;
pub mod note;
pub mod quiz;
pub mod stats;
pub mod status;
pub mod subject;
pub mod user;
pub mod validation;
