pub mod history;
pub mod note;
pub mod quiz;
pub mod session;
pub mod subject;
pub mod user;
