mod postgresql;
mod sqlite;

pub use postgresql::*;
pub use sqlite::*;
use std::borrow::Cow;

pub trait TestDb {
    fn db_uri(&self) -> Cow<'_, str>;
}
