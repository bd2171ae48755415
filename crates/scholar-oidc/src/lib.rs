mod discovery;
mod error;
mod keys;

pub use discovery::jwks_uri;
pub use error::KeyError;
pub use keys::{KeyStore, ValidationOptions};
