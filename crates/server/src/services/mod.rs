//! Business services used by route handlers.

pub mod credentials;

pub use credentials::{CredentialCheck, SharedSecret};
