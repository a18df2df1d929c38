//! Shared HTTP plumbing for the translation and chat clients.

mod error;
#[cfg(test)]
pub(crate) mod test_server;

pub use error::ApiStatusError;
