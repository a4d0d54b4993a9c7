// Export our modules for use in the binary and tests
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod session;

pub use error::{EditorError, Result};
