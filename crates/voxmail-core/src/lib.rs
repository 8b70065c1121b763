//! Shared foundation for the Voxmail voice email assistant.
//!
//! Provides the workspace-wide error type, TOML configuration with
//! environment-variable credential resolution, and the persistent
//! contact book.

pub mod config;
pub mod contacts;
pub mod error;

pub use config::{require_env, VoxmailConfig};
pub use contacts::ContactBook;
pub use error::{Result, VoxmailError};
