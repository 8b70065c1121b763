//! Outbound mail submission for Voxmail.
//!
//! Implements the intent engine's `MailTransport` seam over SMTP with
//! implicit TLS, plus the address syntax check used by contact management.

pub mod sender;
pub mod validate;

pub use sender::{MailError, SmtpMailer};
pub use validate::is_valid_email;
