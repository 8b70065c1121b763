//! Collaborator interfaces consumed by the conversation controller.
//!
//! The core has no UI, network, or audio dependency: everything observable
//! happens through these narrow seams. Production implementations live in
//! the assistant, mail, and app crates; tests substitute recording mocks.

use async_trait::async_trait;

use crate::analysis::IntentAnalysis;
use crate::error::ConversationError;

/// The external language-understanding service.
#[async_trait]
pub trait LanguageUnderstanding: Send + Sync {
    /// Interpret one utterance, grounded by a context string describing the
    /// draft so far. Blocking network call, no internal retry; any failure
    /// routes the turn through the fallback parser instead.
    async fn analyze(
        &self,
        utterance: &str,
        context: &str,
    ) -> Result<IntentAnalysis, ConversationError>;
}

/// Name-to-address lookup. Names are passed lower-cased.
pub trait ContactDirectory: Send + Sync {
    fn lookup(&self, name_lowercased: &str) -> Option<String>;
}

/// Outbound mail submission.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ConversationError>;
}

/// Sink for user-facing feedback: log entries, spoken phrases, and the
/// one-line status display. Fire-and-forget; a notifier must not fail.
pub trait Notifier: Send + Sync {
    fn log(&self, message: &str);
    fn speak(&self, message: &str);
    fn set_status(&self, message: &str);
}

/// Snapshot of the externally visible compose form.
///
/// The form may be edited outside the voice flow, so guidance is computed
/// against these values rather than the draft alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Partial update to the compose form; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormUpdate {
    pub recipient: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

impl FormUpdate {
    pub fn is_empty(&self) -> bool {
        self.recipient.is_none() && self.subject.is_none() && self.body.is_none()
    }
}

/// The rendered compose form.
pub trait FormView: Send + Sync {
    fn fields(&self) -> FormFields;
    fn apply_update(&self, update: &FormUpdate);
    fn clear(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_update_is_empty() {
        assert!(FormUpdate::default().is_empty());

        let update = FormUpdate {
            subject: Some("Meeting".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_form_fields_default_blank() {
        let fields = FormFields::default();
        assert!(fields.recipient.is_empty());
        assert!(fields.subject.is_empty());
        assert!(fields.body.is_empty());
    }
}
