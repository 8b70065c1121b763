//! Structured result of interpreting one utterance.
//!
//! The language-understanding service returns a JSON object per utterance;
//! this module is its wire model. An [`IntentAnalysis`] is owned by the
//! controller for the duration of one turn and then discarded.

use serde::{Deserialize, Serialize};

/// The classified purpose of an utterance.
///
/// Closed enum: every consumer matches exhaustively. Wire strings the
/// service invents that are not in this set deserialize to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    ComposeEmail,
    SendEmail,
    AddContact,
    ClearForm,
    ContinueBody,
    Help,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Intent::ComposeEmail => "compose_email",
            Intent::SendEmail => "send_email",
            Intent::AddContact => "add_contact",
            Intent::ClearForm => "clear_form",
            Intent::ContinueBody => "continue_body",
            Intent::Help => "help",
            Intent::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// One utterance's intent analysis.
///
/// Absence of a field is semantically distinct from an empty string: `None`
/// means the utterance said nothing about that field, and the resolver never
/// overwrites a populated draft field with an absent one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentAnalysis {
    pub intent: Intent,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Signals the utterance extends prior body content rather than
    /// replacing it.
    #[serde(default)]
    pub continue_previous: bool,
    /// Human-readable summary of what the service understood, for logging.
    #[serde(default)]
    pub explanation: String,
}

impl IntentAnalysis {
    /// Parse a raw service response into a normalized analysis.
    ///
    /// The service is asked for strict JSON but in practice pads fields with
    /// the literal string `"null"` or whitespace; those are mapped to
    /// absence here so downstream code only ever sees meaningful values.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut analysis: IntentAnalysis = serde_json::from_str(raw)?;
        analysis.normalize();
        Ok(analysis)
    }

    /// Map `"null"`, `"none"`, and blank field values to absence.
    pub fn normalize(&mut self) {
        for field in [&mut self.recipient, &mut self.subject, &mut self.body] {
            let absent = field
                .as_deref()
                .map(|v| {
                    let t = v.trim();
                    t.is_empty() || t.eq_ignore_ascii_case("null") || t.eq_ignore_ascii_case("none")
                })
                .unwrap_or(false);
            if absent {
                *field = None;
            }
        }
    }
}
