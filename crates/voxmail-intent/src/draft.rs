//! The multi-turn email draft accumulator.
//!
//! A single [`DraftState`] lives for the application session, exclusively
//! owned and mutated by the conversation controller. It carries whatever the
//! user has dictated so far and whether a conversation is in progress.
//!
//! Invariant: `in_conversation == false` implies every other field is at its
//! default — no orphaned partial data outside a conversation.

use crate::analysis::Intent;
use crate::resolver::ResolvedAction;

/// An email field the draft may still be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Recipient,
    Subject,
    Body,
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DraftField::Recipient => "recipient",
            DraftField::Subject => "subject",
            DraftField::Body => "message body",
        };
        write!(f, "{}", s)
    }
}

/// Conversation/draft state accumulated across turns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    recipient: Option<String>,
    subject: Option<String>,
    body: Option<String>,
    in_conversation: bool,
    last_intent: Option<Intent>,
}

impl DraftState {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// True once any turn has contributed content to this draft.
    pub fn in_conversation(&self) -> bool {
        self.in_conversation
    }

    pub fn last_intent(&self) -> Option<Intent> {
        self.last_intent
    }

    /// Synopsis of the known fields, used to ground the
    /// language-understanding service for the next turn.
    ///
    /// Field order is fixed: recipient, subject, body. Returns an empty
    /// string when no conversation is in progress or nothing is known yet.
    pub fn context_summary(&self) -> String {
        if !self.in_conversation {
            return String::new();
        }

        let mut parts = Vec::new();
        if let Some(ref r) = self.recipient {
            parts.push(format!("Recipient: {}", r));
        }
        if let Some(ref s) = self.subject {
            parts.push(format!("Subject: {}", s));
        }
        if let Some(ref b) = self.body {
            parts.push(format!("Previous message content: {}", b));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!("Current email draft: {}. ", parts.join("; "))
        }
    }

    /// Mutate the draft according to a resolved action.
    ///
    /// Content-setting actions (field updates, body append/replace) mark the
    /// conversation as started and record the intent that produced them.
    /// Non-content actions record `last_intent` only when a conversation is
    /// already in progress, preserving the not-in-conversation invariant.
    pub fn apply(&mut self, action: &ResolvedAction) {
        match action {
            ResolvedAction::UpdateFields {
                recipient,
                subject,
                body,
            } => {
                // Absent fields pass through: never clobber known values.
                let touched = recipient.is_some() || subject.is_some() || body.is_some();
                if let Some(r) = recipient {
                    self.recipient = Some(r.clone());
                }
                if let Some(s) = subject {
                    self.subject = Some(s.clone());
                }
                if let Some(b) = body {
                    self.body = Some(b.clone());
                }
                if touched {
                    self.in_conversation = true;
                    self.last_intent = Some(Intent::ComposeEmail);
                }
            }
            ResolvedAction::AppendBody(text) => {
                self.body = Some(match self.body.take() {
                    Some(existing) if !existing.is_empty() => {
                        format!("{} {}", existing, text)
                    }
                    _ => text.clone(),
                });
                self.in_conversation = true;
                self.last_intent = Some(Intent::ContinueBody);
            }
            ResolvedAction::ReplaceBody(text) => {
                self.body = if text.is_empty() {
                    None
                } else {
                    Some(text.clone())
                };
                self.in_conversation = true;
                self.last_intent = Some(Intent::ContinueBody);
            }
            ResolvedAction::TriggerSend => self.note_intent(Intent::SendEmail),
            ResolvedAction::TriggerClear => self.note_intent(Intent::ClearForm),
            ResolvedAction::RequestAddContact => self.note_intent(Intent::AddContact),
            ResolvedAction::ShowHelp => self.note_intent(Intent::Help),
            ResolvedAction::Unrecognized { .. } => self.note_intent(Intent::Unknown),
        }
    }

    /// Restore all fields to their defaults.
    ///
    /// Called after a completed send or an explicit clear.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fields currently empty, in fixed recipient/subject/body order.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        let mut missing = Vec::new();
        if self.recipient.as_deref().map_or(true, |r| r.trim().is_empty()) {
            missing.push(DraftField::Recipient);
        }
        if self.subject.as_deref().map_or(true, |s| s.trim().is_empty()) {
            missing.push(DraftField::Subject);
        }
        if self.body.as_deref().map_or(true, |b| b.trim().is_empty()) {
            missing.push(DraftField::Body);
        }
        missing
    }

    fn note_intent(&mut self, intent: Intent) {
        if self.in_conversation {
            self.last_intent = Some(intent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(
        recipient: Option<&str>,
        subject: Option<&str>,
        body: Option<&str>,
    ) -> ResolvedAction {
        ResolvedAction::UpdateFields {
            recipient: recipient.map(String::from),
            subject: subject.map(String::from),
            body: body.map(String::from),
        }
    }

    #[test]
    fn test_new_draft_is_default() {
        let draft = DraftState::new();
        assert!(!draft.in_conversation());
        assert_eq!(draft.recipient(), None);
        assert_eq!(draft.last_intent(), None);
        assert_eq!(draft.context_summary(), "");
    }

    #[test]
    fn test_update_fields_accumulates_union() {
        let mut draft = DraftState::new();
        draft.apply(&update(Some("sarah"), None, None));
        draft.apply(&update(None, Some("Meeting"), None));
        draft.apply(&update(None, None, Some("See you Thursday")));

        assert_eq!(draft.recipient(), Some("sarah"));
        assert_eq!(draft.subject(), Some("Meeting"));
        assert_eq!(draft.body(), Some("See you Thursday"));
        assert!(draft.in_conversation());
    }

    #[test]
    fn test_absent_fields_never_clobber() {
        let mut draft = DraftState::new();
        draft.apply(&update(Some("sarah"), Some("Meeting"), None));
        draft.apply(&update(None, None, Some("body text")));

        // Earlier values survive updates that do not mention them.
        assert_eq!(draft.recipient(), Some("sarah"));
        assert_eq!(draft.subject(), Some("Meeting"));
    }

    #[test]
    fn test_most_recent_value_wins() {
        let mut draft = DraftState::new();
        draft.apply(&update(Some("sarah"), None, None));
        draft.apply(&update(Some("bob"), None, None));
        assert_eq!(draft.recipient(), Some("bob"));
    }

    #[test]
    fn test_idempotent_reapplication() {
        let mut draft = DraftState::new();
        let action = update(Some("sarah"), Some("Meeting"), Some("hello"));
        draft.apply(&action);
        let snapshot = draft.clone();
        draft.apply(&action);
        assert_eq!(draft, snapshot);
    }

    #[test]
    fn test_empty_update_does_not_start_conversation() {
        let mut draft = DraftState::new();
        draft.apply(&update(None, None, None));
        assert!(!draft.in_conversation());
        assert_eq!(draft, DraftState::default());
    }

    #[test]
    fn test_append_body_joins_with_space() {
        let mut draft = DraftState::new();
        draft.apply(&ResolvedAction::ReplaceBody("Hello".to_string()));
        draft.apply(&ResolvedAction::AppendBody("world".to_string()));
        assert_eq!(draft.body(), Some("Hello world"));
    }

    #[test]
    fn test_append_to_empty_body_takes_text_as_is() {
        let mut draft = DraftState::new();
        draft.apply(&ResolvedAction::AppendBody("world".to_string()));
        assert_eq!(draft.body(), Some("world"));
    }

    #[test]
    fn test_replace_body_discards_previous() {
        let mut draft = DraftState::new();
        draft.apply(&ResolvedAction::ReplaceBody("Hello".to_string()));
        draft.apply(&ResolvedAction::ReplaceBody("world".to_string()));
        assert_eq!(draft.body(), Some("world"));
    }

    #[test]
    fn test_replace_with_empty_clears_body() {
        let mut draft = DraftState::new();
        draft.apply(&ResolvedAction::ReplaceBody("Hello".to_string()));
        draft.apply(&ResolvedAction::ReplaceBody(String::new()));
        assert_eq!(draft.body(), None);
        assert!(draft.in_conversation());
    }

    #[test]
    fn test_reset_restores_default_regardless_of_state() {
        let mut draft = DraftState::new();
        draft.apply(&update(Some("sarah"), Some("Meeting"), Some("hello")));
        draft.apply(&ResolvedAction::AppendBody("more".to_string()));
        draft.reset();
        assert_eq!(draft, DraftState::default());
        assert!(!draft.in_conversation());
    }

    #[test]
    fn test_context_summary_fixed_order() {
        let mut draft = DraftState::new();
        draft.apply(&update(Some("sarah"), Some("Meeting"), Some("See you")));
        assert_eq!(
            draft.context_summary(),
            "Current email draft: Recipient: sarah; Subject: Meeting; Previous message content: See you. "
        );
    }

    #[test]
    fn test_context_summary_partial() {
        let mut draft = DraftState::new();
        draft.apply(&update(None, Some("Meeting"), None));
        assert_eq!(
            draft.context_summary(),
            "Current email draft: Subject: Meeting. "
        );
    }

    #[test]
    fn test_context_summary_empty_after_body_cleared() {
        let mut draft = DraftState::new();
        draft.apply(&ResolvedAction::ReplaceBody(String::new()));
        assert!(draft.in_conversation());
        assert_eq!(draft.context_summary(), "");
    }

    #[test]
    fn test_missing_fields_all_on_empty_draft() {
        let draft = DraftState::new();
        assert_eq!(
            draft.missing_fields(),
            vec![DraftField::Recipient, DraftField::Subject, DraftField::Body]
        );
    }

    #[test]
    fn test_missing_fields_with_recipient_only() {
        let mut draft = DraftState::new();
        draft.apply(&update(Some("sarah"), None, None));
        assert_eq!(
            draft.missing_fields(),
            vec![DraftField::Subject, DraftField::Body]
        );
    }

    #[test]
    fn test_missing_fields_none_when_complete() {
        let mut draft = DraftState::new();
        draft.apply(&update(Some("sarah"), Some("Meeting"), Some("hello")));
        assert!(draft.missing_fields().is_empty());
    }

    #[test]
    fn test_unrecognized_on_first_turn_keeps_invariant() {
        let mut draft = DraftState::new();
        draft.apply(&ResolvedAction::Unrecognized { first_turn: true });
        // Not in conversation, so every field must still be default.
        assert_eq!(draft, DraftState::default());
        assert_eq!(draft.last_intent(), None);
    }

    #[test]
    fn test_last_intent_recorded_in_conversation() {
        let mut draft = DraftState::new();
        draft.apply(&update(Some("sarah"), None, None));
        assert_eq!(draft.last_intent(), Some(Intent::ComposeEmail));

        draft.apply(&ResolvedAction::Unrecognized { first_turn: false });
        assert_eq!(draft.last_intent(), Some(Intent::Unknown));

        draft.apply(&ResolvedAction::TriggerSend);
        assert_eq!(draft.last_intent(), Some(Intent::SendEmail));
    }

    #[test]
    fn test_draft_field_display() {
        assert_eq!(DraftField::Recipient.to_string(), "recipient");
        assert_eq!(DraftField::Subject.to_string(), "subject");
        assert_eq!(DraftField::Body.to_string(), "message body");
    }
}
