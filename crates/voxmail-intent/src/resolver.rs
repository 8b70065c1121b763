//! Pure mapping from an intent analysis to a draft action.
//!
//! No side effects and no I/O: given one [`IntentAnalysis`] and the current
//! [`DraftState`], [`resolve`] produces exactly one [`ResolvedAction`].
//! Contact resolution and send-time validation belong to the controller.

use crate::analysis::{Intent, IntentAnalysis};
use crate::draft::DraftState;

/// The single action a turn resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAction {
    /// Set whichever fields the analysis carried; absent fields pass
    /// through unset.
    UpdateFields {
        recipient: Option<String>,
        subject: Option<String>,
        body: Option<String>,
    },
    /// Extend the existing body, joined with a single space.
    AppendBody(String),
    /// Replace the body outright.
    ReplaceBody(String),
    TriggerSend,
    TriggerClear,
    RequestAddContact,
    ShowHelp,
    /// The utterance could not be related to the email task.
    Unrecognized { first_turn: bool },
}

/// Resolve one analysis against the current draft.
pub fn resolve(analysis: &IntentAnalysis, draft: &DraftState) -> ResolvedAction {
    match analysis.intent {
        Intent::ComposeEmail => ResolvedAction::UpdateFields {
            recipient: analysis.recipient.clone(),
            subject: analysis.subject.clone(),
            body: analysis.body.clone(),
        },
        Intent::ContinueBody => {
            let has_body = draft.body().map_or(false, |b| !b.is_empty());
            if analysis.continue_previous && has_body {
                ResolvedAction::AppendBody(analysis.body.clone().unwrap_or_default())
            } else {
                ResolvedAction::ReplaceBody(analysis.body.clone().unwrap_or_default())
            }
        }
        Intent::SendEmail => ResolvedAction::TriggerSend,
        Intent::ClearForm => ResolvedAction::TriggerClear,
        Intent::AddContact => ResolvedAction::RequestAddContact,
        Intent::Help => ResolvedAction::ShowHelp,
        Intent::Unknown => ResolvedAction::Unrecognized {
            first_turn: !draft.in_conversation(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(intent: Intent) -> IntentAnalysis {
        IntentAnalysis {
            intent,
            recipient: None,
            subject: None,
            body: None,
            continue_previous: false,
            explanation: String::new(),
        }
    }

    fn draft_with_body(body: &str) -> DraftState {
        let mut draft = DraftState::new();
        draft.apply(&ResolvedAction::ReplaceBody(body.to_string()));
        draft
    }

    #[test]
    fn test_compose_carries_present_fields() {
        let mut a = analysis(Intent::ComposeEmail);
        a.recipient = Some("sarah".to_string());
        a.body = Some("hello".to_string());

        let action = resolve(&a, &DraftState::new());
        assert_eq!(
            action,
            ResolvedAction::UpdateFields {
                recipient: Some("sarah".to_string()),
                subject: None,
                body: Some("hello".to_string()),
            }
        );
    }

    #[test]
    fn test_compose_with_no_fields_is_empty_update() {
        let action = resolve(&analysis(Intent::ComposeEmail), &DraftState::new());
        assert_eq!(
            action,
            ResolvedAction::UpdateFields {
                recipient: None,
                subject: None,
                body: None,
            }
        );
    }

    #[test]
    fn test_continue_body_appends_when_flagged_and_body_exists() {
        let mut a = analysis(Intent::ContinueBody);
        a.continue_previous = true;
        a.body = Some("world".to_string());

        let action = resolve(&a, &draft_with_body("Hello"));
        assert_eq!(action, ResolvedAction::AppendBody("world".to_string()));
    }

    #[test]
    fn test_continue_body_replaces_without_flag() {
        let mut a = analysis(Intent::ContinueBody);
        a.continue_previous = false;
        a.body = Some("world".to_string());

        let action = resolve(&a, &draft_with_body("Hello"));
        assert_eq!(action, ResolvedAction::ReplaceBody("world".to_string()));
    }

    #[test]
    fn test_continue_body_replaces_when_draft_body_empty() {
        let mut a = analysis(Intent::ContinueBody);
        a.continue_previous = true;
        a.body = Some("world".to_string());

        // Nothing to append to, so the flag is moot.
        let action = resolve(&a, &DraftState::new());
        assert_eq!(action, ResolvedAction::ReplaceBody("world".to_string()));
    }

    #[test]
    fn test_continue_body_without_text_replaces_with_empty() {
        let action = resolve(&analysis(Intent::ContinueBody), &DraftState::new());
        assert_eq!(action, ResolvedAction::ReplaceBody(String::new()));
    }

    #[test]
    fn test_direct_intents() {
        let draft = DraftState::new();
        assert_eq!(
            resolve(&analysis(Intent::SendEmail), &draft),
            ResolvedAction::TriggerSend
        );
        assert_eq!(
            resolve(&analysis(Intent::ClearForm), &draft),
            ResolvedAction::TriggerClear
        );
        assert_eq!(
            resolve(&analysis(Intent::AddContact), &draft),
            ResolvedAction::RequestAddContact
        );
        assert_eq!(
            resolve(&analysis(Intent::Help), &draft),
            ResolvedAction::ShowHelp
        );
    }

    #[test]
    fn test_unknown_first_turn() {
        let action = resolve(&analysis(Intent::Unknown), &DraftState::new());
        assert_eq!(action, ResolvedAction::Unrecognized { first_turn: true });
    }

    #[test]
    fn test_unknown_mid_conversation() {
        let action = resolve(&analysis(Intent::Unknown), &draft_with_body("Hello"));
        assert_eq!(action, ResolvedAction::Unrecognized { first_turn: false });
    }
}
