//! Degraded-mode intent resolution from keyword heuristics.
//!
//! Used only when the language-understanding service fails or returns
//! something unparseable. Works on the lower-cased utterance with substring
//! checks in priority order. Deliberately does not guess subject or body
//! content: asking the user to rephrase beats a wrong guess.

use crate::resolver::ResolvedAction;

/// Heuristic parser for raw utterances.
pub struct FallbackParser;

impl FallbackParser {
    /// Approximate the intent of `utterance`.
    ///
    /// `form_has_recipient` reflects the externally visible form, which may
    /// carry a recipient independent of this turn; `in_conversation` is the
    /// draft's conversation flag, used to shape the unrecognized guidance.
    pub fn parse(
        utterance: &str,
        form_has_recipient: bool,
        in_conversation: bool,
    ) -> ResolvedAction {
        let lower = utterance.to_lowercase();

        if lower.contains("send") && lower.contains("email") {
            // This rule owns every send+email utterance. Without an
            // extractable recipient the answer is to ask again, never to
            // fall through and fire a send off a half-heard compose command.
            return match extract_recipient(&lower) {
                Some(recipient) => ResolvedAction::UpdateFields {
                    recipient: Some(recipient),
                    subject: None,
                    body: None,
                },
                None => ResolvedAction::Unrecognized {
                    first_turn: !in_conversation,
                },
            };
        }

        if lower.contains("send") && form_has_recipient {
            return ResolvedAction::TriggerSend;
        }

        if lower.contains("clear") || lower.contains("start over") {
            return ResolvedAction::TriggerClear;
        }

        ResolvedAction::Unrecognized {
            first_turn: !in_conversation,
        }
    }
}

/// First whitespace-delimited token after the literal word "to", with
/// trailing punctuation trimmed. Token-wise scan, so words that merely
/// contain "to" (october, tomorrow) do not trigger extraction.
fn extract_recipient(lower: &str) -> Option<String> {
    let mut words = lower.split_whitespace();
    while let Some(word) = words.next() {
        if word == "to" {
            return words
                .next()
                .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '@' && c != '.'))
                .filter(|w| !w.is_empty())
                .map(String::from);
        }
    }
    None
}
