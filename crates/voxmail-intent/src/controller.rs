//! Turn-by-turn conversation orchestration.
//!
//! The controller is the single owner of the draft state. Each utterance is
//! one atomic turn: build context, analyze (or fall back), resolve, apply,
//! notify. Turns are strictly sequential; the embedding application must not
//! dispatch a new utterance while a turn is in flight.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::IntentAnalysis;
use crate::draft::{DraftField, DraftState};
use crate::error::ConversationError;
use crate::fallback::FallbackParser;
use crate::resolver::{resolve, ResolvedAction};
use crate::traits::{
    ContactDirectory, FormFields, FormUpdate, FormView, LanguageUnderstanding, MailTransport,
    Notifier,
};

/// What a completed turn amounted to, for the embedding application.
///
/// All spoken/status/log effects have already been delivered through the
/// collaborator traits; this return value exists so the application can open
/// flows the core cannot (add-contact) and so tests can assert outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Draft content changed; carries the fields still missing from the form.
    Updated { missing: Vec<DraftField> },
    Sent,
    SendFailed(String),
    Cleared,
    AddContactRequested,
    HelpShown,
    Unrecognized { first_turn: bool },
}

/// Orchestrates utterances end-to-end against the collaborator seams.
pub struct ConversationController {
    draft: DraftState,
    language: Arc<dyn LanguageUnderstanding>,
    contacts: Arc<dyn ContactDirectory>,
    transport: Arc<dyn MailTransport>,
    notifier: Arc<dyn Notifier>,
    form: Arc<dyn FormView>,
}

impl ConversationController {
    pub fn new(
        language: Arc<dyn LanguageUnderstanding>,
        contacts: Arc<dyn ContactDirectory>,
        transport: Arc<dyn MailTransport>,
        notifier: Arc<dyn Notifier>,
        form: Arc<dyn FormView>,
    ) -> Self {
        Self {
            draft: DraftState::new(),
            language,
            contacts,
            transport,
            notifier,
            form,
        }
    }

    /// Read-only view of the draft, for the embedding application and tests.
    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    /// Process one utterance to completion.
    pub async fn handle_utterance(&mut self, utterance: &str) -> TurnOutcome {
        let turn_id = Uuid::new_v4();
        info!(%turn_id, utterance, "Turn started");
        self.notifier.set_status("Processing...");

        let context = self.draft.context_summary();
        let action = match self.language.analyze(utterance, &context).await {
            Ok(analysis) => {
                let explanation = if analysis.explanation.is_empty() {
                    "no explanation provided"
                } else {
                    analysis.explanation.as_str()
                };
                self.notifier
                    .log(&format!("Assistant understood: {}", explanation));
                info!(%turn_id, intent = %analysis.intent, "Analysis succeeded");
                return self.execute(resolve(&analysis, &self.draft), false).await;
            }
            Err(e) => {
                warn!(%turn_id, error = %e, "Analysis failed, using fallback parser");
                self.notifier
                    .log("Could not reach the assistant, using keyword matching");
                let form = self.form.fields();
                FallbackParser::parse(
                    utterance,
                    !form.recipient.trim().is_empty(),
                    self.draft.in_conversation(),
                )
            }
        };

        self.execute(action, true).await
    }

    async fn execute(&mut self, action: ResolvedAction, from_fallback: bool) -> TurnOutcome {
        match action {
            ResolvedAction::UpdateFields {
                recipient,
                subject,
                body,
            } => self.apply_update(recipient, subject, body, from_fallback),
            ResolvedAction::AppendBody(_) | ResolvedAction::ReplaceBody(_) => {
                self.apply_body_change(action)
            }
            ResolvedAction::TriggerSend => {
                self.draft.apply(&ResolvedAction::TriggerSend);
                self.send_current().await
            }
            ResolvedAction::TriggerClear => {
                self.form.clear();
                self.draft.reset();
                self.notifier.log("Form cleared");
                self.notifier.set_status("Form cleared");
                self.notifier.speak("Form cleared");
                TurnOutcome::Cleared
            }
            ResolvedAction::RequestAddContact => {
                self.draft.apply(&ResolvedAction::RequestAddContact);
                self.notifier.log("Add-contact flow requested");
                self.notifier.set_status("Add a contact");
                TurnOutcome::AddContactRequested
            }
            ResolvedAction::ShowHelp => {
                self.draft.apply(&ResolvedAction::ShowHelp);
                self.notifier.log(HELP_TEXT);
                self.notifier.set_status("Help info in log");
                self.notifier.speak("I've shown some help in the log");
                TurnOutcome::HelpShown
            }
            ResolvedAction::Unrecognized { first_turn } => {
                self.draft
                    .apply(&ResolvedAction::Unrecognized { first_turn });
                if first_turn {
                    self.notifier.log(
                        "I'm not sure what you want to do. Try saying 'Send an email to [name]'",
                    );
                    self.notifier.set_status("Try 'Send an email to [name]'");
                    self.notifier
                        .speak("I'm not sure what you want to do. Try sending an email to someone.");
                } else {
                    self.notifier
                        .log("I didn't understand that in the context of your email.");
                    self.notifier.set_status("Please try again");
                    self.notifier
                        .speak("I didn't understand that in the context of your email.");
                }
                TurnOutcome::Unrecognized { first_turn }
            }
        }
    }

    /// Apply a field update: advisory contact resolution for the visible
    /// form, raw values into the draft, then guidance.
    fn apply_update(
        &mut self,
        recipient: Option<String>,
        subject: Option<String>,
        body: Option<String>,
        from_fallback: bool,
    ) -> TurnOutcome {
        let resolved_recipient = recipient.as_ref().map(|raw| {
            let resolved = self
                .contacts
                .lookup(&raw.to_lowercase())
                .unwrap_or_else(|| raw.clone());
            self.notifier
                .log(&format!("Setting recipient: {}", resolved));
            resolved
        });
        if let Some(ref s) = subject {
            self.notifier.log(&format!("Setting subject: {}", s));
        }
        if body.is_some() {
            self.notifier.log("Setting message body");
        }

        self.form.apply_update(&FormUpdate {
            recipient: resolved_recipient,
            subject: subject.clone(),
            body: body.clone(),
        });
        self.draft.apply(&ResolvedAction::UpdateFields {
            recipient,
            subject,
            body,
        });

        if from_fallback {
            // Heuristic recipient extraction only; ask for the rest instead
            // of computing full guidance from a guessed parse.
            self.notifier.set_status("I need more details");
            self.notifier.speak("I need more details for your email");
            TurnOutcome::Updated {
                missing: missing_from(&self.form.fields()),
            }
        } else {
            self.guide()
        }
    }

    fn apply_body_change(&mut self, action: ResolvedAction) -> TurnOutcome {
        self.draft.apply(&action);
        self.form.apply_update(&FormUpdate {
            recipient: None,
            subject: None,
            body: Some(self.draft.body().unwrap_or_default().to_string()),
        });
        self.notifier.log("Message body updated");
        self.guide()
    }

    /// Tell the user what the visible form still needs, in one message.
    fn guide(&self) -> TurnOutcome {
        let missing = missing_from(&self.form.fields());
        if missing.is_empty() {
            self.notifier.set_status("Your email is ready to send.");
            self.notifier.speak("Your email is ready to send.");
        } else {
            let list = missing
                .iter()
                .map(DraftField::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            let message = format!("I need your {}", list);
            self.notifier.set_status(&message);
            self.notifier.speak(&message);
        }
        TurnOutcome::Updated { missing }
    }

    /// Validate and send whatever the visible form holds.
    ///
    /// Send-time validation is authoritative: the contact directory is
    /// consulted again here in case it changed mid-conversation. Any failure
    /// leaves both the form and the draft untouched so the user can retry.
    async fn send_current(&mut self) -> TurnOutcome {
        let FormFields {
            recipient,
            subject,
            body,
        } = self.form.fields();
        let recipient = recipient.trim().to_string();
        let body = body.trim().to_string();

        if recipient.is_empty() {
            return self.report_send_failure(ConversationError::MissingRecipient);
        }
        let to = if recipient.contains('@') {
            recipient
        } else {
            match self.contacts.lookup(&recipient.to_lowercase()) {
                Some(address) => address,
                None => {
                    return self
                        .report_send_failure(ConversationError::InvalidRecipient(recipient));
                }
            }
        };
        if body.is_empty() {
            return self.report_send_failure(ConversationError::EmptyBody);
        }

        match self.transport.send(&to, subject.trim(), &body).await {
            Ok(()) => {
                info!(to = %to, "Email sent");
                self.notifier.log(&format!("Email sent to {}", to));
                self.notifier.set_status("Email sent");
                self.notifier.speak("Email sent successfully");
                self.form.clear();
                self.draft.reset();
                TurnOutcome::Sent
            }
            Err(e) => self.report_send_failure(e),
        }
    }

    fn report_send_failure(&self, error: ConversationError) -> TurnOutcome {
        warn!(error = %error, "Send aborted");
        let message = format!("Failed to send email: {}", error);
        self.notifier.log(&message);
        self.notifier.set_status("Send failed");
        self.notifier.speak(&message);
        TurnOutcome::SendFailed(error.to_string())
    }
}

fn missing_from(fields: &FormFields) -> Vec<DraftField> {
    let mut missing = Vec::new();
    if fields.recipient.trim().is_empty() {
        missing.push(DraftField::Recipient);
    }
    if fields.subject.trim().is_empty() {
        missing.push(DraftField::Subject);
    }
    if fields.body.trim().is_empty() {
        missing.push(DraftField::Body);
    }
    missing
}

const HELP_TEXT: &str = "You can say things like:\n\
    - 'Send an email to John about the project'\n\
    - 'The meeting is scheduled for Thursday'\n\
    - 'Send it now'\n\
    - 'Start over'\n\
    - 'Add Sarah to my contacts'";
