//! Conversation-state intent resolution for Voxmail.
//!
//! The engine that turns a sequence of per-utterance intent analyses into a
//! consistent, partially filled email draft. Each turn flows through a fixed
//! pipeline: build context for the language-understanding service, analyze
//! the utterance (falling back to keyword heuristics when analysis fails),
//! resolve the analysis against the current draft into exactly one action,
//! apply that action, and surface effects through narrow collaborator traits.

pub mod analysis;
pub mod controller;
pub mod draft;
pub mod error;
pub mod fallback;
pub mod resolver;
pub mod traits;

pub use analysis::{Intent, IntentAnalysis};
pub use controller::{ConversationController, TurnOutcome};
pub use draft::{DraftField, DraftState};
pub use error::ConversationError;
pub use fallback::FallbackParser;
pub use resolver::{resolve, ResolvedAction};
pub use traits::{
    ContactDirectory, FormFields, FormUpdate, FormView, LanguageUnderstanding, MailTransport,
    Notifier,
};
