//! Language-understanding client for Voxmail.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint, asking it to
//! classify one utterance (grounded by the draft context) into the strict
//! JSON shape the intent engine consumes.

pub mod client;
pub mod prompt;

pub use client::{AssistantClient, AssistantError};
