//! Voxmail application binary.
//!
//! Composition root: loads configuration, builds the assistant client, SMTP
//! mailer, and console collaborators, then drives the conversation controller
//! from a line-based utterance stream until EOF, "stop listening", or Ctrl-C.

mod capture;
mod cli;
mod console;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use voxmail_assistant::AssistantClient;
use voxmail_core::{require_env, ContactBook, Result, VoxmailConfig, VoxmailError};
use voxmail_intent::{ConversationController, Notifier, TurnOutcome};
use voxmail_mail::{is_valid_email, SmtpMailer};

use crate::capture::spawn_stdin_capture;
use crate::cli::{expand_home, CliArgs};
use crate::console::{parse_contact_entry, ConsoleForm, ConsoleNotifier, SharedContacts};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let config_path = args.resolve_config_path();
    let config = VoxmailConfig::load_or_default(&config_path);

    init_logging(&args.resolve_log_level(&config.general.log_level));
    info!(config = %config_path.display(), "Voxmail starting");

    if !is_valid_email(&config.mail.from_address) {
        return Err(VoxmailError::Config(format!(
            "mail.from_address {:?} is not a valid email address",
            config.mail.from_address
        )));
    }
    let api_key = require_env(&config.assistant.api_key_env)?;
    let smtp_password = require_env(&config.mail.password_env)?;

    let contacts_path = expand_home(&args.resolve_contacts_path(&config.general.contacts_path));
    let contacts = Arc::new(SharedContacts::new(ContactBook::load(&contacts_path)?));

    let language = Arc::new(
        AssistantClient::new(&config.assistant, api_key).map_err(VoxmailError::from)?,
    );
    let transport =
        Arc::new(SmtpMailer::new(&config.mail, smtp_password).map_err(VoxmailError::from)?);
    let notifier = Arc::new(ConsoleNotifier);
    let form = Arc::new(ConsoleForm::default());

    let mut controller = ConversationController::new(
        language,
        contacts.clone(),
        transport,
        notifier.clone(),
        form,
    );

    let stop = Arc::new(AtomicBool::new(false));
    let (tx, mut rx) = mpsc::channel(config.capture.queue_depth.max(1));
    let capture = spawn_stdin_capture(tx, stop.clone());

    notifier.set_status("Ready");
    notifier.speak("Voice email assistant ready. Say help for a list of commands.");

    // When set, the next utterance is a contact entry rather than a command.
    let mut awaiting_contact = false;

    loop {
        let utterance = tokio::select! {
            maybe = rx.recv() => match maybe {
                Some(utterance) => utterance,
                None => break,
            },
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    error!(error = %e, "Signal handler failed");
                }
                stop.store(true, Ordering::Relaxed);
                break;
            }
        };

        if awaiting_contact {
            awaiting_contact = false;
            add_contact(&utterance, &contacts, notifier.as_ref());
            continue;
        }

        let outcome = controller.handle_utterance(&utterance).await;
        if let TurnOutcome::AddContactRequested = outcome {
            awaiting_contact = true;
            notifier.speak("Who should I add? Say the name followed by the email address.");
        }
    }

    stop.store(true, Ordering::Relaxed);
    capture.abort();
    info!("Voxmail shutting down");
    Ok(())
}

fn add_contact(utterance: &str, contacts: &SharedContacts, notifier: &dyn Notifier) {
    let Some((name, address)) = parse_contact_entry(utterance) else {
        notifier.speak(
            "I couldn't make out a name and address. Say the name followed by the email address.",
        );
        notifier.set_status("Contact not added");
        return;
    };

    match contacts.add_and_save(&name, &address) {
        Ok(()) => {
            notifier.log(&format!("Added contact {} <{}>", name, address));
            notifier.speak(&format!("Added {} to your contacts", name));
            notifier.set_status("Contact added");
        }
        Err(e) => {
            error!(error = %e, "Contact add failed");
            notifier.speak("I couldn't save that contact");
            notifier.set_status("Contact not added");
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
