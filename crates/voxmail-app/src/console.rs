//! Console-backed collaborator implementations.
//!
//! In place of a windowed compose form this binary keeps the form state in
//! memory and mirrors all feedback to stdout and the tracing log. Spoken
//! phrases are printed with a distinct prefix so transcripts read cleanly.

use std::sync::{Mutex, RwLock};

use tracing::{info, warn};

use voxmail_core::{ContactBook, Result};
use voxmail_intent::{ContactDirectory, FormFields, FormUpdate, FormView, Notifier};
use voxmail_mail::is_valid_email;

/// Feedback sink that writes to stdout and the structured log.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn log(&self, message: &str) {
        info!("{message}");
        println!("[log] {message}");
    }

    fn speak(&self, message: &str) {
        println!(">> {message}");
    }

    fn set_status(&self, message: &str) {
        println!("[status] {message}");
    }
}

/// In-memory compose form.
#[derive(Default)]
pub struct ConsoleForm {
    fields: Mutex<FormFields>,
}

impl ConsoleForm {
    fn locked(&self) -> std::sync::MutexGuard<'_, FormFields> {
        match self.fields.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl FormView for ConsoleForm {
    fn fields(&self) -> FormFields {
        self.locked().clone()
    }

    fn apply_update(&self, update: &FormUpdate) {
        let mut fields = self.locked();
        if let Some(recipient) = &update.recipient {
            fields.recipient = recipient.clone();
        }
        if let Some(subject) = &update.subject {
            fields.subject = subject.clone();
        }
        if let Some(body) = &update.body {
            fields.body = body.clone();
        }
    }

    fn clear(&self) {
        *self.locked() = FormFields::default();
    }
}

/// Contact book shared between the turn loop and lookups during a send.
pub struct SharedContacts {
    book: RwLock<ContactBook>,
}

impl SharedContacts {
    pub fn new(book: ContactBook) -> Self {
        Self {
            book: RwLock::new(book),
        }
    }

    /// Add a contact and persist the book. Lookup keeps serving the old
    /// entries if the save fails.
    pub fn add_and_save(&self, name: &str, address: &str) -> Result<()> {
        let mut book = match self.book.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        book.add(name, address)?;
        if let Err(e) = book.save() {
            warn!(error = %e, "Failed to save contacts");
            return Err(e);
        }
        Ok(())
    }
}

/// Parse a spoken contact entry of the form "name ... address".
///
/// The last whitespace-delimited token must validate as an email address
/// (trailing speech punctuation is tolerated); everything before it is the
/// contact name. Returns `None` when either part is missing or the address
/// fails validation, so the caller asks again instead of saving a guess.
pub fn parse_contact_entry(utterance: &str) -> Option<(String, String)> {
    let mut words: Vec<&str> = utterance.split_whitespace().collect();
    let address = words.pop()?.trim_end_matches(['.', ',', ';', '!']);
    if words.is_empty() || !is_valid_email(address) {
        return None;
    }
    Some((words.join(" "), address.to_string()))
}

impl ContactDirectory for SharedContacts {
    fn lookup(&self, name_lowercased: &str) -> Option<String> {
        let book = match self.book.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        book.lookup(name_lowercased).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_form_partial_update_leaves_other_fields() {
        let form = ConsoleForm::default();
        form.apply_update(&FormUpdate {
            recipient: Some("sarah".to_string()),
            ..Default::default()
        });
        form.apply_update(&FormUpdate {
            subject: Some("Lunch".to_string()),
            ..Default::default()
        });

        let fields = form.fields();
        assert_eq!(fields.recipient, "sarah");
        assert_eq!(fields.subject, "Lunch");
        assert!(fields.body.is_empty());
    }

    #[test]
    fn test_form_clear_blanks_everything() {
        let form = ConsoleForm::default();
        form.apply_update(&FormUpdate {
            recipient: Some("sarah".to_string()),
            subject: Some("Lunch".to_string()),
            body: Some("Noon works.".to_string()),
        });
        form.clear();
        assert_eq!(form.fields(), FormFields::default());
    }

    #[test]
    fn test_shared_contacts_lookup_and_add() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let contacts = SharedContacts::new(ContactBook::load(&path).unwrap());

        assert_eq!(contacts.lookup("sarah"), None);
        contacts.add_and_save("Sarah", "sarah@example.com").unwrap();
        assert_eq!(contacts.lookup("sarah"), Some("sarah@example.com".to_string()));

        // Persisted entries survive a reload.
        let reloaded = ContactBook::load(&path).unwrap();
        assert_eq!(reloaded.lookup("sarah"), Some("sarah@example.com"));
    }

    #[test]
    fn test_shared_contacts_rejects_blank_name() {
        let dir = tempdir().unwrap();
        let contacts =
            SharedContacts::new(ContactBook::load(&dir.path().join("contacts.json")).unwrap());
        assert!(contacts.add_and_save("  ", "sarah@example.com").is_err());
        assert_eq!(contacts.lookup(""), None);
    }

    #[test]
    fn test_parse_contact_entry_name_then_address() {
        assert_eq!(
            parse_contact_entry("Sarah Smith sarah@example.com"),
            Some(("Sarah Smith".to_string(), "sarah@example.com".to_string()))
        );
    }

    #[test]
    fn test_parse_contact_entry_trims_speech_punctuation() {
        assert_eq!(
            parse_contact_entry("sarah sarah@example.com."),
            Some(("sarah".to_string(), "sarah@example.com".to_string()))
        );
    }

    #[test]
    fn test_parse_contact_entry_rejects_invalid_address() {
        assert_eq!(parse_contact_entry("sarah not-an-address"), None);
        assert_eq!(parse_contact_entry("sarah at example dot com"), None);
    }

    #[test]
    fn test_parse_contact_entry_requires_a_name() {
        assert_eq!(parse_contact_entry("sarah@example.com"), None);
        assert_eq!(parse_contact_entry(""), None);
    }
}
