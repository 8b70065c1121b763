//! Persistent name-to-address contact book.
//!
//! Contacts are a flat JSON object mapping lower-cased names to email
//! addresses. Lookup is case-insensitive; names are normalized on insert.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, VoxmailError};

/// In-memory contact book backed by a JSON file.
#[derive(Debug, Clone)]
pub struct ContactBook {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl ContactBook {
    /// Load the contact book from `path`.
    ///
    /// A missing file is not an error: first run starts with an empty book.
    pub fn load(path: &Path) -> Result<Self> {
        let entries = match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| VoxmailError::Contacts(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No contact book at {}, starting empty", path.display());
                HashMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Persist the current entries to the backing file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        info!(count = self.entries.len(), "Contact book saved");
        Ok(())
    }

    /// Look up an address by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.trim().to_lowercase()).map(|s| s.as_str())
    }

    /// Add or replace a contact. The name is stored lower-cased.
    ///
    /// Rejects blank names and addresses; address syntax validation is the
    /// caller's concern (the mail crate owns the format check).
    pub fn add(&mut self, name: &str, address: &str) -> Result<()> {
        let name = name.trim().to_lowercase();
        let address = address.trim();
        if name.is_empty() || address.is_empty() {
            return Err(VoxmailError::Contacts(
                "name and address are required".to_string(),
            ));
        }
        self.entries.insert(name, address.to_string());
        Ok(())
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the book has no contacts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, address)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_in(dir: &tempfile::TempDir) -> ContactBook {
        ContactBook::load(&dir.path().join("contacts.json")).unwrap()
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let book = book_in(&dir);
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_and_lookup_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = book_in(&dir);
        book.add("Sarah", "sarah@example.com").unwrap();

        assert_eq!(book.lookup("sarah"), Some("sarah@example.com"));
        assert_eq!(book.lookup("SARAH"), Some("sarah@example.com"));
        assert_eq!(book.lookup("  Sarah "), Some("sarah@example.com"));
        assert_eq!(book.lookup("bob"), None);
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = book_in(&dir);
        assert!(book.add("", "x@example.com").is_err());
        assert!(book.add("bob", "   ").is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = book_in(&dir);
        book.add("bob", "old@example.com").unwrap();
        book.add("Bob", "new@example.com").unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.lookup("bob"), Some("new@example.com"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let mut book = ContactBook::load(&path).unwrap();
        book.add("sarah", "sarah@example.com").unwrap();
        book.add("bob", "bob@example.com").unwrap();
        book.save().unwrap();

        let reloaded = ContactBook::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.lookup("sarah"), Some("sarah@example.com"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, "not json at all").unwrap();

        let err = ContactBook::load(&path).unwrap_err();
        assert!(matches!(err, VoxmailError::Contacts(_)));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.json");
        let mut book = ContactBook::load(&path).unwrap();
        book.add("sarah", "sarah@example.com").unwrap();
        book.save().unwrap();
        assert!(path.exists());
    }
}
