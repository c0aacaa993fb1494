use anyhow::Result;
use serde_json::{from_str, to_string};

use crate::{contact::Contact, storage::Storage};

/// Mirrors the contact collection into a single storage slot.
pub struct Store {
    slot: String,
}

impl Store {
    pub fn new(slot: String) -> Self {
        Self { slot }
    }

    /// Missing or malformed contents yield an empty collection.
    pub fn load(&self, storage: &impl Storage) -> Vec<Contact> {
        let raw = match storage.get(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!("Failed to read contacts, starting empty: {:#}", err);

                return Vec::new();
            }
        };

        match from_str::<Vec<Contact>>(&raw) {
            Ok(contacts) => {
                tracing::debug!("Loaded {} contacts", contacts.len());

                contacts
            }
            Err(err) => {
                tracing::warn!("Discarding malformed contacts: {}", err);

                Vec::new()
            }
        }
    }

    pub fn save(&self, storage: &impl Storage, contacts: &[Contact]) -> Result<()> {
        let raw = to_string(contacts)?;

        storage.set(&self.slot, &raw)?;

        Ok(())
    }
}
