use anyhow::Result;
use serde::Serialize;

use crate::storage::Storage;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything but `dark` selects the default theme.
    pub fn read(storage: &impl Storage, slot: &str) -> Self {
        match storage.get(slot) {
            Ok(Some(val)) if val == "dark" => Self::Dark,
            Ok(_) => Self::Light,
            Err(err) => {
                tracing::warn!("Failed to read theme: {:#}", err);

                Self::Light
            }
        }
    }

    pub fn write(self, storage: &impl Storage, slot: &str) -> Result<()> {
        match self {
            Self::Dark => storage.set(slot, "dark"),
            Self::Light => storage.remove(slot),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}
