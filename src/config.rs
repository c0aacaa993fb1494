use std::io::ErrorKind;
use std::time::Duration;

use anyhow::{Context, Result};
use cap_std::fs::Dir;
use serde::Deserialize;
use toml::from_str;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub message_duration_ms: u64,
    pub contacts_slot: String,
    pub theme_slot: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message_duration_ms: 2000,
            contacts_slot: "contacts".to_owned(),
            theme_slot: "theme".to_owned(),
        }
    }
}

impl Config {
    /// Reads `phonebook.toml` if present, falling back to the defaults otherwise.
    pub fn read(dir: &Dir) -> Result<Self> {
        let val = match dir.read_to_string("phonebook.toml") {
            Ok(contents) => from_str(&contents).context("Failed to parse phonebook.toml")?,
            Err(err) if err.kind() == ErrorKind::NotFound => Default::default(),
            Err(err) => return Err(err).context("Failed to read phonebook.toml"),
        };

        Ok(val)
    }

    pub fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::write;

    use cap_std::ambient_authority;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let dir = Dir::open_ambient_dir(temp_dir.path(), ambient_authority()).unwrap();

        let config = Config::read(&dir).unwrap();

        assert_eq!(config.message_duration(), Duration::from_secs(2));
        assert_eq!(config.contacts_slot, "contacts");
        assert_eq!(config.theme_slot, "theme");
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let temp_dir = tempdir().unwrap();
        write(
            temp_dir.path().join("phonebook.toml"),
            "message_duration_ms = 500\ncontacts_slot = \"phonebook_contacts\"\n",
        )
        .unwrap();
        let dir = Dir::open_ambient_dir(temp_dir.path(), ambient_authority()).unwrap();

        let config = Config::read(&dir).unwrap();

        assert_eq!(config.message_duration(), Duration::from_millis(500));
        assert_eq!(config.contacts_slot, "phonebook_contacts");
        assert_eq!(config.theme_slot, "theme");
    }
}
