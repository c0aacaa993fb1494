use std::io::{ErrorKind, Write};

use anyhow::{Context, Result};
use cap_std::fs::Dir;
use hashbrown::HashMap;
use parking_lot::Mutex;

/// Named slots each holding a single string value.
pub trait Storage: Send {
    fn get(&self, slot: &str) -> Result<Option<String>>;

    fn set(&self, slot: &str, val: &str) -> Result<()>;

    fn remove(&self, slot: &str) -> Result<()>;
}

/// Stores every slot as a file of the same name.
pub struct DirStorage {
    dir: Dir,
}

impl DirStorage {
    pub fn new(dir: Dir) -> Self {
        Self { dir }
    }
}

impl Storage for DirStorage {
    fn get(&self, slot: &str) -> Result<Option<String>> {
        match self.dir.read_to_string(slot) {
            Ok(val) => Ok(Some(val)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("Failed to read slot {}", slot)),
        }
    }

    fn set(&self, slot: &str, val: &str) -> Result<()> {
        let new_slot = format!("{}.new", slot);

        let mut file = self.dir.create(&new_slot)?;
        file.write_all(val.as_bytes())?;
        self.dir
            .rename(&new_slot, &self.dir, slot)
            .with_context(|| format!("Failed to write slot {}", slot))?;

        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<()> {
        match self.dir.remove_file(slot) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Failed to remove slot {}", slot)),
        }
    }
}

#[derive(Default)]
pub struct MemoryStorage(Mutex<HashMap<String, String>>);

impl Storage for MemoryStorage {
    fn get(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.0.lock().get(slot).cloned())
    }

    fn set(&self, slot: &str, val: &str) -> Result<()> {
        self.0.lock().insert(slot.to_owned(), val.to_owned());

        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<()> {
        self.0.lock().remove(slot);

        Ok(())
    }
}

/// Reads from the wrapped storage but rejects every write, like a medium which has run out of space.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct FailingStorage(pub MemoryStorage);

#[cfg(test)]
impl Storage for FailingStorage {
    fn get(&self, slot: &str) -> Result<Option<String>> {
        self.0.get(slot)
    }

    fn set(&self, slot: &str, _val: &str) -> Result<()> {
        Err(anyhow::anyhow!("Quota exceeded writing slot {}", slot))
    }

    fn remove(&self, slot: &str) -> Result<()> {
        Err(anyhow::anyhow!("Quota exceeded removing slot {}", slot))
    }
}

impl<S> Storage for &'_ S
where
    S: Storage + Sync,
{
    fn get(&self, slot: &str) -> Result<Option<String>> {
        (**self).get(slot)
    }

    fn set(&self, slot: &str, val: &str) -> Result<()> {
        (**self).set(slot, val)
    }

    fn remove(&self, slot: &str) -> Result<()> {
        (**self).remove(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cap_std::ambient_authority;
    use tempfile::tempdir;

    #[test]
    fn dir_storage_overwrites_and_removes_slots() {
        let temp_dir = tempdir().unwrap();
        let dir = Dir::open_ambient_dir(temp_dir.path(), ambient_authority()).unwrap();
        let storage = DirStorage::new(dir);

        assert_eq!(storage.get("theme").unwrap(), None);

        storage.set("theme", "dark").unwrap();
        storage.set("theme", "light").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("light"));
        assert!(!temp_dir.path().join("theme.new").exists());

        storage.remove("theme").unwrap();
        storage.remove("theme").unwrap();
        assert_eq!(storage.get("theme").unwrap(), None);
    }

    #[test]
    fn memory_storage_behaves_like_slots() {
        let storage = MemoryStorage::default();

        storage.set("contacts", "[]").unwrap();
        assert_eq!(storage.get("contacts").unwrap().as_deref(), Some("[]"));

        storage.remove("contacts").unwrap();
        assert_eq!(storage.get("contacts").unwrap(), None);
    }
}
