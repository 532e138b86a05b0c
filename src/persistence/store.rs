//! Key-value stores for the persisted session record.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

/// Durable string store (localStorage semantics). No transactions; last writer wins.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// In-memory store. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> { Ok(self.items.borrow().get(key).cloned()) }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileStore;

#[cfg(feature = "native")]
mod file {
    use super::KeyValueStore;
    use crate::error::{DAppKitError, Result};
    use std::path::{Path, PathBuf};

    /// One file per key under a data directory.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

        /// `$DAPPKIT_ROOT/<app>/data`, else the platform data dir.
        pub fn for_app(app: &str) -> Self {
            let root = std::env::var("DAPPKIT_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")));
            Self::new(root.join(app).join("data"))
        }

        pub fn dir(&self) -> &Path { &self.dir }

        fn path_for(&self, key: &str) -> PathBuf {
            let name: String = key
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
                .collect();
            self.dir.join(format!("{name}.json"))
        }
    }

    impl KeyValueStore for FileStore {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            let path = self.path_for(key);
            if !path.exists() {
                return Ok(None);
            }
            std::fs::read_to_string(&path)
                .map(Some)
                .map_err(|e| DAppKitError::Storage(format!("read {}: {e}", path.display())))
        }

        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            std::fs::create_dir_all(&self.dir).map_err(|e| DAppKitError::Storage(format!("mkdir: {e}")))?;
            let path = self.path_for(key);
            std::fs::write(&path, value).map_err(|e| DAppKitError::Storage(format!("write {}: {e}", path.display())))
        }

        fn remove_item(&self, key: &str) -> Result<()> {
            let path = self.path_for(key);
            match std::fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(DAppKitError::Storage(format!("remove {}: {e}", path.display()))),
            }
        }
    }
}
