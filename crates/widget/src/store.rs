//! Persistent store adapter: one named slot holding a JSON cart snapshot.
//!
//! # Implementations
//!
//! - [`FileStore`] - the slot is `<dir>/<key>.json`, replaced atomically
//! - [`MemoryStore`] - the slot lives in memory (tests, headless use)
//!
//! Loading never fails from the caller's point of view: a missing slot and
//! a slot that can't be read or parsed both come back as `None`, so a bad
//! snapshot degrades to an empty cart.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::cart::CartState;

/// Default slot name.
pub const DEFAULT_KEY: &str = "cartState";

/// Errors that can occur while writing the snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Serializing the cart failed.
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the slot failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A previous writer panicked while holding the slot.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Storage port for the cart snapshot.
pub trait CartStore {
    /// Read the snapshot, or `None` if it is missing or unreadable.
    fn load(&self) -> Option<CartState>;

    /// Overwrite the slot with `state`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the state can't be serialized or written.
    fn save(&self, state: &CartState) -> Result<(), StoreError>;
}

impl<T: CartStore + ?Sized> CartStore for Box<T> {
    fn load(&self) -> Option<CartState> {
        (**self).load()
    }

    fn save(&self, state: &CartState) -> Result<(), StoreError> {
        (**self).save(state)
    }
}

impl<T: CartStore + ?Sized> CartStore for Arc<T> {
    fn load(&self) -> Option<CartState> {
        (**self).load()
    }

    fn save(&self, state: &CartState) -> Result<(), StoreError> {
        (**self).save(state)
    }
}

/// Parse a raw snapshot, logging and discarding anything malformed.
fn parse_snapshot(raw: &str, slot: &str) -> Option<CartState> {
    match serde_json::from_str(raw) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(slot, error = %e, "Ignoring malformed cart snapshot");
            None
        }
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// Snapshot slot backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store whose slot is `<dir>/<key>.json`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl CartStore for FileStore {
    fn load(&self) -> Option<CartState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read cart snapshot");
                return None;
            }
        };
        parse_snapshot(&raw, &self.path.display().to_string())
    }

    fn save(&self, state: &CartState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(state)?;
        // Rename over the slot so readers see the old or the new snapshot, never half of one.
        let temp = self.temp_path();
        fs::write(&temp, raw)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Snapshot slot held in memory as serialized JSON.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose slot already holds `raw`.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// The raw slot contents.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Option<CartState> {
        let raw = self.raw()?;
        parse_snapshot(&raw, "memory")
    }

    fn save(&self, state: &CartState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(state)?;
        let mut slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cart_widget_core::{ItemId, Money, Quantity};

    use super::*;
    use crate::cart::CartItem;

    fn sample() -> CartState {
        let mut state = CartState {
            items: vec![
                CartItem {
                    id: ItemId::new(1),
                    title: "Shoe".to_string(),
                    image: "u".to_string(),
                    presentment_price: Money::from_minor(150_000),
                    quantity: Quantity::new(2).unwrap(),
                },
                CartItem {
                    id: ItemId::new(2),
                    title: "Sock".to_string(),
                    image: "v".to_string(),
                    presentment_price: Money::from_minor(9_900),
                    quantity: Quantity::MIN,
                },
            ],
            ..CartState::default()
        };
        state.recompute_totals(&MemoryStore::new());
        state
    }

    #[test]
    fn test_memory_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), None);

        let state = sample();
        store.save(&state).unwrap();
        assert_eq!(store.load(), Some(state));
    }

    #[test]
    fn test_memory_malformed_is_absent() {
        assert_eq!(MemoryStore::with_raw("{not json").load(), None);
        assert_eq!(MemoryStore::with_raw("").load(), None);
    }

    #[test]
    fn test_zero_quantity_snapshot_is_absent() {
        let raw = r#"{"items":[{"id":1,"title":"t","image":"i","presentment_price":100,"quantity":0}],"subtotal":0,"total":0}"#;
        assert_eq!(MemoryStore::with_raw(raw).load(), None);
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryStore::new();
        store.save(&sample()).unwrap();
        store.save(&CartState::default()).unwrap();
        assert_eq!(store.load(), Some(CartState::default()));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), DEFAULT_KEY);
        assert_eq!(store.load(), None);

        let state = sample();
        store.save(&state).unwrap();

        assert!(store.path().ends_with("cartState.json"));
        assert_eq!(store.load(), Some(state));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_file_malformed_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), DEFAULT_KEY);
        fs::write(store.path(), "[1, 2").unwrap();

        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let store: Box<dyn CartStore> = Box::new(MemoryStore::new());
        let state = sample();
        store.save(&state).unwrap();
        assert_eq!(store.load(), Some(state));
    }
}
