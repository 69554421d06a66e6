//! # Dismissal Records
//!
//! Durable, address-scoped markers that suppress the primary-wallet prompt.
//!
//! Stored as `dismissed-primary-prompt-<address> = "true"`. Records never expire and
//! nothing in the client clears them.

use std::sync::Arc;

use super::ClientStorage;
use crate::core::error::StorageError;

pub const DISMISSAL_KEY_PREFIX: &str = "dismissed-primary-prompt-";
const DISMISSED: &str = "true";

/// Reads and writes dismissal records through a [`ClientStorage`].
#[derive(Clone)]
pub struct DismissalStore {
    storage: Arc<dyn ClientStorage>,
}

impl DismissalStore {
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self { storage }
    }

    pub fn key_for(address: &str) -> String {
        format!("{}{}", DISMISSAL_KEY_PREFIX, address)
    }

    pub fn is_dismissed(&self, address: &str) -> Result<bool, StorageError> {
        Ok(self.storage.get(&Self::key_for(address))?.as_deref() == Some(DISMISSED))
    }

    /// Record a dismissal. Idempotent.
    pub fn dismiss(&self, address: &str) -> Result<(), StorageError> {
        self.storage.set(&Self::key_for(address), DISMISSED)
    }
}

impl std::fmt::Debug for DismissalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DismissalStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_key_format() {
        assert_eq!(DismissalStore::key_for("abc"), "dismissed-primary-prompt-abc");
    }

    #[test]
    fn test_dismissal_is_address_scoped() {
        let store = DismissalStore::new(Arc::new(MemoryStorage::new()));
        store.dismiss("walletA").unwrap();

        assert!(store.is_dismissed("walletA").unwrap());
        assert!(!store.is_dismissed("walletB").unwrap());
    }

    #[test]
    fn test_dismiss_twice_keeps_true() {
        let storage = Arc::new(MemoryStorage::new());
        let store = DismissalStore::new(storage.clone());
        store.dismiss("walletA").unwrap();
        store.dismiss("walletA").unwrap();

        assert_eq!(
            storage.get("dismissed-primary-prompt-walletA").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_other_values_are_not_dismissals() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("dismissed-primary-prompt-walletA", "false").unwrap();
        let store = DismissalStore::new(storage);
        assert!(!store.is_dismissed("walletA").unwrap());
    }
}
