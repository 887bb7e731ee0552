//! Settings store trait definition.

use super::codec::{decode_feature_list, encode_feature_list};
use super::errors::SettingsError;
use super::types::FeatureSet;

/// Read/write access to string-valued keys of one settings schema.
///
/// Only the raw accessors are required; feature-list handling is layered on
/// top through the quoting codec.
pub trait SettingsStore {
    /// The schema this store reads from.
    fn schema(&self) -> &str;

    /// Current value of `key`, with the typed empty-list literal normalized to `[]`.
    fn get_raw(&self, key: &str) -> Result<String, SettingsError>;

    /// Write `value` verbatim.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Parse the list stored under `key` into a feature set.
    fn get_feature_set(&self, key: &str) -> Result<FeatureSet, SettingsError> {
        let raw = self.get_raw(key)?;
        Ok(decode_feature_list(&raw)?.into_iter().collect())
    }

    /// Serialize `features` in the store's quoting convention and write it.
    fn set_feature_set(&self, key: &str, features: &FeatureSet) -> Result<(), SettingsError> {
        self.set_raw(key, &encode_feature_list(features.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct MemoryStore {
        value: RefCell<String>,
    }

    impl SettingsStore for MemoryStore {
        fn schema(&self) -> &str {
            "org.example"
        }

        fn get_raw(&self, _key: &str) -> Result<String, SettingsError> {
            Ok(self.value.borrow().clone())
        }

        fn set_raw(&self, _key: &str, value: &str) -> Result<(), SettingsError> {
            *self.value.borrow_mut() = value.to_string();
            Ok(())
        }
    }

    #[test]
    fn test_feature_set_round_trip_keeps_membership() {
        let store = MemoryStore {
            value: RefCell::new("['b', 'a']".to_string()),
        };
        let features = store.get_feature_set("features").unwrap();
        store.set_feature_set("features", &features).unwrap();

        let reread = store.get_feature_set("features").unwrap();
        let expected: FeatureSet = ["a", "b"].into_iter().collect();
        assert!(reread.same_members(&expected));
        assert!(store.value.borrow().contains('\''));
        assert!(!store.value.borrow().contains('"'));
    }

    #[test]
    fn test_empty_sentinel_reads_as_empty_set() {
        let store = MemoryStore {
            value: RefCell::new("@as []".to_string()),
        };
        assert!(store.get_feature_set("features").unwrap().is_empty());

        store
            .set_feature_set("features", &FeatureSet::new())
            .unwrap();
        assert_eq!(*store.value.borrow(), "[]");
    }
}
