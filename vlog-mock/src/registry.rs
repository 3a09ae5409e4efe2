//! The process-wide outcome registry.
//!
//! A single [`OutcomeRegistry`] is created at startup and shared by every
//! call through an `Arc`. Entries are only ever inserted or overwritten; they
//! live until the process exits.

use std::collections::HashMap;

use parking_lot::RwLock;
use vlog_mock_core::{ConfigKey, Outcome};

/// What the registry holds for a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyState {
    /// Nothing has been configured at all.
    Empty,
    /// Other keys are configured, this one is not.
    Missing,
    Found(Outcome),
}

/// Mapping from `(vin, api)` to the outcome the mock reports.
///
/// All access goes through one `RwLock`. Guards are never held across an
/// `.await`, and a batch is inserted under a single write guard so readers
/// see either none or all of it.
#[derive(Debug, Default)]
pub struct OutcomeRegistry {
    entries: RwLock<HashMap<ConfigKey, Outcome>>,
}

impl OutcomeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the outcome for `key`.
    pub fn set(&self, key: ConfigKey, outcome: Outcome) {
        self.entries.write().insert(key, outcome);
    }

    /// Insert a whole batch atomically with respect to readers. Returns the
    /// number of entries written; later duplicates in the batch win.
    pub fn set_batch<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (ConfigKey, Outcome)>,
    {
        let mut guard = self.entries.write();
        let mut written = 0;
        for (key, outcome) in entries {
            guard.insert(key, outcome);
            written += 1;
        }
        written
    }

    pub fn lookup(&self, key: &ConfigKey) -> Option<Outcome> {
        self.entries.read().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Check emptiness and look up `key` under the same read guard.
    pub fn key_state(&self, key: &ConfigKey) -> KeyState {
        let entries = self.entries.read();
        if entries.is_empty() {
            return KeyState::Empty;
        }
        match entries.get(key) {
            Some(outcome) => KeyState::Found(outcome.clone()),
            None => KeyState::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vlog_mock_core::Code;

    fn key(vin: &str, api: &str) -> ConfigKey {
        ConfigKey::new(vin, api)
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = OutcomeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.key_state(&key("VIN1", "GetLogSettings")), KeyState::Empty);
    }

    #[test]
    fn test_set_and_lookup() {
        let registry = OutcomeRegistry::new();
        registry.set(key("VIN1", "GetLogSettings"), Outcome::Success);

        assert_eq!(registry.lookup(&key("VIN1", "GetLogSettings")), Some(Outcome::Success));
        assert_eq!(registry.lookup(&key("VIN1", "GetAttachmentParameters")), None);
        assert_eq!(registry.key_state(&key("VIN2", "GetLogSettings")), KeyState::Missing);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let registry = OutcomeRegistry::new();
        registry.set(key("VIN1", "GetLogSettings"), Outcome::Success);
        registry.set(
            key("VIN1", "GetLogSettings"),
            Outcome::from_code(Code::Unavailable, ""),
        );

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.key_state(&key("VIN1", "GetLogSettings")),
            KeyState::Found(Outcome::from_code(Code::Unavailable, ""))
        );
    }

    #[test]
    fn test_set_batch_counts_and_last_duplicate_wins() {
        let registry = OutcomeRegistry::new();
        let written = registry.set_batch(vec![
            (key("VIN1", "a"), Outcome::Success),
            (key("VIN2", "a"), Outcome::Success),
            (key("VIN1", "a"), Outcome::from_code(Code::Internal, "")),
        ]);

        assert_eq!(written, 3);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.lookup(&key("VIN1", "a")),
            Some(Outcome::from_code(Code::Internal, ""))
        );
    }

    #[test]
    fn test_concurrent_disjoint_batches_keep_every_write() {
        let registry = Arc::new(OutcomeRegistry::new());

        std::thread::scope(|scope| {
            for writer in 0..4 {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    let batch = (0..250)
                        .map(|i| (key(&format!("VIN-{writer}-{i}"), "GetLogSettings"), Outcome::Success))
                        .collect::<Vec<_>>();
                    registry.set_batch(batch);
                });
            }
        });

        assert_eq!(registry.len(), 1000);
        assert_eq!(
            registry.lookup(&key("VIN-3-249", "GetLogSettings")),
            Some(Outcome::Success)
        );
    }

    #[test]
    fn test_readers_never_see_partial_batch() {
        let registry = Arc::new(OutcomeRegistry::new());
        let batch_size = 64;

        std::thread::scope(|scope| {
            let writer = Arc::clone(&registry);
            scope.spawn(move || {
                for round in 0..50 {
                    let batch = (0..batch_size)
                        .map(|i| (key(&format!("VIN-{round}-{i}"), "api"), Outcome::Success))
                        .collect::<Vec<_>>();
                    writer.set_batch(batch);
                }
            });

            let reader = Arc::clone(&registry);
            scope.spawn(move || {
                for _ in 0..500 {
                    assert_eq!(reader.len() % batch_size, 0);
                }
            });
        });

        assert_eq!(registry.len(), 50 * batch_size);
    }
}
