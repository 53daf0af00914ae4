//! Quest Registry
//!
//! The in-memory source of truth: at most one quest record per identifier.
//! Lookups never fail; absence is an `Option`, and duplicate creation hands
//! back the existing record untouched.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{info, warn};

use crate::identifier::QuestId;
use crate::quest::definition::QuestRecord;
use crate::store::QuestStore;

/// Registry for all quest records.
///
/// The map is guarded by a single `RwLock` so create/add/get may be called
/// from multiple threads; all mutation goes through it.
#[derive(Default)]
pub struct QuestRegistry {
    quests: RwLock<HashMap<QuestId, QuestRecord>>,
}

impl QuestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a quest from a free-text title, deriving its canonical
    /// identifier. If a record with that identifier already exists it is
    /// returned unchanged; creation never overwrites, so re-running a
    /// create command is always safe.
    pub fn create_quest(&self, title: &str) -> QuestRecord {
        self.create_or_get(QuestId::for_title(title), title, "")
    }

    pub fn create_quest_described(&self, title: &str, description: &str) -> QuestRecord {
        self.create_or_get(QuestId::for_title(title), title, description)
    }

    /// Create a quest under an explicit identifier. The reserved-namespace
    /// rewrite is applied here, once; identifiers already in the registry or
    /// read back from storage are never re-resolved.
    pub fn create_quest_with_id(&self, id: &QuestId, title: &str) -> QuestRecord {
        self.create_or_get(id.resolved(), title, "")
    }

    pub fn create_quest_with_id_described(
        &self,
        id: &QuestId,
        title: &str,
        description: &str,
    ) -> QuestRecord {
        self.create_or_get(id.resolved(), title, description)
    }

    fn create_or_get(&self, id: QuestId, title: &str, description: &str) -> QuestRecord {
        let mut quests = self.write_lock();
        quests
            .entry(id.clone())
            .or_insert_with(|| QuestRecord::with_description(id, title, description))
            .clone()
    }

    /// Unconditional insert/overwrite keyed by the record's own identifier.
    /// Used when rehydrating from storage, where overwrite is correct.
    pub fn add_quest(&self, record: QuestRecord) {
        self.write_lock().insert(record.id().clone(), record);
    }

    pub fn get_quest(&self, id: &QuestId) -> Option<QuestRecord> {
        self.read_lock().get(id).cloned()
    }

    /// Title lookup derives the canonical identifier, then performs the same
    /// map lookup as an id lookup; there is no separate title index.
    pub fn get_quest_by_title(&self, title: &str) -> Option<QuestRecord> {
        self.get_quest(&QuestId::for_title(title))
    }

    pub fn has_quest(&self, id: &QuestId) -> bool {
        self.read_lock().contains_key(id)
    }

    pub fn has_quest_title(&self, title: &str) -> bool {
        self.has_quest(&QuestId::for_title(title))
    }

    /// Mutate a stored record in place. Returns false when no record with
    /// that identifier exists.
    pub fn update_quest(&self, id: &QuestId, f: impl FnOnce(&mut QuestRecord)) -> bool {
        match self.write_lock().get_mut(id) {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }

    /// All records, in unspecified order.
    pub fn list_quests(&self) -> Vec<QuestRecord> {
        self.read_lock().values().cloned().collect()
    }

    pub fn quest_ids(&self) -> Vec<QuestId> {
        self.read_lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_lock().is_empty()
    }

    /// Load every quest file under the store's root into the registry.
    /// Individual file failures are logged and skipped so one bad file
    /// cannot abort startup. Returns the number of records loaded.
    pub fn load_all(&self, store: &QuestStore) -> usize {
        let files = store.enumerate();
        if files.is_empty() {
            info!("No quest files found in {:?}", store.root());
            return 0;
        }

        info!("Found {} quest files ...", files.len());
        let mut count = 0;
        for file in files {
            match store.load(&file) {
                Ok(record) => {
                    self.add_quest(record);
                    count += 1;
                }
                Err(e) => warn!("Skipping quest file {:?}: {}", file, e),
            }
        }
        info!("Loaded {} quest records", count);
        count
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, HashMap<QuestId, QuestRecord>> {
        self.quests.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<QuestId, QuestRecord>> {
        self.quests.write().unwrap_or_else(|e| e.into_inner())
    }
}
