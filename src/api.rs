//! Command-layer facade.
//!
//! The operations a chat-command or UI layer performs against the registry
//! and store, with the duplicate/not-found checks those layers expect.
//! Unlike the registry's silent idempotent create, these return errors the
//! caller can turn into a user-facing message.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::QuestError;
use crate::identifier::QuestId;
use crate::quest::definition::QuestRecord;
use crate::quest::registry::QuestRegistry;
use crate::store::QuestStore;

/// Facade combining the registry and the file store.
pub struct QuestService {
    registry: Arc<QuestRegistry>,
    store: QuestStore,
}

impl QuestService {
    pub fn new(registry: Arc<QuestRegistry>, store: QuestStore) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &QuestRegistry {
        &self.registry
    }

    pub fn store(&self) -> &QuestStore {
        &self.store
    }

    /// Create a quest from a title, failing if the derived identifier is
    /// already in use.
    pub fn create(&self, title: &str, description: Option<&str>) -> Result<QuestRecord, QuestError> {
        let id = QuestId::for_title(title);
        if self.registry.has_quest(&id) {
            return Err(QuestError::DuplicateIdentifier(id));
        }
        Ok(match description {
            Some(description) if !description.is_empty() => {
                self.registry.create_quest_described(title, description)
            }
            _ => self.registry.create_quest(title),
        })
    }

    /// Create a quest under an explicit identifier, failing if the resolved
    /// identifier is already in use.
    pub fn create_with_id(
        &self,
        id: &QuestId,
        title: &str,
        description: Option<&str>,
    ) -> Result<QuestRecord, QuestError> {
        let resolved = id.resolved();
        if self.registry.has_quest(&resolved) {
            return Err(QuestError::DuplicateIdentifier(resolved));
        }
        Ok(match description {
            Some(description) if !description.is_empty() => self
                .registry
                .create_quest_with_id_described(&resolved, title, description),
            _ => self.registry.create_quest_with_id(&resolved, title),
        })
    }

    /// Persist the quest with this title; `NotFound` when no such quest.
    pub fn save_by_title(&self, title: &str) -> Result<PathBuf, QuestError> {
        let record = self
            .registry
            .get_quest_by_title(title)
            .ok_or_else(|| QuestError::NotFound(format!("quest with title '{title}'")))?;
        self.store.save(&record)
    }

    /// Persist the quest with this identifier; `NotFound` when no such
    /// quest.
    pub fn save_by_id(&self, id: &QuestId) -> Result<PathBuf, QuestError> {
        let record = self
            .registry
            .get_quest(id)
            .ok_or_else(|| QuestError::NotFound(id.to_string()))?;
        self.store.save(&record)
    }

    /// Load a quest file and register the record, overwriting any in-memory
    /// copy (reload semantics).
    pub fn load(&self, path: impl AsRef<Path>) -> Result<QuestRecord, QuestError> {
        let record = self.store.load(path)?;
        self.registry.add_quest(record.clone());
        Ok(record)
    }

    /// Startup bulk load: every quest file under the store root, skipping
    /// individual failures. Returns the number of records loaded.
    pub fn load_all(&self) -> usize {
        self.registry.load_all(&self.store)
    }

    /// Known quest identifiers, for command autocompletion.
    pub fn quest_ids(&self) -> Vec<String> {
        self.registry
            .quest_ids()
            .iter()
            .map(QuestId::to_string)
            .collect()
    }

    /// Known quest titles, for command autocompletion.
    pub fn quest_titles(&self) -> Vec<String> {
        self.registry
            .list_quests()
            .iter()
            .map(|record| record.title().to_string())
            .collect()
    }

    /// Quest files relative to the store root, forward slashes regardless of
    /// platform, for command autocompletion.
    pub fn quest_files(&self) -> Vec<String> {
        self.store
            .enumerate()
            .iter()
            .map(|path| path.to_string_lossy().replace('\\', "/"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> QuestService {
        QuestService::new(
            Arc::new(QuestRegistry::new()),
            QuestStore::new(dir.path()),
        )
    }

    #[test]
    fn create_rejects_duplicate_titles() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        service.create("Gather Wood", Some("Chop chop")).unwrap();
        let err = service.create("Gather Wood", None).unwrap_err();
        assert!(matches!(err, QuestError::DuplicateIdentifier(_)));

        // Two titles that normalize to the same path collide.
        let err = service.create("gather WOOD", None).unwrap_err();
        assert!(matches!(err, QuestError::DuplicateIdentifier(_)));
    }

    #[test]
    fn create_with_reserved_id_collides_after_rewrite() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let id: QuestId = "engine:foo".parse().unwrap();
        let record = service.create_with_id(&id, "Foo", None).unwrap();
        assert_eq!(record.id().to_string(), "questforge:quests/foo");

        let err = service.create_with_id(&id, "Foo Again", None).unwrap_err();
        assert!(matches!(err, QuestError::DuplicateIdentifier(_)));
    }

    #[test]
    fn save_then_load_by_file() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let record = service.create("Round Trip", Some("there and back")).unwrap();
        let path = service.save_by_title("Round Trip").unwrap();

        let files = service.quest_files();
        assert_eq!(files, vec!["questforge/quests/round_trip.qst".to_string()]);

        let loaded = service.load(&path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn save_unknown_quest_is_not_found() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        assert!(matches!(
            service.save_by_title("Ghost"),
            Err(QuestError::NotFound(_))
        ));
        let id: QuestId = "questforge:quests/ghost".parse().unwrap();
        assert!(matches!(
            service.save_by_id(&id),
            Err(QuestError::NotFound(_))
        ));
    }

    #[test]
    fn startup_sequence_restores_registry() {
        let dir = TempDir::new().unwrap();
        {
            let service = service(&dir);
            service.create("First", None).unwrap();
            service.create("Second", Some("desc")).unwrap();
            service.save_by_title("First").unwrap();
            service.save_by_title("Second").unwrap();
        }

        // Fresh registry, same root: the startup bulk load restores both.
        let service = service(&dir);
        assert!(service.registry().is_empty());
        assert_eq!(service.load_all(), 2);
        assert!(service.registry().has_quest_title("First"));
        assert_eq!(
            service
                .registry()
                .get_quest_by_title("Second")
                .unwrap()
                .description(),
            "desc"
        );

        let mut titles = service.quest_titles();
        titles.sort();
        assert_eq!(titles, ["First", "Second"]);
        assert_eq!(service.quest_ids().len(), 2);
    }
}
