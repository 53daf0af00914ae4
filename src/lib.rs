//! Quest registry and file persistence.
//!
//! An in-memory keyed store of quest records, the identifier-normalization
//! rules that derive stable record keys from human-entered titles, and the
//! on-disk layout that makes records durable and re-loadable. The game
//! engine around it (commands, permissions, rendering) is a caller:
//!
//! ```
//! use questforge::{QuestRegistry, QuestService, QuestStore};
//! use std::sync::Arc;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let registry = Arc::new(QuestRegistry::new());
//! let service = QuestService::new(registry.clone(), QuestStore::new(dir.path()));
//!
//! let quest = service.create("Defeat the Dragon!", None).unwrap();
//! assert_eq!(quest.id().to_string(), "questforge:quests/defeat_the_dragon");
//!
//! service.save_by_title("Defeat the Dragon!").unwrap();
//! assert_eq!(service.load_all(), 1);
//! ```

pub mod api;
pub mod error;
pub mod identifier;
pub mod quest;
pub mod store;
pub mod tag;

pub use api::QuestService;
pub use error::QuestError;
pub use identifier::{QUEST_NAMESPACE, QuestId, RESERVED_NAMESPACE, normalize_title};
pub use quest::{
    CriteriaData, CriteriaType, QuestCategory, QuestDifficulty, QuestRecord, QuestRegistry,
    QuestType, RewardData, RewardType,
};
pub use store::{QUEST_FILE_EXTENSION, QuestStore};
pub use tag::{Tag, TagTree};
