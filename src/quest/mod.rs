//! Quest data model, registry, and file codec.

pub mod codec;
pub mod criteria;
pub mod definition;
pub mod registry;
pub mod reward;

pub use codec::{decode_quest, encode_quest};
pub use criteria::{CriteriaData, CriteriaType};
pub use definition::{
    DEFAULT_DESCRIPTION_COLOR, DEFAULT_TITLE_COLOR, QuestCategory, QuestDifficulty, QuestRecord,
    QuestType,
};
pub use registry::QuestRegistry;
pub use reward::{RewardData, RewardType};
