//! Quest completion criteria.
//!
//! Structural payloads only; evaluating them against game events belongs to
//! the quest-tracking engine, not this crate.

use serde::Serialize;

use crate::identifier::QuestId;

/// Kind of completion criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CriteriaType {
    #[default]
    Custom,
    CollectItem,
    KillEntity,
    ReachLocation,
    TalkToNpc,
}

impl CriteriaType {
    pub fn name(&self) -> &'static str {
        match self {
            CriteriaType::Custom => "CUSTOM",
            CriteriaType::CollectItem => "COLLECT_ITEM",
            CriteriaType::KillEntity => "KILL_ENTITY",
            CriteriaType::ReachLocation => "REACH_LOCATION",
            CriteriaType::TalkToNpc => "TALK_TO_NPC",
        }
    }

    /// Strict lookup by stored name, used by the decoder.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CUSTOM" => Some(CriteriaType::Custom),
            "COLLECT_ITEM" => Some(CriteriaType::CollectItem),
            "KILL_ENTITY" => Some(CriteriaType::KillEntity),
            "REACH_LOCATION" => Some(CriteriaType::ReachLocation),
            "TALK_TO_NPC" => Some(CriteriaType::TalkToNpc),
            _ => None,
        }
    }
}

/// A single completion criterion attached to a quest record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriteriaData {
    criteria_type: CriteriaType,
    /// Target entity/item/location id, when the criteria type needs one.
    target: Option<QuestId>,
    /// Number of times the criterion must be met.
    count: i32,
}

impl CriteriaData {
    pub fn new(criteria_type: CriteriaType) -> Self {
        Self {
            criteria_type,
            target: None,
            count: 1,
        }
    }

    pub fn criteria_type(&self) -> CriteriaType {
        self.criteria_type
    }

    pub fn target(&self) -> Option<&QuestId> {
        self.target.as_ref()
    }

    pub fn set_target(&mut self, target: QuestId) {
        self.target = Some(target);
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn set_count(&mut self, count: i32) {
        self.count = count;
    }
}

impl Default for CriteriaData {
    fn default() -> Self {
        Self::new(CriteriaType::Custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_custom_single_count() {
        let criteria = CriteriaData::default();
        assert_eq!(criteria.criteria_type(), CriteriaType::Custom);
        assert!(criteria.target().is_none());
        assert_eq!(criteria.count(), 1);
    }

    #[test]
    fn type_names_round_trip() {
        for kind in [
            CriteriaType::Custom,
            CriteriaType::CollectItem,
            CriteriaType::KillEntity,
            CriteriaType::ReachLocation,
            CriteriaType::TalkToNpc,
        ] {
            assert_eq!(CriteriaType::from_name(kind.name()), Some(kind));
        }
        assert_eq!(CriteriaType::from_name("bogus"), None);
    }
}
