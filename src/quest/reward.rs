//! Quest rewards.
//!
//! Like criteria, these are structural payloads; handing them out is the
//! engine's job.

use serde::Serialize;

use crate::identifier::QuestId;

/// Kind of reward granted on completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RewardType {
    #[default]
    Custom,
    Experience,
    Loot,
    Recipe,
    Function,
}

impl RewardType {
    pub fn name(&self) -> &'static str {
        match self {
            RewardType::Custom => "CUSTOM",
            RewardType::Experience => "EXPERIENCE",
            RewardType::Loot => "LOOT",
            RewardType::Recipe => "RECIPE",
            RewardType::Function => "FUNCTION",
        }
    }

    /// Strict lookup by stored name, used by the decoder.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CUSTOM" => Some(RewardType::Custom),
            "EXPERIENCE" => Some(RewardType::Experience),
            "LOOT" => Some(RewardType::Loot),
            "RECIPE" => Some(RewardType::Recipe),
            "FUNCTION" => Some(RewardType::Function),
            _ => None,
        }
    }
}

/// A reward attached to a quest record: an experience amount, loot-table
/// references, recipe unlocks, and an optional function to invoke.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RewardData {
    reward_type: RewardType,
    experience: i32,
    loot: Vec<QuestId>,
    recipes: Vec<QuestId>,
    function: Option<QuestId>,
}

impl RewardData {
    pub fn new(reward_type: RewardType) -> Self {
        Self {
            reward_type,
            ..Self::default()
        }
    }

    pub fn reward_type(&self) -> RewardType {
        self.reward_type
    }

    pub fn set_reward_type(&mut self, reward_type: RewardType) {
        self.reward_type = reward_type;
    }

    pub fn experience(&self) -> i32 {
        self.experience
    }

    pub fn set_experience(&mut self, experience: i32) {
        self.experience = experience;
    }

    pub fn loot(&self) -> &[QuestId] {
        &self.loot
    }

    pub fn set_loot(&mut self, loot: Vec<QuestId>) {
        self.loot = loot;
    }

    pub fn recipes(&self) -> &[QuestId] {
        &self.recipes
    }

    pub fn set_recipes(&mut self, recipes: Vec<QuestId>) {
        self.recipes = recipes;
    }

    pub fn function(&self) -> Option<&QuestId> {
        self.function.as_ref()
    }

    pub fn set_function(&mut self, function: QuestId) {
        self.function = Some(function);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty_custom() {
        let reward = RewardData::default();
        assert_eq!(reward.reward_type(), RewardType::Custom);
        assert_eq!(reward.experience(), 0);
        assert!(reward.loot().is_empty());
        assert!(reward.recipes().is_empty());
        assert!(reward.function().is_none());
    }

    #[test]
    fn type_names_round_trip() {
        for kind in [
            RewardType::Custom,
            RewardType::Experience,
            RewardType::Loot,
            RewardType::Recipe,
            RewardType::Function,
        ] {
            assert_eq!(RewardType::from_name(kind.name()), Some(kind));
        }
        assert_eq!(RewardType::from_name("bogus"), None);
    }
}
