//! Quest Record
//!
//! The persisted quest entity: identity, metadata, criteria, rewards, and
//! presentation attributes that are carried through but not interpreted
//! here.

use serde::Serialize;

use crate::identifier::QuestId;
use crate::quest::criteria::CriteriaData;
use crate::quest::reward::RewardData;
use crate::tag::TagTree;

/// Default ARGB color for quest descriptions (light gray).
pub const DEFAULT_DESCRIPTION_COLOR: u32 = 0xFFCC_CCCC;

/// Default ARGB color for quest titles (white).
pub const DEFAULT_TITLE_COLOR: u32 = 0xFFFF_FFFF;

/// Broad grouping of a quest, for UI filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum QuestCategory {
    #[default]
    None,
    Story,
    Side,
    Exploration,
    Combat,
    Crafting,
    Seasonal,
}

impl QuestCategory {
    pub fn name(&self) -> &'static str {
        match self {
            QuestCategory::None => "NONE",
            QuestCategory::Story => "STORY",
            QuestCategory::Side => "SIDE",
            QuestCategory::Exploration => "EXPLORATION",
            QuestCategory::Combat => "COMBAT",
            QuestCategory::Crafting => "CRAFTING",
            QuestCategory::Seasonal => "SEASONAL",
        }
    }

    /// Strict lookup by stored name, used by the decoder.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "NONE" => Some(QuestCategory::None),
            "STORY" => Some(QuestCategory::Story),
            "SIDE" => Some(QuestCategory::Side),
            "EXPLORATION" => Some(QuestCategory::Exploration),
            "COMBAT" => Some(QuestCategory::Combat),
            "CRAFTING" => Some(QuestCategory::Crafting),
            "SEASONAL" => Some(QuestCategory::Seasonal),
            _ => None,
        }
    }
}

/// Difficulty rating of a quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum QuestDifficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
    Legendary,
}

impl QuestDifficulty {
    pub fn name(&self) -> &'static str {
        match self {
            QuestDifficulty::Easy => "EASY",
            QuestDifficulty::Normal => "NORMAL",
            QuestDifficulty::Hard => "HARD",
            QuestDifficulty::Expert => "EXPERT",
            QuestDifficulty::Legendary => "LEGENDARY",
        }
    }

    /// Strict lookup by stored name, used by the decoder.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "EASY" => Some(QuestDifficulty::Easy),
            "NORMAL" => Some(QuestDifficulty::Normal),
            "HARD" => Some(QuestDifficulty::Hard),
            "EXPERT" => Some(QuestDifficulty::Expert),
            "LEGENDARY" => Some(QuestDifficulty::Legendary),
            _ => None,
        }
    }
}

/// Scheduling/repetition class of a quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum QuestType {
    #[default]
    Custom,
    MainQuest,
    SideQuest,
    EventQuest,
    DailyQuest,
    WeeklyQuest,
    MonthlyQuest,
    YearlyQuest,
    RepeatableQuest,
    RepeatableDailyQuest,
    RepeatableWeeklyQuest,
    RepeatableMonthlyQuest,
    RepeatableYearlyQuest,
}

impl QuestType {
    pub fn name(&self) -> &'static str {
        match self {
            QuestType::Custom => "CUSTOM",
            QuestType::MainQuest => "MAIN_QUEST",
            QuestType::SideQuest => "SIDE_QUEST",
            QuestType::EventQuest => "EVENT_QUEST",
            QuestType::DailyQuest => "DAILY_QUEST",
            QuestType::WeeklyQuest => "WEEKLY_QUEST",
            QuestType::MonthlyQuest => "MONTHLY_QUEST",
            QuestType::YearlyQuest => "YEARLY_QUEST",
            QuestType::RepeatableQuest => "REPEATABLE_QUEST",
            QuestType::RepeatableDailyQuest => "REPEATABLE_DAILY_QUEST",
            QuestType::RepeatableWeeklyQuest => "REPEATABLE_WEEKLY_QUEST",
            QuestType::RepeatableMonthlyQuest => "REPEATABLE_MONTHLY_QUEST",
            QuestType::RepeatableYearlyQuest => "REPEATABLE_YEARLY_QUEST",
        }
    }

    /// Strict lookup by stored name, used by the decoder. Round-tripped
    /// storage is trusted; an unknown name there means a corrupt or
    /// incompatible file and must fail loudly.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CUSTOM" => Some(QuestType::Custom),
            "MAIN_QUEST" => Some(QuestType::MainQuest),
            "SIDE_QUEST" => Some(QuestType::SideQuest),
            "EVENT_QUEST" => Some(QuestType::EventQuest),
            "DAILY_QUEST" => Some(QuestType::DailyQuest),
            "WEEKLY_QUEST" => Some(QuestType::WeeklyQuest),
            "MONTHLY_QUEST" => Some(QuestType::MonthlyQuest),
            "YEARLY_QUEST" => Some(QuestType::YearlyQuest),
            "REPEATABLE_QUEST" => Some(QuestType::RepeatableQuest),
            "REPEATABLE_DAILY_QUEST" => Some(QuestType::RepeatableDailyQuest),
            "REPEATABLE_WEEKLY_QUEST" => Some(QuestType::RepeatableWeeklyQuest),
            "REPEATABLE_MONTHLY_QUEST" => Some(QuestType::RepeatableMonthlyQuest),
            "REPEATABLE_YEARLY_QUEST" => Some(QuestType::RepeatableYearlyQuest),
            _ => None,
        }
    }

    /// Lenient lookup for command input: an empty or unrecognized string
    /// resolves to [`QuestType::Custom`] instead of failing. Command
    /// arguments are less trusted than round-tripped storage, so this must
    /// stay separate from [`QuestType::from_name`].
    pub fn get(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }
}

/// A quest record: the entity held by the registry and persisted to disk.
///
/// `id` and `title` are fixed at construction; everything else mutates
/// through setters. Criteria and reward lists distinguish "never set" from
/// "set to empty", and both states survive a save/load round trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestRecord {
    id: QuestId,
    title: String,
    description: String,
    category: QuestCategory,
    difficulty: QuestDifficulty,
    quest_type: QuestType,
    criteria: Option<Vec<CriteriaData>>,
    rewards: Option<Vec<RewardData>>,
    icon: Option<TagTree>,
    background: Option<QuestId>,
    description_color: u32,
    title_color: u32,
}

impl QuestRecord {
    pub fn new(id: QuestId, title: impl Into<String>) -> Self {
        Self::with_description(id, title, "")
    }

    pub fn with_description(
        id: QuestId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            category: QuestCategory::default(),
            difficulty: QuestDifficulty::default(),
            quest_type: QuestType::default(),
            criteria: None,
            rewards: None,
            icon: None,
            background: None,
            description_color: DEFAULT_DESCRIPTION_COLOR,
            title_color: DEFAULT_TITLE_COLOR,
        }
    }

    /// Construct a record from a free-text title, deriving its canonical
    /// identifier.
    pub fn from_title(title: &str) -> Self {
        Self::new(QuestId::for_title(title), title)
    }

    pub fn id(&self) -> &QuestId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn category(&self) -> QuestCategory {
        self.category
    }

    pub fn set_category(&mut self, category: QuestCategory) {
        self.category = category;
    }

    pub fn difficulty(&self) -> QuestDifficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: QuestDifficulty) {
        self.difficulty = difficulty;
    }

    pub fn quest_type(&self) -> QuestType {
        self.quest_type
    }

    pub fn set_quest_type(&mut self, quest_type: QuestType) {
        self.quest_type = quest_type;
    }

    /// `None` means the criteria list was never set, which is distinct from
    /// an empty list.
    pub fn criteria(&self) -> Option<&[CriteriaData]> {
        self.criteria.as_deref()
    }

    pub fn set_criteria(&mut self, criteria: Vec<CriteriaData>) {
        self.criteria = Some(criteria);
    }

    pub fn rewards(&self) -> Option<&[RewardData]> {
        self.rewards.as_deref()
    }

    pub fn set_rewards(&mut self, rewards: Vec<RewardData>) {
        self.rewards = Some(rewards);
    }

    /// The icon is an opaque sub-tree owned by the rendering layer; it is
    /// carried through encode/decode untouched.
    pub fn icon(&self) -> Option<&TagTree> {
        self.icon.as_ref()
    }

    pub fn set_icon(&mut self, icon: TagTree) {
        self.icon = Some(icon);
    }

    pub fn background(&self) -> Option<&QuestId> {
        self.background.as_ref()
    }

    pub fn set_background(&mut self, background: QuestId) {
        self.background = Some(background);
    }

    pub fn description_color(&self) -> u32 {
        self.description_color
    }

    pub fn set_description_color(&mut self, color: u32) {
        self.description_color = color;
    }

    pub fn title_color(&self) -> u32 {
        self.title_color
    }

    pub fn set_title_color(&mut self, color: u32) {
        self.title_color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_uses_defaults() {
        let record = QuestRecord::from_title("First Steps");
        assert_eq!(record.id().to_string(), "questforge:quests/first_steps");
        assert_eq!(record.title(), "First Steps");
        assert_eq!(record.description(), "");
        assert_eq!(record.category(), QuestCategory::None);
        assert_eq!(record.difficulty(), QuestDifficulty::Normal);
        assert_eq!(record.quest_type(), QuestType::Custom);
        assert!(record.criteria().is_none());
        assert!(record.rewards().is_none());
        assert_eq!(record.description_color(), DEFAULT_DESCRIPTION_COLOR);
        assert_eq!(record.title_color(), DEFAULT_TITLE_COLOR);
    }

    #[test]
    fn empty_criteria_differs_from_unset() {
        let mut record = QuestRecord::from_title("Empty Hands");
        assert!(record.criteria().is_none());
        record.set_criteria(Vec::new());
        assert_eq!(record.criteria(), Some(&[][..]));
    }

    #[test]
    fn lenient_type_lookup_defaults_to_custom() {
        assert_eq!(QuestType::get(""), QuestType::Custom);
        assert_eq!(QuestType::get("bogus"), QuestType::Custom);
        assert_eq!(QuestType::get("DAILY_QUEST"), QuestType::DailyQuest);
    }

    #[test]
    fn strict_type_lookup_rejects_unknown_names() {
        assert_eq!(QuestType::from_name("MAIN_QUEST"), Some(QuestType::MainQuest));
        assert_eq!(QuestType::from_name("bogus"), None);
        assert_eq!(QuestType::from_name(""), None);
    }

    #[test]
    fn enum_names_round_trip() {
        for quest_type in [
            QuestType::Custom,
            QuestType::MainQuest,
            QuestType::RepeatableYearlyQuest,
        ] {
            assert_eq!(QuestType::from_name(quest_type.name()), Some(quest_type));
        }
        for category in [QuestCategory::None, QuestCategory::Seasonal] {
            assert_eq!(QuestCategory::from_name(category.name()), Some(category));
        }
        for difficulty in [QuestDifficulty::Easy, QuestDifficulty::Legendary] {
            assert_eq!(QuestDifficulty::from_name(difficulty.name()), Some(difficulty));
        }
    }
}
