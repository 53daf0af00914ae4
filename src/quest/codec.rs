//! Encoder/decoder between quest records and tag trees.
//!
//! Field presence is conditional: anything unset on the in-memory record is
//! omitted from the tree instead of being written as a zero/empty
//! placeholder, and decoding only touches the fields that are present.
//!
//! Known quirk, kept for file compatibility: the two color fields are
//! written only when non-zero, so a color deliberately set to zero reads
//! back as the constructor default.

use crate::error::QuestError;
use crate::identifier::QuestId;
use crate::quest::criteria::{CriteriaData, CriteriaType};
use crate::quest::definition::{QuestCategory, QuestDifficulty, QuestRecord, QuestType};
use crate::quest::reward::{RewardData, RewardType};
use crate::tag::TagTree;

pub const BACKGROUND_TAG: &str = "Background";
pub const CATEGORY_TAG: &str = "Category";
pub const COUNT_TAG: &str = "Count";
pub const CRITERIA_TAG: &str = "Criterias";
pub const DESCRIPTION_COLOR_TAG: &str = "DescriptionColor";
pub const DESCRIPTION_TAG: &str = "Description";
pub const DIFFICULTY_TAG: &str = "Difficulty";
pub const EXPERIENCE_TAG: &str = "Experience";
pub const FUNCTION_TAG: &str = "Function";
pub const ICON_TAG: &str = "Icon";
pub const ID_TAG: &str = "Id";
pub const LOOT_TAG: &str = "Loot";
pub const RECIPES_TAG: &str = "Recipes";
pub const REWARDS_TAG: &str = "Rewards";
pub const TARGET_TAG: &str = "Target";
pub const TITLE_COLOR_TAG: &str = "TitleColor";
pub const TITLE_TAG: &str = "Title";
pub const TYPE_TAG: &str = "Type";

/// Encode a quest record into a tag tree.
pub fn encode_quest(record: &QuestRecord) -> TagTree {
    let mut tree = TagTree::new();
    tree.put_string(ID_TAG, record.id().to_string());
    tree.put_string(TITLE_TAG, record.title());
    tree.put_string(DESCRIPTION_TAG, record.description());

    tree.put_string(CATEGORY_TAG, record.category().name());
    tree.put_string(DIFFICULTY_TAG, record.difficulty().name());
    tree.put_string(TYPE_TAG, record.quest_type().name());

    if let Some(criteria) = record.criteria() {
        tree.put_list(CRITERIA_TAG, criteria.iter().map(encode_criteria).collect());
    }
    if let Some(rewards) = record.rewards() {
        tree.put_list(REWARDS_TAG, rewards.iter().map(encode_reward).collect());
    }

    if let Some(icon) = record.icon() {
        tree.put_tree(ICON_TAG, icon.clone());
    }
    if let Some(background) = record.background() {
        tree.put_string(BACKGROUND_TAG, background.to_string());
    }
    if record.description_color() != 0 {
        tree.put_int(DESCRIPTION_COLOR_TAG, record.description_color() as i64);
    }
    if record.title_color() != 0 {
        tree.put_int(TITLE_COLOR_TAG, record.title_color() as i64);
    }

    tree
}

/// Decode a quest record from a tag tree. The identifier, title, and
/// description are mandatory; everything else keeps the constructor default
/// when its field is absent.
pub fn decode_quest(tree: &TagTree) -> Result<QuestRecord, QuestError> {
    let id: QuestId = mandatory_string(tree, ID_TAG)?
        .parse()
        .map_err(|e| QuestError::MalformedFile(format!("bad quest id: {e}")))?;
    let title = mandatory_string(tree, TITLE_TAG)?;
    let description = mandatory_string(tree, DESCRIPTION_TAG)?;
    let mut record = QuestRecord::with_description(id, title, description);

    if let Some(name) = tree.get_string(CATEGORY_TAG) {
        let category = QuestCategory::from_name(name)
            .ok_or_else(|| QuestError::MalformedFile(format!("unknown category '{name}'")))?;
        record.set_category(category);
    }
    if let Some(name) = tree.get_string(DIFFICULTY_TAG) {
        let difficulty = QuestDifficulty::from_name(name)
            .ok_or_else(|| QuestError::MalformedFile(format!("unknown difficulty '{name}'")))?;
        record.set_difficulty(difficulty);
    }
    if let Some(name) = tree.get_string(TYPE_TAG) {
        let quest_type = QuestType::from_name(name)
            .ok_or_else(|| QuestError::MalformedFile(format!("unknown quest type '{name}'")))?;
        record.set_quest_type(quest_type);
    }

    if let Some(entries) = tree.get_list(CRITERIA_TAG) {
        let criteria = entries
            .iter()
            .map(decode_criteria)
            .collect::<Result<Vec<_>, _>>()?;
        record.set_criteria(criteria);
    }
    if let Some(entries) = tree.get_list(REWARDS_TAG) {
        let rewards = entries
            .iter()
            .map(decode_reward)
            .collect::<Result<Vec<_>, _>>()?;
        record.set_rewards(rewards);
    }

    if let Some(icon) = tree.get_tree(ICON_TAG) {
        record.set_icon(icon.clone());
    }
    if let Some(background) = tree.get_string(BACKGROUND_TAG) {
        let background: QuestId = background
            .parse()
            .map_err(|e| QuestError::MalformedFile(format!("bad background id: {e}")))?;
        record.set_background(background);
    }
    if let Some(color) = tree.get_int(DESCRIPTION_COLOR_TAG) {
        record.set_description_color(color as u32);
    }
    if let Some(color) = tree.get_int(TITLE_COLOR_TAG) {
        record.set_title_color(color as u32);
    }

    Ok(record)
}

fn encode_criteria(criteria: &CriteriaData) -> TagTree {
    let mut tree = TagTree::new();
    tree.put_string(TYPE_TAG, criteria.criteria_type().name());
    tree.put_int(COUNT_TAG, criteria.count() as i64);
    if let Some(target) = criteria.target() {
        tree.put_string(TARGET_TAG, target.to_string());
    }
    tree
}

fn decode_criteria(tree: &TagTree) -> Result<CriteriaData, QuestError> {
    let name = mandatory_string(tree, TYPE_TAG)?;
    let criteria_type = CriteriaType::from_name(name)
        .ok_or_else(|| QuestError::MalformedFile(format!("unknown criteria type '{name}'")))?;

    let mut criteria = CriteriaData::new(criteria_type);
    if let Some(count) = tree.get_int(COUNT_TAG) {
        criteria.set_count(count as i32);
    }
    if let Some(target) = tree.get_string(TARGET_TAG) {
        let target: QuestId = target
            .parse()
            .map_err(|e| QuestError::MalformedFile(format!("bad criteria target: {e}")))?;
        criteria.set_target(target);
    }
    Ok(criteria)
}

fn encode_reward(reward: &RewardData) -> TagTree {
    let mut tree = TagTree::new();
    tree.put_string(TYPE_TAG, reward.reward_type().name());
    if reward.experience() != 0 {
        tree.put_int(EXPERIENCE_TAG, reward.experience() as i64);
    }
    if !reward.loot().is_empty() {
        tree.put_list(LOOT_TAG, encode_id_list(reward.loot()));
    }
    if !reward.recipes().is_empty() {
        tree.put_list(RECIPES_TAG, encode_id_list(reward.recipes()));
    }
    if let Some(function) = reward.function() {
        tree.put_string(FUNCTION_TAG, function.to_string());
    }
    tree
}

fn decode_reward(tree: &TagTree) -> Result<RewardData, QuestError> {
    let name = mandatory_string(tree, TYPE_TAG)?;
    let reward_type = RewardType::from_name(name)
        .ok_or_else(|| QuestError::MalformedFile(format!("unknown reward type '{name}'")))?;

    let mut reward = RewardData::new(reward_type);
    if let Some(experience) = tree.get_int(EXPERIENCE_TAG) {
        reward.set_experience(experience as i32);
    }
    if let Some(entries) = tree.get_list(LOOT_TAG) {
        reward.set_loot(decode_id_list(entries)?);
    }
    if let Some(entries) = tree.get_list(RECIPES_TAG) {
        reward.set_recipes(decode_id_list(entries)?);
    }
    if let Some(function) = tree.get_string(FUNCTION_TAG) {
        let function: QuestId = function
            .parse()
            .map_err(|e| QuestError::MalformedFile(format!("bad reward function: {e}")))?;
        reward.set_function(function);
    }
    Ok(reward)
}

// Identifier collections are stored as lists of single-field sub-trees,
// since the tag format only nests trees inside lists.
fn encode_id_list(ids: &[QuestId]) -> Vec<TagTree> {
    ids.iter()
        .map(|id| {
            let mut entry = TagTree::new();
            entry.put_string(ID_TAG, id.to_string());
            entry
        })
        .collect()
}

fn decode_id_list(entries: &[TagTree]) -> Result<Vec<QuestId>, QuestError> {
    entries
        .iter()
        .map(|entry| {
            mandatory_string(entry, ID_TAG)?
                .parse()
                .map_err(|e| QuestError::MalformedFile(format!("bad id entry: {e}")))
        })
        .collect()
}

fn mandatory_string<'a>(tree: &'a TagTree, key: &str) -> Result<&'a str, QuestError> {
    tree.get_string(key)
        .ok_or_else(|| QuestError::MalformedFile(format!("missing mandatory field '{key}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::definition::DEFAULT_DESCRIPTION_COLOR;

    fn sample_record() -> QuestRecord {
        let id = QuestId::new("questforge", "quests/daily/spring").unwrap();
        let mut record = QuestRecord::with_description(id, "Spring Cleaning", "Tidy the meadow");
        record.set_category(QuestCategory::Seasonal);
        record.set_difficulty(QuestDifficulty::Hard);
        record.set_quest_type(QuestType::DailyQuest);

        let mut collect = CriteriaData::new(CriteriaType::CollectItem);
        collect.set_target("questforge:items/daisy".parse().unwrap());
        collect.set_count(12);
        record.set_criteria(vec![collect, CriteriaData::new(CriteriaType::Custom)]);

        let mut reward = RewardData::new(RewardType::Loot);
        reward.set_experience(250);
        reward.set_loot(vec!["questforge:loot/spring_basket".parse().unwrap()]);
        reward.set_recipes(vec!["questforge:recipes/flower_crown".parse().unwrap()]);
        reward.set_function("questforge:functions/fireworks".parse().unwrap());
        record.set_rewards(vec![reward]);

        let mut icon = TagTree::new();
        icon.put_string("Item", "questforge:items/broom");
        icon.put_int("Count", 1);
        record.set_icon(icon);
        record.set_background("questforge:textures/meadow".parse().unwrap());
        record
    }

    #[test]
    fn full_record_round_trips() {
        let record = sample_record();
        let decoded = decode_quest(&encode_quest(&record)).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn minimal_record_round_trips_with_fields_unset() {
        let record = QuestRecord::from_title("Bare Bones");
        let tree = encode_quest(&record);
        assert!(!tree.contains(CRITERIA_TAG));
        assert!(!tree.contains(REWARDS_TAG));
        assert!(!tree.contains(ICON_TAG));
        assert!(!tree.contains(BACKGROUND_TAG));

        let decoded = decode_quest(&tree).unwrap();
        assert!(decoded.criteria().is_none());
        assert!(decoded.rewards().is_none());
        assert_eq!(decoded, record);
    }

    #[test]
    fn empty_lists_stay_empty_not_unset() {
        let mut record = QuestRecord::from_title("Empty Lists");
        record.set_criteria(Vec::new());
        record.set_rewards(Vec::new());

        let decoded = decode_quest(&encode_quest(&record)).unwrap();
        assert_eq!(decoded.criteria(), Some(&[][..]));
        assert_eq!(decoded.rewards(), Some(&[][..]));
    }

    #[test]
    fn missing_mandatory_field_is_malformed() {
        let mut tree = encode_quest(&QuestRecord::from_title("No Title"));
        let mut stripped = TagTree::new();
        stripped.put_string(ID_TAG, tree.get_string(ID_TAG).unwrap());
        stripped.put_string(DESCRIPTION_TAG, "");
        tree = stripped;
        assert!(matches!(
            decode_quest(&tree),
            Err(QuestError::MalformedFile(_))
        ));
    }

    #[test]
    fn unknown_type_name_fails_decode_but_not_command_lookup() {
        let mut tree = encode_quest(&QuestRecord::from_title("Typed"));
        tree.put_string(TYPE_TAG, "bogus");
        assert!(matches!(
            decode_quest(&tree),
            Err(QuestError::MalformedFile(_))
        ));
        // The command path stays lenient.
        assert_eq!(QuestType::get("bogus"), QuestType::Custom);
    }

    #[test]
    fn zero_description_color_reads_back_as_default() {
        let mut record = QuestRecord::from_title("Dark Mode");
        record.set_description_color(0);
        let tree = encode_quest(&record);
        assert!(!tree.contains(DESCRIPTION_COLOR_TAG));

        let decoded = decode_quest(&tree).unwrap();
        assert_eq!(decoded.description_color(), DEFAULT_DESCRIPTION_COLOR);
    }
}
