//! Quest Identifiers
//!
//! Namespaced keys (`namespace:path`) naming a quest and its file location,
//! plus the normalization rules that derive stable keys from free-text
//! titles.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::QuestError;

/// Namespace reserved for the engine's own content. User quests must never
/// live here; creation rewrites it to [`QUEST_NAMESPACE`].
pub const RESERVED_NAMESPACE: &str = "engine";

/// Fallback namespace for user-created quests.
pub const QUEST_NAMESPACE: &str = "questforge";

/// A namespaced key uniquely naming a quest and its storage location.
///
/// The string form `namespace:path` round-trips losslessly through
/// [`fmt::Display`] and [`FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestId {
    namespace: String,
    path: String,
}

impl QuestId {
    /// Create an identifier, validating both parts.
    pub fn new(namespace: &str, path: &str) -> Result<Self, QuestError> {
        if namespace.is_empty() {
            return Err(QuestError::InvalidIdentifier(format!(
                "empty namespace in '{namespace}:{path}'"
            )));
        }
        if path.is_empty() {
            return Err(QuestError::InvalidIdentifier(format!(
                "empty path in '{namespace}:{path}'"
            )));
        }
        if !namespace.chars().all(is_namespace_char) {
            return Err(QuestError::InvalidIdentifier(format!(
                "invalid namespace '{namespace}'"
            )));
        }
        if !path.chars().all(is_path_char) {
            return Err(QuestError::InvalidIdentifier(format!(
                "invalid path '{path}'"
            )));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// The canonical identifier for a free-text title:
    /// `questforge:quests/{normalize_title(title)}`.
    pub fn for_title(title: &str) -> Self {
        Self {
            namespace: QUEST_NAMESPACE.to_string(),
            path: format!("quests/{}", normalize_title(title)),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Apply the creation-time resolution rule: an identifier in the
    /// reserved engine namespace is rewritten into the quest namespace,
    /// gaining a `quests/` prefix when its path has no directory component.
    ///
    /// This runs once when a quest is created. Identifiers read back from
    /// storage are trusted verbatim and never re-resolved.
    pub fn resolved(&self) -> Self {
        if self.namespace != RESERVED_NAMESPACE {
            return self.clone();
        }
        let path = if self.path.contains('/') {
            self.path.clone()
        } else {
            format!("quests/{}", self.path)
        };
        Self {
            namespace: QUEST_NAMESPACE.to_string(),
            path,
        }
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for QuestId {
    type Err = QuestError;

    /// Parse `namespace:path`. A bare path without a colon is taken to be in
    /// the quest namespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(QUEST_NAMESPACE, s),
        }
    }
}

impl Serialize for QuestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

/// Normalize a free-text title into a stable path segment: lowercase,
/// spaces become underscores, everything that is not an ASCII letter, digit,
/// or underscore is stripped.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_and_lowercases() {
        assert_eq!(normalize_title("Defeat the Dragon!"), "defeat_the_dragon");
        assert_eq!(normalize_title("A  B"), "a__b");
        assert_eq!(normalize_title("Crafting 101"), "crafting_101");
    }

    #[test]
    fn normalize_is_idempotent() {
        for title in ["Defeat the Dragon!", "été", "  spaced  out  ", "UPPER"] {
            let once = normalize_title(title);
            assert_eq!(normalize_title(&once), once);
        }
    }

    #[test]
    fn title_id_uses_quest_namespace() {
        let id = QuestId::for_title("Defeat the Dragon!");
        assert_eq!(id.namespace(), QUEST_NAMESPACE);
        assert_eq!(id.path(), "quests/defeat_the_dragon");
    }

    #[test]
    fn display_parse_round_trip() {
        let id = QuestId::new("questforge", "quests/daily/spring").unwrap();
        let parsed: QuestId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn bare_path_parses_into_quest_namespace() {
        let id: QuestId = "quests/foo".parse().unwrap();
        assert_eq!(id.namespace(), QUEST_NAMESPACE);
        assert_eq!(id.path(), "quests/foo");
    }

    #[test]
    fn rejects_invalid_syntax() {
        assert!(QuestId::new("", "foo").is_err());
        assert!(QuestId::new("ns", "").is_err());
        assert!(QuestId::new("bad ns", "foo").is_err());
        assert!(QuestId::new("ns/slash", "foo").is_err());
        assert!("Upper:foo".parse::<QuestId>().is_err());
    }

    #[test]
    fn reserved_namespace_is_rewritten() {
        let id = QuestId::new(RESERVED_NAMESPACE, "foo").unwrap().resolved();
        assert_eq!(id.namespace(), QUEST_NAMESPACE);
        assert_eq!(id.path(), "quests/foo");

        let id = QuestId::new(RESERVED_NAMESPACE, "a/b").unwrap().resolved();
        assert_eq!(id.namespace(), QUEST_NAMESPACE);
        assert_eq!(id.path(), "a/b");
    }

    #[test]
    fn resolution_leaves_other_namespaces_alone() {
        let id = QuestId::new("mypack", "foo").unwrap();
        assert_eq!(id.resolved(), id);
    }
}
