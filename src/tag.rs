//! Binary tag trees
//!
//! The on-disk document model for quest files: a tree of named, typed
//! fields. Trees are written as MessagePack value maps and gzip-compressed,
//! so files stay self-describing and small.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use rmpv::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::QuestError;

/// A single typed field inside a [`TagTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    String(String),
    Int(i64),
    List(Vec<TagTree>),
    Tree(TagTree),
}

/// A named-field document tree. Field order is stable (sorted by name) so
/// encoding the same record twice produces identical bytes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagTree {
    entries: BTreeMap<String, Tag>,
}

impl TagTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn put_string(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), Tag::String(value.into()));
    }

    pub fn put_int(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_string(), Tag::Int(value));
    }

    pub fn put_list(&mut self, key: &str, value: Vec<TagTree>) {
        self.entries.insert(key.to_string(), Tag::List(value));
    }

    pub fn put_tree(&mut self, key: &str, value: TagTree) {
        self.entries.insert(key.to_string(), Tag::Tree(value));
    }

    /// Typed getters return `None` when the key is absent or holds a
    /// different tag type.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Tag::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(Tag::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn get_list(&self, key: &str) -> Option<&[TagTree]> {
        match self.entries.get(key) {
            Some(Tag::List(l)) => Some(l),
            _ => None,
        }
    }

    pub fn get_tree(&self, key: &str) -> Option<&TagTree> {
        match self.entries.get(key) {
            Some(Tag::Tree(t)) => Some(t),
            _ => None,
        }
    }

    /// Encode the tree to compressed bytes.
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        rmpv::encode::write_value(&mut encoder, &self.to_value())
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        encoder.finish()
    }

    /// Decode a tree from compressed bytes. Every failure mode, truncated
    /// gzip, invalid MessagePack, or an unexpected value shape, is a
    /// malformed file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, QuestError> {
        let mut decoder = GzDecoder::new(bytes);
        let mut raw = Vec::new();
        decoder
            .read_to_end(&mut raw)
            .map_err(|e| QuestError::MalformedFile(format!("bad compression: {e}")))?;
        let value = rmpv::decode::read_value(&mut raw.as_slice())
            .map_err(|e| QuestError::MalformedFile(format!("bad messagepack: {e}")))?;
        Self::from_value(&value)
    }

    fn to_value(&self) -> Value {
        let map = self
            .entries
            .iter()
            .map(|(key, tag)| (Value::String(key.clone().into()), tag.to_value()))
            .collect();
        Value::Map(map)
    }

    fn from_value(value: &Value) -> Result<Self, QuestError> {
        let map = value
            .as_map()
            .ok_or_else(|| QuestError::MalformedFile("tag tree is not a map".to_string()))?;

        let mut tree = TagTree::new();
        for (key, entry) in map {
            let key = key
                .as_str()
                .ok_or_else(|| QuestError::MalformedFile("non-string field name".to_string()))?;
            tree.entries.insert(key.to_string(), Tag::from_value(entry)?);
        }
        Ok(tree)
    }
}

impl Tag {
    fn to_value(&self) -> Value {
        match self {
            Tag::String(s) => Value::String(s.clone().into()),
            Tag::Int(i) => Value::Integer((*i).into()),
            Tag::List(trees) => Value::Array(trees.iter().map(TagTree::to_value).collect()),
            Tag::Tree(tree) => tree.to_value(),
        }
    }

    fn from_value(value: &Value) -> Result<Self, QuestError> {
        match value {
            Value::String(s) => {
                let s = s
                    .as_str()
                    .ok_or_else(|| QuestError::MalformedFile("invalid utf-8 string".to_string()))?;
                Ok(Tag::String(s.to_string()))
            }
            Value::Integer(i) => i
                .as_i64()
                .map(Tag::Int)
                .ok_or_else(|| QuestError::MalformedFile("integer out of range".to_string())),
            Value::Array(items) => {
                let trees = items
                    .iter()
                    .map(TagTree::from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Tag::List(trees))
            }
            Value::Map(_) => Ok(Tag::Tree(TagTree::from_value(value)?)),
            other => Err(QuestError::MalformedFile(format!(
                "unsupported tag value: {other}"
            ))),
        }
    }
}

// Serde support so records holding opaque sub-trees can still be surfaced as
// JSON to a UI layer. Trees serialize as plain maps.
impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tag::String(s) => serializer.serialize_str(s),
            Tag::Int(i) => serializer.serialize_i64(*i),
            Tag::List(trees) => trees.serialize(serializer),
            Tag::Tree(tree) => tree.serialize(serializer),
        }
    }
}

impl Serialize for TagTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, tag) in &self.entries {
            map.serialize_entry(key, tag)?;
        }
        map.end()
    }
}
