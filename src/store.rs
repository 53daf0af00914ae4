//! Quest file store
//!
//! Maps quest identifiers to files under a root directory and performs the
//! byte-level save/load. Layout: `{root}/{namespace}/{path}.qst`, one
//! subdirectory per namespace, mirroring the identifier's path segments
//! below that.

use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};

use crate::error::QuestError;
use crate::identifier::QuestId;
use crate::quest::codec::{decode_quest, encode_quest};
use crate::quest::definition::QuestRecord;
use crate::tag::TagTree;

/// File extension for binary quest files.
pub const QUEST_FILE_EXTENSION: &str = "qst";

/// Filesystem store for quest records.
pub struct QuestStore {
    root: PathBuf,
}

impl QuestStore {
    /// Create a store rooted at the given directory. The directory itself is
    /// created lazily on the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file path a record with this identifier is stored at.
    pub fn quest_path(&self, id: &QuestId) -> PathBuf {
        self.root
            .join(id.namespace())
            .join(format!("{}.{}", id.path(), QUEST_FILE_EXTENSION))
    }

    /// Encode and write a record, overwriting any existing file. Needed
    /// directories (namespace plus intermediate path segments) are created
    /// first; the write goes to a temp sibling and is renamed into place so
    /// a crash mid-write cannot leave a half-written quest file.
    pub fn save(&self, record: &QuestRecord) -> Result<PathBuf, QuestError> {
        let path = self.quest_path(record.id());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| QuestError::io(parent, e))?;
        }

        let bytes = encode_quest(record)
            .to_bytes()
            .map_err(|e| QuestError::io(&path, e))?;

        let mut tmp = path.clone();
        tmp.as_mut_os_string().push(".tmp");
        std::fs::write(&tmp, &bytes).map_err(|e| QuestError::io(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| QuestError::io(&path, e))?;

        info!("Saved quest {} to {:?}", record.id(), path);
        Ok(path)
    }

    /// Load a record from a file path, which may be absolute or relative to
    /// the store root. Missing file and decode failures come back as clean
    /// errors for the caller to report; nothing here panics.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<QuestRecord, QuestError> {
        let path = normalize(path.as_ref());
        let path = if path.starts_with(&self.root) {
            path
        } else {
            self.root.join(path)
        };

        if !path.is_file() {
            return Err(QuestError::NotFound(format!("{}", path.display())));
        }

        let bytes = std::fs::read(&path).map_err(|e| QuestError::io(&path, e))?;
        let tree = TagTree::from_bytes(&bytes)?;
        decode_quest(&tree)
    }

    /// Every quest file under the root, as paths relative to it, for use in
    /// command autocompletion and bulk loading. A missing root directory is
    /// an empty result, not an error.
    pub fn enumerate(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        if !self.root.is_dir() {
            return files;
        }
        self.collect_quest_files(&self.root, &mut files);
        files
    }

    fn collect_quest_files(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping unreadable directory {:?}: {}", dir, e);
                return;
            }
        };

        for entry in entries {
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            if path.is_dir() {
                self.collect_quest_files(&path, files);
            } else if path
                .extension()
                .is_some_and(|ext| ext == QUEST_FILE_EXTENSION)
            {
                if let Ok(relative) = path.strip_prefix(&self.root) {
                    files.push(relative.to_path_buf());
                }
            }
        }
    }
}

/// Lexical path normalization: drops `.` components and resolves `..`
/// without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
