//! Persisted cursor state for fieldmirror.
//!
//! Cursor offsets survive page reloads keyed by `(page path, target index)`,
//! rendered as `"<page-path>:<target-index>"`. Values are string-encoded
//! integers; anything unparseable reads as absent rather than an error.
//! Writes fully overwrite prior values (last-write-wins), and entries never
//! expire.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Key for one target's persisted cursor offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CursorKey {
    path: String,
    index: usize,
}

impl CursorKey {
    pub fn new(path: impl Into<String>, index: usize) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }

    pub fn page_path(&self) -> &str {
        &self.path
    }

    pub fn target_index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for CursorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.index)
    }
}

/// Durable key-value storage for cursor offsets.
pub trait CursorStore {
    /// Stored offset for the key, `None` when absent or unparseable.
    fn load(&self, key: &CursorKey) -> Option<usize>;

    /// Store an offset, overwriting any prior value.
    fn save(&mut self, key: &CursorKey, offset: usize) -> Result<()>;
}

/// In-memory store, used in tests and as the fallback backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CursorStore for MemoryStore {
    fn load(&self, key: &CursorKey) -> Option<usize> {
        self.entries.get(&key.to_string())?.parse().ok()
    }

    fn save(&mut self, key: &CursorKey, offset: usize) -> Result<()> {
        self.entries.insert(key.to_string(), offset.to_string());
        Ok(())
    }
}

/// On-disk serialization of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    offsets: BTreeMap<String, String>,
}

/// TOML-file-backed store in the user's data directory.
///
/// The whole file is read at open and rewritten on every save; saves are
/// infrequent (one per form submission) so that is cheap and keeps the file
/// human-readable.
#[derive(Debug)]
pub struct FileStore {
    file_path: PathBuf,
    state: StateFile,
}

impl FileStore {
    /// Open a store at the given path, starting empty if the file is
    /// missing.
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        let state = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)
                .with_context(|| format!("failed to read {}", file_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", file_path.display()))?
        } else {
            StateFile::default()
        };
        Ok(Self { file_path, state })
    }

    /// Open the store at its default location under the data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Default store location: `<data-dir>/fieldmirror/state.toml`.
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join("fieldmirror").join("state.toml"))
            .context("failed to determine data directory")
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.state)?;
        std::fs::write(&self.file_path, content)
            .with_context(|| format!("failed to write {}", self.file_path.display()))?;
        Ok(())
    }
}

impl CursorStore for FileStore {
    fn load(&self, key: &CursorKey) -> Option<usize> {
        self.state.offsets.get(&key.to_string())?.parse().ok()
    }

    fn save(&mut self, key: &CursorKey, offset: usize) -> Result<()> {
        self.state
            .offsets
            .insert(key.to_string(), offset.to_string());
        self.persist()
    }
}
