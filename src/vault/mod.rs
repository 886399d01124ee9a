//! Vault scanning and the name index.
//!
//! [`build_index`] walks the vault directory once and records every file
//! under its bare name (final path segment, trailing `.md` stripped). The
//! index is consulted read-only by link and placeholder resolution.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use walkdir::WalkDir;

/// Errors raised while scanning a vault.
#[derive(Debug)]
pub enum IndexError {
    Io(std::io::Error),
    Walk(walkdir::Error),
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::Io(e) => write!(f, "IO error: {e}"),
            IndexError::Walk(e) => write!(f, "vault scan error: {e}"),
        }
    }
}

impl std::error::Error for IndexError {}

impl From<std::io::Error> for IndexError {
    fn from(e: std::io::Error) -> Self {
        IndexError::Io(e)
    }
}

impl From<walkdir::Error> for IndexError {
    fn from(e: walkdir::Error) -> Self {
        IndexError::Walk(e)
    }
}

/// A read-only mapping from bare note names to the vault paths sharing
/// that name, plus flat file and directory listings.
#[derive(Debug, Default)]
pub struct VaultIndex {
    names: HashMap<String, BTreeSet<String>>,
    files: Vec<String>,
    directories: Vec<String>,
}

impl VaultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one vault-relative file path (forward-slash separated).
    pub fn insert_file(&mut self, path: &str) {
        let name = bare_name(path);
        self.names
            .entry(name.to_string())
            .or_default()
            .insert(path.to_string());
        self.files.push(path.to_string());
    }

    pub fn insert_directory(&mut self, path: &str) {
        self.directories.push(path.to_string());
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    /// All paths registered under a bare name, in lexicographic order.
    pub fn paths_for(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.names.get(name)
    }

    /// Resolve a placeholder name to a vault path.
    ///
    /// Bare names pick the lexicographically first of their candidate paths
    /// (the documented tie-break for duplicate note names). Path-shaped
    /// names match against the candidates of their final segment, so a
    /// relative-link resolution like `people/Bob` finds `people/Bob.md`;
    /// a `.md`-suffixed name matches the same note as its bare form.
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        let candidates = self.names.get(bare_name(name))?;

        if !name.contains('/') && !name.ends_with(".md") {
            return candidates.iter().next().map(String::as_str);
        }

        let with_md = if name.ends_with(".md") {
            name.to_string()
        } else {
            format!("{name}.md")
        };
        let suffix_match = candidates
            .iter()
            .find(|p| {
                p.as_str() == with_md
                    || p.as_str() == name
                    || p.ends_with(&format!("/{with_md}"))
                    || p.ends_with(&format!("/{name}"))
            })
            .map(String::as_str);

        if suffix_match.is_some() || name.contains('/') {
            return suffix_match;
        }
        candidates.iter().next().map(String::as_str)
    }
}

/// The final path segment with a trailing `.md` stripped.
fn bare_name(path: &str) -> &str {
    let tail = path.rsplit('/').next().unwrap_or(path);
    tail.strip_suffix(".md").unwrap_or(tail)
}

/// Scan a vault directory into an index. Hidden entries (dot-prefixed,
/// e.g. `.obsidian`) are skipped.
pub fn build_index(base: &Path) -> Result<VaultIndex, IndexError> {
    let mut index = VaultIndex::new();

    let walker = WalkDir::new(base)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(base)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            index.insert_directory(&relative);
        } else if entry.file_type().is_file() {
            index.insert_file(&relative);
        }
    }

    Ok(index)
}
