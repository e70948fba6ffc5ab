/*!
 * Core types and data structures for codepdf
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use strum::{Display, EnumString};

/// A file selected for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Size exceeds the configured threshold; content will be cut short
    pub oversized: bool,
}

impl FileEntry {
    /// Path of the file relative to `base`, or the full path if it lies elsewhere
    pub fn relative_to<'a>(&'a self, base: &Path) -> &'a Path {
        self.path.strip_prefix(base).unwrap_or(&self.path)
    }
}

/// One entry in a directory tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A file
    Leaf,
    /// A subdirectory and its entries
    Directory(DirectoryTree),
}

impl TreeNode {
    /// Whether this node is a directory
    pub fn is_directory(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }
}

/// Directory contents keyed by path segment
pub type DirectoryTree = BTreeMap<String, TreeNode>;

/// Files grouped by their top-level directory; root-level files use ""
pub type FileGroup = BTreeMap<String, Vec<FileEntry>>;

/// Why a file's content was cut short
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TruncationReason {
    /// File exceeded the byte size threshold
    Large,
    /// File exceeded the line count cap
    Long,
}

/// Describes what was dropped from a file's content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    /// Why lines were dropped
    pub reason: TruncationReason,
    /// Number of lines kept
    pub shown: usize,
    /// Number of lines in the full content
    pub total: usize,
}

/// Display-ready content of one file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedContent {
    /// Numbered, sanitized lines
    pub lines: Vec<String>,
    /// Set when lines were dropped
    pub truncation: Option<Truncation>,
}
