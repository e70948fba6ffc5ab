/*!
 * Directory scanning and file selection
 */

use std::cell::RefCell;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob_match::glob_match;
use ignore::WalkBuilder;
use indicatif::ProgressBar;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{CodePdfError, Result};
use crate::types::FileEntry;
use crate::utils::format_file_size;

/// Scanner statistics
#[derive(Debug, Clone, Default)]
pub struct ScannerStatistics {
    /// Number of files selected for rendering
    pub files_found: usize,
    /// Number of selected files above the size threshold
    pub oversized_files: usize,
    /// Number of files skipped by the inclusion rules
    pub files_skipped: usize,
    /// Subtrees or files that could not be read
    pub warnings: Vec<String>,
}

/// Scanner for repository contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress indicator
    pub progress: Arc<ProgressBar>,
    /// Scanner statistics
    statistics: RefCell<ScannerStatistics>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self {
            config,
            progress,
            statistics: RefCell::new(ScannerStatistics::default()),
        }
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> ScannerStatistics {
        self.statistics.borrow().clone()
    }

    /// Scan the selected directory and return the files to render.
    ///
    /// Entries are visited depth first in file name order. Unreadable
    /// subtrees are skipped with a warning.
    pub fn scan(&self) -> Result<Vec<FileEntry>> {
        let root = fs::canonicalize(self.config.selected_dir())?;
        self.scan_root(&root)
    }

    /// Scan an explicit root directory
    pub fn scan_root(&self, root: &Path) -> Result<Vec<FileEntry>> {
        let candidates = if self.config.respect_gitignore {
            self.walk_with_gitignore(root)
        } else {
            self.walk(root)
        };

        let mut files = Vec::new();
        for path in candidates {
            if let Some(entry) = self.classify(path) {
                files.push(entry);
            }
        }

        self.statistics.borrow_mut().files_found = files.len();
        Ok(files)
    }

    /// Walk `root` without consulting ignore files
    fn walk(&self, root: &Path) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !(e.file_type().is_dir() && self.should_prune(e.file_name()))
            });

        for result in walker {
            match result {
                Ok(entry) if entry.file_type().is_file() => {
                    candidates.push(entry.into_path());
                }
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        self.progress
                            .set_message(format!("Scanning {}", entry.path().display()));
                    }
                }
                // An unreadable subtree is skipped here; the walk goes on
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    self.record_warning(CodePdfError::scan(path, &err));
                }
            }
        }

        candidates
    }

    /// Walk `root` honoring .gitignore files
    fn walk_with_gitignore(&self, root: &Path) -> Vec<PathBuf> {
        let excluded = self.config.excluded_dirs.clone();
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .git_ignore(true)
            .git_exclude(true)
            .parents(true)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |e| {
                let is_dir = e.file_type().map_or(false, |ft| ft.is_dir());
                e.depth() == 0 || !(is_dir && excluded.iter().any(|x| OsStr::new(x) == e.file_name()))
            });

        let mut candidates = Vec::new();
        for result in builder.build() {
            match result {
                Ok(entry) => {
                    if entry.file_type().map_or(false, |ft| ft.is_file()) {
                        candidates.push(entry.path().to_path_buf());
                    }
                }
                Err(err) => {
                    let path = failed_path(&err).unwrap_or(root).to_path_buf();
                    self.record_warning(CodePdfError::scan(path, &err));
                }
            }
        }

        candidates
    }

    /// Turn a candidate path into an entry if the inclusion rules accept it
    fn classify(&self, path: PathBuf) -> Option<FileEntry> {
        if !self.should_include(&path) || self.should_ignore(&path) {
            self.statistics.borrow_mut().files_skipped += 1;
            return None;
        }

        let size = match fs::metadata(&path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                self.record_warning(CodePdfError::scan(&path, e));
                return None;
            }
        };

        let oversized = size > self.config.max_file_size;
        if oversized {
            debug!(
                path = %path.display(),
                size = %format_file_size(size),
                "large file found, content will be shortened"
            );
            self.statistics.borrow_mut().oversized_files += 1;
        }

        self.progress.inc(1);
        Some(FileEntry {
            path,
            size,
            oversized,
        })
    }

    /// Whether a directory with this name is pruned from the walk
    pub fn should_prune(&self, name: &OsStr) -> bool {
        self.config.excluded_dirs.iter().any(|d| OsStr::new(d) == name)
    }

    /// Whether a file's extension or exact name is in the inclusion set
    pub fn should_include(&self, path: &Path) -> bool {
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()));

        self.config
            .include
            .iter()
            .any(|rule| *rule == file_name || Some(rule) == extension.as_ref())
    }

    /// Whether a file is minified or matches an ignore pattern
    pub fn should_ignore(&self, path: &Path) -> bool {
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        self.is_minified(&file_name)
            || self
                .config
                .ignore_patterns
                .iter()
                .any(|pattern| glob_match(pattern, &file_name))
    }

    /// File name heuristic for minified bundles (e.g. `app.min.js`)
    pub fn is_minified(&self, file_name: &str) -> bool {
        self.config
            .minified_patterns
            .iter()
            .any(|pattern| glob_match(pattern, file_name))
    }

    fn record_warning(&self, err: CodePdfError) {
        warn!("{}", err);
        self.statistics.borrow_mut().warnings.push(err.to_string());
    }
}

/// Path an ignore walk error refers to, looking through wrapped errors
pub fn failed_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            failed_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(failed_path),
        _ => None,
    }
}
