/*!
 * Utility functions for codepdf
 */

use std::fs;
use std::path::{Component, Path};

use once_cell::sync::Lazy;
use tracing::warn;

use crate::types::{FileEntry, FileGroup};

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} B", size)
    }
}

/// First path segment of `relative`, or "" when the file sits at the root
pub fn top_level_dir(relative: &Path) -> String {
    let mut components = relative.components().filter_map(|c| match c {
        Component::Normal(name) => Some(name.to_string_lossy().to_string()),
        _ => None,
    });
    match (components.next(), components.next()) {
        (Some(first), Some(_)) => first,
        _ => String::new(),
    }
}

/// Group files by their top-level directory below `base`
pub fn group_by_top_dir(files: &[FileEntry], base: &Path) -> FileGroup {
    let mut groups = FileGroup::new();
    for entry in files {
        let key = top_level_dir(entry.relative_to(base));
        groups.entry(key).or_default().push(entry.clone());
    }
    groups
}

/// Sorted names of the immediate subdirectories of `dir`, minus excluded names
pub fn list_subdirectories(dir: &Path, excluded: &[String]) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "cannot list directory");
            return Vec::new();
        }
    };

    let mut dirs: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map_or(false, |ft| ft.is_dir()))
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| !excluded.iter().any(|e| e == name))
        .collect();
    dirs.sort();
    dirs
}

/// Extensions and exact file names rendered by default
pub static DEFAULT_INCLUDE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Web
        ".js", ".ts", ".jsx", ".tsx", ".html", ".css", ".scss",
        // Systems & application languages
        ".py", ".java", ".cs", ".cpp", ".c", ".h", ".php", ".rb", ".go", ".rs", ".swift", ".kt",
        // Data & docs
        ".json", ".xml", ".yml", ".yaml", ".md", ".txt", ".sql",
        // Shell
        ".sh", ".bash",
        // .NET projects
        ".sln", ".csproj", ".config",
        // Exact names
        ".gitignore", ".env.example",
    ]
});

/// Directory names pruned by default
pub static DEFAULT_EXCLUDED_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        // Dependencies
        "node_modules",
        // Build & Dist
        "bin", "obj", "build", "dist", "out", "target",
        // Python
        "__pycache__",
        // IDEs & Editors
        ".vs", ".vscode", ".idea",
    ]
});

/// File name patterns treated as minified bundles
pub static DEFAULT_MINIFIED: Lazy<Vec<&'static str>> = Lazy::new(|| vec!["*.min.*"]);
