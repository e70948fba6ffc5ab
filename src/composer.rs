/*!
 * Document composition: title page, per-directory sections and page numbers
 */

use std::cell::RefCell;
use std::fs;
use std::path::{Component, Path};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, warn};

use crate::config::{dir_name, Config, ContentLimits};
use crate::error::{CodePdfError, Result};
use crate::layout::{text_width, Align, DrawOp, Layout};
use crate::normalizer::normalize_file;
use crate::style::Rgb;
use crate::tree::{build_tree, render_tree, BLANK, BRANCH, CONTINUATION, LAST_BRANCH};
use crate::types::{FileEntry, FileGroup, Truncation, TruncationReason};
use crate::utils::{format_file_size, group_by_top_dir, list_subdirectories};

/// Separator between breadcrumb segments
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// Heading of the title page overview
pub const OVERVIEW_HEADING: &str = "Project Directory Structure";

/// Composer statistics
#[derive(Debug, Clone, Default)]
pub struct ComposeStatistics {
    /// Files whose content was laid out
    pub files_rendered: usize,
    /// Files whose content was shortened
    pub truncated_files: usize,
    /// Files replaced by an error note
    pub read_errors: Vec<String>,
    /// Pages in the finished layout
    pub pages: usize,
}

/// Lays out scanned files into pages
pub struct Composer {
    /// Composer configuration
    config: Config,
    /// Progress bar, advanced once per file
    pub progress: Arc<ProgressBar>,
    /// Composer statistics
    statistics: RefCell<ComposeStatistics>,
}

impl Composer {
    /// Create a new composer
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self {
            config,
            progress,
            statistics: RefCell::new(ComposeStatistics::default()),
        }
    }

    /// Get composer statistics
    pub fn get_statistics(&self) -> ComposeStatistics {
        self.statistics.borrow().clone()
    }

    /// Lay out `files` and stamp page numbers on every page
    pub fn compose(&self, files: &[FileEntry]) -> Result<Layout> {
        let selected = fs::canonicalize(self.config.selected_dir())?;
        let repo_root = fs::canonicalize(&self.config.repo_root)?;
        let root_label = dir_name(&selected);
        let groups = group_by_top_dir(files, &selected);

        let mut layout = Layout::new(self.config.style.clone());
        self.title_page(&mut layout, &groups, &repo_root, &selected);

        for (name, entries) in &groups {
            let base = if name.is_empty() {
                selected.clone()
            } else {
                selected.join(name)
            };
            self.group_section(&mut layout, name, entries, &base, &selected, &root_label);
        }

        stamp_page_numbers(&mut layout)?;
        self.statistics.borrow_mut().pages = layout.page_count();
        Ok(layout)
    }

    /// Document title followed by the top-level structure overview
    fn title_page(&self, layout: &mut Layout, groups: &FileGroup, repo_root: &Path, selected: &Path) {
        let style = layout.style().clone();

        layout.set_color(style.palette.text);
        layout.set_font(style.heading_font, 18.0);
        layout.text(&self.config.document_title(), Align::Center);
        layout.move_down(1.5);

        layout.set_font(style.heading_font, 16.0);
        layout.text(OVERVIEW_HEADING, Align::Left);
        layout.move_down(1.0);

        let entries = top_level_entries(groups);
        let lines = if self.config.is_subdirectory() {
            let siblings = list_subdirectories(repo_root, &self.config.excluded_dirs);
            let marked = first_segment(selected.strip_prefix(repo_root).unwrap_or(selected));
            structure_overview(
                &dir_name(repo_root),
                Some((siblings.as_slice(), marked.as_deref().unwrap_or_default())),
                &entries,
            )
        } else {
            structure_overview(&dir_name(selected), None, &entries)
        };

        for (depth, line) in lines {
            let size = match depth {
                0 => 11.0,
                1 => 10.0,
                _ => 9.0,
            };
            layout.set_font(style.mono_font, size);
            layout.text(&line, Align::Left);
        }
        layout.move_down(1.0);
    }

    /// One top-level directory: title, tree, then every file
    fn group_section(
        &self,
        layout: &mut Layout,
        name: &str,
        entries: &[FileEntry],
        base: &Path,
        selected: &Path,
        root_label: &str,
    ) {
        let style = layout.style().clone();
        let title = if name.is_empty() { root_label } else { name };
        debug!(group = %title, files = entries.len(), "composing section");

        layout.set_running_header(Some(title.to_string()));
        layout.add_page();

        layout.set_font(style.heading_font, 16.0);
        layout.set_color(style.palette.title);
        layout.text(title, Align::Left);
        layout.move_down(0.5);

        layout.set_font(style.mono_font, 10.0);
        layout.set_color(style.palette.text);
        layout.text(title, Align::Left);
        let tree = build_tree(entries, base);
        render_tree(&tree, layout, 9.0);

        layout.move_down(1.0);
        layout.rule(style.palette.header, 2.0);
        layout.move_down(1.0);

        for entry in entries {
            self.file_section(layout, entry, selected, root_label);
        }
    }

    /// Breadcrumb title, rule and numbered content of one file
    fn file_section(&self, layout: &mut Layout, entry: &FileEntry, selected: &Path, root_label: &str) {
        let style = layout.style().clone();
        let limits = &self.config.limits;
        let relative = entry.relative_to(selected);

        layout.break_if_below(style.heading_break_y);

        layout.set_font(style.heading_font, 11.0);
        layout.set_color(style.palette.title);
        layout.text(&breadcrumb(root_label, relative), Align::Left);
        layout.move_down(0.3);
        layout.rule(style.palette.rule, 0.5);
        layout.move_down(0.5);

        match normalize_file(&entry.path, entry.oversized, limits) {
            Ok(content) => {
                layout.set_font(style.mono_font, 8.0);
                layout.set_color(style.palette.text);
                for line in &content.lines {
                    if layout.break_if_below(style.content_break_y) {
                        layout.set_font(style.mono_font, 8.0);
                    }
                    layout.text(line, Align::Left);
                }

                if let Some(truncation) = &content.truncation {
                    layout.move_down(0.5);
                    layout.set_font(style.heading_font, 9.0);
                    layout.set_color(style.palette.error);
                    layout.text(&truncation_notice(truncation, entry.size, limits), Align::Left);
                    layout.set_color(style.palette.text);
                    self.statistics.borrow_mut().truncated_files += 1;
                }

                layout.move_down(1.0);
                self.statistics.borrow_mut().files_rendered += 1;
            }
            Err(err) => {
                warn!("{}", err);
                layout.set_font(style.body_font, 10.0);
                layout.set_color(style.palette.error);
                layout.text(&error_note(&err), Align::Left);
                layout.set_color(style.palette.text);
                layout.move_down(1.0);
                self.statistics.borrow_mut().read_errors.push(err.to_string());
            }
        }

        self.progress.inc(1);
        self.progress
            .set_message(format!("Rendered {}", relative.display()));
    }
}

/// Overlay a centered page number near the bottom of every page
pub fn stamp_page_numbers(layout: &mut Layout) -> Result<()> {
    let style = layout.style().clone();
    let font = style.body_font;
    let size = 10.0;
    let y = style.page_height - style.page_number_offset;

    for index in 0..layout.page_count() {
        let label = (index + 1).to_string();
        let x = (style.page_width - text_width(font, size, &label)) / 2.0;
        layout.overlay(
            index,
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color: Rgb::BLACK,
                text: label,
            },
        )?;
    }

    Ok(())
}

/// Directory names with files, then files at the root of the selection
pub fn top_level_entries(groups: &FileGroup) -> Vec<String> {
    let mut entries: Vec<String> = groups.keys().filter(|k| !k.is_empty()).cloned().collect();
    if let Some(root_files) = groups.get("") {
        entries.extend(root_files.iter().filter_map(|entry| {
            entry
                .path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
        }));
    }
    entries
}

/// Lines of the title page overview as `(depth, text)`.
///
/// With `siblings`, the repository's top-level directories are listed,
/// the selected one marked and expanded by one level with `entries`.
/// Without, `entries` are listed under `root_name`.
pub fn structure_overview(
    root_name: &str,
    siblings: Option<(&[String], &str)>,
    entries: &[String],
) -> Vec<(usize, String)> {
    let mut lines = vec![(0, root_name.to_string())];

    match siblings {
        Some((siblings, selected)) => {
            for (index, dir) in siblings.iter().enumerate() {
                let is_last = index + 1 == siblings.len();
                let connector = if is_last { LAST_BRANCH } else { BRANCH };
                if dir != selected {
                    lines.push((1, format!("{}{}", connector, dir)));
                    continue;
                }

                lines.push((1, format!("{}{} (selected)", connector, dir)));
                let prefix = if is_last { BLANK } else { CONTINUATION };
                for (sub_index, item) in entries.iter().enumerate() {
                    let sub_connector = if sub_index + 1 == entries.len() {
                        LAST_BRANCH
                    } else {
                        BRANCH
                    };
                    lines.push((2, format!("{}{}{}", prefix, sub_connector, item)));
                }
            }
        }
        None => {
            for (index, item) in entries.iter().enumerate() {
                let connector = if index + 1 == entries.len() {
                    LAST_BRANCH
                } else {
                    BRANCH
                };
                lines.push((1, format!("{}{}", connector, item)));
            }
        }
    }

    lines
}

/// Root label followed by each segment of `relative`
pub fn breadcrumb(root_label: &str, relative: &Path) -> String {
    let mut parts = vec![root_label.to_string()];
    parts.extend(relative.components().filter_map(|c| match c {
        Component::Normal(name) => Some(name.to_string_lossy().to_string()),
        _ => None,
    }));
    parts.join(BREADCRUMB_SEPARATOR)
}

/// Notice appended after shortened content
pub fn truncation_notice(truncation: &Truncation, size: u64, limits: &ContentLimits) -> String {
    match truncation.reason {
        TruncationReason::Large => format!(
            "... File is too large ({}). Showing first {} lines only ...",
            format_file_size(size),
            limits.large_file_lines
        ),
        TruncationReason::Long => format!(
            "... File truncated. Showing first {} of {} lines ...",
            truncation.shown, truncation.total
        ),
    }
}

/// Inline note drawn in place of unreadable content
pub fn error_note(err: &CodePdfError) -> String {
    match err {
        CodePdfError::Read { source, .. } => format!("Error reading file: {}", source),
        other => format!("Error reading file: {}", other),
    }
}

fn first_segment(path: &Path) -> Option<String> {
    path.components().find_map(|c| match c {
        Component::Normal(name) => Some(name.to_string_lossy().to_string()),
        _ => None,
    })
}
