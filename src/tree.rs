/*!
 * Directory tree construction and ASCII rendering
 */

use std::cmp::Ordering;
use std::path::{Component, Path};

use crate::layout::{Align, Layout};
use crate::types::{DirectoryTree, FileEntry, TreeNode};

/// Connector for every sibling except the last
pub const BRANCH: &str = "|-- ";
/// Connector for the last sibling
pub const LAST_BRANCH: &str = "+-- ";
/// Prefix carried into the subtree of a non-last sibling
pub const CONTINUATION: &str = "|   ";
/// Prefix carried into the subtree of the last sibling
pub const BLANK: &str = "    ";

/// Build a tree from `files`, keyed by their path segments below `base`.
///
/// Each file becomes exactly one leaf; intermediate directories are
/// created on demand.
pub fn build_tree(files: &[FileEntry], base: &Path) -> DirectoryTree {
    let mut tree = DirectoryTree::new();
    for entry in files {
        insert_path(&mut tree, entry.relative_to(base));
    }
    tree
}

fn insert_path(tree: &mut DirectoryTree, relative: &Path) {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    let Some((file, dirs)) = parts.split_last() else {
        return;
    };

    let mut current = tree;
    for dir in dirs {
        let node = current
            .entry(dir.clone())
            .or_insert_with(|| TreeNode::Directory(DirectoryTree::new()));
        // A file and a directory cannot share a name on disk; if the input
        // says otherwise the directory wins.
        if !node.is_directory() {
            *node = TreeNode::Directory(DirectoryTree::new());
        }
        current = match node {
            TreeNode::Directory(children) => children,
            TreeNode::Leaf => unreachable!("node was just made a directory"),
        };
    }
    current.entry(file.clone()).or_insert(TreeNode::Leaf);
}

/// Entries of one directory in display order: directories first, then
/// files, each sorted case-insensitively
pub fn sorted_entries(tree: &DirectoryTree) -> Vec<(&String, &TreeNode)> {
    let mut entries: Vec<_> = tree.iter().collect();
    entries.sort_by(|(a_name, a_node), (b_name, b_node)| {
        match (a_node.is_directory(), b_node.is_directory()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a_name
                .to_lowercase()
                .cmp(&b_name.to_lowercase())
                .then_with(|| a_name.cmp(b_name)),
        }
    });
    entries
}

/// Render `tree` as indented ASCII lines, one per entry
pub fn tree_lines(tree: &DirectoryTree) -> Vec<String> {
    let mut lines = Vec::new();
    collect_lines(tree, "", &mut lines);
    lines
}

fn collect_lines(tree: &DirectoryTree, prefix: &str, lines: &mut Vec<String>) {
    let entries = sorted_entries(tree);
    let count = entries.len();
    for (index, (name, node)) in entries.into_iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", prefix, connector, name));

        if let TreeNode::Directory(children) = node {
            let extension = if is_last { BLANK } else { CONTINUATION };
            collect_lines(children, &format!("{}{}", prefix, extension), lines);
        }
    }
}

/// Number of files in the tree
pub fn count_leaves(tree: &DirectoryTree) -> usize {
    tree.values()
        .map(|node| match node {
            TreeNode::Leaf => 1,
            TreeNode::Directory(children) => count_leaves(children),
        })
        .sum()
}

/// Lay out `tree` at the layout's cursor.
///
/// Before each line the cursor is checked against the style's tree
/// threshold; past it a new page is started and the monospace font is
/// selected again, so no entry is lost across the break.
pub fn render_tree(tree: &DirectoryTree, layout: &mut Layout, font_size: f32) {
    let font = layout.style().mono_font;
    let threshold = layout.style().tree_break_y;

    layout.set_font(font, font_size);
    for line in tree_lines(tree) {
        if layout.break_if_below(threshold) {
            layout.set_font(font, font_size);
        }
        layout.text(&line, Align::Left);
    }
}
