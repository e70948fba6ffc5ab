/*!
 * Tests for codepdf functionality
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::{tempdir, TempDir};

use crate::composer::{breadcrumb, structure_overview, truncation_notice, Composer};
use crate::config::{Config, ContentLimits};
use crate::layout::{wrap_text, Align, DrawOp, Layout, Page};
use crate::normalizer::{
    decode, normalize_text, number_line, sanitize_line, split_lines, strip_bom, truncate_lines,
};
use crate::report::{BuildReport, ReportFormat, Reporter};
use crate::scanner::{failed_path, Scanner};
use crate::style::{Font, Rgb, Style};
use crate::tree::{build_tree, count_leaves, tree_lines};
use crate::types::{FileEntry, TreeNode, TruncationReason};
use crate::utils::{format_file_size, group_by_top_dir, top_level_dir};
use crate::writer::{encode_text, PdfWriter};
use crate::CodePdfError;

// Write `content` to `root/relative`, creating parent directories
fn write_file(root: &Path, relative: &str, content: &[u8]) -> io::Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(&path)?;
    file.write_all(content)?;
    Ok(path)
}

// Repository "demo" inside a temp dir, output file next to it
fn setup_repo() -> io::Result<(TempDir, PathBuf)> {
    let temp_dir = tempdir()?;
    let repo = temp_dir.path().join("demo");
    fs::create_dir(&repo)?;
    Ok((temp_dir, repo))
}

fn test_config(repo: &Path) -> Config {
    let mut config = Config::new(repo);
    config.output_file = repo.parent().unwrap().join("out").join("demo.pdf");
    config
}

fn entry(path: &str) -> FileEntry {
    FileEntry {
        path: PathBuf::from(path),
        size: 1,
        oversized: false,
    }
}

fn scan(config: &Config) -> Vec<FileEntry> {
    Scanner::new(config.clone(), Arc::new(ProgressBar::hidden()))
        .scan()
        .unwrap()
}

fn all_texts(pages: &[Page]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| page.texts().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

// Tree building and rendering

#[test]
fn test_tree_leaf_count_matches_files() {
    let files = vec![
        entry("/r/src/main.rs"),
        entry("/r/src/util/mod.rs"),
        entry("/r/src/util/io.rs"),
        entry("/r/README.md"),
    ];
    let tree = build_tree(&files, Path::new("/r"));

    assert_eq!(count_leaves(&tree), files.len());
    let leaves = tree_lines(&tree)
        .iter()
        .filter(|line| line.ends_with(".rs") || line.ends_with(".md"))
        .count();
    assert_eq!(leaves, files.len());
}

#[test]
fn test_tree_connectors() {
    let files = vec![
        entry("/r/README.md"),
        entry("/r/src/main.rs"),
        entry("/r/src/util/mod.rs"),
    ];
    let tree = build_tree(&files, Path::new("/r"));

    assert_eq!(
        tree_lines(&tree),
        vec![
            "|-- src",
            "|   |-- util",
            "|   |   +-- mod.rs",
            "|   +-- main.rs",
            "+-- README.md",
        ]
    );
}

#[test]
fn test_tree_rendering_ignores_input_order() {
    let paths = ["/r/b/z.md", "/r/a/y.txt", "/r/a/x.txt", "/r/c.txt", "/r/a/deep/q.rs"];
    let forward: Vec<_> = paths.iter().map(|p| entry(p)).collect();
    let backward: Vec<_> = paths.iter().rev().map(|p| entry(p)).collect();

    let first = tree_lines(&build_tree(&forward, Path::new("/r")));
    let second = tree_lines(&build_tree(&backward, Path::new("/r")));
    assert_eq!(first, second);
}

#[test]
fn test_tree_sorts_directories_first_case_insensitive() {
    let files = vec![
        entry("/r/Beta/one.txt"),
        entry("/r/alpha/two.txt"),
        entry("/r/Zed.txt"),
        entry("/r/apple.txt"),
    ];
    let tree = build_tree(&files, Path::new("/r"));
    let top: Vec<String> = tree_lines(&tree)
        .into_iter()
        .filter(|line| line.starts_with("|-- ") || line.starts_with("+-- "))
        .collect();

    assert_eq!(top, vec!["|-- alpha", "|-- Beta", "|-- apple.txt", "+-- Zed.txt"]);
}

#[test]
fn test_tree_distinguishes_files_and_directories() {
    let files = vec![entry("/r/docs/guide.md"), entry("/r/notes.md")];
    let tree = build_tree(&files, Path::new("/r"));

    assert!(tree["docs"].is_directory());
    assert_eq!(tree["notes.md"], TreeNode::Leaf);
}

// Content normalization

#[test]
fn test_bom_and_crlf_are_normalized() {
    let content = normalize_text("\u{FEFF}hello\r\nworld\r\n", false, &ContentLimits::default());

    assert_eq!(content.lines, vec!["   1 | hello", "   2 | world"]);
    assert!(content.truncation.is_none());
    assert!(content
        .lines
        .iter()
        .all(|line| !line.contains('\u{FEFF}') && !line.contains('\r')));
}

#[test]
fn test_bom_stripped_only_at_start() {
    assert_eq!(strip_bom("\u{FEFF}\u{FEFF}a"), "\u{FEFF}a");
    assert_eq!(strip_bom("a\u{FEFF}b"), "a\u{FEFF}b");
    assert_eq!(strip_bom("plain"), "plain");
}

#[test]
fn test_lone_carriage_returns_split_lines() {
    assert_eq!(split_lines("a\rb\r\nc\n"), vec!["a", "b", "c"]);
    assert!(split_lines("").is_empty());
}

#[test]
fn test_long_file_is_capped() {
    let text: String = (1..=1500).map(|n| format!("line {}\n", n)).collect();
    let limits = ContentLimits::default();
    let content = normalize_text(&text, false, &limits);

    assert_eq!(content.lines.len(), 1000);
    assert_eq!(content.lines[999], "1000 | line 1000");

    let truncation = content.truncation.unwrap();
    assert_eq!(truncation.reason, TruncationReason::Long);
    assert_eq!(truncation.total, 1500);
    assert_eq!(
        truncation_notice(&truncation, 0, &limits),
        "... File truncated. Showing first 1000 of 1500 lines ..."
    );
}

#[test]
fn test_oversized_file_keeps_first_lines() {
    let text: String = (1..=300).map(|n| format!("{}\n", n)).collect();
    let limits = ContentLimits::default();
    let content = normalize_text(&text, true, &limits);

    assert_eq!(content.lines.len(), 100);
    let truncation = content.truncation.unwrap();
    assert_eq!(truncation.reason, TruncationReason::Large);
    assert_eq!(truncation.reason.to_string(), "large");
    assert_eq!(
        truncation_notice(&truncation, 300_000, &limits),
        "... File is too large (292.97 KB). Showing first 100 lines only ..."
    );
}

#[test]
fn test_truncation_is_idempotent() {
    let limits = ContentLimits::default();
    for oversized in [false, true] {
        let mut lines: Vec<String> = (0..2500).map(|n| n.to_string()).collect();
        truncate_lines(&mut lines, oversized, &limits);
        let once = lines.clone();
        truncate_lines(&mut lines, oversized, &limits);
        assert_eq!(lines, once);
    }
}

#[test]
fn test_sanitize_line() {
    let line = "\tfoo\x07bar \u{1F680} \u{2600} \u{2702} \u{FFFD}";
    assert_eq!(sanitize_line(line, 4), "    foobar    ");
    assert_eq!(sanitize_line("caf\u{e9} \u{3bb}", 4), "caf\u{e9} \u{3bb}");
}

#[test]
fn test_number_line_is_right_justified() {
    assert_eq!(number_line(7, "x", 4), "   7 | x");
    assert_eq!(number_line(12345, "x", 4), "12345 | x");
}

#[test]
fn test_latin1_fallback_decoding() {
    assert_eq!(decode(&[b'c', b'a', b'f', 0xE9]), "caf\u{e9}");
    assert_eq!(decode("ok".as_bytes()), "ok");
}

// Utilities

#[test]
fn test_format_file_size() {
    assert_eq!(format_file_size(50), "50 B");
    assert_eq!(format_file_size(1024), "1.00 KB");
    assert_eq!(format_file_size(300_000), "292.97 KB");
    assert_eq!(format_file_size(1_048_576), "1.00 MB");
}

#[test]
fn test_group_by_top_dir() {
    let files = vec![entry("/r/a/x.txt"), entry("/r/root.md"), entry("/r/b/c/z.md")];
    let groups = group_by_top_dir(&files, Path::new("/r"));

    assert_eq!(groups.keys().cloned().collect::<Vec<_>>(), vec!["", "a", "b"]);
    assert_eq!(groups[""][0].path, PathBuf::from("/r/root.md"));
    assert_eq!(top_level_dir(Path::new("b/c/z.md")), "b");
    assert_eq!(top_level_dir(Path::new("root.md")), "");
}

// Scanning

#[test]
fn test_oversize_threshold_boundary() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    write_file(&repo, "at.txt", &[b'a'; 100])?;
    write_file(&repo, "over.txt", &[b'a'; 101])?;

    let mut config = test_config(&repo);
    config.max_file_size = 100;
    let files = scan(&config);

    let at = files.iter().find(|f| f.path.ends_with("at.txt")).unwrap();
    let over = files.iter().find(|f| f.path.ends_with("over.txt")).unwrap();
    assert!(!at.oversized);
    assert!(over.oversized);
    assert_eq!(over.size, 101);

    Ok(())
}

#[test]
fn test_scan_inclusion_rules() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    write_file(&repo, "src/app.js", b"let a = 1;")?;
    write_file(&repo, "src/app.min.js", b"let a=1;")?;
    write_file(&repo, "node_modules/dep/index.js", b"module.exports = 1;")?;
    write_file(&repo, "target/debug/out.rs", b"fn main() {}")?;
    write_file(&repo, "logo.png", &[0x89, b'P', b'N', b'G'])?;
    write_file(&repo, ".gitignore", b"target\n")?;
    write_file(&repo, ".env.example", b"KEY=\n")?;

    let files = scan(&test_config(&repo));
    let names: Vec<String> = files
        .iter()
        .map(|f| f.relative_to(&fs::canonicalize(&repo).unwrap()).display().to_string())
        .collect();

    assert_eq!(names, vec![".env.example", ".gitignore", "src/app.js"]);

    Ok(())
}

#[test]
fn test_scan_can_include_minified_and_extra_ignores() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    write_file(&repo, "app.min.js", b"x")?;
    write_file(&repo, "keep.rs", b"x")?;
    write_file(&repo, "generated.rs", b"x")?;

    let mut config = test_config(&repo);
    config.minified_patterns.clear();
    config.ignore_patterns = vec!["generated*".to_string()];
    let files = scan(&config);

    let names: Vec<_> = files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["app.min.js", "keep.rs"]);

    Ok(())
}

#[test]
fn test_scan_order_is_depth_first_by_name() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    for name in ["b/z.md", "a/y.txt", "a/x.txt", "c.txt", "a/sub/w.rs"] {
        write_file(&repo, name, b"x")?;
    }

    let files = scan(&test_config(&repo));
    let root = fs::canonicalize(&repo)?;
    let order: Vec<String> = files
        .iter()
        .map(|f| f.relative_to(&root).display().to_string())
        .collect();

    assert_eq!(order, vec!["a/sub/w.rs", "a/x.txt", "a/y.txt", "b/z.md", "c.txt"]);

    Ok(())
}

#[test]
fn test_scan_respects_gitignore() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    write_file(&repo, ".gitignore", b"secret.txt\n")?;
    write_file(&repo, "secret.txt", b"x")?;
    write_file(&repo, "public.txt", b"x")?;

    let mut config = test_config(&repo);
    config.respect_gitignore = true;
    let files = scan(&config);

    assert!(files.iter().any(|f| f.path.ends_with("public.txt")));
    assert!(!files.iter().any(|f| f.path.ends_with("secret.txt")));

    Ok(())
}

#[test]
fn test_skipped_files_reach_the_report() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    write_file(&repo, "main.rs", b"fn main() {}")?;
    write_file(&repo, "logo.png", &[0x89, b'P', b'N', b'G'])?;
    write_file(&repo, "bundle.min.js", b"x")?;

    let scanner = Scanner::new(test_config(&repo), Arc::new(ProgressBar::hidden()));
    let files = scanner.scan().unwrap();
    let stats = scanner.get_statistics();
    assert_eq!(files.len(), 1);
    assert_eq!(stats.files_skipped, 2);

    let report = BuildReport {
        files_scanned: files.len(),
        files_skipped: stats.files_skipped,
        ..BuildReport::default()
    };
    let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report);
    let row = text
        .lines()
        .find(|line| line.contains("Files Skipped"))
        .unwrap();
    assert!(row.contains('2'));

    Ok(())
}

#[test]
fn test_unreadable_root_is_a_warning() -> io::Result<()> {
    let temp = tempdir()?;
    let missing = temp.path().join("missing");

    for respect_gitignore in [false, true] {
        let mut config = Config::new(temp.path());
        config.respect_gitignore = respect_gitignore;
        let scanner = Scanner::new(config, Arc::new(ProgressBar::hidden()));

        let files = scanner.scan_root(&missing).unwrap();
        let warnings = scanner.get_statistics().warnings;
        assert!(files.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("missing"), "{}", warnings[0]);
    }

    Ok(())
}

#[test]
fn test_failed_path_looks_through_wrapped_errors() {
    let io_error = || ignore::Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
    let nested = ignore::Error::WithDepth {
        depth: 2,
        err: Box::new(ignore::Error::WithPath {
            path: PathBuf::from("/repo/locked"),
            err: Box::new(io_error()),
        }),
    };
    assert_eq!(failed_path(&nested), Some(Path::new("/repo/locked")));

    let looped = ignore::Error::Loop {
        ancestor: PathBuf::from("/repo"),
        child: PathBuf::from("/repo/link"),
    };
    assert_eq!(failed_path(&looped), Some(Path::new("/repo/link")));
    assert_eq!(failed_path(&io_error()), None);
}

// Layout

#[test]
fn test_wrap_text() {
    let rows = wrap_text(Font::Courier, 10.0, 60.0, "    0123456789");
    assert_eq!(rows, vec!["    012345", "6789"]);
    assert_eq!(wrap_text(Font::Courier, 10.0, 60.0, ""), vec![""]);

    let rows = wrap_text(Font::Helvetica, 10.0, 60.0, "alpha beta gamma delta");
    assert!(rows.len() > 1);
    assert_eq!(rows.join(" "), "alpha beta gamma delta");
}

#[test]
fn test_overlay_keeps_cursor() {
    let mut layout = Layout::new(Style::default());
    layout.text("first", Align::Left);
    layout.add_page();
    layout.text("second", Align::Left);
    let cursor = layout.cursor();

    let rule = DrawOp::Rule {
        x1: 0.0,
        x2: 10.0,
        y: 5.0,
        width: 1.0,
        color: Rgb::BLACK,
    };
    layout.overlay(0, rule.clone()).unwrap();

    assert_eq!(layout.cursor(), cursor);
    assert_eq!(layout.pages()[0].ops().len(), 2);
    assert!(layout.overlay(5, rule).is_err());
}

#[test]
fn test_add_page_reuses_unwritten_page() {
    let mut layout = Layout::new(Style::default());
    layout.add_page();
    layout.add_page();
    layout.text("only", Align::Left);
    assert_eq!(layout.page_count(), 1);
}

// Composition

#[test]
fn test_structure_overview_for_subdirectory() {
    let siblings = vec!["api".to_string(), "web".to_string()];
    let entries = vec!["src".to_string(), "README.md".to_string()];
    let lines = structure_overview("repo", Some((siblings.as_slice(), "web")), &entries);

    assert_eq!(
        lines,
        vec![
            (0, "repo".to_string()),
            (1, "|-- api".to_string()),
            (1, "+-- web (selected)".to_string()),
            (2, "    |-- src".to_string()),
            (2, "    +-- README.md".to_string()),
        ]
    );
}

#[test]
fn test_structure_overview_for_root() {
    let entries = vec!["a".to_string(), "b".to_string()];
    let lines = structure_overview("demo", None, &entries);
    let text: Vec<_> = lines.into_iter().map(|(_, line)| line).collect();

    assert_eq!(text, vec!["demo", "|-- a", "+-- b"]);
}

#[test]
fn test_breadcrumb() {
    assert_eq!(breadcrumb("demo", Path::new("a/b/c.rs")), "demo > a > b > c.rs");
    assert_eq!(breadcrumb("demo", Path::new("c.rs")), "demo > c.rs");
}

#[test]
fn test_compose_groups_and_truncation() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    let x = format!("{}\n", "a".repeat(49));
    let y = format!("{}\n", "y".repeat(49)).repeat(6000);
    write_file(&repo, "a/x.txt", x.as_bytes())?;
    write_file(&repo, "a/y.txt", y.as_bytes())?;
    write_file(&repo, "b/z.md", b"# z\nabcdef")?;

    let config = test_config(&repo);
    let files = scan(&config);
    assert_eq!(files.len(), 3);
    assert!(files.iter().find(|f| f.path.ends_with("y.txt")).unwrap().oversized);

    let composer = Composer::new(config, Arc::new(ProgressBar::hidden()));
    let layout = composer.compose(&files).unwrap();
    let texts = all_texts(layout.pages());

    for expected in [
        "demo",
        "Project Directory Structure",
        "|-- a",
        "+-- b",
        "|-- x.txt",
        "+-- y.txt",
        "+-- z.md",
        "demo > a > y.txt",
        "demo > b > z.md",
        "   2 | abcdef",
        "... File is too large (292.97 KB). Showing first 100 lines only ...",
    ] {
        assert!(texts.iter().any(|t| t == expected), "missing {:?}", expected);
    }

    let y_lines = texts
        .iter()
        .filter(|t| t.ends_with(&"y".repeat(49)))
        .count();
    assert_eq!(y_lines, 100);
    assert!(!texts.iter().any(|t| t.starts_with(" 101 | ")));

    let notices = texts.iter().filter(|t| t.starts_with("... File")).count();
    assert_eq!(notices, 1);

    let stats = composer.get_statistics();
    assert_eq!(stats.files_rendered, 3);
    assert_eq!(stats.truncated_files, 1);
    assert!(stats.read_errors.is_empty());
    assert_eq!(stats.pages, layout.page_count());

    Ok(())
}

#[test]
fn test_every_page_is_numbered() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    let long: String = (1..=400).map(|n| format!("value {}\n", n)).collect();
    write_file(&repo, "src/long.rs", long.as_bytes())?;

    let config = test_config(&repo);
    let files = scan(&config);
    let layout = Composer::new(config, Arc::new(ProgressBar::hidden()))
        .compose(&files)
        .unwrap();

    assert!(layout.page_count() > 2);
    for (index, page) in layout.pages().iter().enumerate() {
        match page.ops().last() {
            Some(DrawOp::Text { text, x, .. }) => {
                assert_eq!(*text, (index + 1).to_string());
                assert!(*x > 250.0 && *x < 300.0);
            }
            other => panic!("page {} ends with {:?}", index + 1, other),
        }
    }

    Ok(())
}

#[test]
fn test_continuation_pages_repeat_running_header() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    let long: String = (1..=400).map(|n| format!("value {}\n", n)).collect();
    write_file(&repo, "src/long.rs", long.as_bytes())?;

    let config = test_config(&repo);
    let files = scan(&config);
    let layout = Composer::new(config, Arc::new(ProgressBar::hidden()))
        .compose(&files)
        .unwrap();

    for page in &layout.pages()[1..] {
        match page.ops().first() {
            Some(DrawOp::Text { text, y, .. }) => {
                assert_eq!(text, "src");
                assert_eq!(*y, 30.0);
            }
            other => panic!("unexpected first op {:?}", other),
        }
    }

    let texts = all_texts(layout.pages());
    assert!(texts.iter().any(|t| t == " 400 | value 400"));

    Ok(())
}

#[test]
fn test_tree_spanning_pages_keeps_every_entry() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    for n in 0..150 {
        write_file(&repo, &format!("pkg/d{:03}/f.rs", n), b"x\n")?;
    }

    let config = test_config(&repo);
    let files = scan(&config);
    assert_eq!(files.len(), 150);

    let layout = Composer::new(config, Arc::new(ProgressBar::hidden()))
        .compose(&files)
        .unwrap();

    // the tree alone needs more than one page
    let tree_pages = layout
        .pages()
        .iter()
        .filter(|page| page.texts().any(|t| t.ends_with("+-- f.rs")))
        .count();
    assert!(tree_pages > 1);

    let texts = all_texts(layout.pages());
    let leaves = texts.iter().filter(|t| t.ends_with("+-- f.rs")).count();
    assert_eq!(leaves, files.len());
    assert!(texts.iter().any(|t| t == "+-- d149"));

    for page in &layout.pages()[1..] {
        assert_eq!(page.texts().next(), Some("pkg"));
    }

    Ok(())
}

#[test]
fn test_unreadable_file_becomes_inline_note() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    write_file(&repo, "a/ok.txt", b"fine\n")?;
    let gone = write_file(&repo, "a/gone.txt", b"soon deleted\n")?;

    let config = test_config(&repo);
    let files = scan(&config);
    fs::remove_file(gone)?;

    let composer = Composer::new(config, Arc::new(ProgressBar::hidden()));
    let layout = composer.compose(&files).unwrap();
    let texts = all_texts(layout.pages());

    assert!(texts.iter().any(|t| t.starts_with("Error reading file:")));
    assert!(texts.iter().any(|t| t == "   1 | fine"));

    let stats = composer.get_statistics();
    assert_eq!(stats.read_errors.len(), 1);
    assert_eq!(stats.files_rendered, 1);

    Ok(())
}

#[test]
fn test_root_files_use_root_label_group() -> io::Result<()> {
    let (_temp, repo) = setup_repo()?;
    write_file(&repo, "README.md", b"hi\n")?;
    write_file(&repo, "lib/mod.rs", b"x\n")?;

    let config = test_config(&repo);
    let files = scan(&config);
    let layout = Composer::new(config, Arc::new(ProgressBar::hidden()))
        .compose(&files)
        .unwrap();

    // title page, root group, lib group
    assert_eq!(layout.page_count(), 3);
    let root_page: Vec<_> = layout.pages()[1].texts().collect();
    assert_eq!(root_page[0], "demo");
    assert!(root_page.contains(&"demo > README.md"));

    Ok(())
}

// Output

#[test]
fn test_pdf_writer_output_is_loadable() -> io::Result<()> {
    let (temp, repo) = setup_repo()?;
    write_file(&repo, "a/x.txt", "caf\u{e9} \u{2713}\n".as_bytes())?;

    let config = test_config(&repo);
    let files = scan(&config);
    let layout = Composer::new(config.clone(), Arc::new(ProgressBar::hidden()))
        .compose(&files)
        .unwrap();

    let output = temp.path().join("nested").join("doc.pdf");
    PdfWriter::new(config.style.clone())
        .write(layout.pages(), &output)
        .unwrap();

    let bytes = fs::read(&output)?;
    assert!(bytes.starts_with(b"%PDF-1.5"));
    let document = lopdf::Document::load(&output).unwrap();
    assert_eq!(document.get_pages().len(), layout.page_count());

    Ok(())
}

#[test]
fn test_pdf_writer_reports_sink_errors() -> io::Result<()> {
    let temp = tempdir()?;
    let blocker = write_file(temp.path(), "blocker", b"not a directory")?;

    let mut layout = Layout::new(Style::default());
    layout.text("page", Align::Left);

    let result = PdfWriter::new(Style::default()).write(layout.pages(), &blocker.join("doc.pdf"));
    match result {
        Err(err @ CodePdfError::Sink(_)) => assert!(err.is_fatal()),
        other => panic!("expected sink error, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_encode_text_for_standard_fonts() {
    assert_eq!(encode_text("abc"), b"abc".to_vec());
    assert_eq!(encode_text("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
    assert_eq!(encode_text("\u{2713}\u{3bb}"), b"??".to_vec());
}

#[test]
fn test_scan_and_read_errors_are_not_fatal() {
    assert!(!CodePdfError::scan("/x", "denied").is_fatal());
    assert!(!CodePdfError::read("/x", io::Error::new(io::ErrorKind::Other, "bad")).is_fatal());
    assert!(CodePdfError::Sink("disk full".to_string()).is_fatal());
}
