/*!
 * Configuration handling for codepdf
 */

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::style::Style;
use crate::utils::{DEFAULT_EXCLUDED_DIRS, DEFAULT_INCLUDE, DEFAULT_MINIFIED};
use crate::{bail, ensure};

/// Default oversize threshold in bytes
pub const DEFAULT_MAX_FILE_SIZE: u64 = 200 * 1024;

/// Default cap on rendered lines per file
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Default number of lines rendered for oversized files
pub const DEFAULT_LARGE_FILE_LINES: usize = 100;

/// Command-line arguments for codepdf
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codepdf",
    version = env!("CARGO_PKG_VERSION"),
    about = "Render a repository's directory tree and source files into a PDF",
    long_about = "Walks a repository, keeps recognized source and text files, and lays out a paginated PDF with a directory overview, one section per top-level directory, and numbered file listings."
)]
pub struct Args {
    /// Repository root directory
    #[clap(default_value = ".")]
    pub repository: String,

    /// Process only this subdirectory of the repository root
    #[clap(long)]
    pub subdir: Option<String>,

    /// Output PDF file (defaults to <output-dir>/<label>_<date>.pdf)
    #[clap(short, long)]
    pub output: Option<String>,

    /// Directory for generated documents when --output is not given
    #[clap(long, default_value = "output")]
    pub output_dir: String,

    /// Document title (defaults to the repository name)
    #[clap(long)]
    pub title: Option<String>,

    /// Comma-separated extensions or exact file names to include
    #[clap(long, value_delimiter = ',')]
    pub include_ext: Vec<String>,

    /// Comma-separated directory names to skip entirely
    #[clap(long, value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// Comma-separated glob patterns of file names to ignore
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Files larger than this many bytes only show their first lines
    #[clap(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Maximum number of lines rendered per file
    #[clap(long, default_value_t = DEFAULT_MAX_LINES)]
    pub max_lines: usize,

    /// Number of lines rendered for files over --max-file-size
    #[clap(long, default_value_t = DEFAULT_LARGE_FILE_LINES)]
    pub large_file_lines: usize,

    /// Render minified files (*.min.*) too
    #[clap(long)]
    pub include_minified: bool,

    /// Respect .gitignore files
    #[clap(long)]
    pub respect_gitignore: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,

    /// Enable verbose logging
    #[clap(short, long)]
    pub verbose: bool,
}

/// Line limits applied while normalizing file content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLimits {
    /// Lines kept for any file
    pub max_lines: usize,
    /// Lines kept for oversized files
    pub large_file_lines: usize,
    /// Spaces substituted for each tab
    pub tab_width: usize,
    /// Width of the right-justified line number column
    pub line_number_width: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            large_file_lines: DEFAULT_LARGE_FILE_LINES,
            tab_width: 4,
            line_number_width: 4,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Repository root directory
    pub repo_root: PathBuf,

    /// Selected subdirectory of the repository root, if any
    pub subdir: Option<String>,

    /// Output PDF path
    pub output_file: PathBuf,

    /// Document title override
    pub title: Option<String>,

    /// Extensions (with leading dot) or exact file names to include
    pub include: Vec<String>,

    /// Directory names pruned during the scan
    pub excluded_dirs: Vec<String>,

    /// Extra glob patterns of file names to skip
    pub ignore_patterns: Vec<String>,

    /// Glob patterns identifying minified files; empty disables the check
    pub minified_patterns: Vec<String>,

    /// Files above this size are marked oversized
    pub max_file_size: u64,

    /// Line limits for rendered content
    pub limits: ContentLimits,

    /// Whether to respect .gitignore files
    pub respect_gitignore: bool,

    /// Page geometry, fonts and colors
    pub style: Style,
}

impl Config {
    /// Configuration with all defaults for the repository at `repo_root`
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        let repo_root = repo_root.into();
        Self {
            output_file: repo_root.join("output.pdf"),
            repo_root,
            subdir: None,
            title: None,
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            ignore_patterns: Vec::new(),
            minified_patterns: DEFAULT_MINIFIED.iter().map(|s| s.to_string()).collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            limits: ContentLimits::default(),
            respect_gitignore: false,
            style: Style::default(),
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let mut config = Self::new(&args.repository);

        config.subdir = args.subdir.filter(|s| !s.is_empty());
        config.title = args.title;
        if !args.include_ext.is_empty() {
            config.include = args.include_ext.iter().map(|s| normalize_rule(s)).collect();
        }
        if !args.exclude_dirs.is_empty() {
            config.excluded_dirs = args.exclude_dirs;
        }
        config.ignore_patterns = args.ignore_patterns;
        if args.include_minified {
            config.minified_patterns.clear();
        }
        config.max_file_size = args.max_file_size;
        config.limits.max_lines = args.max_lines;
        config.limits.large_file_lines = args.large_file_lines;
        config.respect_gitignore = args.respect_gitignore;

        config.output_file = match args.output {
            Some(output) => PathBuf::from(output),
            None => {
                let date = Local::now().format("%Y-%m-%d");
                PathBuf::from(args.output_dir).join(format!("{}_{}.pdf", config.label(), date))
            }
        };

        config
    }

    /// Directory whose files are rendered
    pub fn selected_dir(&self) -> PathBuf {
        match &self.subdir {
            Some(subdir) => self.repo_root.join(subdir),
            None => self.repo_root.clone(),
        }
    }

    /// Whether a subdirectory of the repository was selected
    pub fn is_subdirectory(&self) -> bool {
        self.subdir.is_some()
    }

    /// Name of the repository root directory
    pub fn repo_name(&self) -> String {
        dir_name(&self.repo_root)
    }

    /// Document title
    pub fn document_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.repo_name())
    }

    /// Label used for default output names: `repo` or `repo_subdir`
    pub fn label(&self) -> String {
        let label = match &self.subdir {
            Some(subdir) => format!("{}/{}", self.repo_name(), subdir),
            None => self.repo_name(),
        };
        label.replace(['/', '\\'], "_")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.repo_root.is_dir(),
            PathNotFound,
            "Repository directory not found: {}",
            self.repo_root.display()
        );

        let selected = self.selected_dir();
        ensure!(
            selected.is_dir(),
            PathNotFound,
            "Selected directory not found: {}",
            selected.display()
        );

        if let Some(parent) = self.output_file.parent() {
            if parent.exists() && !parent.is_dir() {
                bail!(
                    Config,
                    "Output location is not a directory: {}",
                    parent.display()
                );
            }
        }

        ensure!(
            self.limits.max_lines > 0 && self.limits.large_file_lines > 0,
            InvalidArgument,
            "Line limits must be greater than zero"
        );

        Ok(())
    }
}

/// Final path segment of `path`, resolving `.` and friends when possible
pub fn dir_name(path: &Path) -> String {
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| resolved.display().to_string())
}

// "rs" and ".rs" both mean the extension; names with a dot inside stay as-is
fn normalize_rule(rule: &str) -> String {
    let rule = rule.trim();
    if rule.contains('.') {
        rule.to_string()
    } else {
        format!(".{}", rule)
    }
}
