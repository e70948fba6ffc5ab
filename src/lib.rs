/*!
 * codepdf - Render a repository into a paginated PDF
 *
 * Walks a directory, keeps recognized source and text files, and lays them
 * out page by page: a structure overview, then one section per top-level
 * directory with its tree and the numbered content of every file.
 */

pub mod composer;
pub mod config;
pub mod error;
pub mod layout;
pub mod normalizer;
pub mod report;
pub mod scanner;
pub mod style;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use tracing::info;

// Re-export main components for easier access
pub use composer::Composer;
pub use config::Config;
pub use error::{CodePdfError, Result};
pub use report::{BuildReport, ReportFormat, Reporter};
pub use scanner::Scanner;
pub use types::{DirectoryTree, FileEntry, NormalizedContent, TreeNode, Truncation, TruncationReason};
pub use utils::format_file_size;
pub use writer::PdfWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan, lay out and write one document as described by `config`.
///
/// Unreadable subtrees and files are reported in the returned summary;
/// only failures of the output file abort the build.
pub fn generate(config: &Config, progress: Arc<ProgressBar>) -> Result<BuildReport> {
    let start_time = Instant::now();

    let scanner = Scanner::new(config.clone(), Arc::clone(&progress));
    let files = scanner.scan()?;
    let scan_stats = scanner.get_statistics();
    ensure!(
        !files.is_empty(),
        InvalidArgument,
        "No files found in {}",
        config.selected_dir().display()
    );
    info!(files = files.len(), "scan complete");

    progress.set_length(files.len() as u64);
    progress.set_position(0);

    let composer = Composer::new(config.clone(), Arc::clone(&progress));
    let layout = composer.compose(&files)?;
    let compose_stats = composer.get_statistics();

    let writer = PdfWriter::new(config.style.clone());
    writer.write(layout.pages(), &config.output_file)?;

    Ok(BuildReport {
        output_file: config.output_file.display().to_string(),
        duration: start_time.elapsed(),
        files_scanned: files.len(),
        files_rendered: compose_stats.files_rendered,
        files_skipped: scan_stats.files_skipped,
        oversized_files: scan_stats.oversized_files,
        truncated_files: compose_stats.truncated_files,
        read_errors: compose_stats.read_errors,
        scan_warnings: scan_stats.warnings,
        pages: compose_stats.pages,
    })
}
