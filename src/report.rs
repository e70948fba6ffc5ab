/*!
 * Reporting functionality for codepdf
 *
 * Prints a summary of a finished build using the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

/// Statistics for one document build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to scan, lay out and write
    pub duration: Duration,
    /// Number of files selected by the scan
    pub files_scanned: usize,
    /// Number of files whose content was rendered
    pub files_rendered: usize,
    /// Number of files rejected by the inclusion rules
    pub files_skipped: usize,
    /// Number of files above the size threshold
    pub oversized_files: usize,
    /// Number of files whose content was shortened
    pub truncated_files: usize,
    /// Files that could not be read
    pub read_errors: Vec<String>,
    /// Subtrees that could not be scanned
    pub scan_warnings: Vec<String>,
    /// Pages in the document
    pub pages: usize,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for build results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &BuildReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &BuildReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &BuildReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let row = |key: &str, value: String| SummaryRow {
            key: key.to_string(),
            value,
        };

        let rows = vec![
            row("Output File", report.output_file.clone()),
            row("Process Time", format!("{:.4?}", report.duration)),
            row("Files Scanned", report.files_scanned.to_string()),
            row("Files Rendered", report.files_rendered.to_string()),
            row("Files Skipped", report.files_skipped.to_string()),
            row("Oversized Files", report.oversized_files.to_string()),
            row("Truncated Files", report.truncated_files.to_string()),
            row("Unreadable Files", report.read_errors.len().to_string()),
            row("Scan Warnings", report.scan_warnings.len().to_string()),
            row("Pages", report.pages.to_string()),
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_problems_table(&self, report: &BuildReport) -> Option<String> {
        #[derive(Tabled)]
        struct ProblemRow {
            #[tabled(rename = "Kind")]
            kind: &'static str,

            #[tabled(rename = "Detail")]
            detail: String,
        }

        let rows: Vec<ProblemRow> = report
            .scan_warnings
            .iter()
            .map(|detail| ProblemRow {
                kind: "scan",
                detail: detail.clone(),
            })
            .chain(report.read_errors.iter().map(|detail| ProblemRow {
                kind: "read",
                detail: detail.clone(),
            }))
            .collect();

        if rows.is_empty() {
            return None;
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        Some(table.to_string())
    }

    fn generate_console_report(&self, report: &BuildReport) -> String {
        let summary = format!("PDF GENERATED\n{}", self.create_summary_table(report));
        match self.create_problems_table(report) {
            Some(problems) => format!("SKIPPED INPUTS\n{}\n\n{}", problems, summary),
            None => summary,
        }
    }
}
