/*!
 * Command-line interface for codepdf
 */

use std::io;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use codepdf::config::{Args, Config};
use codepdf::report::{ReportFormat, Reporter};

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        clap_complete::generate(shell, &mut command, "codepdf", &mut io::stdout());
        return Ok(());
    }

    // RUST_LOG always wins; --verbose falls back to DEBUG
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init();

    // Create configuration
    let config = Config::from_args(args);

    // Validate configuration
    config.validate()?;

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) Elapsed: {elapsed_precise}")
            .unwrap(),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("Building");
    progress.set_message(format!(
        "Scanning directory: {}",
        config.selected_dir().display()
    ));

    let result = codepdf::generate(&config, Arc::new(progress.clone()));

    // Clear the progress bar
    progress.finish_and_clear();

    let build_report = result?;

    let reporter = Reporter::new(ReportFormat::ConsoleTable);
    reporter.print_report(&build_report);

    Ok(())
}
