#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use json_overlay::{
    app_config::AppConfig,
    cli::{Cli, MergePaths},
    document::writer,
    merge_documents,
    profiling::{PipelineMetrics, Timer},
    read_document,
};
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(cli.debug, cli.trace);

    let app_config = load_and_log_config()?;
    let paths = cli.resolve_paths(&app_config.map(|c| c.paths).unwrap_or_default());
    debug!(
        "Resolved paths: target={}, source={}, output={}",
        paths.target.display(),
        paths.source.display(),
        paths.output.display()
    );

    run_merge(&paths, cli.dry_run, cli.backup)
}

/// Initialize tracing with the specified debug/trace flags
fn initialize_tracing(debug: bool, trace: bool) {
    let log_level = if trace {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::builder().with_default_directive(log_level.into()).from_env_lossy())
        .init();
}

/// Load application configuration and log its status
fn load_and_log_config() -> Result<Option<AppConfig>> {
    let config_path = AppConfig::config_path()?;
    let app_config =
        AppConfig::load_from(&config_path).context("Failed to load app configuration")?;

    if app_config.is_some() {
        debug!("Loaded app configuration from: {}", config_path.display());
    } else {
        debug!("No app configuration file found at: {}", config_path.display());
    }

    Ok(app_config)
}

/// Load both documents, merge the source into the target and persist the result
fn run_merge(paths: &MergePaths, dry_run: bool, backup: bool) -> Result<()> {
    let mut metrics = PipelineMetrics::new();

    let timer = Timer::new("load");
    let target = read_document(&paths.target).context("Failed to load target document")?;
    let source = read_document(&paths.source).context("Failed to load source document")?;
    metrics.load = timer.stop();
    metrics.target_keys = target.len();
    metrics.source_keys = source.len();

    let timer = Timer::new("merge");
    let merged = merge_documents(target, &source);
    metrics.merge = timer.stop();

    if dry_run {
        info!("Dry run mode - not writing {}", paths.output.display());
        let rendered =
            writer::render_document(&merged).context("Failed to serialize merged document")?;
        println!("{rendered}");
        metrics.log_summary();
        return Ok(());
    }

    let timer = Timer::new("persist");
    if backup {
        if let Some(backup_path) = writer::backup_file(&paths.output)
            .with_context(|| format!("Failed to back up {}", paths.output.display()))?
        {
            info!("Backup created: {}", backup_path.display());
        }
    }

    writer::write_document(&paths.output, &merged)
        .context("Failed to write merged document")?;
    metrics.persist = timer.stop();
    metrics.log_summary();

    println!("Merge completed successfully.");
    Ok(())
}
