use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_TARGET: &str = "/data/udapi-config/ubios-udapi-server/ubios-udapi-server.state";
pub const DEFAULT_SOURCE: &str = "/data/myconfig_gateway_json/myconfig.gateway.json";

#[derive(Parser, Debug)]
#[command(
    name = "json-overlay",
    about = "Overlay a source JSON document onto a target JSON document",
    long_about = "json-overlay merges the values of a source JSON document into a target document.

Merge rules:
  • Keys missing from the target are added
  • Nested objects are merged recursively
  • Scalars are overwritten by the source
  • Arrays of strings, numbers or booleans are replaced by the source array
  • Arrays of records are merged element by element, matching records by
    id, name, identification.{id,name} or config.{id,name}
  • New records with a numeric id are inserted in id order

Paths are resolved from, in order: command-line flags, OVERLAY_* environment
variables, [paths] in $XDG_CONFIG_HOME/json-overlay/config.toml, built-in defaults.

Defaults:
  • target: /data/udapi-config/ubios-udapi-server/ubios-udapi-server.state
  • source: /data/myconfig_gateway_json/myconfig.gateway.json
  • output: the target path

Examples:
  # Patch the gateway state in place
  json-overlay

  # Merge into a separate output file
  json-overlay -t base.json -s overrides.json -o merged.json

  # Preview the merged document
  json-overlay -t base.json -s overrides.json --dry-run",
    version,
    author
)]
pub struct Cli {
    /// Path to the target document (merged into)
    #[arg(short, long, env = "OVERLAY_TARGET", value_hint = clap::ValueHint::FilePath)]
    pub target: Option<PathBuf>,

    /// Path to the source document (merged from)
    #[arg(short, long, env = "OVERLAY_SOURCE", value_hint = clap::ValueHint::FilePath)]
    pub source: Option<PathBuf>,

    /// Path of the merged output (defaults to the target path)
    #[arg(short, long, env = "OVERLAY_OUTPUT", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Print the merged document instead of writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Create timestamped backup of the output file before overwriting it
    #[arg(short, long)]
    pub backup: bool,

    /// Enable debug output (shows INFO and DEBUG messages)
    #[arg(long)]
    pub debug: bool,

    /// Enable trace output (shows every merge decision)
    #[arg(long)]
    pub trace: bool,
}

/// Fully resolved file paths for one merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePaths {
    pub target: PathBuf,
    pub source: PathBuf,
    pub output: PathBuf,
}

impl Cli {
    /// Resolve paths, preferring flags and environment over `configured` values
    /// and those over the built-in defaults. The output falls back to the
    /// resolved target.
    pub fn resolve_paths(&self, configured: &crate::app_config::PathsConfig) -> MergePaths {
        let target = self
            .target
            .clone()
            .or_else(|| configured.target.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET));
        let source = self
            .source
            .clone()
            .or_else(|| configured.source.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));
        let output = self
            .output
            .clone()
            .or_else(|| configured.output.clone())
            .unwrap_or_else(|| target.clone());

        MergePaths { target, source, output }
    }
}
