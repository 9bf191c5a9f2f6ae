use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use config::{DumpSettings, LevelOfDetail};
use std::path::{Path, PathBuf};

/// memdump-rs: per-process memory-dump graph sampler
///
/// memdump-rs runs the registered memory-dump providers against the current
/// process, builds the allocator dump graph and writes one JSON snapshot per
/// sampling pass.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    ///
    /// If not provided, the default locations are checked. They are
    /// `/etc/memdump-rs/config.toml` and `/etc/memdump-rs/config.d/*.toml`,
    /// where the latter being a glob pattern. If they don't exist, the default
    /// configuration is used.
    #[arg(short, long, value_parser = validate_file)]
    pub conffile: Option<PathBuf>,

    /// Level of detail, overriding the configured one.
    ///
    /// One of `background`, `light` or `detailed`.
    #[arg(short, long, value_parser = validate_level)]
    pub level: Option<LevelOfDetail>,

    /// Only run summary providers.
    #[arg(short, long)]
    pub summary_only: bool,

    /// Number of sampling passes. Zero means run until interrupted.
    #[arg(short, long)]
    pub passes: Option<u32>,

    /// File to write snapshots to.
    ///
    /// If not provided, snapshots are written to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

impl Cli {
    /// Apply command line overrides on top of the loaded settings.
    pub fn apply(&self, settings: &mut DumpSettings) {
        if let Some(level) = self.level {
            settings.level_of_detail = level;
        }
        if self.summary_only {
            settings.summary_only = true;
        }
        if let Some(passes) = self.passes {
            settings.passes = passes;
        }
    }
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.exists() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}

/// Validate level of detail
#[inline(always)]
fn validate_level(level: &str) -> Result<LevelOfDetail, String> {
    level
        .parse()
        .map_err(|_| format!("`{level}` is not a valid level of detail"))
}
