mod file_config;

pub use file_config::{FileConfig, InputConfig};

use crate::dimensions::Clock;
use crate::pipeline::{PipelineOptions, LOG_DATA_DIR, SONG_DATA_DIR};
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use std::path::{Component, Path, PathBuf};

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub input_root: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
    pub clock: Clock,
    pub threads: Option<usize>,
    pub dedupe_time_rows: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub clock: Clock,
    pub threads: Option<usize>,
    pub dedupe_time_rows: bool,
    pub dry_run: bool,
    pub song_data_dir: String,
    pub log_data_dir: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let input_root = file
            .input_root
            .map(PathBuf::from)
            .or_else(|| cli.input_root.clone())
            .ok_or_else(|| {
                anyhow!("input_root must be specified on the command line or in config file")
            })?;
        reject_remote(&input_root)?;
        if !input_root.exists() {
            bail!("Input directory does not exist: {:?}", input_root);
        }
        if !input_root.is_dir() {
            bail!("input_root is not a directory: {:?}", input_root);
        }

        let output_root = file
            .output_root
            .map(PathBuf::from)
            .or_else(|| cli.output_root.clone())
            .ok_or_else(|| {
                anyhow!("output_root must be specified on the command line or in config file")
            })?;
        reject_remote(&output_root)?;
        if output_root.exists() && !output_root.is_dir() {
            bail!("output_root is not a directory: {:?}", output_root);
        }
        if same_location(&input_root, &output_root) {
            bail!(
                "output_root must differ from input_root: {:?}",
                output_root
            );
        }

        let clock = match file.clock {
            Some(value) => parse_clock(&value)
                .ok_or_else(|| anyhow!("Invalid clock {:?}, expected local or utc", value))?,
            None => cli.clock,
        };

        let threads = file.threads.or(cli.threads);
        if threads == Some(0) {
            bail!("threads must be greater than zero");
        }

        let dedupe_time_rows = file.dedupe_time_rows.unwrap_or(cli.dedupe_time_rows);

        let input = file.input.unwrap_or_default();
        let song_data_dir = input
            .song_data_dir
            .unwrap_or_else(|| SONG_DATA_DIR.to_string());
        let log_data_dir = input
            .log_data_dir
            .unwrap_or_else(|| LOG_DATA_DIR.to_string());
        check_subdir("song_data_dir", &song_data_dir)?;
        check_subdir("log_data_dir", &log_data_dir)?;

        Ok(Self {
            input_root,
            output_root,
            clock,
            threads,
            dedupe_time_rows,
            dry_run: cli.dry_run,
            song_data_dir,
            log_data_dir,
        })
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            clock: self.clock,
            dedupe_time_rows: self.dedupe_time_rows,
            threads: self.threads,
            dry_run: self.dry_run,
            song_data_dir: self.song_data_dir.clone(),
            log_data_dir: self.log_data_dir.clone(),
        }
    }
}

/// Parses a clock name into Clock.
/// Uses clap's ValueEnum trait for parsing.
fn parse_clock(s: &str) -> Option<Clock> {
    Clock::from_str(s, true).ok()
}

fn reject_remote(path: &Path) -> Result<()> {
    if path.to_string_lossy().contains("://") {
        bail!("Only local paths are supported, got {:?}", path);
    }
    Ok(())
}

fn same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn check_subdir(name: &str, dir: &str) -> Result<()> {
    let path = Path::new(dir);
    let plain = path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if !plain {
        bail!("{} must be a relative path inside input_root: {:?}", name, dir);
    }
    Ok(())
}
