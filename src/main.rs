use anyhow::{Context, Result};
use clap::Parser;
use pezzottify_warehouse::config::{AppConfig, CliConfig, FileConfig};
use pezzottify_warehouse::{Clock, LocalStorage, Pipeline};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "warehouse-etl")]
#[command(about = "Build the listening star schema from raw song and log data")]
struct CliArgs {
    /// Directory containing song_data/ and log_data/.
    #[clap(value_parser = parse_path)]
    pub input_root: Option<PathBuf>,

    /// Directory the tables are written to.
    #[clap(value_parser = parse_path)]
    pub output_root: Option<PathBuf>,

    /// Path to a TOML config file. Values in the file override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Wall clock used to derive start_time from event timestamps.
    #[clap(long, default_value = "local")]
    pub clock: Clock,

    /// Number of worker threads. Defaults to one per core.
    #[clap(long)]
    pub threads: Option<usize>,

    /// Keep a single time row per distinct start_time.
    #[clap(long, default_value_t = false)]
    pub dedupe_time_rows: bool,

    /// Build every table and report, without writing anything.
    #[clap(long, default_value_t = false)]
    pub dry_run: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            input_root: self.input_root.clone(),
            output_root: self.output_root.clone(),
            clock: self.clock,
            threads: self.threads,
            dedupe_time_rows: self.dedupe_time_rows,
            dry_run: self.dry_run,
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    info!(
        "warehouse-etl {}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)
        .context("Invalid configuration")?;

    info!("Input: {:?}", config.input_root);
    info!("Output: {:?}", config.output_root);
    info!("Clock: {:?}", config.clock);

    let storage = Arc::new(LocalStorage::new(&config.input_root, &config.output_root));
    let pipeline = Pipeline::new(storage, config.pipeline_options());
    let summary = pipeline.run().context("Batch failed")?;
    summary.log();

    Ok(())
}
