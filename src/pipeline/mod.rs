//! Batch orchestration.
//!
//! A run discovers the input files, parses both feeds in parallel, derives the
//! star schema and writes the five tables in a fixed order: songs, artists,
//! users, time, songplays. The first failure aborts the run. Tables written
//! before the failure are left in place.

mod star;
mod summary;

pub use star::{build_star_schema, StarSchema};
pub use summary::RunSummary;

use crate::dimensions::Clock;
use crate::models::{CatalogEntry, PlayEvent};
use crate::parser::{parse_catalog_file, parse_log_file, ParseReport};
use crate::storage::{StorageError, WarehouseStorage};
use crate::writer::{write_table, TableRow, TableWriteStats, WriteError};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::info;

/// Default input subdirectory of the song catalog feed.
pub const SONG_DATA_DIR: &str = "song_data";

/// Default input subdirectory of the activity log feed.
pub const LOG_DATA_DIR: &str = "log_data";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to read input: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to write table {table}: {source}")]
    Write {
        table: &'static str,
        #[source]
        source: WriteError,
    },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Knobs of a single run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub clock: Clock,
    pub dedupe_time_rows: bool,
    /// Worker threads. `None` uses rayon's global pool.
    pub threads: Option<usize>,
    /// Build every table but write nothing.
    pub dry_run: bool,
    pub song_data_dir: String,
    pub log_data_dir: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            clock: Clock::default(),
            dedupe_time_rows: false,
            threads: None,
            dry_run: false,
            song_data_dir: SONG_DATA_DIR.to_string(),
            log_data_dir: LOG_DATA_DIR.to_string(),
        }
    }
}

pub struct Pipeline {
    storage: Arc<dyn WarehouseStorage>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(storage: Arc<dyn WarehouseStorage>, options: PipelineOptions) -> Self {
        Pipeline { storage, options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run one batch to completion.
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        match self.options.threads {
            Some(0) => Err(PipelineError::Configuration(
                "threads must be greater than zero".to_string(),
            )),
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|index| format!("warehouse-{index}"))
                    .build()?;
                pool.install(|| self.run_batch())
            }
            None => self.run_batch(),
        }
    }

    fn run_batch(&self) -> Result<RunSummary, PipelineError> {
        let started = Instant::now();

        info!("Loading song catalog from {}...", self.options.song_data_dir);
        let (catalog, song_report) = self.load_catalog()?;
        song_report.log("song");

        info!("Loading activity log from {}...", self.options.log_data_dir);
        let (events, log_report) = self.load_events()?;
        log_report.log("log");

        info!("Building star schema...");
        let star = build_star_schema(&catalog, &events, &self.options);
        info!(
            "Resolved {} songplays ({} matched to the catalog)",
            star.songplays.len(),
            star.match_stats.matched
        );

        let tables = if self.options.dry_run {
            info!("Dry run, no table written");
            Vec::new()
        } else {
            self.write_tables(&star)?
        };

        Ok(RunSummary {
            song_report,
            log_report,
            songs: star.songs.len(),
            artists: star.artists.len(),
            users: star.users.len(),
            time_rows: star.time.len(),
            songplays: star.songplays.len(),
            match_stats: star.match_stats,
            tables,
            dry_run: self.options.dry_run,
            elapsed: started.elapsed(),
        })
    }

    /// Parse every catalog file. Entries keep file order.
    fn load_catalog(&self) -> Result<(Vec<CatalogEntry>, ParseReport), PipelineError> {
        let files = self.storage.list_input_files(&self.options.song_data_dir)?;
        let parsed = files
            .par_iter()
            .map(|path| -> Result<_, StorageError> {
                let text = self.storage.read_input(path)?;
                Ok(parse_catalog_file(&text))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(concat(parsed))
    }

    /// Parse every log file, tagging each event with its file position so
    /// ties can be broken by input order later on.
    fn load_events(&self) -> Result<(Vec<PlayEvent>, ParseReport), PipelineError> {
        let files = self.storage.list_input_files(&self.options.log_data_dir)?;
        let parsed = files
            .par_iter()
            .enumerate()
            .map(|(index, path)| -> Result<_, PipelineError> {
                let file_index = u32::try_from(index).map_err(|_| {
                    PipelineError::Configuration(format!("too many log files ({})", files.len()))
                })?;
                let text = self.storage.read_input(path)?;
                Ok(parse_log_file(file_index, &text))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(concat(parsed))
    }

    fn write_tables(&self, star: &StarSchema) -> Result<Vec<TableWriteStats>, PipelineError> {
        let storage = self.storage.as_ref();
        Ok(vec![
            write(storage, &star.songs)?,
            write(storage, &star.artists)?,
            write(storage, &star.users)?,
            write(storage, &star.time)?,
            write(storage, &star.songplays)?,
        ])
    }
}

fn concat<T>(parsed: Vec<(Vec<T>, ParseReport)>) -> (Vec<T>, ParseReport) {
    let mut rows = Vec::with_capacity(parsed.iter().map(|(rows, _)| rows.len()).sum());
    let mut report = ParseReport::default();
    for (file_rows, file_report) in parsed {
        rows.extend(file_rows);
        report = report.merge(file_report);
    }
    (rows, report)
}

fn write<R: TableRow>(
    storage: &dyn WarehouseStorage,
    rows: &[R],
) -> Result<TableWriteStats, PipelineError> {
    info!("Writing {} ({} rows)...", R::TABLE, rows.len());
    write_table(storage, rows).map_err(|source| PipelineError::Write {
        table: R::TABLE,
        source,
    })
}
