use crate::facts::MatchStats;
use crate::parser::ParseReport;
use crate::writer::TableWriteStats;
use std::time::Duration;
use tracing::{info, warn};

/// Outcome of a completed batch.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub song_report: ParseReport,
    pub log_report: ParseReport,
    pub songs: usize,
    pub artists: usize,
    pub users: usize,
    pub time_rows: usize,
    pub songplays: usize,
    pub match_stats: MatchStats,
    /// Empty on a dry run.
    pub tables: Vec<TableWriteStats>,
    pub dry_run: bool,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn malformed_records(&self) -> usize {
        self.song_report.malformed() + self.log_report.malformed()
    }

    pub fn log(&self) {
        info!("");
        info!("Batch Summary");
        info!("=============");
        info!("Song files read: {}", self.song_report.files);
        info!("Log files read: {}", self.log_report.files);
        info!("Plays accepted: {}", self.log_report.accepted);
        info!("Non-play events filtered: {}", self.log_report.not_a_play);
        if self.malformed_records() > 0 {
            warn!("Malformed records dropped: {}", self.malformed_records());
        }

        info!("");
        info!("Tables:");
        info!("  {} songs", self.songs);
        info!("  {} artists", self.artists);
        info!("  {} users", self.users);
        info!("  {} time rows", self.time_rows);
        info!(
            "  {} songplays ({} matched, {} unmatched)",
            self.songplays, self.match_stats.matched, self.match_stats.unmatched
        );

        info!("");
        if self.dry_run {
            info!("Dry run completed in {:.2?}, nothing written", self.elapsed);
        } else {
            for table in &self.tables {
                info!(
                    "  {}: {} partitions, {} bytes",
                    table.table, table.partitions, table.bytes
                );
            }
            info!("Batch completed in {:.2?}", self.elapsed);
        }
    }
}
