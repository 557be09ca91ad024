use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::source::ContestDocument;
use crate::standings::Standings;

pub const EXPORT_VERSION: u32 = 1;

/// Serialized board of one contest view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardExport {
    pub version: u32,
    pub contest_id: u64,
    pub title: String,
    pub begin: DateTime<Utc>,
    pub length_secs: i64,
    pub upsolve_deadline: DateTime<Utc>,
    pub enrolled_only: bool,
    pub ranked: usize,
    pub rows: Vec<ExportRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub rank: Option<usize>,
    pub participant: u64,
    pub username: String,
    pub nickname: String,
    pub score: u32,
    pub placement_points: u32,
    pub upsolve_points: u32,
    pub solved: u32,
    pub upsolved: u32,
    pub penalty_secs: i64,
    pub problems: Vec<ExportProblem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportProblem {
    /// Problem label, "A", "B", ...
    pub problem: String,
    pub accepted: bool,
    pub penalty_secs: i64,
}

impl BoardExport {
    /// Snapshot `standings` in display order.
    pub fn new(doc: &ContestDocument, standings: &Standings, enrolled_only: bool, by_score: bool) -> Self {
        let rows = standings
            .ordered_rows(by_score)
            .into_iter()
            .map(|row| {
                let record = &row.record;
                let account = doc.account(record.participant);
                ExportRow {
                    rank: record.competition_rank,
                    participant: record.participant.0,
                    username: account.map(|a| a.username.clone()).unwrap_or_default(),
                    nickname: account.map(|a| a.nickname.clone()).unwrap_or_default(),
                    score: row.score.score,
                    placement_points: row.score.breakdown.placement,
                    upsolve_points: row.score.breakdown.upsolve,
                    solved: record.solved,
                    upsolved: record.upsolved,
                    penalty_secs: record.total_penalty.num_seconds(),
                    problems: record
                        .problems
                        .iter()
                        .map(|(problem, entry)| ExportProblem {
                            problem: problem.to_string(),
                            accepted: entry.accepted,
                            penalty_secs: entry.accrued_penalty.num_seconds(),
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            version: EXPORT_VERSION,
            contest_id: doc.id,
            title: doc.title.clone(),
            begin: doc.window.begin(),
            length_secs: doc.window.length().num_seconds(),
            upsolve_deadline: doc.window.upsolve_deadline(),
            enrolled_only,
            ranked: standings.ranked_count(),
            rows,
        }
    }
}

/// Save a board export to a JSON file atomically
///
/// The target is either fully replaced or left untouched.
pub fn save_export(path: &Path, export: &BoardExport) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, export).context("Failed to serialize board export")?;

    file.commit()
        .with_context(|| format!("Failed to save board export to {}", path.display()))?;

    tracing::debug!(path = %path.display(), rows = export.rows.len(), "board exported");
    Ok(())
}
