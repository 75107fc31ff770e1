//! Run diagnostics.
//!
//! A [`PipelineReport`] collects everything a run prints: rows loaded, column names before and
//! after normalization, per-stage row counts, the final shape and column types, a preview and
//! [`describe`] statistics for `price`, `qty` and `revenue`. It renders as text via `Display` and
//! serializes with serde for machine-readable output.

pub mod describe;
pub mod preview;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::processing::Stage;
use crate::types::{ColumnType, Table};

pub use describe::{describe, quantile, ColumnSummary};
pub use preview::{preview, Preview};

/// Columns summarized in [`PipelineReport::statistics`].
pub const SUMMARY_COLUMNS: [&str; 3] = ["price", "qty", "revenue"];

/// Row counts around a single stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub rows_in: usize,
    pub rows_out: usize,
}

impl StageReport {
    /// Rows removed by the stage.
    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}

/// Name and type of one output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: ColumnType,
}

/// Diagnostics for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Source path, when the run read from a file.
    pub source: Option<PathBuf>,
    /// Destination path, when the run wrote to a file.
    pub destination: Option<PathBuf>,
    pub rows_loaded: usize,
    pub columns_before: Vec<String>,
    pub columns_after: Vec<String>,
    pub stages: Vec<StageReport>,
    pub rows_out: usize,
    pub columns_out: Vec<ColumnInfo>,
    pub preview: Preview,
    pub statistics: Vec<ColumnSummary>,
}

impl PipelineReport {
    /// Assemble the report from the pieces the driver collected and the final table.
    pub fn build(
        rows_loaded: usize,
        columns_before: Vec<String>,
        columns_after: Vec<String>,
        stages: Vec<StageReport>,
        cleaned: &Table,
        preview_rows: usize,
    ) -> Self {
        Self {
            source: None,
            destination: None,
            rows_loaded,
            columns_before,
            columns_after,
            stages,
            rows_out: cleaned.row_count(),
            columns_out: cleaned
                .schema
                .columns
                .iter()
                .map(|c| ColumnInfo {
                    name: c.name.clone(),
                    column_type: c.column_type,
                })
                .collect(),
            preview: preview(cleaned, preview_rows),
            statistics: SUMMARY_COLUMNS
                .iter()
                .filter_map(|c| describe(cleaned, c))
                .collect(),
        }
    }

    /// Rows removed by `stage`, or 0 if it did not run.
    pub fn dropped_by(&self, stage: Stage) -> usize {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map_or(0, StageReport::rows_dropped)
    }

    /// Rows removed across all stages.
    pub fn total_dropped(&self) -> usize {
        self.rows_loaded.saturating_sub(self.rows_out)
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(p) => writeln!(f, "Loaded {} rows from {}", self.rows_loaded, p.display())?,
            None => writeln!(f, "Loaded {} rows", self.rows_loaded)?,
        }
        writeln!(f, "Original columns: {:?}", self.columns_before)?;
        writeln!(f, "Cleaned column names: {:?}", self.columns_after)?;
        for s in self.stages.iter().filter(|s| s.stage.is_filter()) {
            writeln!(f, "{}: dropped {} rows", s.stage, s.rows_dropped())?;
        }
        if let Some(p) = &self.destination {
            writeln!(f, "Cleaned data saved to {}", p.display())?;
        }
        writeln!(
            f,
            "\nFinal dataset: {} rows, {} columns",
            self.rows_out,
            self.columns_out.len()
        )?;

        writeln!(f, "\nFirst rows:")?;
        write!(f, "{}", self.preview)?;

        writeln!(f, "\nColumn types:")?;
        for c in &self.columns_out {
            writeln!(f, "  {:<16} {}", c.name, c.column_type)?;
        }

        if !self.statistics.is_empty() {
            writeln!(f, "\nBasic statistics:")?;
            write!(f, "{:<8}", "")?;
            for s in &self.statistics {
                write!(f, " {:>12}", s.column)?;
            }
            writeln!(f)?;
            for label in STAT_LABELS {
                write!(f, "{label:<8}")?;
                for s in &self.statistics {
                    match stat(s, label) {
                        Some(v) => write!(f, " {v:>12.4}")?,
                        None => write!(f, " {:>12}", "NaN")?,
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

fn stat(s: &ColumnSummary, label: &str) -> Option<f64> {
    match label {
        "count" => Some(s.count as f64),
        "mean" => s.mean,
        "std" => s.std,
        "min" => s.min,
        "25%" => s.q25,
        "50%" => s.median,
        "75%" => s.q75,
        "max" => s.max,
        _ => None,
    }
}
