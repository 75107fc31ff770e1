//! The pipeline driver.
//!
//! [`CleaningPipeline::run`] applies every stage in [`STAGES`] order to a table held by the
//! driver, recording row counts as it goes. [`clean_file`] wraps that with CSV loading and
//! writing: the output is only written after every stage has succeeded.
//!
//! Progress is logged with `tracing` (target `sales_clean::pipeline`); an optional
//! [`PipelineObserver`] receives the same events programmatically.

mod observer;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::{CleaningError, CleaningResult};
use crate::export::write_csv_to_path;
use crate::ingestion::read_csv_from_path;
use crate::processing::{Stage, STAGES};
use crate::report::{PipelineReport, StageReport};
use crate::types::Table;

pub use observer::{CompositeObserver, PipelineObserver, TracingObserver};

/// Options controlling a pipeline run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct PipelineOptions {
    /// Number of leading rows captured in [`PipelineReport::preview`].
    pub preview_rows: usize,
    /// Optional observer for progress callbacks.
    pub observer: Option<Arc<dyn PipelineObserver>>,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("preview_rows", &self.preview_rows)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            observer: None,
        }
    }
}

/// Output of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    pub table: Table,
    pub report: PipelineReport,
}

/// Fixed, ordered chain of cleaning stages.
#[derive(Debug, Clone, Default)]
pub struct CleaningPipeline {
    options: PipelineOptions,
}

impl CleaningPipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// The stages this pipeline runs, in order.
    pub fn stages(&self) -> &'static [Stage] {
        &STAGES
    }

    /// Run every stage over `table`.
    ///
    /// A table whose rows do not all match the schema width is rejected with
    /// [`CleaningError::RaggedRow`] before any stage runs. The first stage error aborts the run
    /// and is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sales_clean::ingestion::csv::{read_csv_from_reader, reader_builder};
    /// use sales_clean::pipeline::CleaningPipeline;
    /// use sales_clean::types::Value;
    ///
    /// # fn main() -> Result<(), sales_clean::CleaningError> {
    /// let input = "ProdName,Price,Qty\n Lamp ,12.50,2\nLamp,12.5,2\nDesk,abc,1\n";
    /// let mut rdr = reader_builder().from_reader(input.as_bytes());
    /// let raw = read_csv_from_reader(&mut rdr)?;
    ///
    /// let out = CleaningPipeline::default().run(raw)?;
    /// assert_eq!(out.table.row_count(), 1);
    /// assert_eq!(out.table.rows[0][3], Value::Number(25.0));
    /// assert_eq!(out.report.total_dropped(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn run(&self, table: Table) -> CleaningResult<CleanedTable> {
        let out = self.run_stages(table)?;
        if let Some(obs) = &self.options.observer {
            obs.on_success(&out.report);
        }
        Ok(out)
    }

    fn run_stages(&self, table: Table) -> CleaningResult<CleanedTable> {
        if let Err(e) = check_shape(&table) {
            error!(error = %e, "input table is not rectangular");
            if let Some(obs) = &self.options.observer {
                obs.on_failure(None, &e);
            }
            return Err(e);
        }

        let rows_loaded = table.row_count();
        let columns_before = column_names(&table);
        info!(rows = rows_loaded, columns = ?columns_before, "loaded table");
        if let Some(obs) = &self.options.observer {
            obs.on_loaded(rows_loaded, &columns_before);
        }

        let mut table = table;
        let mut columns_after = columns_before.clone();
        let mut stages = Vec::with_capacity(STAGES.len());
        for &stage in self.stages() {
            let rows_in = table.row_count();
            table = match stage.apply(&table) {
                Ok(t) => t,
                Err(e) => {
                    error!(stage = stage.name(), error = %e, "stage failed");
                    if let Some(obs) = &self.options.observer {
                        obs.on_failure(Some(stage), &e);
                    }
                    return Err(e);
                }
            };
            debug_assert!(table.is_rectangular(), "{stage} broke the table shape");

            let report = StageReport {
                stage,
                rows_in,
                rows_out: table.row_count(),
            };
            if stage == Stage::NormalizeColumnNames {
                columns_after = column_names(&table);
                info!(columns = ?columns_after, "normalized column names");
            }
            if stage.is_filter() {
                info!(
                    stage = stage.name(),
                    dropped = report.rows_dropped(),
                    rows = report.rows_out,
                    "filtered rows"
                );
            } else {
                debug!(stage = stage.name(), rows = report.rows_out, "stage finished");
            }
            if let Some(obs) = &self.options.observer {
                obs.on_stage_finished(&report);
            }
            stages.push(report);
        }

        let report = PipelineReport::build(
            rows_loaded,
            columns_before,
            columns_after,
            stages,
            &table,
            self.options.preview_rows,
        );
        info!(
            rows = report.rows_out,
            columns = report.columns_out.len(),
            "pipeline finished"
        );
        Ok(CleanedTable { table, report })
    }
}

fn check_shape(table: &Table) -> CleaningResult<()> {
    let expected = table.column_count();
    match table.rows.iter().position(|row| row.len() != expected) {
        Some(row) => Err(CleaningError::RaggedRow {
            row,
            expected,
            found: table.rows[row].len(),
        }),
        None => Ok(()),
    }
}

fn column_names(table: &Table) -> Vec<String> {
    table.schema.column_names().map(str::to_owned).collect()
}

/// Load `input`, clean it, and write the result to `output`.
///
/// Any failure (unreadable source, missing required column, unwritable destination) aborts the
/// run; `output` is never left half-written.
pub fn clean_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &PipelineOptions,
) -> CleaningResult<PipelineReport> {
    let input = input.as_ref();
    let output = output.as_ref();
    let observer = options.observer.as_deref();
    let report_io_failure = |e: CleaningError| {
        error!(error = %e, "run aborted");
        if let Some(obs) = observer {
            obs.on_failure(None, &e);
        }
        e
    };

    info!(path = %input.display(), "reading source");
    let raw = read_csv_from_path(input).map_err(report_io_failure)?;

    let CleanedTable { table, mut report } =
        CleaningPipeline::new(options.clone()).run_stages(raw)?;

    write_csv_to_path(&table, output).map_err(report_io_failure)?;
    info!(path = %output.display(), rows = table.row_count(), "wrote cleaned table");

    report.source = Some(input.to_path_buf());
    report.destination = Some(output.to_path_buf());
    if let Some(obs) = observer {
        obs.on_success(&report);
    }
    Ok(report)
}

/// Owned description of one run, for callers that want to build the job before executing it.
#[derive(Debug, Clone)]
pub struct CleaningRequest {
    /// Path to the raw CSV.
    pub input: PathBuf,
    /// Path the cleaned CSV is written to.
    pub output: PathBuf,
    /// Options controlling the run.
    pub options: PipelineOptions,
}

impl CleaningRequest {
    /// Create a request with default options.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            options: PipelineOptions::default(),
        }
    }

    /// Execute the request by calling [`clean_file`].
    pub fn run(&self) -> CleaningResult<PipelineReport> {
        clean_file(&self.input, &self.output, &self.options)
    }
}
