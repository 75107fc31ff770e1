use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::CleaningError;
use crate::processing::Stage;
use crate::report::{PipelineReport, StageReport};

/// Observer interface for pipeline progress.
///
/// Implementors can record metrics, collect per-stage counts, or forward to their own logging.
/// All methods default to no-ops.
pub trait PipelineObserver: Send + Sync {
    /// Called once the source table is loaded, before any stage runs.
    fn on_loaded(&self, _rows: usize, _columns: &[String]) {}

    /// Called after each stage completes.
    fn on_stage_finished(&self, _report: &StageReport) {}

    /// Called when the whole run succeeds.
    fn on_success(&self, _report: &PipelineReport) {}

    /// Called when the run aborts. `stage` is `None` for load/write failures.
    fn on_failure(&self, _stage: Option<Stage>, _error: &CleaningError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_loaded(&self, rows: usize, columns: &[String]) {
        for o in &self.observers {
            o.on_loaded(rows, columns);
        }
    }

    fn on_stage_finished(&self, report: &StageReport) {
        for o in &self.observers {
            o.on_stage_finished(report);
        }
    }

    fn on_success(&self, report: &PipelineReport) {
        for o in &self.observers {
            o.on_success(report);
        }
    }

    fn on_failure(&self, stage: Option<Stage>, error: &CleaningError) {
        for o in &self.observers {
            o.on_failure(stage, error);
        }
    }
}

/// Forwards every callback as a `debug` level `tracing` event under the `sales_clean::observer`
/// target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_loaded(&self, rows: usize, columns: &[String]) {
        debug!(target: "sales_clean::observer", rows, columns = ?columns, "loaded");
    }

    fn on_stage_finished(&self, report: &StageReport) {
        debug!(
            target: "sales_clean::observer",
            stage = %report.stage,
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            dropped = report.rows_dropped(),
            "stage finished"
        );
    }

    fn on_success(&self, report: &PipelineReport) {
        debug!(
            target: "sales_clean::observer",
            rows = report.rows_out,
            dropped = report.total_dropped(),
            "run succeeded"
        );
    }

    fn on_failure(&self, stage: Option<Stage>, err: &CleaningError) {
        let stage = stage.map_or("load/write", |s| s.name());
        debug!(
            target: "sales_clean::observer",
            stage,
            error = %err,
            "run failed"
        );
    }
}
