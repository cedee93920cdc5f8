use tracing::{error, info};

use crate::error::PipelineError;
use crate::orchestrator::Stage;
use crate::report::ExecutionSummary;

/// Side channel for run progress. Observers cannot influence the run.
pub trait ProgressObserver: Send + Sync {
    fn on_stage(&self, stage: Stage, step: usize, total: usize);

    fn on_complete(&self, _summary: &ExecutionSummary) {}

    fn on_failure(&self, _error: &PipelineError) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_stage(&self, _stage: Stage, _step: usize, _total: usize) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn on_stage(&self, stage: Stage, step: usize, total: usize) {
        info!(%stage, "stage {step}/{total}");
    }

    fn on_complete(&self, summary: &ExecutionSummary) {
        info!(
            difficulty = %summary.difficulty,
            win_probability = summary.win_probability,
            confidence = summary.confidence,
            "analysis complete"
        );
    }

    fn on_failure(&self, err: &PipelineError) {
        error!(kind = ?err.kind(), "analysis failed: {err}");
    }
}
