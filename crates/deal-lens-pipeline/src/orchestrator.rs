//! Linear analysis pipeline.
//!
//! A run walks `Validated -> Scored -> Synthesized -> Done`; any stage fault
//! moves it to the terminal `Failed` state. There is no retry and no resume:
//! a failed run yields a [`RunFailure`] carrying the typed error and an
//! all-default [`AnalysisReport`], never a partially filled one.

use std::fmt;
use std::sync::Arc;

use deal_lens_core::{ScoringEngine, StrategySynthesizer};
use deal_lens_intel::IntelSuite;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{ConfigurationWarning, FailureKind, PipelineError};
use crate::observer::{NoopObserver, ProgressObserver};
use crate::report::AnalysisReport;
use crate::validation::{validate_request, ValidatedRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Validated,
    Scored,
    Synthesized,
    Done,
    Failed,
}

impl RunState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validated => "validated",
            Self::Scored => "scored",
            Self::Synthesized => "synthesized",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Validated, Self::Scored)
                | (Self::Scored, Self::Synthesized)
                | (Self::Synthesized, Self::Done)
                | (Self::Validated | Self::Scored | Self::Synthesized, Self::Failed)
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    DocumentAnalysis,
    CapabilityMatching,
    CompetitorAnalysis,
    Scoring,
    Synthesis,
}

impl Stage {
    /// Stages reported to observers, in execution order.
    pub const PROGRESS: [Self; 5] = [
        Self::DocumentAnalysis,
        Self::CapabilityMatching,
        Self::CompetitorAnalysis,
        Self::Scoring,
        Self::Synthesis,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DocumentAnalysis => "document analysis",
            Self::CapabilityMatching => "capability matching",
            Self::CompetitorAnalysis => "competitor analysis",
            Self::Scoring => "scoring",
            Self::Synthesis => "strategy synthesis",
        }
    }

    /// One-based position in [`Stage::PROGRESS`].
    const fn step(self) -> usize {
        match self {
            Self::DocumentAnalysis => 1,
            Self::CapabilityMatching => 2,
            Self::CompetitorAnalysis => 3,
            Self::Scoring => 4,
            Self::Synthesis => 5,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub rfp_content: String,
    #[serde(default)]
    pub competitors: Vec<String>,
}

/// A failed run: the typed cause and the all-default report standing in for
/// the missing result.
#[derive(Debug)]
pub struct RunFailure {
    pub error: PipelineError,
    pub fallback: AnalysisReport,
}

impl RunFailure {
    pub const fn kind(&self) -> FailureKind {
        self.error.kind()
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// State of a single run. Private to the run; never shared.
#[derive(Debug)]
struct RunTracker {
    state: RunState,
    warnings: Vec<ConfigurationWarning>,
}

impl RunTracker {
    fn validated(warnings: Vec<ConfigurationWarning>) -> Self {
        Self {
            state: RunState::Validated,
            warnings,
        }
    }

    fn advance(&mut self, next: RunState) -> Result<(), PipelineError> {
        if !self.state.can_advance_to(next) {
            return Err(PipelineError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        debug!(from = %self.state, to = %next, "run transition");
        self.state = next;
        Ok(())
    }

    fn fail(mut self, error: PipelineError) -> RunFailure {
        if !self.state.is_terminal() {
            self.state = RunState::Failed;
        }
        let fallback = AnalysisReport::fallback(self.warnings, error.to_string());
        RunFailure { error, fallback }
    }
}

pub struct Orchestrator {
    config: PipelineConfig,
    intel: IntelSuite,
    engine: ScoringEngine,
    synthesizer: StrategySynthesizer,
    observer: Arc<dyn ProgressObserver>,
}

impl Orchestrator {
    pub fn new(config: PipelineConfig, intel: IntelSuite) -> Result<Self, PipelineError> {
        config.validate()?;
        let engine = ScoringEngine::new(config.scoring.clone())
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Ok(Self {
            engine,
            synthesizer: StrategySynthesizer::new(config.playbook.clone()),
            config,
            intel,
            observer: Arc::new(NoopObserver),
        })
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn validate(&self, request: &AnalysisRequest) -> Result<ValidatedRequest, PipelineError> {
        Ok(validate_request(
            &self.config,
            &request.rfp_content,
            &request.competitors,
        )?)
    }

    pub fn run(&self, request: &AnalysisRequest) -> Result<AnalysisReport, RunFailure> {
        let validated = match self.validate(request) {
            Ok(v) => v,
            Err(err) => {
                self.observer.on_failure(&err);
                let fallback = AnalysisReport::fallback(Vec::new(), err.to_string());
                return Err(RunFailure {
                    error: err,
                    fallback,
                });
            }
        };

        let mut tracker = RunTracker::validated(validated.warnings.clone());
        match self.execute(&validated, &mut tracker) {
            Ok(report) => {
                self.observer.on_complete(&report.execution_summary);
                Ok(report)
            }
            Err(err) => {
                self.observer.on_failure(&err);
                Err(tracker.fail(err))
            }
        }
    }

    fn execute(
        &self,
        request: &ValidatedRequest,
        tracker: &mut RunTracker,
    ) -> Result<AnalysisReport, PipelineError> {
        info!(
            documents = self.intel.documents.name(),
            capabilities = self.intel.capabilities.name(),
            competitors = self.intel.competitors.name(),
            requested = request.competitors.len(),
            "starting analysis"
        );

        self.enter(Stage::DocumentAnalysis);
        let rfp = self
            .intel
            .documents
            .analyze(&request.rfp_content)
            .map_err(|source| PipelineError::Collaborator {
                stage: Stage::DocumentAnalysis,
                source,
            })?;

        self.enter(Stage::CapabilityMatching);
        let internal_match = self
            .intel
            .capabilities
            .match_requirements(&rfp.requirements)
            .map_err(|source| PipelineError::Collaborator {
                stage: Stage::CapabilityMatching,
                source,
            })?;

        self.enter(Stage::CompetitorAnalysis);
        let competitor_analysis = self
            .intel
            .competitors
            .analyze_competitors(&request.competitors, &rfp.requirements)
            .map_err(|source| PipelineError::Collaborator {
                stage: Stage::CompetitorAnalysis,
                source,
            })?;

        self.enter(Stage::Scoring);
        let win = self
            .engine
            .score(
                &rfp.criteria,
                &internal_match,
                &competitor_analysis.profiles,
                &rfp.risk_flags,
            )
            .map_err(|source| PipelineError::Stage {
                stage: Stage::Scoring,
                source,
            })?;
        tracker.advance(RunState::Scored)?;
        info!(
            difficulty = %win.difficulty,
            win_probability = win.win_probability,
            criteria = win.evaluation_scores.len(),
            risks = win.risk_factors.len(),
            "scored opportunity"
        );

        self.enter(Stage::Synthesis);
        let strategy = self.synthesizer.synthesize(
            &rfp.risk_flags,
            &internal_match,
            &competitor_analysis,
            &win,
        );
        tracker.advance(RunState::Synthesized)?;

        let report = AnalysisReport::assemble(
            rfp,
            internal_match,
            competitor_analysis,
            win,
            strategy,
            tracker.warnings.clone(),
        );
        tracker.advance(RunState::Done)?;
        Ok(report)
    }

    fn enter(&self, stage: Stage) {
        self.observer
            .on_stage(stage, stage.step(), Stage::PROGRESS.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_follow_the_linear_order() {
        assert!(RunState::Validated.can_advance_to(RunState::Scored));
        assert!(RunState::Scored.can_advance_to(RunState::Synthesized));
        assert!(RunState::Synthesized.can_advance_to(RunState::Done));

        assert!(!RunState::Validated.can_advance_to(RunState::Synthesized));
        assert!(!RunState::Scored.can_advance_to(RunState::Done));
        assert!(!RunState::Done.can_advance_to(RunState::Failed));
        assert!(!RunState::Failed.can_advance_to(RunState::Validated));
    }

    #[test]
    fn any_live_state_may_fail() {
        for state in [RunState::Validated, RunState::Scored, RunState::Synthesized] {
            assert!(state.can_advance_to(RunState::Failed), "{state}");
        }
    }

    #[test]
    fn tracker_rejects_skipped_stage() {
        let mut tracker = RunTracker::validated(Vec::new());
        let err = tracker.advance(RunState::Done).err();
        assert!(matches!(
            err,
            Some(PipelineError::IllegalTransition {
                from: RunState::Validated,
                to: RunState::Done
            })
        ));
    }

    #[test]
    fn failed_tracker_keeps_warnings_in_fallback() {
        let warnings = vec![ConfigurationWarning::CompetitorListTruncated { given: 12, kept: 10 }];
        let tracker = RunTracker::validated(warnings.clone());
        let failure = tracker.fail(PipelineError::Config("broken".to_string()));

        assert_eq!(failure.fallback.execution_summary.warnings, warnings);
        assert_eq!(failure.fallback.execution_summary.final_state, RunState::Failed);
        assert_eq!(failure.kind(), FailureKind::Configuration);
    }

    #[test]
    fn progress_steps_follow_stage_order() {
        for (i, stage) in Stage::PROGRESS.iter().enumerate() {
            assert_eq!(stage.step(), i + 1, "{stage}");
        }
    }
}
