use std::fmt;

use deal_lens_core::CoreError;
use deal_lens_intel::IntelError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orchestrator::{RunState, Stage};

/// Malformed input caught before any stage runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("RFP content is too short: {length} characters after trimming, at least {minimum} required")]
    RfpTooShort { length: usize, minimum: usize },
}

/// Non-fatal input adjustment made during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigurationWarning {
    EmptyCompetitorList { substituted: usize },
    CompetitorListTruncated { given: usize, kept: usize },
}

impl fmt::Display for ConfigurationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCompetitorList { substituted } => write!(
                f,
                "competitor list is empty; using the {substituted} default competitors"
            ),
            Self::CompetitorListTruncated { given, kept } => write!(
                f,
                "{given} competitors given; only the first {kept} are analyzed"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    StageExecution,
    Configuration,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{stage} stage failed: {source}")]
    Collaborator {
        stage: Stage,
        #[source]
        source: IntelError,
    },

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: CoreError,
    },

    #[error("illegal run transition from {from} to {to}")]
    IllegalTransition { from: RunState, to: RunState },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PipelineError {
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::Config(_) => FailureKind::Configuration,
            Self::Collaborator { .. }
            | Self::Stage { .. }
            | Self::IllegalTransition { .. }
            | Self::Serde(_) => FailureKind::StageExecution,
        }
    }
}
