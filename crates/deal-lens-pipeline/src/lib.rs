pub mod config;
pub mod error;
pub mod observer;
pub mod orchestrator;
pub mod report;
pub mod validation;

pub use config::PipelineConfig;
pub use error::{ConfigurationWarning, FailureKind, PipelineError, ValidationError};
pub use observer::{NoopObserver, ProgressObserver, TracingObserver};
pub use orchestrator::{AnalysisRequest, Orchestrator, RunFailure, RunState, Stage};
pub use report::{AnalysisReport, AnalysisSummary, ExecutionSummary, ExportFormat};
pub use validation::{validate_request, ValidatedRequest};
