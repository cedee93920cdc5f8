use std::str::FromStr;

use deal_lens_core::{
    CompetitorAnalysis, DifficultyTier, InternalMatchResult, ReadinessTier, RfpAnalysis,
    StrategySynthesis, WinProbabilityResult,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationWarning, PipelineError};
use crate::orchestrator::RunState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub final_state: RunState,
    pub total_requirements: usize,
    pub total_competitors: usize,
    pub total_risks: usize,
    pub difficulty: DifficultyTier,
    pub win_probability: f64,
    pub confidence: f64,
    pub recommendation_count: usize,
    #[serde(default)]
    pub warnings: Vec<ConfigurationWarning>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Every stage output of one run plus its execution summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub rfp_analysis: RfpAnalysis,
    pub internal_match: InternalMatchResult,
    pub competitor_analysis: CompetitorAnalysis,
    pub win_probability: WinProbabilityResult,
    pub strategy: StrategySynthesis,
    pub execution_summary: ExecutionSummary,
}

/// Flat view handed to reporting collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub difficulty: DifficultyTier,
    pub win_probability: String,
    pub requirement_count: usize,
    pub competitor_count: usize,
    pub risk_count: usize,
    pub improvement_action_count: usize,
    pub readiness: ReadinessTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Full,
    Summary,
}

impl FromStr for ExportFormat {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "full" => Ok(Self::Full),
            "summary" => Ok(Self::Summary),
            other => Err(PipelineError::Config(format!(
                "unsupported export format `{other}`; expected json or summary"
            ))),
        }
    }
}

pub fn format_percentage(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

impl AnalysisReport {
    pub(crate) fn assemble(
        rfp_analysis: RfpAnalysis,
        internal_match: InternalMatchResult,
        competitor_analysis: CompetitorAnalysis,
        win_probability: WinProbabilityResult,
        strategy: StrategySynthesis,
        warnings: Vec<ConfigurationWarning>,
    ) -> Self {
        let execution_summary = ExecutionSummary {
            final_state: RunState::Done,
            total_requirements: rfp_analysis.requirements.len(),
            total_competitors: competitor_analysis.profiles.len(),
            total_risks: rfp_analysis.risk_flags.len(),
            difficulty: win_probability.difficulty,
            win_probability: win_probability.win_probability,
            confidence: win_probability.confidence,
            recommendation_count: strategy.recommendations.len(),
            warnings,
            error: None,
        };
        Self {
            rfp_analysis,
            internal_match,
            competitor_analysis,
            win_probability,
            strategy,
            execution_summary,
        }
    }

    /// All-default report substituted for a failed run. Every field is
    /// populated; lists are empty.
    pub fn fallback(warnings: Vec<ConfigurationWarning>, message: impl Into<String>) -> Self {
        let win_probability = WinProbabilityResult::default();
        Self {
            rfp_analysis: RfpAnalysis::default(),
            internal_match: InternalMatchResult::default(),
            competitor_analysis: CompetitorAnalysis::default(),
            execution_summary: ExecutionSummary {
                final_state: RunState::Failed,
                total_requirements: 0,
                total_competitors: 0,
                total_risks: 0,
                difficulty: win_probability.difficulty,
                win_probability: win_probability.win_probability,
                confidence: win_probability.confidence,
                recommendation_count: 0,
                warnings,
                error: Some(message.into()),
            },
            win_probability,
            strategy: StrategySynthesis::default(),
        }
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            difficulty: self.win_probability.difficulty,
            win_probability: format_percentage(self.win_probability.win_probability),
            requirement_count: self.rfp_analysis.requirements.len(),
            competitor_count: self.competitor_analysis.profiles.len(),
            risk_count: self.rfp_analysis.risk_flags.len(),
            improvement_action_count: self.strategy.improvement_actions.len(),
            readiness: self.internal_match.readiness,
        }
    }

    pub fn export(&self, format: ExportFormat) -> Result<String, PipelineError> {
        let text = match format {
            ExportFormat::Full => serde_json::to_string_pretty(self)?,
            ExportFormat::Summary => serde_json::to_string_pretty(&self.summary())?,
        };
        Ok(text)
    }

    pub fn from_json(text: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl AnalysisSummary {
    pub fn from_json(text: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use deal_lens_core::Level;

    use super::*;

    #[test]
    fn percentage_uses_one_decimal() {
        assert_eq!(format_percentage(0.55), "55.0%");
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(1.0), "100.0%");
        assert_eq!(format_percentage(0.123_45), "12.3%");
    }

    #[test]
    fn export_format_parses_known_names() {
        assert_eq!("json".parse::<ExportFormat>().ok(), Some(ExportFormat::Full));
        assert_eq!(" Summary ".parse::<ExportFormat>().ok(), Some(ExportFormat::Summary));
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn fallback_is_fully_populated_with_defaults() {
        let report = AnalysisReport::fallback(Vec::new(), "boom");
        assert_eq!(report.execution_summary.final_state, RunState::Failed);
        assert_eq!(report.execution_summary.error.as_deref(), Some("boom"));
        assert_eq!(report.internal_match.readiness, Level::Low);
        assert_eq!(report.win_probability.difficulty, Level::Medium);
        assert!((report.win_probability.win_probability - 0.5).abs() < f64::EPSILON);
        assert!(report.win_probability.confidence.abs() < f64::EPSILON);
        assert!(report.strategy.improvement_actions.is_empty());

        let summary = report.summary();
        assert_eq!(summary.win_probability, "50.0%");
        assert_eq!(summary.improvement_action_count, 0);
    }

    #[test]
    fn summary_export_round_trips() {
        let report = AnalysisReport::fallback(
            vec![ConfigurationWarning::EmptyCompetitorList { substituted: 7 }],
            "failed",
        );
        let text = report
            .export(ExportFormat::Summary)
            .unwrap_or_else(|e| panic!("export failed: {e}"));
        let back = AnalysisSummary::from_json(&text).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(back, report.summary());

        let text = report
            .export(ExportFormat::Full)
            .unwrap_or_else(|e| panic!("export failed: {e}"));
        let back = AnalysisReport::from_json(&text).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(back, report);
    }
}
