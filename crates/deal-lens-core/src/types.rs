use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse three-step rating shared by severities, priorities, readiness,
/// difficulty, complexity and cost estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Severity = Level;
pub type Priority = Level;
pub type ReadinessTier = Level;
pub type DifficultyTier = Level;
pub type Complexity = Level;
pub type CostEstimate = Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationKind {
    Quantitative,
    Qualitative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementPriority {
    Mandatory,
    Optional,
    Recommended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub category: String,
    pub description: String,
    pub priority: RequirementPriority,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationCriterion {
    pub name: String,
    /// Not normalized across criteria.
    pub weight: f64,
    #[serde(default)]
    pub min_score: Option<f64>,
    pub kind: EvaluationKind,
    #[serde(default)]
    pub description: String,
}

/// Risk category label. Unknown labels are kept verbatim so they survive a
/// serialization round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskCategory {
    Contradiction,
    Ambiguity,
    Legal,
    Security,
    Licensing,
    Other(CustomCategory),
}

/// Label outside the known categories. Only built through
/// `RiskCategory::from`, so it never spells a known label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomCategory(String);

impl CustomCategory {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RiskCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Contradiction => "contradiction",
            Self::Ambiguity => "ambiguity",
            Self::Legal => "legal",
            Self::Security => "security",
            Self::Licensing => "licensing",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for RiskCategory {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "contradiction" => Self::Contradiction,
            "ambiguity" => Self::Ambiguity,
            "legal" => Self::Legal,
            "security" => Self::Security,
            "licensing" => Self::Licensing,
            _ => Self::Other(CustomCategory(value)),
        }
    }
}

impl From<&str> for RiskCategory {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<RiskCategory> for String {
    fn from(value: RiskCategory) -> Self {
        match value {
            RiskCategory::Other(label) => label.0,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub category: RiskCategory,
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub mitigation: Option<String>,
}

/// Structured output of the document-understanding collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RfpAnalysis {
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub criteria: Vec<EvaluationCriterion>,
    #[serde(default)]
    pub risk_flags: Vec<RiskFlag>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub submission_format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSize {
    Sufficient,
    Lacking,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill_area: String,
    #[serde(default)]
    pub required_level: String,
    #[serde(default)]
    pub current_level: String,
    pub gap_size: GapSize,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalMatchResult {
    pub readiness: ReadinessTier,
    pub confidence: f64,
    #[serde(default)]
    pub skill_gaps: Vec<SkillGap>,
}

impl Default for InternalMatchResult {
    fn default() -> Self {
        Self {
            readiness: Level::Low,
            confidence: 0.0,
            skill_gaps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    Premium,
    Standard,
    Budget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorProfile {
    pub name: String,
    pub price_tier: PriceTier,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorAnalysis {
    #[serde(default)]
    pub profiles: Vec<CompetitorProfile>,
    #[serde(default)]
    pub our_advantages: Vec<String>,
    #[serde(default)]
    pub our_disadvantages: Vec<String>,
    #[serde(default)]
    pub differentiation_points: Vec<String>,
}

impl CompetitorAnalysis {
    pub fn market_positioning(&self) -> BTreeMap<String, PriceTier> {
        self.profiles
            .iter()
            .map(|p| (p.name.clone(), p.price_tier))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationScore {
    pub criterion: String,
    pub weight: f64,
    pub our_score: f64,
    pub competitor_score: f64,
    pub difference: f64,
    pub weighted: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: RiskCategory,
    pub severity: Severity,
    pub impact: f64,
    pub probability: f64,
    #[serde(default)]
    pub mitigation: Option<String>,
}

impl RiskFactor {
    pub fn exposure(&self) -> f64 {
        self.impact * self.probability
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinProbabilityResult {
    pub difficulty: DifficultyTier,
    pub win_probability: f64,
    pub confidence: f64,
    pub risk_adjustment: f64,
    pub risk_penalty: f64,
    pub evaluation_scores: Vec<EvaluationScore>,
    pub risk_factors: Vec<RiskFactor>,
    pub key_drivers: Vec<String>,
}

impl Default for WinProbabilityResult {
    fn default() -> Self {
        Self {
            difficulty: Level::Medium,
            win_probability: 0.5,
            confidence: 0.0,
            risk_adjustment: 0.0,
            risk_penalty: 0.0,
            evaluation_scores: Vec::new(),
            risk_factors: Vec::new(),
            key_drivers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSummary {
    pub difficulty: DifficultyTier,
    pub win_probability: f64,
    pub criterion_count: usize,
    pub risk_count: usize,
    pub driver_count: usize,
    pub confidence: f64,
}

impl WinProbabilityResult {
    pub fn summary(&self) -> ScoringSummary {
        ScoringSummary {
            difficulty: self.difficulty,
            win_probability: self.win_probability,
            criterion_count: self.evaluation_scores.len(),
            risk_count: self.risk_factors.len(),
            driver_count: self.key_drivers.len(),
            confidence: self.confidence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    InternalReinforcement,
    ExternalPartnership,
    PocProposal,
    SpecClarification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementAction {
    pub kind: ActionKind,
    pub description: String,
    pub priority: Priority,
    pub timeline: String,
    pub cost_estimate: CostEstimate,
    pub success_probability: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanySwot {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
    pub strategic_focus: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentiationMessage {
    pub key_point: String,
    pub supporting_evidence: Vec<String>,
    pub criterion: String,
    pub competitive_advantage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategySynthesis {
    pub improvement_actions: Vec<ImprovementAction>,
    pub swot: CompanySwot,
    pub differentiation_messages: Vec<DifferentiationMessage>,
    pub recommendations: Vec<String>,
    pub success_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisSummary {
    pub action_count: usize,
    pub strength_count: usize,
    pub weakness_count: usize,
    pub message_count: usize,
    pub recommendation_count: usize,
    pub success_factor_count: usize,
}

impl StrategySynthesis {
    pub fn summary(&self) -> SynthesisSummary {
        SynthesisSummary {
            action_count: self.improvement_actions.len(),
            strength_count: self.swot.strengths.len(),
            weakness_count: self.swot.weaknesses.len(),
            message_count: self.differentiation_messages.len(),
            recommendation_count: self.recommendations.len(),
            success_factor_count: self.success_factors.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_risk_category_is_preserved() {
        let category: RiskCategory = serde_json::from_str("\"procurement\"")
            .unwrap_or_else(|e| panic!("parse failed: {e}"));
        assert_eq!(category, RiskCategory::from("procurement"));
        assert!(matches!(&category, RiskCategory::Other(label) if label.as_str() == "procurement"));

        let text = serde_json::to_string(&category).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(text, "\"procurement\"");
    }

    #[test]
    fn risk_category_labels_survive_reparse() {
        for label in ["legal", " LEGAL ", "Licensing", "procurement", "  Vendor lock-in "] {
            let category = RiskCategory::from(label);
            let text = serde_json::to_string(&category).unwrap_or_else(|e| panic!("{e}"));
            let back: RiskCategory =
                serde_json::from_str(&text).unwrap_or_else(|e| panic!("{label}: {e}"));
            assert_eq!(back, category, "{label}");
        }
        // a known label never lands in the custom bucket
        assert_eq!(RiskCategory::from(" LEGAL "), RiskCategory::Legal);
    }

    #[test]
    fn known_risk_category_is_case_insensitive() {
        assert_eq!(RiskCategory::from("Security"), RiskCategory::Security);
        assert_eq!(RiskCategory::from(" ambiguity "), RiskCategory::Ambiguity);
    }

    #[test]
    fn market_positioning_maps_names_to_price_tiers() {
        let analysis = CompetitorAnalysis {
            profiles: vec![
                CompetitorProfile {
                    name: "Acme".to_string(),
                    price_tier: PriceTier::Premium,
                    strengths: Vec::new(),
                    weaknesses: Vec::new(),
                },
                CompetitorProfile {
                    name: "Globex".to_string(),
                    price_tier: PriceTier::Budget,
                    strengths: Vec::new(),
                    weaknesses: Vec::new(),
                },
            ],
            ..CompetitorAnalysis::default()
        };

        let positioning = analysis.market_positioning();
        assert_eq!(positioning.get("Acme"), Some(&PriceTier::Premium));
        assert_eq!(positioning.get("Globex"), Some(&PriceTier::Budget));
    }
}
