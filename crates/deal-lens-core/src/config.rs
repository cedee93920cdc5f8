use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{ActionKind, Level, RiskCategory};

/// Value per level of a three-step rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl LevelTable {
    pub const fn get(&self, level: Level) -> f64 {
        match level {
            Level::High => self.high,
            Level::Medium => self.medium,
            Level::Low => self.low,
        }
    }
}

/// Occurrence probability per risk category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    pub contradiction: f64,
    pub ambiguity: f64,
    pub legal: f64,
    pub security: f64,
    pub licensing: f64,
    pub unknown: f64,
}

impl CategoryTable {
    pub const fn get(&self, category: &RiskCategory) -> f64 {
        match category {
            RiskCategory::Contradiction => self.contradiction,
            RiskCategory::Ambiguity => self.ambiguity,
            RiskCategory::Legal => self.legal,
            RiskCategory::Security => self.security,
            RiskCategory::Licensing => self.licensing,
            RiskCategory::Other(_) => self.unknown,
        }
    }
}

/// Reference tables and thresholds of the scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub readiness_base: LevelTable,
    pub severity_impact: LevelTable,
    pub category_probability: CategoryTable,
    pub default_competitor_score: f64,
    pub competitor_base_score: f64,
    pub strength_bonus: f64,
    pub weakness_penalty: f64,
    pub risk_adjustment_cap: f64,
    pub high_risk_penalty: f64,
    /// `win_probability >= low_difficulty_threshold` classifies as low difficulty.
    pub low_difficulty_threshold: f64,
    /// `win_probability >= medium_difficulty_threshold` classifies as medium difficulty.
    pub medium_difficulty_threshold: f64,
    pub confidence_saturation: usize,
    pub confidence_decay_per_risk: f64,
    pub confidence_floor: f64,
    pub filler_drivers: Vec<String>,
    pub max_key_drivers: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            readiness_base: LevelTable {
                high: 0.9,
                medium: 0.6,
                low: 0.3,
            },
            severity_impact: LevelTable {
                high: 0.8,
                medium: 0.5,
                low: 0.2,
            },
            category_probability: CategoryTable {
                contradiction: 0.3,
                ambiguity: 0.6,
                legal: 0.2,
                security: 0.4,
                licensing: 0.3,
                unknown: 0.4,
            },
            default_competitor_score: 0.5,
            competitor_base_score: 0.5,
            strength_bonus: 0.1,
            weakness_penalty: 0.05,
            risk_adjustment_cap: 0.3,
            high_risk_penalty: 0.1,
            low_difficulty_threshold: 0.7,
            medium_difficulty_threshold: 0.4,
            confidence_saturation: 5,
            confidence_decay_per_risk: 0.1,
            confidence_floor: 0.3,
            filler_drivers: strings(&[
                "Technical capability",
                "Project management capability",
                "Price competitiveness",
            ]),
            max_key_drivers: 5,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0.0..=1.0).contains(&self.risk_adjustment_cap) {
            return Err(CoreError::Config(format!(
                "risk adjustment cap {} must lie in [0, 1]",
                self.risk_adjustment_cap
            )));
        }
        let (medium, low) = (
            self.medium_difficulty_threshold,
            self.low_difficulty_threshold,
        );
        if medium.is_nan() || low.is_nan() || medium > low {
            return Err(CoreError::Config(format!(
                "medium difficulty threshold {} exceeds low difficulty threshold {}",
                self.medium_difficulty_threshold, self.low_difficulty_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(CoreError::Config(format!(
                "confidence floor {} must lie in [0, 1]",
                self.confidence_floor
            )));
        }
        Ok(())
    }
}

/// Template for an action emitted regardless of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTemplate {
    pub kind: ActionKind,
    pub description: String,
    pub priority: Level,
    pub timeline: String,
    pub cost_estimate: Level,
    pub success_probability: f64,
}

/// Fixed message sets and caps used by the strategy synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPlaybook {
    pub generic_actions: Vec<ActionTemplate>,
    pub generic_strengths: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
    pub strategic_focus: Vec<String>,
    pub risk_averse_recommendations: Vec<String>,
    pub balanced_recommendations: Vec<String>,
    pub aggressive_recommendations: Vec<String>,
    pub weakness_investment_recommendation: String,
    pub urgent_action_recommendation: String,
    pub differentiation_evidence: Vec<String>,
    pub differentiation_advantage: String,
    pub fallback_message_point: String,
    pub fallback_message_evidence: Vec<String>,
    pub fallback_message_criterion: String,
    pub fallback_message_advantage: String,
    pub generic_success_factors: Vec<String>,
    pub high_win_probability_threshold: f64,
    pub max_differentiated_criteria: usize,
    pub max_actions: usize,
    pub max_recommendations: usize,
    pub max_success_factors: usize,
}

impl Default for StrategyPlaybook {
    fn default() -> Self {
        Self {
            generic_actions: vec![
                ActionTemplate {
                    kind: ActionKind::PocProposal,
                    description: "Propose a proof of concept for the core technology".to_string(),
                    priority: Level::Medium,
                    timeline: "2-4 weeks".to_string(),
                    cost_estimate: Level::Medium,
                    success_probability: 0.6,
                },
                ActionTemplate {
                    kind: ActionKind::InternalReinforcement,
                    description: "Improve the project management process".to_string(),
                    priority: Level::Low,
                    timeline: "1 month".to_string(),
                    cost_estimate: Level::Low,
                    success_probability: 0.8,
                },
            ],
            generic_strengths: strings(&[
                "Fast decision-making structure",
                "Flexible project management",
                "Innovative technical approach",
            ]),
            opportunities: strings(&[
                "Growing digital transformation market",
                "Rising demand for AI and cloud",
                "Openings in the mid-market segment",
            ]),
            threats: strings(&[
                "Intensifying competition from large integrators",
                "Pace of technology change",
                "Price pressure",
            ]),
            strategic_focus: strings(&[
                "Customer-tailored solutions",
                "Rapid prototyping",
                "Competitive pricing",
            ]),
            risk_averse_recommendations: strings(&[
                "High-difficulty bid: proceed cautiously",
                "Strengthen risk management and prepare contingency plans",
                "Sharpen differentiation against competitors",
            ]),
            balanced_recommendations: strings(&[
                "Take a balanced approach to secure competitiveness",
                "Focus on meeting the core requirements",
                "Keep pricing competitive",
            ]),
            aggressive_recommendations: strings(&[
                "Lean fully on our strengths",
                "Move first with fast decisions",
                "Deepen the customer relationship",
            ]),
            weakness_investment_recommendation:
                "Invest strategically to offset weaknesses".to_string(),
            urgent_action_recommendation:
                "Execute high-priority improvement actions immediately".to_string(),
            differentiation_evidence: strings(&[
                "Successful past project references",
                "Customer satisfaction above 95%",
                "High on-time delivery rate",
            ]),
            differentiation_advantage: "Delivery 30% faster than competitors".to_string(),
            fallback_message_point: "Customer-tailored solution".to_string(),
            fallback_message_evidence: strings(&[
                "Flexible development process",
                "Transparent communication",
                "Continuous customer support",
            ]),
            fallback_message_criterion: "Overall evaluation".to_string(),
            fallback_message_advantage: "Customer-centric approach".to_string(),
            generic_success_factors: strings(&[
                "Clear understanding of requirements",
                "Effective project management",
                "Close collaboration with the customer",
                "Technical excellence",
                "Competitive proposal",
            ]),
            high_win_probability_threshold: 0.6,
            max_differentiated_criteria: 3,
            max_actions: 8,
            max_recommendations: 5,
            max_success_factors: 7,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_uses_fallback_probability() {
        let cfg = ScoringConfig::default();
        let other = RiskCategory::from("procurement");
        assert!((cfg.category_probability.get(&other) - 0.4).abs() < f64::EPSILON);
        assert!(
            (cfg.category_probability.get(&RiskCategory::Ambiguity) - 0.6).abs() < f64::EPSILON
        );
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let cfg = ScoringConfig {
            low_difficulty_threshold: 0.3,
            medium_difficulty_threshold: 0.5,
            ..ScoringConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
        assert!(ScoringConfig::default().validate().is_ok());

        let nan = ScoringConfig {
            medium_difficulty_threshold: f64::NAN,
            ..ScoringConfig::default()
        };
        assert!(matches!(nan.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn playbook_caps_match_synthesis_limits() {
        let playbook = StrategyPlaybook::default();
        assert_eq!(playbook.max_actions, 8);
        assert_eq!(playbook.max_recommendations, 5);
        assert_eq!(playbook.max_success_factors, 7);
    }
}
