use crate::config::ScoringConfig;
use crate::error::CoreError;
use crate::types::{
    CompetitorProfile, DifficultyTier, EvaluationCriterion, EvaluationScore, InternalMatchResult,
    Level, RiskFactor, RiskFlag, WinProbabilityResult,
};

#[allow(clippy::cast_precision_loss)]
fn count_f64(n: usize) -> f64 {
    n as f64
}

fn in_unit_range(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

/// Weighted competitive scoring with a risk-adjusted win probability.
///
/// Every reference table comes from the injected [`ScoringConfig`]; the engine
/// holds no other state and can be shared freely between runs.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Runs the three scoring steps end to end.
    pub fn score(
        &self,
        criteria: &[EvaluationCriterion],
        internal_match: &InternalMatchResult,
        profiles: &[CompetitorProfile],
        risk_flags: &[RiskFlag],
    ) -> Result<WinProbabilityResult, CoreError> {
        let scores = self.evaluation_scores(criteria, internal_match, profiles)?;
        let risk_factors = self.risk_factors(risk_flags);
        Ok(self.win_probability(scores, risk_factors))
    }

    pub fn evaluation_scores(
        &self,
        criteria: &[EvaluationCriterion],
        internal_match: &InternalMatchResult,
        profiles: &[CompetitorProfile],
    ) -> Result<Vec<EvaluationScore>, CoreError> {
        if !in_unit_range(internal_match.confidence) {
            return Err(CoreError::InvalidConfidence(internal_match.confidence));
        }
        for criterion in criteria {
            if !in_unit_range(criterion.weight) {
                return Err(CoreError::InvalidWeight {
                    criterion: criterion.name.clone(),
                    weight: criterion.weight,
                });
            }
            if let Some(min_score) = criterion.min_score {
                if !in_unit_range(min_score) {
                    return Err(CoreError::InvalidMinScore {
                        criterion: criterion.name.clone(),
                        min_score,
                    });
                }
            }
        }

        let our_score = self.our_score(internal_match);
        let competitor_score = self.competitor_score(profiles);

        Ok(criteria
            .iter()
            .map(|criterion| {
                let difference = our_score - competitor_score;
                EvaluationScore {
                    criterion: criterion.name.clone(),
                    weight: criterion.weight,
                    our_score,
                    competitor_score,
                    difference,
                    weighted: difference * criterion.weight,
                }
            })
            .collect())
    }

    pub fn our_score(&self, internal_match: &InternalMatchResult) -> f64 {
        let base = self.config.readiness_base.get(internal_match.readiness);
        (base * (0.5 + internal_match.confidence * 0.5)).clamp(0.0, 1.0)
    }

    pub fn competitor_score(&self, profiles: &[CompetitorProfile]) -> f64 {
        if profiles.is_empty() {
            return self.config.default_competitor_score;
        }

        let total: f64 = profiles
            .iter()
            .map(|profile| {
                (self.config.competitor_base_score
                    + self.config.strength_bonus * count_f64(profile.strengths.len())
                    - self.config.weakness_penalty * count_f64(profile.weaknesses.len()))
                .clamp(0.0, 1.0)
            })
            .sum();
        total / count_f64(profiles.len())
    }

    pub fn risk_factors(&self, risk_flags: &[RiskFlag]) -> Vec<RiskFactor> {
        risk_flags
            .iter()
            .map(|flag| RiskFactor {
                category: flag.category.clone(),
                severity: flag.severity,
                impact: self.config.severity_impact.get(flag.severity).clamp(0.0, 1.0),
                probability: self
                    .config
                    .category_probability
                    .get(&flag.category)
                    .clamp(0.0, 1.0),
                mitigation: flag.mitigation.clone(),
            })
            .collect()
    }

    /// Mean risk exposure, capped. Zero without risk factors.
    pub fn risk_adjustment(&self, risk_factors: &[RiskFactor]) -> f64 {
        if risk_factors.is_empty() {
            return 0.0;
        }
        let total: f64 = risk_factors.iter().map(RiskFactor::exposure).sum();
        let mean = total / count_f64(risk_factors.len());
        mean.min(self.config.risk_adjustment_cap).max(0.0)
    }

    pub fn win_probability(
        &self,
        scores: Vec<EvaluationScore>,
        risk_factors: Vec<RiskFactor>,
    ) -> WinProbabilityResult {
        let confidence = self.confidence(scores.len(), risk_factors.len());
        let key_drivers = self.key_drivers(&scores, &risk_factors);

        if scores.is_empty() && risk_factors.is_empty() {
            return WinProbabilityResult {
                difficulty: Level::Medium,
                win_probability: 0.5,
                confidence,
                key_drivers,
                ..WinProbabilityResult::default()
            };
        }

        let total: f64 = scores.iter().map(|s| s.weighted).sum();
        let risk_adjustment = self.risk_adjustment(&risk_factors);
        let adjusted = total * (1.0 - risk_adjustment);
        let base_probability = (adjusted + 1.0) / 2.0;

        let high_risks = risk_factors
            .iter()
            .filter(|r| r.severity == Level::High)
            .count();
        let risk_penalty = self.config.high_risk_penalty * count_f64(high_risks);
        let win_probability = (base_probability - risk_penalty).clamp(0.0, 1.0);

        WinProbabilityResult {
            difficulty: self.classify(win_probability),
            win_probability,
            confidence,
            risk_adjustment,
            risk_penalty,
            evaluation_scores: scores,
            risk_factors,
            key_drivers,
        }
    }

    pub fn classify(&self, win_probability: f64) -> DifficultyTier {
        if win_probability >= self.config.low_difficulty_threshold {
            Level::Low
        } else if win_probability >= self.config.medium_difficulty_threshold {
            Level::Medium
        } else {
            Level::High
        }
    }

    pub fn confidence(&self, criterion_count: usize, risk_count: usize) -> f64 {
        let criteria_confidence = if self.config.confidence_saturation == 0 {
            1.0
        } else {
            (count_f64(criterion_count) / count_f64(self.config.confidence_saturation)).min(1.0)
        };
        let risk_confidence = (1.0 - self.config.confidence_decay_per_risk * count_f64(risk_count))
            .max(self.config.confidence_floor);
        ((criteria_confidence + risk_confidence) / 2.0).clamp(0.0, 1.0)
    }

    pub fn key_drivers(&self, scores: &[EvaluationScore], risk_factors: &[RiskFactor]) -> Vec<String> {
        let mut drivers = Vec::with_capacity(self.config.max_key_drivers);

        // first of equal magnitudes wins
        let top = scores.iter().fold(None::<&EvaluationScore>, |best, s| match best {
            Some(b) if s.weighted.abs() <= b.weighted.abs() => Some(b),
            _ => Some(s),
        });
        if let Some(top) = top {
            if top.weighted > 0.0 {
                drivers.push(format!("Competitive advantage in {}", top.criterion));
            } else {
                drivers.push(format!("Competitive disadvantage in {}", top.criterion));
            }
        }

        if let Some(risk) = risk_factors.iter().find(|r| r.severity == Level::High) {
            drivers.push(format!("Manage {} risk", risk.category));
        }

        drivers.extend(self.config.filler_drivers.iter().cloned());
        drivers.truncate(self.config.max_key_drivers);
        drivers
    }
}
