use crate::config::StrategyPlaybook;
use crate::types::{
    ActionKind, CompanySwot, CompetitorAnalysis, DifferentiationMessage, GapSize,
    ImprovementAction, InternalMatchResult, Level, RiskFlag, StrategySynthesis,
    WinProbabilityResult,
};

/// Rule-based synthesis of actions, SWOT, messaging and recommendations from
/// the scoring outcome.
#[derive(Debug, Clone, Default)]
pub struct StrategySynthesizer {
    playbook: StrategyPlaybook,
}

impl StrategySynthesizer {
    pub fn new(playbook: StrategyPlaybook) -> Self {
        Self { playbook }
    }

    pub fn playbook(&self) -> &StrategyPlaybook {
        &self.playbook
    }

    pub fn synthesize(
        &self,
        risk_flags: &[RiskFlag],
        internal_match: &InternalMatchResult,
        competitor_analysis: &CompetitorAnalysis,
        win: &WinProbabilityResult,
    ) -> StrategySynthesis {
        let improvement_actions = self.improvement_actions(risk_flags, internal_match);
        let swot = self.swot(internal_match, competitor_analysis);
        let differentiation_messages = self.differentiation_messages(competitor_analysis, win);
        let recommendations = self.recommendations(&improvement_actions, &swot, win);
        let success_factors = self.success_factors(internal_match, competitor_analysis, win);

        StrategySynthesis {
            improvement_actions,
            swot,
            differentiation_messages,
            recommendations,
            success_factors,
        }
    }

    /// Gap actions, then risk actions, then the generic tail, in that order.
    pub fn improvement_actions(
        &self,
        risk_flags: &[RiskFlag],
        internal_match: &InternalMatchResult,
    ) -> Vec<ImprovementAction> {
        let gap_actions = internal_match
            .skill_gaps
            .iter()
            .filter_map(|gap| match gap.gap_size {
                GapSize::Severe => Some(ImprovementAction {
                    kind: ActionKind::InternalReinforcement,
                    description: format!("Recruit {} specialists", gap.skill_area),
                    priority: Level::High,
                    timeline: "1-2 months".to_string(),
                    cost_estimate: Level::High,
                    success_probability: 0.8,
                }),
                GapSize::Lacking => Some(ImprovementAction {
                    kind: ActionKind::ExternalPartnership,
                    description: format!("Establish a {} partnership", gap.skill_area),
                    priority: Level::Medium,
                    timeline: "2-3 months".to_string(),
                    cost_estimate: Level::Medium,
                    success_probability: 0.7,
                }),
                GapSize::Sufficient => None,
            });

        let risk_actions = risk_flags
            .iter()
            .filter(|flag| flag.severity == Level::High)
            .map(|flag| ImprovementAction {
                kind: ActionKind::SpecClarification,
                description: format!("Clarify requirements behind the {} risk", flag.category),
                priority: Level::High,
                timeline: "1 week".to_string(),
                cost_estimate: Level::Low,
                success_probability: 0.9,
            });

        let generic = self.playbook.generic_actions.iter().map(|t| ImprovementAction {
            kind: t.kind,
            description: t.description.clone(),
            priority: t.priority,
            timeline: t.timeline.clone(),
            cost_estimate: t.cost_estimate,
            success_probability: t.success_probability.clamp(0.0, 1.0),
        });

        gap_actions
            .chain(risk_actions)
            .chain(generic)
            .take(self.playbook.max_actions)
            .collect()
    }

    /// Opportunities and threats come from the playbook only; they do not
    /// depend on the inputs.
    pub fn swot(
        &self,
        internal_match: &InternalMatchResult,
        competitor_analysis: &CompetitorAnalysis,
    ) -> CompanySwot {
        let strengths = competitor_analysis
            .our_advantages
            .iter()
            .chain(&self.playbook.generic_strengths)
            .cloned()
            .collect();

        let weaknesses = competitor_analysis
            .our_disadvantages
            .iter()
            .cloned()
            .chain(
                internal_match
                    .skill_gaps
                    .iter()
                    .filter(|gap| gap.gap_size != GapSize::Sufficient)
                    .map(|gap| format!("Insufficient {} capability", gap.skill_area)),
            )
            .collect();

        CompanySwot {
            strengths,
            weaknesses,
            opportunities: self.playbook.opportunities.clone(),
            threats: self.playbook.threats.clone(),
            strategic_focus: self.playbook.strategic_focus.clone(),
        }
    }

    pub fn differentiation_messages(
        &self,
        competitor_analysis: &CompetitorAnalysis,
        win: &WinProbabilityResult,
    ) -> Vec<DifferentiationMessage> {
        let mut messages: Vec<DifferentiationMessage> = win
            .evaluation_scores
            .iter()
            .take(self.playbook.max_differentiated_criteria)
            .zip(&competitor_analysis.differentiation_points)
            .map(|(score, point)| DifferentiationMessage {
                key_point: point.clone(),
                supporting_evidence: self.playbook.differentiation_evidence.clone(),
                criterion: score.criterion.clone(),
                competitive_advantage: self.playbook.differentiation_advantage.clone(),
            })
            .collect();

        if messages.is_empty() {
            messages.push(DifferentiationMessage {
                key_point: self.playbook.fallback_message_point.clone(),
                supporting_evidence: self.playbook.fallback_message_evidence.clone(),
                criterion: self.playbook.fallback_message_criterion.clone(),
                competitive_advantage: self.playbook.fallback_message_advantage.clone(),
            });
        }
        messages
    }

    pub fn recommendations(
        &self,
        actions: &[ImprovementAction],
        swot: &CompanySwot,
        win: &WinProbabilityResult,
    ) -> Vec<String> {
        let tiered = match win.difficulty {
            Level::High => &self.playbook.risk_averse_recommendations,
            Level::Medium => &self.playbook.balanced_recommendations,
            Level::Low => &self.playbook.aggressive_recommendations,
        };

        let mut recommendations = tiered.clone();
        if swot.weaknesses.len() > swot.strengths.len() {
            recommendations.push(self.playbook.weakness_investment_recommendation.clone());
        }
        if actions.iter().any(|a| a.priority == Level::High) {
            recommendations.push(self.playbook.urgent_action_recommendation.clone());
        }
        recommendations.truncate(self.playbook.max_recommendations);
        recommendations
    }

    pub fn success_factors(
        &self,
        internal_match: &InternalMatchResult,
        competitor_analysis: &CompetitorAnalysis,
        win: &WinProbabilityResult,
    ) -> Vec<String> {
        let mut factors = Vec::new();
        if internal_match.readiness == Level::High {
            factors.push("High internal readiness".to_string());
        }
        if !competitor_analysis.our_advantages.is_empty() {
            factors.push("Differentiated strengths versus competitors".to_string());
        }
        if win.win_probability > self.playbook.high_win_probability_threshold {
            factors.push("High win probability".to_string());
        }
        factors.extend(self.playbook.generic_success_factors.iter().cloned());
        factors.truncate(self.playbook.max_success_factors);
        factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EvaluationScore, RiskCategory, SkillGap};

    fn gap(area: &str, gap_size: GapSize) -> SkillGap {
        SkillGap {
            skill_area: area.to_string(),
            required_level: "senior".to_string(),
            current_level: "intermediate".to_string(),
            gap_size,
            improvement_suggestions: Vec::new(),
        }
    }

    fn high_flag(category: RiskCategory) -> RiskFlag {
        RiskFlag {
            category,
            description: "unclear clause".to_string(),
            severity: Level::High,
            mitigation: None,
        }
    }

    fn win_with(difficulty: Level, win_probability: f64) -> WinProbabilityResult {
        WinProbabilityResult {
            difficulty,
            win_probability,
            ..WinProbabilityResult::default()
        }
    }

    fn score(name: &str) -> EvaluationScore {
        EvaluationScore {
            criterion: name.to_string(),
            weight: 0.2,
            our_score: 0.6,
            competitor_score: 0.5,
            difference: 0.1,
            weighted: 0.02,
        }
    }

    #[test]
    fn actions_follow_gap_then_risk_then_generic_order() {
        let synth = StrategySynthesizer::default();
        let internal = InternalMatchResult {
            readiness: Level::Medium,
            confidence: 0.5,
            skill_gaps: vec![
                gap("cloud", GapSize::Lacking),
                gap("security", GapSize::Severe),
                gap("frontend", GapSize::Sufficient),
            ],
        };
        let actions =
            synth.improvement_actions(&[high_flag(RiskCategory::Legal)], &internal);

        let kinds: Vec<ActionKind> = actions.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::ExternalPartnership,
                ActionKind::InternalReinforcement,
                ActionKind::SpecClarification,
                ActionKind::PocProposal,
                ActionKind::InternalReinforcement,
            ]
        );
        assert_eq!(actions[0].priority, Level::Medium);
        assert_eq!(actions[1].priority, Level::High);
        assert_eq!(actions[2].description, "Clarify requirements behind the legal risk");
    }

    #[test]
    fn actions_are_capped_at_eight() {
        let synth = StrategySynthesizer::default();
        let internal = InternalMatchResult {
            skill_gaps: (0..6).map(|i| gap(&format!("area{i}"), GapSize::Severe)).collect(),
            ..InternalMatchResult::default()
        };
        let flags: Vec<_> = (0..4).map(|_| high_flag(RiskCategory::Security)).collect();

        let actions = synth.improvement_actions(&flags, &internal);
        assert_eq!(actions.len(), 8);
        assert!(actions
            .iter()
            .all(|a| a.kind != ActionKind::PocProposal));
    }

    #[test]
    fn swot_merges_advantages_and_gaps() {
        let synth = StrategySynthesizer::default();
        let internal = InternalMatchResult {
            skill_gaps: vec![gap("AI/ML", GapSize::Lacking), gap("db", GapSize::Sufficient)],
            ..InternalMatchResult::default()
        };
        let analysis = CompetitorAnalysis {
            our_advantages: vec!["Agile delivery".to_string()],
            our_disadvantages: vec!["Brand awareness".to_string()],
            ..CompetitorAnalysis::default()
        };

        let swot = synth.swot(&internal, &analysis);
        assert_eq!(swot.strengths.len(), 4);
        assert_eq!(swot.strengths[0], "Agile delivery");
        assert_eq!(
            swot.weaknesses,
            vec![
                "Brand awareness".to_string(),
                "Insufficient AI/ML capability".to_string()
            ]
        );
        assert_eq!(swot.opportunities, synth.playbook().opportunities);
        assert_eq!(swot.threats, synth.playbook().threats);
    }

    #[test]
    fn recommendations_follow_difficulty_tier() {
        let synth = StrategySynthesizer::default();
        let swot = CompanySwot::default();

        let high = synth.recommendations(&[], &swot, &win_with(Level::High, 0.2));
        assert_eq!(high, synth.playbook().risk_averse_recommendations);

        let low = synth.recommendations(&[], &swot, &win_with(Level::Low, 0.8));
        assert_eq!(low, synth.playbook().aggressive_recommendations);
    }

    #[test]
    fn conditional_recommendations_are_appended_and_capped() {
        let synth = StrategySynthesizer::default();
        let swot = CompanySwot {
            strengths: vec!["a".to_string()],
            weaknesses: vec!["b".to_string(), "c".to_string()],
            ..CompanySwot::default()
        };
        let internal = InternalMatchResult {
            skill_gaps: vec![gap("security", GapSize::Severe)],
            ..InternalMatchResult::default()
        };
        let actions = synth.improvement_actions(&[], &internal);

        let recs = synth.recommendations(&actions, &swot, &win_with(Level::Medium, 0.5));
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[3], synth.playbook().weakness_investment_recommendation);
        assert_eq!(recs[4], synth.playbook().urgent_action_recommendation);
    }

    #[test]
    fn success_factors_include_conditionals_and_cap() {
        let synth = StrategySynthesizer::default();
        let internal = InternalMatchResult {
            readiness: Level::High,
            confidence: 0.9,
            skill_gaps: Vec::new(),
        };
        let analysis = CompetitorAnalysis {
            our_advantages: vec!["Agile delivery".to_string()],
            ..CompetitorAnalysis::default()
        };

        let factors = synth.success_factors(&internal, &analysis, &win_with(Level::Low, 0.75));
        assert_eq!(factors.len(), 7);
        assert_eq!(factors[0], "High internal readiness");
        assert_eq!(factors[2], "High win probability");

        let factors = synth.success_factors(
            &InternalMatchResult::default(),
            &CompetitorAnalysis::default(),
            &win_with(Level::Medium, 0.6),
        );
        assert_eq!(factors, synth.playbook().generic_success_factors);
    }

    #[test]
    fn differentiation_pairs_criteria_with_points() {
        let synth = StrategySynthesizer::default();
        let win = WinProbabilityResult {
            evaluation_scores: vec![score("technical"), score("price"), score("delivery"), score("support")],
            ..WinProbabilityResult::default()
        };
        let analysis = CompetitorAnalysis {
            differentiation_points: vec!["Rapid prototyping".to_string(), "Agile".to_string()],
            ..CompetitorAnalysis::default()
        };

        let messages = synth.differentiation_messages(&analysis, &win);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].criterion, "technical");
        assert_eq!(messages[1].key_point, "Agile");

        let fallback = synth.differentiation_messages(&CompetitorAnalysis::default(), &win);
        assert_eq!(fallback.len(), 1);
        assert_eq!(fallback[0].criterion, synth.playbook().fallback_message_criterion);
    }

    #[test]
    fn synthesize_assembles_all_sections() {
        let synth = StrategySynthesizer::default();
        let out = synth.synthesize(
            &[],
            &InternalMatchResult::default(),
            &CompetitorAnalysis::default(),
            &WinProbabilityResult::default(),
        );
        let summary = out.summary();
        assert_eq!(summary.action_count, 2);
        assert_eq!(summary.strength_count, 3);
        assert_eq!(summary.weakness_count, 0);
        assert_eq!(summary.message_count, 1);
        assert_eq!(summary.recommendation_count, 3);
        assert_eq!(summary.success_factor_count, 5);
    }
}
