use deal_lens_core::{ScoringConfig, StrategyPlaybook};

use crate::error::PipelineError;

pub const DEFAULT_MIN_RFP_CHARS: usize = 100;
pub const DEFAULT_MAX_COMPETITORS: usize = 10;

const DEFAULT_COMPETITORS: [&str; 7] = [
    "Samsung SDS",
    "LG CNS",
    "POSCO DX",
    "KT",
    "Hyundai AutoEver",
    "Kakao",
    "CJ OliveNetworks",
];

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub min_rfp_chars: usize,
    pub max_competitors: usize,
    pub default_competitors: Vec<String>,
    pub scoring: ScoringConfig,
    pub playbook: StrategyPlaybook,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_rfp_chars: DEFAULT_MIN_RFP_CHARS,
            max_competitors: DEFAULT_MAX_COMPETITORS,
            default_competitors: DEFAULT_COMPETITORS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            scoring: ScoringConfig::default(),
            playbook: StrategyPlaybook::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let min_rfp_chars = env_usize("DEAL_LENS_MIN_RFP_CHARS", defaults.min_rfp_chars, 1, 1_000_000);
        let max_competitors =
            env_usize("DEAL_LENS_MAX_COMPETITORS", defaults.max_competitors, 1, 1_000);
        let default_competitors = std::env::var("DEAL_LENS_DEFAULT_COMPETITORS")
            .ok()
            .map(|raw| parse_name_list(&raw))
            .filter(|names| !names.is_empty())
            .unwrap_or(defaults.default_competitors);

        Self {
            min_rfp_chars,
            max_competitors,
            default_competitors,
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.max_competitors == 0 {
            return Err(PipelineError::Config(
                "max_competitors must be at least 1".to_string(),
            ));
        }
        self.scoring
            .validate()
            .map_err(|e| PipelineError::Config(e.to_string()))
    }
}

fn env_usize(name: &str, default: usize, min: usize, max: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_competitor_list_fits_the_cap() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.default_competitors.len(), 7);
        assert!(cfg.default_competitors.len() <= cfg.max_competitors);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn name_list_drops_blank_entries() {
        assert_eq!(
            parse_name_list(" Acme , ,Globex,"),
            vec!["Acme".to_string(), "Globex".to_string()]
        );
        assert!(parse_name_list(" , ").is_empty());
    }

    #[test]
    fn zero_competitor_cap_is_rejected() {
        let cfg = PipelineConfig {
            max_competitors: 0,
            ..PipelineConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(PipelineError::Config(_))));
    }
}
