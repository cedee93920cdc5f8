use tracing::warn;

use crate::config::PipelineConfig;
use crate::error::{ConfigurationWarning, ValidationError};

/// Request after pre-flight checks: the competitor list is final and every
/// adjustment made to it is listed in `warnings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub rfp_content: String,
    pub competitors: Vec<String>,
    pub warnings: Vec<ConfigurationWarning>,
}

pub fn validate_request(
    config: &PipelineConfig,
    rfp_content: &str,
    competitors: &[String],
) -> Result<ValidatedRequest, ValidationError> {
    let length = rfp_content.trim().chars().count();
    if length < config.min_rfp_chars {
        return Err(ValidationError::RfpTooShort {
            length,
            minimum: config.min_rfp_chars,
        });
    }

    let mut warnings = Vec::new();
    let mut competitors: Vec<String> = competitors
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect();

    if competitors.is_empty() {
        competitors.clone_from(&config.default_competitors);
        warnings.push(ConfigurationWarning::EmptyCompetitorList {
            substituted: competitors.len(),
        });
    }

    if competitors.len() > config.max_competitors {
        let given = competitors.len();
        competitors.truncate(config.max_competitors);
        warnings.push(ConfigurationWarning::CompetitorListTruncated {
            given,
            kept: config.max_competitors,
        });
    }

    for warning in &warnings {
        warn!(%warning, "adjusted analysis request");
    }

    Ok(ValidatedRequest {
        rfp_content: rfp_content.to_string(),
        competitors,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("competitor-{i}")).collect()
    }

    #[test]
    fn rfp_length_boundary_is_one_hundred_characters() {
        let cfg = PipelineConfig::default();
        let short = "a".repeat(99);
        let exact = "a".repeat(100);

        assert_eq!(
            validate_request(&cfg, &short, &names(1)),
            Err(ValidationError::RfpTooShort {
                length: 99,
                minimum: 100
            })
        );
        assert!(validate_request(&cfg, &exact, &names(1)).is_ok());
    }

    #[test]
    fn length_is_measured_after_trimming_in_characters() {
        let cfg = PipelineConfig::default();
        let padded = format!("   {}   ", "a".repeat(99));
        assert!(validate_request(&cfg, &padded, &names(1)).is_err());

        // multi-byte characters count once each
        let hangul = "가".repeat(100);
        assert!(validate_request(&cfg, &hangul, &names(1)).is_ok());
    }

    #[test]
    fn eleven_competitors_are_truncated_with_a_warning() {
        let cfg = PipelineConfig::default();
        let out = validate_request(&cfg, &"a".repeat(120), &names(11))
            .unwrap_or_else(|e| panic!("validation failed: {e}"));

        assert_eq!(out.competitors, names(10));
        assert_eq!(
            out.warnings,
            vec![ConfigurationWarning::CompetitorListTruncated { given: 11, kept: 10 }]
        );
    }

    #[test]
    fn empty_competitors_fall_back_to_defaults() {
        let cfg = PipelineConfig::default();
        let blank = vec!["  ".to_string()];
        let out = validate_request(&cfg, &"a".repeat(120), &blank)
            .unwrap_or_else(|e| panic!("validation failed: {e}"));

        assert_eq!(out.competitors, cfg.default_competitors);
        assert_eq!(
            out.warnings,
            vec![ConfigurationWarning::EmptyCompetitorList { substituted: 7 }]
        );
    }
}
