use std::fs;
use std::path::Path;

use deal_lens_core::{
    CompetitorAnalysis, CompetitorProfile, InternalMatchResult, Requirement, RfpAnalysis,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::IntelError;
use crate::traits::{CapabilityMatcher, CompetitorIntelligence, DocumentAnalyzer};

/// Already-structured collaborator output for one opportunity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dossier {
    #[serde(default)]
    pub rfp: RfpAnalysis,
    #[serde(default)]
    pub internal_match: InternalMatchResult,
    #[serde(default)]
    pub competitors: CompetitorAnalysis,
}

/// Serves a prepared [`Dossier`] through every collaborator trait.
pub struct DossierProvider {
    dossier: Dossier,
}

impl DossierProvider {
    pub fn new(dossier: Dossier) -> Self {
        Self { dossier }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, IntelError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let dossier: Dossier = serde_json::from_slice(&bytes)?;
        info!(
            path = %path.display(),
            criteria = dossier.rfp.criteria.len(),
            profiles = dossier.competitors.profiles.len(),
            "loaded dossier"
        );
        Ok(Self::new(dossier))
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl DocumentAnalyzer for DossierProvider {
    fn name(&self) -> &'static str {
        "dossier"
    }

    fn analyze(&self, _rfp_content: &str) -> Result<RfpAnalysis, IntelError> {
        Ok(self.dossier.rfp.clone())
    }
}

impl CapabilityMatcher for DossierProvider {
    fn name(&self) -> &'static str {
        "dossier"
    }

    fn match_requirements(
        &self,
        _requirements: &[Requirement],
    ) -> Result<InternalMatchResult, IntelError> {
        let result = &self.dossier.internal_match;
        if !result.confidence.is_finite() {
            return Err(IntelError::InvalidResponse(format!(
                "internal match confidence is not finite: {}",
                result.confidence
            )));
        }
        Ok(result.clone())
    }
}

impl CompetitorIntelligence for DossierProvider {
    fn name(&self) -> &'static str {
        "dossier"
    }

    /// Profiles are returned in request order; names without a profile are skipped.
    fn analyze_competitors(
        &self,
        competitors: &[String],
        _requirements: &[Requirement],
    ) -> Result<CompetitorAnalysis, IntelError> {
        let known = &self.dossier.competitors.profiles;
        let mut profiles: Vec<CompetitorProfile> = Vec::with_capacity(competitors.len());
        for name in competitors {
            if profiles.iter().any(|p| same_name(&p.name, name)) {
                continue;
            }
            match known.iter().find(|p| same_name(&p.name, name)) {
                Some(profile) => profiles.push(profile.clone()),
                None => debug!(competitor = %name, "no profile available, skipping"),
            }
        }

        Ok(CompetitorAnalysis {
            profiles,
            ..self.dossier.competitors.clone()
        })
    }
}
