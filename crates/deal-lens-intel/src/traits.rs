use std::sync::Arc;

use deal_lens_core::{CompetitorAnalysis, InternalMatchResult, Requirement, RfpAnalysis};

use crate::error::IntelError;

/// Turns raw RFP text into requirements, evaluation criteria and risk flags.
pub trait DocumentAnalyzer: Send + Sync {
    fn name(&self) -> &'static str;

    fn analyze(&self, rfp_content: &str) -> Result<RfpAnalysis, IntelError>;
}

/// Matches requirements against internal capability and past delivery.
pub trait CapabilityMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn match_requirements(
        &self,
        requirements: &[Requirement],
    ) -> Result<InternalMatchResult, IntelError>;
}

/// Profiles the named competitors against the requirement set.
pub trait CompetitorIntelligence: Send + Sync {
    fn name(&self) -> &'static str;

    fn analyze_competitors(
        &self,
        competitors: &[String],
        requirements: &[Requirement],
    ) -> Result<CompetitorAnalysis, IntelError>;
}

/// The three collaborators a pipeline run consumes.
#[derive(Clone)]
pub struct IntelSuite {
    pub documents: Arc<dyn DocumentAnalyzer>,
    pub capabilities: Arc<dyn CapabilityMatcher>,
    pub competitors: Arc<dyn CompetitorIntelligence>,
}
