use std::sync::Arc;

use crate::config::IntelSourceConfig;
use crate::error::IntelError;
use crate::providers::DossierProvider;
use crate::traits::IntelSuite;

pub fn build_intel_suite(cfg: IntelSourceConfig) -> Result<IntelSuite, IntelError> {
    let provider = match cfg {
        IntelSourceConfig::DossierFile(c) => Arc::new(DossierProvider::open(&c.path)?),
        IntelSourceConfig::Inline(dossier) => Arc::new(DossierProvider::new(dossier)),
    };
    Ok(IntelSuite {
        documents: provider.clone(),
        capabilities: provider.clone(),
        competitors: provider,
    })
}
