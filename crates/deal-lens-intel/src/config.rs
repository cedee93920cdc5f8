use std::path::PathBuf;

use crate::providers::Dossier;

#[derive(Debug, Clone)]
pub struct DossierFileConfig {
    pub path: PathBuf,
}

impl DossierFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone)]
pub enum IntelSourceConfig {
    DossierFile(DossierFileConfig),
    Inline(Dossier),
}
