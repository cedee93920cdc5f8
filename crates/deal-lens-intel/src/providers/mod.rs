mod dossier;

pub use dossier::{Dossier, DossierProvider};
