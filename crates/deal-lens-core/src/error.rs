use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("criterion `{criterion}` has invalid weight {weight}; expected a finite value in [0, 1]")]
    InvalidWeight { criterion: String, weight: f64 },

    #[error("criterion `{criterion}` has invalid minimum score {min_score}; expected a finite value in [0, 1]")]
    InvalidMinScore { criterion: String, min_score: f64 },

    #[error("internal match confidence {0} is invalid; expected a finite value in [0, 1]")]
    InvalidConfidence(f64),

    #[error("scoring configuration error: {0}")]
    Config(String),
}
