pub mod config;
pub mod error;
pub mod scoring;
pub mod strategy;
pub mod types;

pub use config::*;
pub use error::CoreError;
pub use scoring::*;
pub use strategy::*;
pub use types::*;
