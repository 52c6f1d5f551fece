use thiserror::Error;

use super::config::ConfigError;
use crate::core::neighbors::NeighborError;
use crate::core::potentials::EvaluationError;
use crate::core::units::UnitSystem;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No usable neighbor list for cutoff {cutoff}: {source}")]
    MissingNeighborList {
        cutoff: f64,
        #[source]
        source: NeighborError,
    },

    #[error("Potential '{model}' does not support the {observable} observable")]
    UnsupportedObservable {
        observable: &'static str,
        model: String,
    },

    #[error("Incompatible unit systems: expected {expected}, found {found}")]
    UnitMismatch {
        expected: UnitSystem,
        found: UnitSystem,
    },

    #[error("Atom index {index} is out of range for a system of {len} atoms")]
    AtomOutOfRange { index: usize, len: usize },

    #[error("Evaluation of '{model}' failed at atom {atom}: {source}")]
    Evaluation {
        atom: usize,
        model: String,
        #[source]
        source: EvaluationError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
