//! # Potentials Module
//!
//! Potential models are a tagged union, [`Potential`], over three variants:
//!
//! - **Generic** - any [`SitePotential`]: consumes a center atom's local environment and
//!   returns its site energy, optionally with one gradient vector per neighbor
//! - **OneBody** ([`one_body::OneBody`]) - a constant energy per species with no geometric
//!   dependence; its forces and virial are exactly zero
//! - **Ensemble** ([`ensemble::Ensemble`]) - an ordered, weighted collection of potentials
//!   whose observables are summed
//!
//! Two reference generic models are provided, [`lennard_jones::LennardJones`] (pair) and
//! [`finnis_sinclair::FinnisSinclair`] (many-body embedding).

pub mod ensemble;
pub mod finnis_sinclair;
pub mod lennard_jones;
pub mod one_body;

pub use ensemble::{Ensemble, EnsembleMember};
pub use finnis_sinclair::FinnisSinclair;
pub use lennard_jones::LennardJones;
pub use one_body::OneBody;

use crate::core::models::species::Species;
use crate::core::neighbors::LocalEnvironment;
use crate::core::units::UnitSystem;
use nalgebra::Vector3;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("No parameters for species {0}")]
    UnknownSpecies(Species),
    #[error("Model does not provide gradients")]
    GradientUnavailable,
    #[error("Gradient has {found} entries but the environment has {expected} neighbors")]
    GradientLength { expected: usize, found: usize },
    #[error("Neighbor {neighbor} is at distance {distance:e}, too close to evaluate")]
    CoincidentAtoms { neighbor: usize, distance: f64 },
    #[error("{0}")]
    Model(String),
}

/// The potential evaluation primitive wrapped by a generic model.
///
/// Raw numbers are produced in [`SitePotential::declared_units`] (or the global default
/// when `None`). `evaluate_with_gradient` writes `∂E_i/∂R_j` for every neighbor `j` of
/// the environment, in environment order, into `gradient` after clearing it.
pub trait SitePotential: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Interaction range, in the model's cutoff unit.
    fn cutoff(&self) -> f64;

    fn declared_units(&self) -> Option<UnitSystem> {
        None
    }

    fn has_gradient(&self) -> bool {
        true
    }

    fn evaluate(&self, env: &LocalEnvironment, center: Species) -> Result<f64, EvaluationError>;

    fn evaluate_with_gradient(
        &self,
        _env: &LocalEnvironment,
        _center: Species,
        _gradient: &mut Vec<Vector3<f64>>,
    ) -> Result<f64, EvaluationError> {
        Err(EvaluationError::GradientUnavailable)
    }
}

#[derive(Debug, Clone)]
pub enum Potential {
    Generic(Arc<dyn SitePotential>),
    OneBody(OneBody),
    Ensemble(Ensemble),
}

impl Potential {
    pub fn generic<P: SitePotential + 'static>(model: P) -> Self {
        Self::Generic(Arc::new(model))
    }

    /// Display name used in logs and error messages.
    pub fn name(&self) -> &str {
        match self {
            Self::Generic(model) => model.name(),
            Self::OneBody(model) => model.name(),
            Self::Ensemble(ensemble) => ensemble.name(),
        }
    }

    /// Largest cutoff of any generic model in the tree, `None` if there is none.
    ///
    /// A `None` means no neighbor list is needed for this potential.
    pub fn max_cutoff(&self) -> Option<f64> {
        match self {
            Self::Generic(model) => Some(model.cutoff()),
            Self::OneBody(_) => None,
            Self::Ensemble(ensemble) => ensemble
                .members()
                .iter()
                .filter_map(|member| member.potential.max_cutoff())
                .reduce(f64::max),
        }
    }

    /// Units declared directly on this node of the tree.
    pub fn declared_units(&self) -> Option<UnitSystem> {
        match self {
            Self::Generic(model) => model.declared_units(),
            Self::OneBody(model) => model.declared_units(),
            Self::Ensemble(ensemble) => ensemble.declared_units(),
        }
    }
}

impl From<OneBody> for Potential {
    fn from(model: OneBody) -> Self {
        Self::OneBody(model)
    }
}

impl From<Ensemble> for Potential {
    fn from(ensemble: Ensemble) -> Self {
        Self::Ensemble(ensemble)
    }
}

impl From<Arc<dyn SitePotential>> for Potential {
    fn from(model: Arc<dyn SitePotential>) -> Self {
        Self::Generic(model)
    }
}
