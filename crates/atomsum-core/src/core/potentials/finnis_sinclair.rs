use super::{EvaluationError, SitePotential};
use crate::core::models::species::Species;
use crate::core::neighbors::LocalEnvironment;
use crate::core::units::UnitSystem;
use nalgebra::Vector3;

/// Finnis-Sinclair style embedding: `E_i = -A sqrt(ρ_i)` with `ρ_i = Σ_j (d - r_ij)^2`
/// for `r_ij < d`.
///
/// The square root couples every neighbor of a center, so the gradient on one neighbor
/// depends on all the others.
#[derive(Debug, Clone, PartialEq)]
pub struct FinnisSinclair {
    strength: f64,
    cutoff: f64,
    units: Option<UnitSystem>,
}

impl FinnisSinclair {
    pub fn new(strength: f64, cutoff: f64) -> Self {
        Self {
            strength,
            cutoff,
            units: None,
        }
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = Some(units);
        self
    }

    fn density(&self, env: &LocalEnvironment) -> f64 {
        env.displacements()
            .iter()
            .map(|r| r.norm())
            .filter(|&dist| dist < self.cutoff)
            .map(|dist| (self.cutoff - dist).powi(2))
            .sum()
    }
}

impl SitePotential for FinnisSinclair {
    fn name(&self) -> &str {
        "finnis-sinclair"
    }

    fn cutoff(&self) -> f64 {
        self.cutoff
    }

    fn declared_units(&self) -> Option<UnitSystem> {
        self.units
    }

    fn evaluate(&self, env: &LocalEnvironment, _center: Species) -> Result<f64, EvaluationError> {
        Ok(-self.strength * self.density(env).sqrt())
    }

    fn evaluate_with_gradient(
        &self,
        env: &LocalEnvironment,
        _center: Species,
        gradient: &mut Vec<Vector3<f64>>,
    ) -> Result<f64, EvaluationError> {
        gradient.clear();
        let sqrt_rho = self.density(env).sqrt();
        if sqrt_rho == 0.0 {
            gradient.resize(env.len(), Vector3::zeros());
            return Ok(0.0);
        }

        for (j, r, _) in env.iter() {
            let dist = r.norm();
            if dist == 0.0 {
                return Err(EvaluationError::CoincidentAtoms {
                    neighbor: j,
                    distance: dist,
                });
            }
            if dist < self.cutoff {
                let scale = self.strength * (self.cutoff - dist) / (sqrt_rho * dist);
                gradient.push(r * scale);
            } else {
                gradient.push(Vector3::zeros());
            }
        }
        Ok(-self.strength * sqrt_rho)
    }
}
