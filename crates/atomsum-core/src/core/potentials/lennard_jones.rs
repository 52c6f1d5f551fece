use super::{EvaluationError, SitePotential};
use crate::core::models::species::Species;
use crate::core::neighbors::LocalEnvironment;
use crate::core::units::UnitSystem;
use nalgebra::Vector3;

const MIN_DISTANCE: f64 = 1e-6;

/// Lennard-Jones 12-6 pair potential, energy-shifted to zero at the cutoff.
///
/// `φ(r) = ε [(r_min/r)^12 - 2 (r_min/r)^6] - φ_raw(r_c)`. Each pair is shared between
/// its two centers, so a site energy is half the sum over its neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct LennardJones {
    r_min: f64,
    well_depth: f64,
    cutoff: f64,
    shift: f64,
    units: Option<UnitSystem>,
}

impl LennardJones {
    pub fn new(r_min: f64, well_depth: f64, cutoff: f64) -> Self {
        Self {
            r_min,
            well_depth,
            cutoff,
            shift: lennard_jones_12_6(cutoff, r_min, well_depth),
            units: None,
        }
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = Some(units);
        self
    }

    /// Shifted pair energy and its radial derivative.
    #[inline]
    fn pair(&self, dist: f64) -> (f64, f64) {
        let rho = self.r_min / dist;
        let rho6 = rho.powi(6);
        let rho12 = rho6 * rho6;
        let energy = self.well_depth * (rho12 - 2.0 * rho6) - self.shift;
        let d_energy = 12.0 * self.well_depth * (rho6 - rho12) / dist;
        (energy, d_energy)
    }

    fn checked_distance(j: usize, r: &Vector3<f64>) -> Result<f64, EvaluationError> {
        let dist = r.norm();
        if dist < MIN_DISTANCE {
            return Err(EvaluationError::CoincidentAtoms {
                neighbor: j,
                distance: dist,
            });
        }
        Ok(dist)
    }
}

#[inline]
pub fn lennard_jones_12_6(dist: f64, r_min: f64, well_depth: f64) -> f64 {
    let rho = r_min / dist;
    let rho6 = rho.powi(6);
    let rho12 = rho6 * rho6;
    well_depth * (rho12 - 2.0 * rho6)
}

impl SitePotential for LennardJones {
    fn name(&self) -> &str {
        "lennard-jones-12-6"
    }

    fn cutoff(&self) -> f64 {
        self.cutoff
    }

    fn declared_units(&self) -> Option<UnitSystem> {
        self.units
    }

    fn evaluate(&self, env: &LocalEnvironment, _center: Species) -> Result<f64, EvaluationError> {
        let mut energy = 0.0;
        for (j, r, _) in env.iter() {
            let dist = Self::checked_distance(j, r)?;
            if dist < self.cutoff {
                energy += self.pair(dist).0;
            }
        }
        Ok(0.5 * energy)
    }

    fn evaluate_with_gradient(
        &self,
        env: &LocalEnvironment,
        _center: Species,
        gradient: &mut Vec<Vector3<f64>>,
    ) -> Result<f64, EvaluationError> {
        gradient.clear();
        let mut energy = 0.0;
        for (j, r, _) in env.iter() {
            let dist = Self::checked_distance(j, r)?;
            if dist < self.cutoff {
                let (e, de) = self.pair(dist);
                energy += e;
                gradient.push(r * (0.5 * de / dist));
            } else {
                gradient.push(Vector3::zeros());
            }
        }
        Ok(0.5 * energy)
    }
}
