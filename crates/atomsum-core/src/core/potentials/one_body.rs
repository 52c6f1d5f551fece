use super::EvaluationError;
use crate::core::models::species::Species;
use crate::core::units::UnitSystem;
use std::collections::HashMap;

/// Constant per-species energy offset.
///
/// A one-body model has no geometric dependence: the engine evaluates it by species
/// lookup alone, never builds a neighbor list for it, and reports exactly zero forces
/// and virial.
#[derive(Debug, Clone, PartialEq)]
pub struct OneBody {
    name: String,
    energies: HashMap<Species, f64>,
    units: Option<UnitSystem>,
}

impl OneBody {
    pub fn new(energies: HashMap<Species, f64>) -> Self {
        Self {
            name: "one-body".to_string(),
            energies,
            units: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = Some(units);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_units(&self) -> Option<UnitSystem> {
        self.units
    }

    #[inline]
    pub fn energy(&self, species: Species) -> Result<f64, EvaluationError> {
        self.energies
            .get(&species)
            .copied()
            .ok_or(EvaluationError::UnknownSpecies(species))
    }
}

impl FromIterator<(Species, f64)> for OneBody {
    fn from_iter<I: IntoIterator<Item = (Species, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
