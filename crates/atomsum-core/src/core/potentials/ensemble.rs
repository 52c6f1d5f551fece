use super::Potential;
use crate::core::units::UnitSystem;

#[derive(Debug, Clone)]
pub struct EnsembleMember {
    pub potential: Potential,
    pub weight: f64,
}

/// Ordered collection of potentials whose observables are summed, each scaled by its
/// weight. Members may be of any variant, including nested ensembles.
#[derive(Debug, Clone)]
pub struct Ensemble {
    name: String,
    members: Vec<EnsembleMember>,
    units: Option<UnitSystem>,
}

impl Ensemble {
    /// Creates an ensemble where every member has weight `1.0`.
    pub fn new(members: Vec<Potential>) -> Self {
        Self::weighted(members.into_iter().map(|potential| (potential, 1.0)))
    }

    pub fn weighted<I>(members: I) -> Self
    where
        I: IntoIterator<Item = (Potential, f64)>,
    {
        Self {
            name: "ensemble".to_string(),
            members: members
                .into_iter()
                .map(|(potential, weight)| EnsembleMember { potential, weight })
                .collect(),
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

    pub fn push(&mut self, potential: Potential, weight: f64) {
        self.members.push(EnsembleMember { potential, weight });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[EnsembleMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn declared_units(&self) -> Option<UnitSystem> {
        self.units
    }
}

impl FromIterator<Potential> for Ensemble {
    fn from_iter<I: IntoIterator<Item = Potential>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
