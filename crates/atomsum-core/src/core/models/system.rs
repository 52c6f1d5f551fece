use super::species::Species;
use crate::core::units::LengthUnit;
use nalgebra::Point3;

/// Read-only view of an atomistic system.
///
/// This is the single capability interface the engine consumes. Implementations must be
/// shareable across worker threads; the engine never mutates a system.
pub trait SystemView: Sync {
    /// Number of atoms in the system.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cartesian position of atom `i`, in [`SystemView::length_unit`].
    fn position(&self, i: usize) -> Point3<f64>;

    /// Chemical species of atom `i`.
    fn species(&self, i: usize) -> Species;

    /// Unit the positions are expressed in.
    fn length_unit(&self) -> LengthUnit {
        LengthUnit::Angstrom
    }
}

/// An owned, non-periodic atomic system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomicSystem {
    positions: Vec<Point3<f64>>,
    species: Vec<Species>,
    length_unit: LengthUnit,
}

impl AtomicSystem {
    /// Creates an empty system whose positions will be interpreted in `length_unit`.
    pub fn new(length_unit: LengthUnit) -> Self {
        Self {
            positions: Vec::new(),
            species: Vec::new(),
            length_unit,
        }
    }

    /// Builds a system from parallel species and position sequences.
    ///
    /// # Return
    ///
    /// Returns `None` if the two sequences differ in length.
    pub fn from_parts(
        species: Vec<Species>,
        positions: Vec<Point3<f64>>,
        length_unit: LengthUnit,
    ) -> Option<Self> {
        (species.len() == positions.len()).then_some(Self {
            positions,
            species,
            length_unit,
        })
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, species: Species, position: Point3<f64>) -> usize {
        self.positions.push(position);
        self.species.push(species);
        self.positions.len() - 1
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn species_slice(&self) -> &[Species] {
        &self.species
    }

    pub fn set_position(&mut self, i: usize, position: Point3<f64>) -> Option<()> {
        self.positions.get_mut(i).map(|p| *p = position)
    }
}

impl SystemView for AtomicSystem {
    #[inline]
    fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    fn position(&self, i: usize) -> Point3<f64> {
        self.positions[i]
    }

    #[inline]
    fn species(&self, i: usize) -> Species {
        self.species[i]
    }

    fn length_unit(&self) -> LengthUnit {
        self.length_unit
    }
}
