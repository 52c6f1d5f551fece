use crate::error::{CliError, Result};
use atomsum::core::models::species::Species;
use atomsum::core::models::system::AtomicSystem;
use atomsum::core::units::LengthUnit;
use itertools::iproduct;
use nalgebra::{Point3, Vector3};

// Additive recurrence on the golden ratio: reproducible, evenly spread offsets.
const GOLDEN_FRACTION: f64 = 0.618_033_988_749_894_9;

/// A `repeats³` simple-cubic cluster of a single species.
///
/// Every coordinate is displaced from its lattice site by at most `jitter`, so that the
/// generated geometry has no exact symmetry.
pub fn simple_cubic(
    species: Species,
    repeats: usize,
    spacing: f64,
    jitter: f64,
    unit: LengthUnit,
) -> Result<AtomicSystem> {
    if repeats == 0 {
        return Err(CliError::Argument("lattice repeats must be at least 1".into()));
    }
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(CliError::Argument(format!(
            "lattice spacing must be positive, got {}",
            spacing
        )));
    }
    if !(jitter.is_finite() && jitter >= 0.0 && jitter < 0.5 * spacing) {
        return Err(CliError::Argument(format!(
            "jitter must lie in [0, spacing / 2), got {}",
            jitter
        )));
    }

    let mut system = AtomicSystem::new(unit);
    for (k, (x, y, z)) in iproduct!(0..repeats, 0..repeats, 0..repeats).enumerate() {
        let site = Point3::new(x as f64, y as f64, z as f64) * spacing;
        system.add_atom(species, site + offset(k) * jitter);
    }
    Ok(system)
}

fn offset(k: usize) -> Vector3<f64> {
    Vector3::from_fn(|axis, _| {
        let n = (3 * k + axis + 1) as f64;
        2.0 * (n * GOLDEN_FRACTION).fract() - 1.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomsum::core::models::system::SystemView;

    #[test]
    fn cluster_has_repeats_cubed_atoms_of_one_species() {
        let system = simple_cubic(Species::new(18), 3, 3.8, 0.05, LengthUnit::Angstrom).unwrap();
        assert_eq!(system.len(), 27);
        assert!(system.species_slice().iter().all(|&s| s == Species::new(18)));
        assert_eq!(system.length_unit(), LengthUnit::Angstrom);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let spacing = 2.0;
        let jitter = 0.1;
        let system = simple_cubic(Species::new(29), 4, spacing, jitter, LengthUnit::Angstrom).unwrap();
        for (k, (x, y, z)) in iproduct!(0..4, 0..4, 0..4).enumerate() {
            let site = Point3::new(x as f64, y as f64, z as f64) * spacing;
            let delta = system.position(k) - site;
            assert!(delta.amax() <= jitter + 1e-12);
        }
    }

    #[test]
    fn zero_jitter_gives_exact_lattice() {
        let system = simple_cubic(Species::new(18), 2, 1.5, 0.0, LengthUnit::Nanometer).unwrap();
        assert_eq!(system.position(7), Point3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn generation_is_reproducible() {
        let a = simple_cubic(Species::new(18), 3, 3.8, 0.2, LengthUnit::Angstrom).unwrap();
        let b = simple_cubic(Species::new(18), 3, 3.8, 0.2, LengthUnit::Angstrom).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        assert!(matches!(
            simple_cubic(Species::new(18), 0, 3.8, 0.0, LengthUnit::Angstrom),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            simple_cubic(Species::new(18), 2, -1.0, 0.0, LengthUnit::Angstrom),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            simple_cubic(Species::new(18), 2, 1.0, 0.6, LengthUnit::Angstrom),
            Err(CliError::Argument(_))
        ));
    }
}
