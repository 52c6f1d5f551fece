use super::{NeighborError, NeighborList, NeighborListBuilder, validate_cutoff};
use crate::core::models::system::SystemView;
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Open-boundary neighbor list builder backed by a kd-tree radius search.
#[derive(Debug, Clone, Copy, Default)]
pub struct KdTreeBuilder;

impl NeighborListBuilder for KdTreeBuilder {
    #[instrument(skip_all, name = "kdtree_neighbor_build", fields(atoms = system.len()))]
    fn build(&self, system: &dyn SystemView, cutoff: f64) -> Result<NeighborList, NeighborError> {
        validate_cutoff(cutoff)?;

        let positions = (0..system.len())
            .map(|i| {
                let p = system.position(i);
                if p.iter().all(|c| c.is_finite()) {
                    Ok([p.x, p.y, p.z])
                } else {
                    Err(NeighborError::NonFinitePosition { atom: i })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if positions.is_empty() {
            return Ok(NeighborList::from_adjacency(Vec::new(), cutoff));
        }

        let tree: ImmutableKdTree<f64, 3> = ImmutableKdTree::new_from_slice(&positions);

        let radius_sq = cutoff * cutoff;
        let adjacency: Vec<Vec<usize>> = positions
            .par_iter()
            .enumerate()
            .map(|(i, position)| {
                let mut neighbors: Vec<usize> = tree
                    .within_unsorted::<SquaredEuclidean>(position, radius_sq)
                    .into_iter()
                    .map(|found| found.item as usize)
                    .filter(|&j| j != i)
                    .collect();
                neighbors.sort_unstable();
                neighbors
            })
            .collect();

        let list = NeighborList::from_adjacency(adjacency, cutoff);
        debug!(
            cutoff,
            entries = list.entry_count(),
            "Neighbor list constructed."
        );
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::species::Species;
    use crate::core::models::system::AtomicSystem;
    use crate::core::units::LengthUnit;
    use nalgebra::Point3;

    fn setup_cubic_system(repeats: usize, spacing: f64) -> AtomicSystem {
        let mut system = AtomicSystem::new(LengthUnit::Angstrom);
        for x in 0..repeats {
            for y in 0..repeats {
                for z in 0..repeats {
                    system.add_atom(
                        Species::new(18),
                        Point3::new(x as f64, y as f64, z as f64) * spacing,
                    );
                }
            }
        }
        system
    }

    fn setup_grid_system(nx: usize, ny: usize, spacing: f64) -> AtomicSystem {
        let mut system = AtomicSystem::new(LengthUnit::Angstrom);
        for x in 0..nx {
            for y in 0..ny {
                system.add_atom(
                    Species::new(6),
                    Point3::new(x as f64 * spacing, y as f64 * spacing, 0.0),
                );
            }
        }
        system
    }

    fn brute_force_neighbors(system: &AtomicSystem, cutoff: f64) -> Vec<Vec<usize>> {
        (0..system.len())
            .map(|i| {
                (0..system.len())
                    .filter(|&j| {
                        j != i
                            && (system.position(j) - system.position(i)).norm_squared()
                                <= cutoff * cutoff
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn matches_brute_force_search_on_lattice() {
        let system = setup_cubic_system(4, 1.0);
        let cutoff = 1.5;
        let list = KdTreeBuilder.build(&system, cutoff).unwrap();
        let expected = brute_force_neighbors(&system, cutoff);
        for (i, js) in expected.iter().enumerate() {
            assert_eq!(list.neighbors(i), js.as_slice(), "atom {}", i);
        }
    }

    #[test]
    fn corner_atom_of_simple_cubic_lattice_has_three_nearest_neighbors() {
        let system = setup_cubic_system(3, 2.0);
        let list = KdTreeBuilder.build(&system, 2.1).unwrap();
        assert_eq!(list.neighbors(0).len(), 3);
        assert_eq!(list.neighbors(13).len(), 6);
    }

    #[test]
    fn perfect_cubic_lattice_with_many_shared_coordinates_is_supported() {
        let system = setup_cubic_system(20, 3.8);
        let list = KdTreeBuilder.build(&system, 4.0).unwrap();
        assert_eq!(list.len(), 8000);
        // 19 * 20 * 20 bonds along each axis, listed from both ends.
        assert_eq!(list.entry_count(), 2 * 3 * 19 * 20 * 20);
        let center = (10 * 20 + 10) * 20 + 10;
        assert_eq!(list.neighbors(center).len(), 6);
    }

    #[test]
    fn planar_sheet_matches_brute_force_search() {
        let system = setup_grid_system(40, 40, 1.0);
        let cutoff = 2.0;
        let list = KdTreeBuilder.build(&system, cutoff).unwrap();
        let expected = brute_force_neighbors(&system, cutoff);
        for (i, js) in expected.iter().enumerate() {
            assert_eq!(list.neighbors(i), js.as_slice(), "atom {}", i);
        }
    }

    #[test]
    fn linear_chain_links_each_atom_to_its_neighbors() {
        let system = setup_grid_system(600, 1, 1.5);
        let list = KdTreeBuilder.build(&system, 1.6).unwrap();
        assert_eq!(list.neighbors(0), &[1]);
        assert_eq!(list.neighbors(300), &[299, 301]);
        assert_eq!(list.neighbors(599), &[598]);
        assert_eq!(list.entry_count(), 2 * 599);
    }

    #[test]
    fn excludes_center_atom_itself() {
        let system = setup_cubic_system(2, 1.0);
        let list = KdTreeBuilder.build(&system, 10.0).unwrap();
        for i in 0..system.len() {
            assert!(!list.neighbors(i).contains(&i));
            assert_eq!(list.neighbors(i).len(), system.len() - 1);
        }
    }

    #[test]
    fn empty_system_yields_empty_list() {
        let system = AtomicSystem::new(LengthUnit::Angstrom);
        let list = KdTreeBuilder.build(&system, 3.0).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn rejects_non_positive_cutoff() {
        let system = setup_cubic_system(2, 1.0);
        assert_eq!(
            KdTreeBuilder.build(&system, 0.0),
            Err(NeighborError::InvalidCutoff(0.0))
        );
        assert!(matches!(
            KdTreeBuilder.build(&system, f64::NAN),
            Err(NeighborError::InvalidCutoff(_))
        ));
    }

    #[test]
    fn rejects_non_finite_positions() {
        let mut system = setup_cubic_system(2, 1.0);
        system.set_position(3, Point3::new(f64::INFINITY, 0.0, 0.0));
        assert_eq!(
            KdTreeBuilder.build(&system, 1.5),
            Err(NeighborError::NonFinitePosition { atom: 3 })
        );
    }
}
