use super::NeighborError;
use crate::core::models::species::Species;
use crate::core::models::system::SystemView;
use nalgebra::Vector3;

/// Neighbor indices of every atom in compressed row storage.
///
/// Each entry also carries an image shift (in the system's length unit) that is added to
/// the raw position difference, so builders for periodic systems can encode which image
/// of a neighbor is meant. Open-boundary builders leave every shift at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborList {
    offsets: Vec<usize>,
    indices: Vec<usize>,
    shifts: Vec<Vector3<f64>>,
    cutoff: f64,
}

impl NeighborList {
    /// Builds a list from per-atom neighbor indices with zero image shifts.
    pub fn from_adjacency(adjacency: Vec<Vec<usize>>, cutoff: f64) -> Self {
        let entries = adjacency
            .into_iter()
            .map(|js| js.into_iter().map(|j| (j, Vector3::zeros())).collect())
            .collect();
        Self::from_entries(entries, cutoff)
    }

    /// Builds a list from per-atom `(neighbor, image shift)` entries.
    pub fn from_entries(entries: Vec<Vec<(usize, Vector3<f64>)>>, cutoff: f64) -> Self {
        let total = entries.iter().map(Vec::len).sum();
        let mut offsets = Vec::with_capacity(entries.len() + 1);
        let mut indices = Vec::with_capacity(total);
        let mut shifts = Vec::with_capacity(total);
        offsets.push(0);
        for row in entries {
            for (j, shift) in row {
                indices.push(j);
                shifts.push(shift);
            }
            offsets.push(indices.len());
        }
        Self {
            offsets,
            indices,
            shifts,
            cutoff,
        }
    }

    /// Number of center atoms covered by the list.
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cutoff the list was built with, in the system's length unit.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Total number of directed `(i, j)` entries.
    pub fn entry_count(&self) -> usize {
        self.indices.len()
    }

    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.indices[self.offsets[i]..self.offsets[i + 1]]
    }

    pub fn shifts(&self, i: usize) -> &[Vector3<f64>] {
        &self.shifts[self.offsets[i]..self.offsets[i + 1]]
    }
}

/// Local environment of one center atom: neighbor indices `J`, displacement vectors `R`
/// (`R_j = x_j - x_i`) and neighbor species `Z`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalEnvironment {
    indices: Vec<usize>,
    displacements: Vec<Vector3<f64>>,
    species: Vec<Species>,
}

impl LocalEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        indices: Vec<usize>,
        displacements: Vec<Vector3<f64>>,
        species: Vec<Species>,
    ) -> Option<Self> {
        (indices.len() == displacements.len() && indices.len() == species.len()).then_some(Self {
            indices,
            displacements,
            species,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn displacements(&self) -> &[Vector3<f64>] {
        &self.displacements
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Vector3<f64>, Species)> {
        self.indices
            .iter()
            .zip(&self.displacements)
            .zip(&self.species)
            .map(|((&j, r), &z)| (j, r, z))
    }

    pub(crate) fn clear(&mut self) {
        self.indices.clear();
        self.displacements.clear();
        self.species.clear();
    }

    pub(crate) fn push(&mut self, j: usize, displacement: Vector3<f64>, species: Species) {
        self.indices.push(j);
        self.displacements.push(displacement);
        self.species.push(species);
    }
}

/// Read-only query over a shared [`NeighborList`].
///
/// `length_scale` converts system lengths into the model's length unit.
#[derive(Clone, Copy)]
pub struct NeighborQuery<'a> {
    list: &'a NeighborList,
    system: &'a dyn SystemView,
    length_scale: f64,
}

impl<'a> NeighborQuery<'a> {
    pub fn new(
        list: &'a NeighborList,
        system: &'a dyn SystemView,
        length_scale: f64,
    ) -> Result<Self, NeighborError> {
        if list.len() != system.len() {
            return Err(NeighborError::SizeMismatch {
                expected: system.len(),
                found: list.len(),
            });
        }
        for atom in 0..list.len() {
            if let Some(&neighbor) = list.neighbors(atom).iter().find(|&&j| j >= system.len()) {
                return Err(NeighborError::IndexOutOfRange { atom, neighbor });
            }
        }
        Ok(Self {
            list,
            system,
            length_scale,
        })
    }

    pub fn species(&self, i: usize) -> Species {
        self.system.species(i)
    }

    /// Fills `env` with the neighbors of `i` that lie within `cutoff` (model length unit).
    ///
    /// The buffer is cleared first, so one allocation can serve a whole task.
    pub fn environment(&self, i: usize, cutoff: f64, env: &mut LocalEnvironment) {
        env.clear();
        let center = self.system.position(i);
        let cutoff_sq = cutoff * cutoff;
        for (&j, shift) in self.list.neighbors(i).iter().zip(self.list.shifts(i)) {
            let mut r = self.system.position(j) - center + shift;
            if self.length_scale != 1.0 {
                r *= self.length_scale;
            }
            if r.norm_squared() <= cutoff_sq {
                env.push(j, r, self.system.species(j));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::system::AtomicSystem;
    use crate::core::units::LengthUnit;
    use nalgebra::Point3;

    fn setup_line_system() -> (AtomicSystem, NeighborList) {
        let mut system = AtomicSystem::new(LengthUnit::Angstrom);
        system.add_atom(Species::new(18), Point3::new(0.0, 0.0, 0.0));
        system.add_atom(Species::new(18), Point3::new(1.0, 0.0, 0.0));
        system.add_atom(Species::new(36), Point3::new(3.0, 0.0, 0.0));
        let list = NeighborList::from_adjacency(vec![vec![1, 2], vec![0, 2], vec![0, 1]], 5.0);
        (system, list)
    }

    #[test]
    fn from_adjacency_builds_compressed_rows() {
        let (_, list) = setup_line_system();
        assert_eq!(list.len(), 3);
        assert_eq!(list.entry_count(), 6);
        assert_eq!(list.neighbors(1), &[0, 2]);
        assert!(list.shifts(2).iter().all(|s| *s == Vector3::zeros()));
    }

    #[test]
    fn environment_contains_displacements_and_species() {
        let (system, list) = setup_line_system();
        let query = NeighborQuery::new(&list, &system, 1.0).unwrap();
        let mut env = LocalEnvironment::new();
        query.environment(0, 5.0, &mut env);

        assert_eq!(env.indices(), &[1, 2]);
        assert_eq!(env.displacements()[0], Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(env.displacements()[1], Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(env.species(), &[Species::new(18), Species::new(36)]);
    }

    #[test]
    fn environment_is_trimmed_to_model_cutoff() {
        let (system, list) = setup_line_system();
        let query = NeighborQuery::new(&list, &system, 1.0).unwrap();
        let mut env = LocalEnvironment::new();
        query.environment(0, 2.0, &mut env);
        assert_eq!(env.indices(), &[1]);
    }

    #[test]
    fn environment_buffer_is_cleared_between_queries() {
        let (system, list) = setup_line_system();
        let query = NeighborQuery::new(&list, &system, 1.0).unwrap();
        let mut env = LocalEnvironment::new();
        query.environment(0, 5.0, &mut env);
        query.environment(2, 2.5, &mut env);
        assert_eq!(env.indices(), &[1]);
        assert_eq!(env.displacements()[0], Vector3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn length_scale_converts_displacements_and_applies_before_trimming() {
        let (system, list) = setup_line_system();
        let query = NeighborQuery::new(&list, &system, 0.1).unwrap();
        let mut env = LocalEnvironment::new();
        query.environment(0, 0.2, &mut env);
        assert_eq!(env.indices(), &[1]);
        assert!((env.displacements()[0].x - 0.1).abs() < 1e-15);
    }

    #[test]
    fn image_shifts_are_added_to_displacements() {
        let (system, _) = setup_line_system();
        let list = NeighborList::from_entries(
            vec![
                vec![(1, Vector3::new(-10.0, 0.0, 0.0))],
                vec![],
                vec![],
            ],
            20.0,
        );
        let query = NeighborQuery::new(&list, &system, 1.0).unwrap();
        let mut env = LocalEnvironment::new();
        query.environment(0, 20.0, &mut env);
        assert_eq!(env.displacements()[0], Vector3::new(-9.0, 0.0, 0.0));
    }

    #[test]
    fn query_rejects_list_of_wrong_size() {
        let (system, _) = setup_line_system();
        let list = NeighborList::from_adjacency(vec![vec![]], 1.0);
        let result = NeighborQuery::new(&list, &system, 1.0);
        assert!(matches!(
            result,
            Err(NeighborError::SizeMismatch {
                expected: 3,
                found: 1
            })
        ));
    }

    #[test]
    fn query_rejects_neighbor_index_outside_system() {
        let (system, _) = setup_line_system();
        let list = NeighborList::from_adjacency(vec![vec![1], vec![0, 7], vec![]], 5.0);
        let result = NeighborQuery::new(&list, &system, 1.0);
        assert_eq!(
            result.err(),
            Some(NeighborError::IndexOutOfRange {
                atom: 1,
                neighbor: 7
            })
        );
    }

    #[test]
    fn from_parts_rejects_ragged_environment() {
        let env = LocalEnvironment::from_parts(vec![1], vec![], vec![Species::new(1)]);
        assert!(env.is_none());
    }
}
