use super::{Workspace, site_gradient};
use crate::core::neighbors::NeighborQuery;
use crate::core::potentials::SitePotential;
use crate::engine::context::EvalContext;
use crate::engine::error::EngineError;
use crate::engine::executor::try_map_collect;
use crate::engine::partition;
use nalgebra::Vector3;
use tracing::{debug, instrument};

/// Forces from the site energies of every center in the domain.
///
/// The domain is cut into `ctx.ntasks` chunks. Each chunk scatters into its own
/// full-length buffer, and the buffers are summed in chunk order once all of them are
/// done, so the result is reproducible for a fixed task count.
#[instrument(skip_all, name = "forces_task", fields(model = model.name(), atoms = ctx.domain.len(), ntasks = ctx.ntasks))]
pub fn generic(ctx: &EvalContext, model: &dyn SitePotential) -> Result<Vec<Vector3<f64>>, EngineError> {
    let query = ctx.neighbor_query(model)?;
    let cutoff = ctx.model_cutoff(model);
    let n_atoms = ctx.system.len();
    let chunks = partition::chunks(ctx.domain, ctx.ntasks);

    let buffers = try_map_collect(ctx.executor, &chunks, Workspace::default, |workspace, chunk| {
        scatter_chunk(&query, model, cutoff, chunk, n_atoms, workspace)
    })?;
    debug!(buffers = buffers.len(), "Reducing chunk force buffers.");

    Ok(buffers
        .into_iter()
        .reduce(|mut total, buffer| {
            total
                .iter_mut()
                .zip(&buffer)
                .for_each(|(t, f)| *t += f);
            total
        })
        .unwrap_or_else(|| vec![Vector3::zeros(); n_atoms]))
}

/// `F[j] -= ∂E_i/∂R_j` for each neighbor and `F[i] += Σ_j ∂E_i/∂R_j`, since every
/// `R_j = x_j - x_i` moves against the center.
fn scatter_chunk(
    query: &NeighborQuery,
    model: &dyn SitePotential,
    cutoff: f64,
    chunk: &[usize],
    n_atoms: usize,
    workspace: &mut Workspace,
) -> Result<Vec<Vector3<f64>>, EngineError> {
    let mut forces = vec![Vector3::zeros(); n_atoms];
    for &i in chunk {
        site_gradient(query, model, cutoff, i, workspace)?;
        let mut reaction = Vector3::zeros();
        for (&j, g) in workspace.env.indices().iter().zip(&workspace.gradient) {
            forces[j] -= g;
            reaction += g;
        }
        forces[i] += reaction;
    }
    Ok(forces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::species::Species;
    use crate::core::models::system::AtomicSystem;
    use crate::core::neighbors::NeighborList;
    use crate::core::potentials::LennardJones;
    use crate::core::units::LengthUnit;
    use crate::engine::config::{ComputeConfig, Executor};
    use crate::engine::units::UnitScaler;
    use crate::core::potentials::Potential;
    use nalgebra::Point3;

    fn setup_dimer(separation: f64) -> (AtomicSystem, NeighborList) {
        let mut system = AtomicSystem::new(LengthUnit::Angstrom);
        system.add_atom(Species::new(18), Point3::origin());
        system.add_atom(Species::new(18), Point3::new(separation, 0.0, 0.0));
        let list = NeighborList::from_adjacency(vec![vec![1], vec![0]], 5.0);
        (system, list)
    }

    fn run(
        system: &AtomicSystem,
        list: &NeighborList,
        model: &LennardJones,
        domain: &[usize],
        ntasks: usize,
    ) -> Vec<Vector3<f64>> {
        let units = UnitScaler::resolve(
            &Potential::generic(model.clone()),
            &ComputeConfig::default(),
            LengthUnit::Angstrom,
        )
        .unwrap();
        let ctx = EvalContext {
            system,
            domain,
            neighbors: Some(NeighborQuery::new(list, system, 1.0).unwrap()),
            executor: &Executor::Global,
            ntasks,
            units: &units,
        };
        generic(&ctx, model).unwrap()
    }

    #[test]
    fn dimer_forces_are_equal_and_opposite() {
        let (system, list) = setup_dimer(2.4);
        let model = LennardJones::new(2.0, 1.0, 5.0);
        let forces = run(&system, &list, &model, &[0, 1], 2);
        assert!((forces[0] + forces[1]).norm() < 1e-12);
        // Beyond the minimum the pair attracts: atom 0 is pulled towards +x.
        assert!(forces[0].x > 0.0);
        assert_eq!(forces[0].y, 0.0);
    }

    #[test]
    fn single_center_leaves_reaction_on_its_neighbor() {
        let (system, list) = setup_dimer(2.4);
        let model = LennardJones::new(2.0, 1.0, 5.0);
        let half = run(&system, &list, &model, &[0], 1);
        let full = run(&system, &list, &model, &[0, 1], 1);
        assert!((half[0] * 2.0 - full[0]).norm() < 1e-12);
        assert!((half[0] + half[1]).norm() < 1e-12);
    }

    #[test]
    fn more_tasks_than_atoms_gives_same_result() {
        let (system, list) = setup_dimer(1.9);
        let model = LennardJones::new(2.0, 1.0, 5.0);
        let one = run(&system, &list, &model, &[0, 1], 1);
        let many = run(&system, &list, &model, &[0, 1], 7);
        for (a, b) in one.iter().zip(&many) {
            assert!((a - b).norm() < 1e-12);
        }
    }
}
