pub mod energy;
pub mod forces;
pub mod site_energies;
pub mod virial;

use super::error::EngineError;
use crate::core::neighbors::{LocalEnvironment, NeighborQuery};
use crate::core::potentials::{EvaluationError, OneBody, SitePotential};
use crate::core::models::system::SystemView;
use nalgebra::Vector3;

/// Scratch buffers owned by one worker and reused for every center it visits.
#[derive(Debug, Default)]
pub(crate) struct Workspace {
    pub env: LocalEnvironment,
    pub gradient: Vec<Vector3<f64>>,
}

fn evaluation_error(atom: usize, model: &str) -> impl FnOnce(EvaluationError) -> EngineError + '_ {
    move |source| EngineError::Evaluation {
        atom,
        model: model.to_string(),
        source,
    }
}

pub(crate) fn site_energy(
    query: &NeighborQuery,
    model: &dyn SitePotential,
    cutoff: f64,
    i: usize,
    workspace: &mut Workspace,
) -> Result<f64, EngineError> {
    query.environment(i, cutoff, &mut workspace.env);
    model
        .evaluate(&workspace.env, query.species(i))
        .map_err(evaluation_error(i, model.name()))
}

/// Evaluates center `i` and leaves `∂E_i/∂R_j` for its environment in `workspace.gradient`.
pub(crate) fn site_gradient(
    query: &NeighborQuery,
    model: &dyn SitePotential,
    cutoff: f64,
    i: usize,
    workspace: &mut Workspace,
) -> Result<f64, EngineError> {
    query.environment(i, cutoff, &mut workspace.env);
    let energy = model
        .evaluate_with_gradient(&workspace.env, query.species(i), &mut workspace.gradient)
        .map_err(evaluation_error(i, model.name()))?;
    if workspace.gradient.len() != workspace.env.len() {
        return Err(evaluation_error(i, model.name())(EvaluationError::GradientLength {
            expected: workspace.env.len(),
            found: workspace.gradient.len(),
        }));
    }
    Ok(energy)
}

pub(crate) fn one_body_energy(
    system: &dyn SystemView,
    model: &OneBody,
    i: usize,
) -> Result<f64, EngineError> {
    model
        .energy(system.species(i))
        .map_err(evaluation_error(i, model.name()))
}
