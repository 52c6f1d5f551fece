use super::{Workspace, site_gradient};
use crate::core::potentials::SitePotential;
use crate::engine::context::EvalContext;
use crate::engine::error::EngineError;
use crate::engine::executor::try_map_reduce;
use nalgebra::Matrix3;
use tracing::instrument;

/// `V = -Σ_i Σ_j g_ij ⊗ R_ij`, with the gradient along rows and the displacement along
/// columns.
#[instrument(skip_all, name = "virial_task", fields(model = model.name(), atoms = ctx.domain.len()))]
pub fn generic(ctx: &EvalContext, model: &dyn SitePotential) -> Result<Matrix3<f64>, EngineError> {
    let query = ctx.neighbor_query(model)?;
    let cutoff = ctx.model_cutoff(model);

    try_map_reduce(
        ctx.executor,
        ctx.domain,
        Workspace::default,
        |workspace, &i| -> Result<Matrix3<f64>, EngineError> {
            site_gradient(&query, model, cutoff, i, workspace)?;
            Ok(workspace
                .gradient
                .iter()
                .zip(workspace.env.displacements())
                .fold(Matrix3::zeros(), |acc, (g, r)| acc - g * r.transpose()))
        },
        Matrix3::zeros,
        |a, b| a + b,
    )
}
