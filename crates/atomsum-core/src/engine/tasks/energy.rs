use super::{Workspace, one_body_energy, site_energy};
use crate::core::potentials::{OneBody, SitePotential};
use crate::engine::context::EvalContext;
use crate::engine::error::EngineError;
use crate::engine::executor::try_map_reduce;
use tracing::instrument;

#[instrument(skip_all, name = "energy_task", fields(model = model.name(), atoms = ctx.domain.len()))]
pub fn generic(ctx: &EvalContext, model: &dyn SitePotential) -> Result<f64, EngineError> {
    let query = ctx.neighbor_query(model)?;
    let cutoff = ctx.model_cutoff(model);

    try_map_reduce(
        ctx.executor,
        ctx.domain,
        Workspace::default,
        |workspace, &i| site_energy(&query, model, cutoff, i, workspace),
        || 0.0,
        |a, b| a + b,
    )
}

#[instrument(skip_all, name = "one_body_energy_task", fields(model = model.name(), atoms = ctx.domain.len()))]
pub fn one_body(ctx: &EvalContext, model: &OneBody) -> Result<f64, EngineError> {
    ctx.domain
        .iter()
        .map(|&i| one_body_energy(ctx.system, model, i))
        .sum()
}
