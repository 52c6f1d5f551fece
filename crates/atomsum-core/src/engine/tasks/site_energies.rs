use super::{Workspace, one_body_energy, site_energy};
use crate::core::potentials::{OneBody, SitePotential};
use crate::engine::context::EvalContext;
use crate::engine::error::EngineError;
use crate::engine::executor::try_map_collect;
use tracing::instrument;

/// Site energies in domain order.
#[instrument(skip_all, name = "site_energies_task", fields(model = model.name(), atoms = ctx.domain.len()))]
pub fn generic(ctx: &EvalContext, model: &dyn SitePotential) -> Result<Vec<f64>, EngineError> {
    let query = ctx.neighbor_query(model)?;
    let cutoff = ctx.model_cutoff(model);

    try_map_collect(ctx.executor, ctx.domain, Workspace::default, |workspace, &i| {
        site_energy(&query, model, cutoff, i, workspace)
    })
}

pub fn one_body(ctx: &EvalContext, model: &OneBody) -> Result<Vec<f64>, EngineError> {
    ctx.domain
        .iter()
        .map(|&i| one_body_energy(ctx.system, model, i))
        .collect()
}
