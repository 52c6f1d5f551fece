use super::context::EvalContext;
use super::error::EngineError;
use super::executor::fan_out;
use super::observables::Observable;
use super::view;
use crate::core::potentials::Ensemble;
use tracing::{debug, instrument};

/// Evaluates every member concurrently, one task each, then sums the results in member
/// order, scaled by their weights.
///
/// All members run to completion before anything is combined. If any failed, the error
/// of the first failing member is returned and nothing is aggregated.
#[instrument(skip_all, name = "ensemble_task", fields(ensemble = ensemble.name(), members = ensemble.len()))]
pub(crate) fn combine<O: Observable>(
    ctx: &EvalContext,
    ensemble: &Ensemble,
) -> Result<O::Raw, EngineError> {
    let members = ensemble.members();
    let results = fan_out(ctx.executor, members.len(), |k| {
        view::compute::<O>(ctx, &members[k].potential)
    });

    let mut total = O::identity(ctx);
    for (member, result) in members.iter().zip(results) {
        O::accumulate(&mut total, result?, member.weight);
    }
    debug!(observable = O::NAME, "Ensemble members combined.");
    Ok(total)
}
