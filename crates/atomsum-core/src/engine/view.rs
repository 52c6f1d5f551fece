use super::context::EvalContext;
use super::ensemble;
use super::error::EngineError;
use super::observables::Observable;
use crate::core::potentials::Potential;

/// Computes observable `O` for any potential variant, in the model's raw units.
pub(crate) fn compute<O: Observable>(
    ctx: &EvalContext,
    potential: &Potential,
) -> Result<O::Raw, EngineError> {
    match potential {
        Potential::Generic(model) => O::generic(ctx, model.as_ref()),
        Potential::OneBody(model) => O::one_body(ctx, model),
        Potential::Ensemble(group) => ensemble::combine::<O>(ctx, group),
    }
}

/// Fails if any generic model in the tree cannot provide what `O` needs.
pub(crate) fn check_support<O: Observable>(potential: &Potential) -> Result<(), EngineError> {
    match potential {
        Potential::Generic(model) if O::NEEDS_GRADIENT && !model.has_gradient() => {
            Err(EngineError::UnsupportedObservable {
                observable: O::NAME,
                model: model.name().to_string(),
            })
        }
        Potential::Generic(_) | Potential::OneBody(_) => Ok(()),
        Potential::Ensemble(ensemble) => ensemble
            .members()
            .iter()
            .try_for_each(|member| check_support::<O>(&member.potential)),
    }
}
