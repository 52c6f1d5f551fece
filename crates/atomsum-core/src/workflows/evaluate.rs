use crate::core::models::system::SystemView;
use crate::core::neighbors::{NeighborList, NeighborQuery};
use crate::core::potentials::Potential;
use crate::engine::config::{ComputeConfig, ConfigError};
use crate::engine::context::EvalContext;
use crate::engine::error::EngineError;
use crate::engine::observables::{Energy, Forces, Observable, SiteEnergies, Virial};
use crate::engine::units::UnitScaler;
use crate::engine::view;
use std::borrow::Cow;
use tracing::{debug, info, instrument, warn};

/// All four observables from one neighbor list build.
#[derive(Debug, Clone, PartialEq)]
pub struct Observables {
    pub energy: Energy,
    pub site_energies: SiteEnergies,
    pub forces: Forces,
    pub virial: Virial,
}

#[instrument(skip_all, name = "energy_workflow")]
pub fn energy(
    potential: &Potential,
    system: &dyn SystemView,
    config: &ComputeConfig,
) -> Result<Energy, EngineError> {
    run::<Energy>(potential, system, config)
}

#[instrument(skip_all, name = "site_energies_workflow")]
pub fn site_energies(
    potential: &Potential,
    system: &dyn SystemView,
    config: &ComputeConfig,
) -> Result<SiteEnergies, EngineError> {
    run::<SiteEnergies>(potential, system, config)
}

#[instrument(skip_all, name = "forces_workflow")]
pub fn forces(
    potential: &Potential,
    system: &dyn SystemView,
    config: &ComputeConfig,
) -> Result<Forces, EngineError> {
    run::<Forces>(potential, system, config)
}

#[instrument(skip_all, name = "virial_workflow")]
pub fn virial(
    potential: &Potential,
    system: &dyn SystemView,
    config: &ComputeConfig,
) -> Result<Virial, EngineError> {
    run::<Virial>(potential, system, config)
}

#[instrument(skip_all, name = "evaluate_all_workflow")]
pub fn evaluate_all(
    potential: &Potential,
    system: &dyn SystemView,
    config: &ComputeConfig,
) -> Result<Observables, EngineError> {
    view::check_support::<Forces>(potential)?;
    let evaluation = Evaluation::prepare(potential, system, config)?;
    Ok(Observables {
        energy: evaluation.evaluate()?,
        site_energies: evaluation.evaluate()?,
        forces: evaluation.evaluate()?,
        virial: evaluation.evaluate()?,
    })
}

fn run<O: Observable>(
    potential: &Potential,
    system: &dyn SystemView,
    config: &ComputeConfig,
) -> Result<O, EngineError> {
    view::check_support::<O>(potential)?;
    Evaluation::prepare(potential, system, config)?.evaluate()
}

/// Per-call state resolved before any observable is computed.
struct Evaluation<'a> {
    potential: &'a Potential,
    system: &'a dyn SystemView,
    config: &'a ComputeConfig,
    domain: Cow<'a, [usize]>,
    units: UnitScaler,
    ntasks: usize,
    neighbors: Option<NeighborList>,
}

impl<'a> Evaluation<'a> {
    fn prepare(
        potential: &'a Potential,
        system: &'a dyn SystemView,
        config: &'a ComputeConfig,
    ) -> Result<Self, EngineError> {
        let units = UnitScaler::resolve(potential, config, system.length_unit())?;
        let domain = config.domain.resolve(system.len())?;
        let ntasks = config.resolved_ntasks();
        if ntasks == 0 {
            return Err(ConfigError::ZeroTasks.into());
        }

        info!(
            potential = potential.name(),
            atoms = system.len(),
            domain = domain.len(),
            ntasks,
            units = %units.output_units(),
            "Preparing evaluation."
        );

        let neighbors = match potential.max_cutoff() {
            Some(cutoff) if !domain.is_empty() => {
                let cutoff = units.neighbor_cutoff(cutoff);
                let list = config
                    .executor
                    .install(|| config.neighbor_builder.build(system, cutoff))
                    .map_err(|source| EngineError::MissingNeighborList { cutoff, source })?;
                debug!(cutoff, entries = list.entry_count(), "Shared neighbor list ready.");
                Some(list)
            }
            _ => None,
        };

        Ok(Self {
            potential,
            system,
            config,
            domain,
            units,
            ntasks,
            neighbors,
        })
    }

    fn context(&self) -> Result<EvalContext<'_>, EngineError> {
        let neighbors = self
            .neighbors
            .as_ref()
            .map(|list| {
                NeighborQuery::new(list, self.system, self.units.length_scale()).map_err(|source| {
                    EngineError::MissingNeighborList {
                        cutoff: list.cutoff(),
                        source,
                    }
                })
            })
            .transpose()?;

        Ok(EvalContext {
            system: self.system,
            domain: &self.domain,
            neighbors,
            executor: &self.config.executor,
            ntasks: self.ntasks,
            units: &self.units,
        })
    }

    fn evaluate<O: Observable>(&self) -> Result<O, EngineError> {
        let ctx = self.context()?;
        if ctx.domain.is_empty() {
            warn!(observable = O::NAME, "Empty domain, returning a zero result.");
            return Ok(O::finish(O::identity(&ctx), &ctx));
        }

        let raw = view::compute::<O>(&ctx, self.potential)?;
        info!(observable = O::NAME, "Observable computed.");
        Ok(O::finish(raw, &ctx))
    }
}
