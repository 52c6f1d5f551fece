use super::config::Executor;
use super::error::EngineError;
use super::units::UnitScaler;
use crate::core::models::system::SystemView;
use crate::core::neighbors::{NeighborError, NeighborQuery};
use crate::core::potentials::SitePotential;

/// Everything a task needs for one observable call. Shared read-only by every worker.
#[derive(Clone, Copy)]
pub(crate) struct EvalContext<'a> {
    pub system: &'a dyn SystemView,
    pub domain: &'a [usize],
    pub neighbors: Option<NeighborQuery<'a>>,
    pub executor: &'a Executor,
    pub ntasks: usize,
    pub units: &'a UnitScaler,
}

impl<'a> EvalContext<'a> {
    pub fn neighbor_query(&self, model: &dyn SitePotential) -> Result<NeighborQuery<'a>, EngineError> {
        self.neighbors
            .ok_or_else(|| EngineError::MissingNeighborList {
                cutoff: self.units.neighbor_cutoff(model.cutoff()),
                source: NeighborError::NotBuilt,
            })
    }

    /// The model's cutoff in its own length unit, used to trim each environment.
    pub fn model_cutoff(&self, model: &dyn SitePotential) -> f64 {
        self.units.model_cutoff(model.cutoff())
    }
}
