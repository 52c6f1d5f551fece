use super::error::EngineError;
use crate::core::neighbors::{KdTreeBuilder, NeighborListBuilder};
use crate::core::units::{EnergyUnit, LengthUnit};
use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Task count must be at least one")]
    ZeroTasks,
}

/// The atoms an observable is requested over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Domain {
    #[default]
    All,
    Atoms(Vec<usize>),
}

impl Domain {
    /// Expands the domain into explicit atom indices, validated against `len`.
    pub fn resolve(&self, len: usize) -> Result<Cow<'_, [usize]>, EngineError> {
        match self {
            Domain::All => Ok(Cow::Owned((0..len).collect())),
            Domain::Atoms(indices) => {
                if let Some(&index) = indices.iter().find(|&&index| index >= len) {
                    return Err(EngineError::AtomOutOfRange { index, len });
                }
                Ok(Cow::Borrowed(indices))
            }
        }
    }
}

impl From<Vec<usize>> for Domain {
    fn from(indices: Vec<usize>) -> Self {
        Domain::Atoms(indices)
    }
}

/// Where per-atom and per-chunk work runs.
#[derive(Debug, Clone, Default)]
pub enum Executor {
    /// Everything runs in order on the calling thread.
    Sequential,
    /// The global rayon thread pool.
    #[default]
    Global,
    /// A dedicated rayon thread pool.
    Pool(Arc<rayon::ThreadPool>),
}

#[derive(Debug, Clone)]
pub struct ComputeConfig {
    pub domain: Domain,
    pub executor: Executor,
    pub ntasks: Option<usize>,
    pub energy_unit: Option<EnergyUnit>,
    pub length_unit: Option<LengthUnit>,
    pub cutoff_unit: Option<LengthUnit>,
    pub neighbor_builder: Arc<dyn NeighborListBuilder>,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            domain: Domain::All,
            executor: Executor::Global,
            ntasks: None,
            energy_unit: None,
            length_unit: None,
            cutoff_unit: None,
            neighbor_builder: Arc::new(KdTreeBuilder),
        }
    }
}

impl ComputeConfig {
    /// Number of force chunks for this call; defaults to the executor's thread count.
    pub fn resolved_ntasks(&self) -> usize {
        self.ntasks
            .unwrap_or_else(|| self.executor.current_num_threads())
    }
}

#[derive(Default)]
pub struct ComputeConfigBuilder {
    domain: Option<Domain>,
    executor: Option<Executor>,
    ntasks: Option<usize>,
    energy_unit: Option<EnergyUnit>,
    length_unit: Option<LengthUnit>,
    cutoff_unit: Option<LengthUnit>,
    neighbor_builder: Option<Arc<dyn NeighborListBuilder>>,
}

impl ComputeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }
    pub fn executor(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        self
    }
    pub fn ntasks(mut self, ntasks: usize) -> Self {
        self.ntasks = Some(ntasks);
        self
    }
    pub fn energy_unit(mut self, unit: EnergyUnit) -> Self {
        self.energy_unit = Some(unit);
        self
    }
    pub fn length_unit(mut self, unit: LengthUnit) -> Self {
        self.length_unit = Some(unit);
        self
    }
    pub fn cutoff_unit(mut self, unit: LengthUnit) -> Self {
        self.cutoff_unit = Some(unit);
        self
    }
    pub fn neighbor_builder(mut self, builder: Arc<dyn NeighborListBuilder>) -> Self {
        self.neighbor_builder = Some(builder);
        self
    }

    pub fn build(self) -> Result<ComputeConfig, ConfigError> {
        if self.ntasks == Some(0) {
            return Err(ConfigError::ZeroTasks);
        }
        let defaults = ComputeConfig::default();
        Ok(ComputeConfig {
            domain: self.domain.unwrap_or(defaults.domain),
            executor: self.executor.unwrap_or(defaults.executor),
            ntasks: self.ntasks,
            energy_unit: self.energy_unit,
            length_unit: self.length_unit,
            cutoff_unit: self.cutoff_unit,
            neighbor_builder: self.neighbor_builder.unwrap_or(defaults.neighbor_builder),
        })
    }
}
