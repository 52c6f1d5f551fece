//! # Neighbor Lists
//!
//! Read-only adapter between an externally built neighbor list and the per-atom local
//! environments consumed by potential models.
//!
//! - [`NeighborListBuilder`] - the construction seam; any search algorithm can be plugged in
//! - [`list::NeighborList`] - compressed per-atom neighbor storage, built once per call and
//!   shared read-only by every worker
//! - [`list::NeighborQuery`] - produces a fresh [`list::LocalEnvironment`] for one center atom,
//!   already expressed in the model's length unit and trimmed to the model's cutoff
//! - [`kdtree::KdTreeBuilder`] - default builder for open-boundary systems

pub mod kdtree;
pub mod list;

pub use kdtree::KdTreeBuilder;
pub use list::{LocalEnvironment, NeighborList, NeighborQuery};

use crate::core::models::system::SystemView;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NeighborError {
    #[error("Cutoff radius must be positive and finite, got {0}")]
    InvalidCutoff(f64),
    #[error("Atom {atom} has a non-finite position")]
    NonFinitePosition { atom: usize },
    #[error("Neighbor list covers {found} atoms but the system has {expected}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("Atom {atom} lists neighbor {neighbor}, which is outside the system")]
    IndexOutOfRange { atom: usize, neighbor: usize },
    #[error("No neighbor list was built for this evaluation")]
    NotBuilt,
}

/// Constructs a [`NeighborList`] for a system and a cutoff radius.
///
/// The cutoff is expressed in the system's length unit. Implementations must list every
/// pair closer than the cutoff; listing a few extra pairs is harmless because
/// [`NeighborQuery`] trims each environment to the model's own cutoff.
pub trait NeighborListBuilder: Send + Sync + fmt::Debug {
    fn build(&self, system: &dyn SystemView, cutoff: f64) -> Result<NeighborList, NeighborError>;
}

pub(crate) fn validate_cutoff(cutoff: f64) -> Result<(), NeighborError> {
    if cutoff.is_finite() && cutoff > 0.0 {
        Ok(())
    } else {
        Err(NeighborError::InvalidCutoff(cutoff))
    }
}
