//! # atomsum Core Library
//!
//! Aggregates per-atom interatomic potential evaluations into system-level observables:
//! total energy, per-atom energies, forces and the virial, for a single model or for a
//! weighted ensemble of heterogeneous models.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomicSystem`, `Species`),
//!   the unit system, the neighbor list adapter and the potential models themselves
//!   (`Potential`, `SitePotential`, `OneBody`, `Ensemble`).
//!
//! - **[`engine`]: The Accumulation Core.** Resolves units, partitions the requested
//!   domain, dispatches each observable to the right reduction strategy and fans
//!   ensembles out across concurrent tasks. Force scatter-writes are kept race-free by
//!   giving every chunk its own accumulator, so no locks are involved anywhere.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together: one call per
//!   observable, plus a combined call that shares a single neighbor list.

pub mod core;
pub mod engine;
pub mod workflows;
