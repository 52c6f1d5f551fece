//! # Engine Module
//!
//! The accumulation engine: turns per-atom potential evaluations into system-level
//! observables.
//!
//! ## Overview
//!
//! Every observable request flows through the same path. Units are resolved once by
//! [`units::UnitScaler`], the requested [`config::Domain`] is expanded, and a single
//! dispatch point (`view`) routes each node of the potential tree to its reduction
//! strategy. Ensembles fan out one task per member and are summed only after all members
//! have joined.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Domain, executor, task count, unit overrides and the
//!   neighbor list builder for one call
//! - **Observables** ([`observables`]) - Result types with unit tags, and how each one is
//!   accumulated and combined
//! - **Partitioning** ([`partition`]) - Contiguous, balanced chunks of the domain for force
//!   accumulation
//! - **Units** ([`units`]) - Resolution of model, output, cutoff and system units
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Force scatter-writes never share memory: each chunk owns a full-length buffer and the
//! buffers are reduced after all chunks finish. Nothing in the engine takes a lock.

pub mod config;
pub(crate) mod context;
pub(crate) mod ensemble;
pub mod error;
pub(crate) mod executor;
pub mod observables;
pub mod partition;
pub(crate) mod tasks;
pub mod units;
pub(crate) mod view;
