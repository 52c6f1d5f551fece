//! # Workflows Module
//!
//! Top-level entry points of the library.
//!
//! A workflow takes a [`crate::core::potentials::Potential`], a
//! [`crate::core::models::system::SystemView`] and a
//! [`crate::engine::config::ComputeConfig`], and returns observables tagged with their
//! units. Unit resolution, domain validation and the single neighbor list build happen
//! here, once per call.
//!
//! - **Evaluation** ([`evaluate`]) - one function per observable, plus
//!   [`evaluate::evaluate_all`] which shares one neighbor list across all four

pub mod evaluate;
