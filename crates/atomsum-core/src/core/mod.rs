//! # Core Module
//!
//! The fundamental building blocks shared by the accumulation engine.
//!
//! - **Atomic Systems** ([`models`]) - Species and the read-only [`models::system::SystemView`]
//!   capability interface, with an owned [`models::system::AtomicSystem`] implementation
//! - **Units** ([`units`]) - Energy and length units with exact conversion factors
//! - **Neighbor Lists** ([`neighbors`]) - Builder trait, compressed neighbor storage and
//!   per-atom local environments
//! - **Potentials** ([`potentials`]) - The tagged union over generic, one-body and
//!   ensemble models, plus reference pair and many-body models

pub mod models;
pub mod neighbors;
pub mod potentials;
pub mod units;
