//! # Core Models Module
//!
//! Data structures describing the atomistic system an observable is requested for.
//!
//! - [`species`] - Chemical species identified by atomic number
//! - [`system`] - The [`system::SystemView`] trait consumed by the engine and the owned
//!   [`system::AtomicSystem`] that implements it
//!
//! ```ignore
//! use atomsum::core::models::{species::Species, system::AtomicSystem};
//! use atomsum::core::units::LengthUnit;
//!
//! let mut system = AtomicSystem::new(LengthUnit::Angstrom);
//! system.add_atom(Species::new(18), Point3::new(0.0, 0.0, 0.0));
//! system.add_atom(Species::new(18), Point3::new(3.8, 0.0, 0.0));
//! ```

pub mod species;
pub mod system;
