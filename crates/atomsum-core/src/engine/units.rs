use super::config::ComputeConfig;
use super::error::EngineError;
use crate::core::potentials::Potential;
use crate::core::units::{ForceUnit, LengthUnit, UnitSystem};
use nalgebra::{Matrix3, Vector3};

/// Unit bookkeeping for one call.
///
/// Models produce raw numbers in their declared units; positions come in the system's
/// length unit; results leave in the output units. Conversion factors are applied once,
/// at the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScaler {
    model: UnitSystem,
    output: UnitSystem,
    cutoff_unit: LengthUnit,
    system_length: LengthUnit,
}

impl UnitScaler {
    /// Resolves units with precedence: call override, then the potential's declaration,
    /// then eV and Å.
    pub fn resolve(
        potential: &Potential,
        config: &ComputeConfig,
        system_length: LengthUnit,
    ) -> Result<Self, EngineError> {
        let model = declared_tree_units(potential)?.unwrap_or_default();
        let output = UnitSystem::new(
            config.energy_unit.unwrap_or(model.energy),
            config.length_unit.unwrap_or(model.length),
        );
        Ok(Self {
            model,
            output,
            cutoff_unit: config.cutoff_unit.unwrap_or(model.length),
            system_length,
        })
    }

    pub fn model_units(&self) -> UnitSystem {
        self.model
    }

    pub fn output_units(&self) -> UnitSystem {
        self.output
    }

    pub fn force_unit(&self) -> ForceUnit {
        ForceUnit::from(self.output)
    }

    /// Factor taking system lengths into the model's length unit.
    pub fn length_scale(&self) -> f64 {
        self.system_length.factor_to(self.model.length)
    }

    /// A model cutoff expressed in the model's length unit.
    pub fn model_cutoff(&self, cutoff: f64) -> f64 {
        cutoff * self.cutoff_unit.factor_to(self.model.length)
    }

    /// A model cutoff expressed in the system's length unit, as handed to the neighbor
    /// list builder.
    pub fn neighbor_cutoff(&self, cutoff: f64) -> f64 {
        cutoff * self.cutoff_unit.factor_to(self.system_length)
    }

    pub fn energy_factor(&self) -> f64 {
        self.model.energy.factor_to(self.output.energy)
    }

    pub fn force_factor(&self) -> f64 {
        let length = self.model.length.factor_to(self.output.length);
        if length == 1.0 {
            self.energy_factor()
        } else {
            self.energy_factor() / length
        }
    }

    pub fn scale_energy(&self, value: f64) -> f64 {
        scale(value, self.energy_factor())
    }

    pub fn scale_forces(&self, values: &mut [Vector3<f64>]) {
        let factor = self.force_factor();
        if factor != 1.0 {
            values.iter_mut().for_each(|f| *f *= factor);
        }
    }

    pub fn scale_virial(&self, value: Matrix3<f64>) -> Matrix3<f64> {
        let factor = self.energy_factor();
        if factor == 1.0 { value } else { value * factor }
    }
}

#[inline]
fn scale(value: f64, factor: f64) -> f64 {
    if factor == 1.0 { value } else { value * factor }
}

/// The single unit system declared across the potential tree, if any node declares one.
///
/// Undeclared nodes inherit; two different declarations anywhere in the tree are a
/// mismatch.
fn declared_tree_units(potential: &Potential) -> Result<Option<UnitSystem>, EngineError> {
    let mut resolved = None;
    collect_declared(potential, &mut resolved)?;
    Ok(resolved)
}

fn collect_declared(
    potential: &Potential,
    resolved: &mut Option<UnitSystem>,
) -> Result<(), EngineError> {
    if let Some(found) = potential.declared_units() {
        match *resolved {
            Some(expected) if expected != found => {
                return Err(EngineError::UnitMismatch { expected, found });
            }
            Some(_) => {}
            None => *resolved = Some(found),
        }
    }
    if let Potential::Ensemble(ensemble) = potential {
        for member in ensemble.members() {
            collect_declared(&member.potential, resolved)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::potentials::{Ensemble, LennardJones, OneBody};
    use crate::core::units::EnergyUnit;
    use crate::engine::config::ComputeConfigBuilder;
    use std::collections::HashMap;

    fn lj(units: Option<UnitSystem>) -> Potential {
        let model = LennardJones::new(1.0, 0.1, 3.0);
        Potential::generic(match units {
            Some(units) => model.with_units(units),
            None => model,
        })
    }

    fn kcal_angstrom() -> UnitSystem {
        UnitSystem::new(EnergyUnit::KcalPerMol, LengthUnit::Angstrom)
    }

    #[test]
    fn defaults_to_electronvolt_and_angstrom() {
        let scaler =
            UnitScaler::resolve(&lj(None), &ComputeConfig::default(), LengthUnit::Angstrom).unwrap();
        assert_eq!(scaler.model_units(), UnitSystem::default());
        assert_eq!(scaler.output_units(), UnitSystem::default());
        assert_eq!(scaler.energy_factor(), 1.0);
        assert_eq!(scaler.force_factor(), 1.0);
        assert_eq!(scaler.length_scale(), 1.0);
    }

    #[test]
    fn declared_units_become_output_units_without_override() {
        let scaler = UnitScaler::resolve(
            &lj(Some(kcal_angstrom())),
            &ComputeConfig::default(),
            LengthUnit::Angstrom,
        )
        .unwrap();
        assert_eq!(scaler.output_units(), kcal_angstrom());
        assert_eq!(scaler.scale_energy(2.5), 2.5);
    }

    #[test]
    fn override_converts_from_declared_units() {
        let config = ComputeConfigBuilder::new()
            .energy_unit(EnergyUnit::ElectronVolt)
            .build()
            .unwrap();
        let scaler =
            UnitScaler::resolve(&lj(Some(kcal_angstrom())), &config, LengthUnit::Angstrom).unwrap();
        assert_eq!(
            scaler.energy_factor(),
            EnergyUnit::KcalPerMol.factor_to(EnergyUnit::ElectronVolt)
        );
        assert_eq!(scaler.force_factor(), scaler.energy_factor());
    }

    #[test]
    fn length_override_divides_force_factor() {
        let config = ComputeConfigBuilder::new()
            .length_unit(LengthUnit::Nanometer)
            .build()
            .unwrap();
        let scaler = UnitScaler::resolve(&lj(None), &config, LengthUnit::Angstrom).unwrap();
        assert_eq!(scaler.energy_factor(), 1.0);
        assert!((scaler.force_factor() - 10.0).abs() < 1e-12);
        let virial = scaler.scale_virial(Matrix3::identity());
        assert_eq!(virial, Matrix3::identity());
    }

    #[test]
    fn system_length_unit_sets_length_scale_and_neighbor_cutoff() {
        let scaler =
            UnitScaler::resolve(&lj(None), &ComputeConfig::default(), LengthUnit::Nanometer)
                .unwrap();
        assert!((scaler.length_scale() - 10.0).abs() < 1e-12);
        assert!((scaler.neighbor_cutoff(3.0) - 0.3).abs() < 1e-12);
        assert_eq!(scaler.model_cutoff(3.0), 3.0);
    }

    #[test]
    fn cutoff_unit_override_converts_into_model_length() {
        let config = ComputeConfigBuilder::new()
            .cutoff_unit(LengthUnit::Nanometer)
            .build()
            .unwrap();
        let scaler = UnitScaler::resolve(&lj(None), &config, LengthUnit::Angstrom).unwrap();
        assert!((scaler.model_cutoff(0.5) - 5.0).abs() < 1e-12);
        assert!((scaler.neighbor_cutoff(0.5) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn undeclared_members_inherit_ensemble_units() {
        let ensemble = Ensemble::new(vec![
            lj(None),
            Potential::from(OneBody::new(HashMap::new())),
        ])
        .with_units(kcal_angstrom());
        let scaler = UnitScaler::resolve(
            &Potential::from(ensemble),
            &ComputeConfig::default(),
            LengthUnit::Angstrom,
        )
        .unwrap();
        assert_eq!(scaler.model_units(), kcal_angstrom());
    }

    #[test]
    fn disagreeing_member_declarations_are_a_mismatch() {
        let ensemble = Ensemble::new(vec![
            lj(Some(kcal_angstrom())),
            lj(Some(UnitSystem::default())),
        ]);
        let result = UnitScaler::resolve(
            &Potential::from(ensemble),
            &ComputeConfig::default(),
            LengthUnit::Angstrom,
        );
        assert!(matches!(result, Err(EngineError::UnitMismatch { .. })));
    }

    #[test]
    fn scale_forces_is_a_no_op_for_unit_factor() {
        let scaler =
            UnitScaler::resolve(&lj(None), &ComputeConfig::default(), LengthUnit::Angstrom).unwrap();
        let mut forces = vec![Vector3::new(0.1, 0.2, 0.3)];
        scaler.scale_forces(&mut forces);
        assert_eq!(forces[0], Vector3::new(0.1, 0.2, 0.3));
    }
}
