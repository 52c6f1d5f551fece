//! Observable result types and the accumulation contract shared by all of them.

use super::context::EvalContext;
use super::error::EngineError;
use super::tasks;
use crate::core::potentials::{OneBody, SitePotential};
use crate::core::units::{EnergyUnit, ForceUnit};
use nalgebra::{Matrix3, Vector3};

/// One observable kind: how to compute it for each potential variant, and how to combine
/// the raw numbers of several potentials.
pub(crate) trait Observable: Sized {
    /// Accumulator in the model's raw units.
    type Raw: Send;

    const NAME: &'static str;
    const NEEDS_GRADIENT: bool;

    /// Additive identity shaped for this call.
    fn identity(ctx: &EvalContext) -> Self::Raw;

    /// `acc += weight * other`, elementwise.
    fn accumulate(acc: &mut Self::Raw, other: Self::Raw, weight: f64);

    fn generic(ctx: &EvalContext, model: &dyn SitePotential) -> Result<Self::Raw, EngineError>;

    fn one_body(ctx: &EvalContext, model: &OneBody) -> Result<Self::Raw, EngineError>;

    /// Converts into output units and attaches the unit tag.
    fn finish(raw: Self::Raw, ctx: &EvalContext) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    pub value: f64,
    pub unit: EnergyUnit,
}

/// Per-atom energies in domain order. `indices[k]` is the global index of `values[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteEnergies {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
    pub unit: EnergyUnit,
}

impl SiteEnergies {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Energies indexed by global atom index. Atoms outside the domain are `NaN`; an atom
    /// listed more than once gets the sum of its entries.
    pub fn to_dense(&self, n_atoms: usize) -> Vec<f64> {
        let mut dense = vec![f64::NAN; n_atoms];
        for (i, value) in self.iter() {
            if let Some(slot) = dense.get_mut(i) {
                *slot = if slot.is_nan() { value } else { *slot + value };
            }
        }
        dense
    }
}

/// Forces on every atom of the system, `F = -∂E/∂x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Forces {
    pub values: Vec<Vector3<f64>>,
    pub unit: ForceUnit,
}

impl Forces {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Net force; zero up to rounding for a translation-invariant model over all atoms.
    pub fn total(&self) -> Vector3<f64> {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Virial {
    pub value: Matrix3<f64>,
    pub unit: EnergyUnit,
}

impl Observable for Energy {
    type Raw = f64;

    const NAME: &'static str = "energy";
    const NEEDS_GRADIENT: bool = false;

    fn identity(_ctx: &EvalContext) -> f64 {
        0.0
    }

    fn accumulate(acc: &mut f64, other: f64, weight: f64) {
        *acc += weight * other;
    }

    fn generic(ctx: &EvalContext, model: &dyn SitePotential) -> Result<f64, EngineError> {
        tasks::energy::generic(ctx, model)
    }

    fn one_body(ctx: &EvalContext, model: &OneBody) -> Result<f64, EngineError> {
        tasks::energy::one_body(ctx, model)
    }

    fn finish(raw: f64, ctx: &EvalContext) -> Self {
        Self {
            value: ctx.units.scale_energy(raw),
            unit: ctx.units.output_units().energy,
        }
    }
}

impl Observable for SiteEnergies {
    type Raw = Vec<f64>;

    const NAME: &'static str = "site energies";
    const NEEDS_GRADIENT: bool = false;

    fn identity(ctx: &EvalContext) -> Vec<f64> {
        vec![0.0; ctx.domain.len()]
    }

    fn accumulate(acc: &mut Vec<f64>, other: Vec<f64>, weight: f64) {
        acc.iter_mut()
            .zip(other)
            .for_each(|(a, b)| *a += weight * b);
    }

    fn generic(ctx: &EvalContext, model: &dyn SitePotential) -> Result<Vec<f64>, EngineError> {
        tasks::site_energies::generic(ctx, model)
    }

    fn one_body(ctx: &EvalContext, model: &OneBody) -> Result<Vec<f64>, EngineError> {
        tasks::site_energies::one_body(ctx, model)
    }

    fn finish(raw: Vec<f64>, ctx: &EvalContext) -> Self {
        Self {
            indices: ctx.domain.to_vec(),
            values: raw.into_iter().map(|e| ctx.units.scale_energy(e)).collect(),
            unit: ctx.units.output_units().energy,
        }
    }
}

impl Observable for Forces {
    type Raw = Vec<Vector3<f64>>;

    const NAME: &'static str = "forces";
    const NEEDS_GRADIENT: bool = true;

    fn identity(ctx: &EvalContext) -> Vec<Vector3<f64>> {
        vec![Vector3::zeros(); ctx.system.len()]
    }

    fn accumulate(acc: &mut Vec<Vector3<f64>>, other: Vec<Vector3<f64>>, weight: f64) {
        acc.iter_mut()
            .zip(other)
            .for_each(|(a, b)| *a += b * weight);
    }

    fn generic(
        ctx: &EvalContext,
        model: &dyn SitePotential,
    ) -> Result<Vec<Vector3<f64>>, EngineError> {
        tasks::forces::generic(ctx, model)
    }

    fn one_body(ctx: &EvalContext, _model: &OneBody) -> Result<Vec<Vector3<f64>>, EngineError> {
        Ok(Self::identity(ctx))
    }

    fn finish(mut raw: Vec<Vector3<f64>>, ctx: &EvalContext) -> Self {
        ctx.units.scale_forces(&mut raw);
        Self {
            values: raw,
            unit: ctx.units.force_unit(),
        }
    }
}

impl Observable for Virial {
    type Raw = Matrix3<f64>;

    const NAME: &'static str = "virial";
    const NEEDS_GRADIENT: bool = true;

    fn identity(_ctx: &EvalContext) -> Matrix3<f64> {
        Matrix3::zeros()
    }

    fn accumulate(acc: &mut Matrix3<f64>, other: Matrix3<f64>, weight: f64) {
        *acc += other * weight;
    }

    fn generic(ctx: &EvalContext, model: &dyn SitePotential) -> Result<Matrix3<f64>, EngineError> {
        tasks::virial::generic(ctx, model)
    }

    fn one_body(_ctx: &EvalContext, _model: &OneBody) -> Result<Matrix3<f64>, EngineError> {
        Ok(Matrix3::zeros())
    }

    fn finish(raw: Matrix3<f64>, ctx: &EvalContext) -> Self {
        Self {
            value: ctx.units.scale_virial(raw),
            unit: ctx.units.output_units().energy,
        }
    }
}
