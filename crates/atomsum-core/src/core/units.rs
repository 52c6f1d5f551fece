//! Physical units attached to observables.
//!
//! Base units are the electronvolt for energy and the angstrom for length. Every
//! conversion goes through these, except that converting a unit to itself yields a
//! factor of exactly `1.0` so that results in a model's native units stay bit-identical.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const EV_PER_KCAL_MOL: f64 = 0.043_364_103_900_593_22;
const EV_PER_KJ_MOL: f64 = 0.010_364_269_656_262_174;
const EV_PER_HARTREE: f64 = 27.211_386_245_988;
const EV_PER_RYDBERG: f64 = EV_PER_HARTREE / 2.0;
const ANGSTROM_PER_NANOMETER: f64 = 10.0;
const ANGSTROM_PER_BOHR: f64 = 0.529_177_210_903;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unrecognized {kind} unit '{value}'")]
pub struct ParseUnitError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnergyUnit {
    #[default]
    ElectronVolt,
    KcalPerMol,
    KjPerMol,
    Hartree,
    Rydberg,
}

impl EnergyUnit {
    /// Size of one unit expressed in electronvolts.
    pub fn in_electron_volts(self) -> f64 {
        match self {
            Self::ElectronVolt => 1.0,
            Self::KcalPerMol => EV_PER_KCAL_MOL,
            Self::KjPerMol => EV_PER_KJ_MOL,
            Self::Hartree => EV_PER_HARTREE,
            Self::Rydberg => EV_PER_RYDBERG,
        }
    }

    /// Multiplicative factor converting a value in `self` into `target`.
    #[inline]
    pub fn factor_to(self, target: EnergyUnit) -> f64 {
        if self == target {
            1.0
        } else {
            self.in_electron_volts() / target.in_electron_volts()
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::ElectronVolt => "eV",
            Self::KcalPerMol => "kcal/mol",
            Self::KjPerMol => "kJ/mol",
            Self::Hartree => "Ha",
            Self::Rydberg => "Ry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    #[default]
    Angstrom,
    Nanometer,
    Bohr,
}

impl LengthUnit {
    /// Size of one unit expressed in angstroms.
    pub fn in_angstroms(self) -> f64 {
        match self {
            Self::Angstrom => 1.0,
            Self::Nanometer => ANGSTROM_PER_NANOMETER,
            Self::Bohr => ANGSTROM_PER_BOHR,
        }
    }

    /// Multiplicative factor converting a value in `self` into `target`.
    #[inline]
    pub fn factor_to(self, target: LengthUnit) -> f64 {
        if self == target {
            1.0
        } else {
            self.in_angstroms() / target.in_angstroms()
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Angstrom => "Å",
            Self::Nanometer => "nm",
            Self::Bohr => "bohr",
        }
    }
}

/// The pair of units a model's raw numbers are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UnitSystem {
    pub energy: EnergyUnit,
    pub length: LengthUnit,
}

impl UnitSystem {
    pub fn new(energy: EnergyUnit, length: LengthUnit) -> Self {
        Self { energy, length }
    }
}

/// Unit of a force component, energy per length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ForceUnit {
    pub energy: EnergyUnit,
    pub length: LengthUnit,
}

impl From<UnitSystem> for ForceUnit {
    fn from(units: UnitSystem) -> Self {
        Self {
            energy: units.energy,
            length: units.length,
        }
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.energy, self.length)
    }
}

impl fmt::Display for ForceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.energy, self.length)
    }
}

impl FromStr for EnergyUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "").as_str() {
            "ev" | "electronvolt" => Ok(Self::ElectronVolt),
            "kcal/mol" | "kcalmol" | "kcal" => Ok(Self::KcalPerMol),
            "kj/mol" | "kjmol" | "kj" => Ok(Self::KjPerMol),
            "ha" | "hartree" => Ok(Self::Hartree),
            "ry" | "rydberg" => Ok(Self::Rydberg),
            _ => Err(ParseUnitError {
                kind: "energy",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "å" | "ang" | "angstrom" => Ok(Self::Angstrom),
            "nm" | "nanometer" => Ok(Self::Nanometer),
            "bohr" | "a0" => Ok(Self::Bohr),
            _ => Err(ParseUnitError {
                kind: "length",
                value: s.to_string(),
            }),
        }
    }
}
