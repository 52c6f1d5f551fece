use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ELEMENT_SYMBOLS: [&str; 36] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr",
];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unrecognized species '{0}'")]
pub struct ParseSpeciesError(pub String);

/// A chemical species, identified by its atomic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Species(u8);

impl Species {
    pub const fn new(atomic_number: u8) -> Self {
        Self(atomic_number)
    }

    #[inline]
    pub fn atomic_number(self) -> u8 {
        self.0
    }

    /// Returns the element symbol for the first four periods, `None` beyond that.
    pub fn symbol(self) -> Option<&'static str> {
        (self.0 as usize)
            .checked_sub(1)
            .and_then(|idx| ELEMENT_SYMBOLS.get(idx))
            .copied()
    }
}

impl From<u8> for Species {
    fn from(atomic_number: u8) -> Self {
        Self(atomic_number)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => write!(f, "{}", symbol),
            None => write!(f, "Z{}", self.0),
        }
    }
}

impl FromStr for Species {
    type Err = ParseSpeciesError;

    /// Accepts an element symbol (`"Ar"`, case-insensitive) or a bare atomic number (`"18"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(z) = trimmed.parse::<u8>() {
            return Ok(Self(z));
        }
        ELEMENT_SYMBOLS
            .iter()
            .position(|symbol| symbol.eq_ignore_ascii_case(trimmed))
            .map(|idx| Self(idx as u8 + 1))
            .ok_or_else(|| ParseSpeciesError(s.to_string()))
    }
}
