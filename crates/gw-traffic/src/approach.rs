//! Approach directions.
//!
//! An intersection serves two directional axes, NS and EW.  The same enum
//! names both a vehicle's approach and the intersection's current green
//! phase — the phase *is* the approach that currently has green.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Approach {
    Ns,
    Ew,
}

impl Approach {
    /// The other axis — the direction currently held at red when `self` is
    /// the green phase.
    #[inline]
    pub fn opposite(self) -> Approach {
        match self {
            Approach::Ns => Approach::Ew,
            Approach::Ew => Approach::Ns,
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Approach::Ns => write!(f, "NS"),
            Approach::Ew => write!(f, "EW"),
        }
    }
}
