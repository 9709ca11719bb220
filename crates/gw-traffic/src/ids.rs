//! Typed identifiers for domain tables.

use std::fmt;

/// Index of an intersection in the world's intersection table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct IntersectionId(pub u32);

impl IntersectionId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for IntersectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntersectionId({})", self.0)
    }
}

/// Index of a vehicle in the world's vehicle table.  Vehicles are appended
/// as arrival generators spawn them and never removed, so the id doubles as
/// a global spawn ordinal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct VehicleId(pub u32);

impl VehicleId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({})", self.0)
    }
}
