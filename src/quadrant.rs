use arbitrary_int::u2;
use bitbybit::bitenum;
use core::ops::Neg;

use crate::Config;

/// Quarter turn containing the phase: its two most significant bits.
#[bitenum(u2, exhaustive = true)]
#[derive(PartialEq, Debug, Default)]
pub enum Quadrant {
    /// `[0, pi/2)`
    #[default]
    First = 0,
    /// `[pi/2, pi)`
    Second = 1,
    /// `[pi, 3pi/2)`
    Third = 2,
    /// `[3pi/2, 2pi)`
    Fourth = 3,
}

impl Quadrant {
    pub fn from_phase(config: &Config, phase: u64) -> Self {
        let bits = (phase >> config.quadrant_shift()) & 3;
        Self::new_with_raw_value(u2::new(bits as u8))
    }

    /// Map a first quadrant `(sin, cos)` pair into this quadrant.
    ///
    /// Uses `sin(x + pi/2) = cos(x)`, `cos(x + pi/2) = -sin(x)` and
    /// `(sin, cos)(x + pi) = -(sin, cos)(x)`. No magnitude is touched, so
    /// quarter and half turn relations of the outputs are exact.
    pub fn resolve<T: Neg<Output = T>>(self, (sin, cos): (T, T)) -> (T, T) {
        match self {
            Self::First => (sin, cos),
            Self::Second => (cos, -sin),
            Self::Third => (-sin, -cos),
            Self::Fourth => (-cos, sin),
        }
    }
}
