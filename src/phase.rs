//! Phase decomposition.
//!
//! ```text
//! | quadrant (2) | index (table_addr_bits) | remainder (remainder_bits) |
//! ```
//!
//! The index selects the table midpoint below the phase (and, complemented,
//! the mirrored cosine entry). The remainder is the signed distance from
//! that midpoint, scaled to radians by a shift-and-add multiplication by
//! pi/2.
use crate::{Config, Quadrant};

/// Shift-and-add terms of `pi/2 = 1.10010010000111111...b`, grouped in
/// pipeline steps: `1 + 2^-1 | 2^-4 + 2^-7 | 2^-11 - 2^-18`.
/// Relative error 4.1e-7.
pub const HALF_PI: [[(i64, u32); 2]; 3] =
    [[(1, 0), (1, 1)], [(1, 4), (1, 7)], [(1, 11), (-1, 18)]];

/// Fields of a phase value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decomposed {
    pub quadrant: Quadrant,
    /// Table index of the sine midpoint.
    pub sin_index: usize,
    /// Complemented index: the cosine at the same midpoint.
    pub cos_index: usize,
    /// Signed remainder relative to the midpoint, `remainder_bits` wide.
    pub remainder: i64,
}

/// Arithmetic right shift with half-up rounding bit.
fn round_shift(x: i64, shift: u32) -> i64 {
    (x + ((1 << shift) >> 1)) >> shift
}

/// Split a phase into quadrant, sine and cosine table indices and signed
/// remainder. Bits above `phase_bits` are ignored.
pub fn decompose(config: &Config, phase: u64) -> Decomposed {
    let quadrant = Quadrant::from_phase(config, phase);
    let rem_bits = config.remainder_bits();
    let mask = (1 << config.table_addr_bits()) - 1;
    let sin_index = ((phase >> rem_bits) & mask) as usize;
    let cos_index = !sin_index & mask as usize;

    // Inverting the MSB and reading the field as signed maps the unsigned
    // range onto a balanced range around the table midpoint.
    let bits = (phase ^ (1 << (rem_bits - 1))) << (u64::BITS - rem_bits);
    let remainder = (bits as i64) >> (u64::BITS - rem_bits);

    Decomposed {
        quadrant,
        sin_index,
        cos_index,
        remainder,
    }
}

/// Align the remainder to `dphi_bits` fractional radian bits (before the
/// pi/2 scaling). Excess low remainder bits are rounded away.
pub fn align(config: &Config, remainder: i64) -> i64 {
    let shift = config.remainder_shift();
    if shift >= 0 {
        remainder << shift
    } else {
        round_shift(remainder, shift.unsigned_abs())
    }
}

/// One shift-and-add step of the pi/2 multiplication.
///
/// # Args
/// * `step` - Index into [`HALF_PI`].
/// * `x` - Aligned remainder.
/// * `acc` - Partial product from the previous step (0 for the first).
pub fn half_pi_step(step: usize, x: i64, acc: i64) -> i64 {
    HALF_PI[step]
        .iter()
        .fold(acc, |acc, &(sign, shift)| acc + sign * round_shift(x, shift))
}

/// Scaled phase remainder `dphi = remainder * pi/2` with `dphi_bits`
/// fractional radian bits.
pub fn delta_phase(config: &Config, remainder: i64) -> i64 {
    let x = align(config, remainder);
    (0..HALF_PI.len()).fold(0, |acc, step| half_pi_step(step, x, acc))
}
