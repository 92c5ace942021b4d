//! Taylor correction of the table lookup.
//!
//! With `(s, c)` the table pair at the index midpoint and `d` the scaled
//! remainder:
//!
//! * first order: `(s, c) + d (c, -s)`
//! * second order: `(s, c) + d (c', -s')` with the half step midpoint
//!   `(s', c') = (s, c) + d/2 (c, -s)`
//!
//! The multiplicands are the top `coeff_bits` of the table entries. Every
//! accumulation carries a half-ULP rounding constant for its final
//! arithmetic right shift (round half up). The final shift also halves the
//! table scale down to the output amplitude.
use crate::{Config, Order};

/// `(sin, cos)` in table or accumulator units.
pub type Pair = (i64, i64);

/// Right shift of the accumulators. Midpoint and output share it.
pub fn shift(config: &Config) -> u32 {
    config.product_shift() + 1
}

/// Multiply-accumulate a rotation of `base` by `dphi`.
///
/// # Args
/// * `base` - Table pair.
/// * `coeff` - Multiplicand pair, truncated to `coeff_bits`.
/// * `dphi` - Scaled phase remainder.
/// * `align` - Left shift of `base` to the product scale.
/// * `shift` - The right shift the accumulator will be rounded with.
///
/// # Returns
/// `(base << align) + dphi * (coeff.1, -coeff.0) + (1 << (shift - 1))`
pub fn mac(
    config: &Config,
    base: Pair,
    coeff: Pair,
    dphi: i64,
    align: u32,
    shift: u32,
) -> Pair {
    let k = config.coeff_shift();
    // Rounding bias, half up
    let half = 1 << (shift - 1);
    (
        (base.0 << align) + dphi * (coeff.1 >> k) + half,
        (base.1 << align) - dphi * (coeff.0 >> k) + half,
    )
}

/// Accumulate the half step midpoint, rounded back to table units by
/// [`round`].
pub fn accumulate_midpoint(config: &Config, base: Pair, dphi: i64) -> Pair {
    let s = shift(config);
    mac(config, base, base, dphi, s, s)
}

/// Accumulate the full step using `coeff` as multiplicands: the table pair
/// itself (first order) or the midpoint (second order).
pub fn accumulate(config: &Config, base: Pair, coeff: Pair, dphi: i64) -> Pair {
    let s = shift(config);
    mac(config, base, coeff, dphi, s - 1, s)
}

/// Truncate an accumulator carrying its rounding constant.
pub fn round(config: &Config, acc: Pair) -> Pair {
    let s = shift(config);
    (acc.0 >> s, acc.1 >> s)
}

/// Limit to the symmetric output range. Inactive for the reference
/// configurations.
pub fn saturate(config: &Config, (sin, cos): Pair) -> Pair {
    let a = config.amplitude() as i64;
    (sin.clamp(-a, a), cos.clamp(-a, a))
}

/// Half step midpoint in table units.
pub fn midpoint(config: &Config, base: Pair, dphi: i64) -> Pair {
    round(config, accumulate_midpoint(config, base, dphi))
}

/// First quadrant `(sin, cos)` in output units.
pub fn correct(config: &Config, base: Pair, dphi: i64) -> Pair {
    let coeff = match config.order() {
        Order::First => base,
        Order::Second => midpoint(config, base, dphi),
    };
    saturate(config, round(config, accumulate(config, base, coeff, dphi)))
}
