//! Selected phase test vectors checked against a floating point reference.
use core::f64::consts::PI;

use sincos::{Config, Sample};

/// Largest accepted deviation from the reference, LSB.
pub const TOLERANCE: f64 = 1.5;

/// Increment of the pseudo random phase sequence.
pub const STRIDE: u64 = 123457;

/// Number of pseudo random phases.
pub const PSEUDORANDOM: usize = 5000;

/// Phase sequences
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sequence {
    /// The 64 smallest phases.
    LeastSignificant,
    /// Every combination of the 6 most significant bits.
    MostSignificant,
    /// Phases advancing by [`STRIDE`] modulo a full turn.
    Pseudorandom,
}

impl Sequence {
    pub const ALL: [Self; 3] = [
        Self::LeastSignificant,
        Self::MostSignificant,
        Self::Pseudorandom,
    ];

    pub fn phases(self, config: &Config) -> Vec<u64> {
        let bits = config.phase_bits();
        match self {
            Self::LeastSignificant => (0..64).collect(),
            Self::MostSignificant => {
                let top = bits.min(6);
                (0..1u64 << top).map(|p| p << (bits - top)).collect()
            }
            Self::Pseudorandom => {
                let mask = config.phase_mask();
                core::iter::successors(Some(0u64), |p| {
                    Some(p.wrapping_add(STRIDE) & mask)
                })
                .skip(1)
                .take(PSEUDORANDOM)
                .collect()
            }
        }
    }
}

/// All sequences back to back.
pub fn all(config: &Config) -> Vec<u64> {
    Sequence::ALL
        .iter()
        .flat_map(|s| s.phases(config))
        .collect()
}

/// A result outside of [`TOLERANCE`].
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
#[error(
    "phase={phase} sin={} cos={} refsin={:.2} refcos={:.2}",
    .have.sin,
    .have.cos,
    .want.0,
    .want.1
)]
pub struct Mismatch {
    pub phase: u64,
    pub have: Sample,
    pub want: (f64, f64),
}

/// The nominal `amplitude * (sin, cos)` of a phase.
pub fn reference(config: &Config, phase: u64) -> (f64, f64) {
    let amplitude = config.amplitude() as f64;
    let turn = 2f64.powi(config.phase_bits() as i32);
    let (sin, cos) = (2. * PI * (phase & config.phase_mask()) as f64 / turn)
        .sin_cos();
    (amplitude * sin, amplitude * cos)
}

pub fn check(
    config: &Config,
    phase: u64,
    have: Sample,
) -> Result<(), Mismatch> {
    let want = reference(config, phase);
    if (have.sin as f64 - want.0).abs() > TOLERANCE
        || (have.cos as f64 - want.1).abs() > TOLERANCE
    {
        Err(Mismatch { phase, have, want })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sincos::SinCos;

    #[test]
    fn sequences() {
        let config = Config::NARROW;
        let lsb = Sequence::LeastSignificant.phases(&config);
        assert_eq!(lsb.len(), 64);
        assert_eq!(lsb[63], 63);
        let msb = Sequence::MostSignificant.phases(&config);
        assert_eq!(msb.len(), 64);
        assert_eq!(msb[1], 1 << 14);
        assert_eq!(msb[63], 63 << 14);
        let prn = Sequence::Pseudorandom.phases(&config);
        assert_eq!(prn.len(), PSEUDORANDOM);
        assert_eq!(&prn[..2], &[123457, 246914]);
        assert!(prn.iter().all(|&p| p < 1 << 20));
        assert_eq!(all(&config).len(), 64 + 64 + PSEUDORANDOM);
    }

    #[test]
    fn short_phase() {
        let config = Config::new(8, 4, 1, 1).unwrap();
        assert_eq!(
            Sequence::MostSignificant.phases(&config),
            (0..16).collect::<Vec<_>>()
        );
    }

    #[test]
    fn direct() {
        for config in [Config::NARROW, Config::WIDE] {
            let core = SinCos::new(config);
            for phase in all(&config) {
                check(&config, phase, core.evaluate(phase)).unwrap();
            }
        }
    }

    #[test]
    fn mismatch() {
        let config = Config::NARROW;
        assert_eq!(check(&config, 0, Sample { sin: 1, cos: 131071 }), Ok(()));
        let err = check(&config, 0, Sample { sin: 2, cos: 131071 })
            .unwrap_err();
        assert_eq!(err.phase, 0);
        assert_eq!(
            err.to_string(),
            "phase=0 sin=2 cos=131071 refsin=0.00 refcos=131071.00"
        );
        assert!(check(&config, 1 << 18, Sample { sin: 131069, cos: 0 })
            .is_err());
    }
}
