//! Waveform quality of a full phase sweep.
//!
//! The record holds one `(sin, cos)` sample per phase value over exactly one
//! turn. All figures are taken from the sine column, in LSB unless noted.
use core::f64::consts::PI;
use core::fmt;

use realfft::{num_complex::Complex, RealFftPlanner};
use serde::Serialize;
use sincos::Sample;

use crate::Error;

/// Default highest harmonic of the harmonic limited SFDR.
pub const HARMONICS: usize = 16;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    /// Record length.
    pub samples: usize,
    /// Range of `cos(x) - sin(x + pi/2)`.
    pub quarter_turn: (i64, i64),
    /// Range of `sin(x) + sin(x + pi)`.
    pub half_turn: (i64, i64),
    /// Mean value.
    pub offset: f64,
    /// Amplitude of the fundamental.
    pub amplitude: f64,
    /// Phase of the fundamental relative to an ideal sine, radians.
    pub phase_offset: f64,
    /// Largest deviation from the fitted sine.
    pub peak_error: f64,
    /// Standard deviation from the fitted sine.
    pub rms_error: f64,
    /// Signal to noise and distortion, dB.
    pub sinad: f64,
    /// Effective number of bits.
    pub enob: f64,
    /// Spurious free dynamic range over the whole spectrum, dB.
    pub sfdr: f64,
    /// Frequency bin of the largest spur.
    pub spur_bin: usize,
    /// Spurious free dynamic range over harmonics `2..=harmonics`, dB.
    pub harmonic_sfdr: f64,
    /// Highest harmonic of `harmonic_sfdr`.
    pub harmonics: usize,
}

impl Report {
    /// Whether the cosine is an exact quarter turn shifted sine.
    pub fn quarter_turn_exact(&self) -> bool {
        self.quarter_turn == (0, 0)
    }

    /// Whether a half turn is an exact sign flip.
    pub fn half_turn_exact(&self) -> bool {
        self.half_turn == (0, 0)
    }
}

/// One sided spectrum of the sine column, bins `0..=n/2`.
fn spectrum(x: &[Sample]) -> Result<Vec<Complex<f64>>, Error> {
    let r2c = RealFftPlanner::<f64>::new().plan_fft_forward(x.len());
    let mut input = r2c.make_input_vec();
    for (i, v) in input.iter_mut().zip(x) {
        *i = v.sin as f64;
    }
    let mut output = r2c.make_output_vec();
    r2c.process(&mut input, &mut output)?;
    Ok(output)
}

fn range(it: impl Iterator<Item = i64>) -> (i64, i64) {
    it.fold((i64::MAX, i64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Evaluate a sweep record.
///
/// # Args
/// * `x` - One sample per phase, power-of-two length of at least 4.
/// * `harmonics` - Highest harmonic of the harmonic limited SFDR.
pub fn evaluate(x: &[Sample], harmonics: usize) -> Result<Report, Error> {
    let n = x.len();
    if n < 4 || !n.is_power_of_two() {
        return Err(Error::Length(n));
    }

    let quarter_turn = range(
        (0..n).map(|i| x[i].cos as i64 - x[(i + n / 4) % n].sin as i64),
    );
    let half_turn =
        range((0..n / 2).map(|i| x[i].sin as i64 + x[i + n / 2].sin as i64));

    let offset = x.iter().map(|v| v.sin as f64).sum::<f64>() / n as f64;

    let spectrum = spectrum(x)?;
    // X[1] = sum x (cos - j sin)
    let fundamental = spectrum[1];
    let (acos, asin) = (
        fundamental.re * 2. / n as f64,
        -fundamental.im * 2. / n as f64,
    );
    let amplitude = acos.hypot(asin);
    let phase_offset = acos.atan2(asin);

    let (mut sum, mut sum_sq, mut peak_error) = (0f64, 0f64, 0f64);
    for (i, v) in x.iter().enumerate() {
        let want = amplitude * (2. * PI * i as f64 / n as f64).sin();
        let err = v.sin as f64 - want;
        sum += err;
        sum_sq += err * err;
        peak_error = peak_error.max(err.abs());
    }
    let mean = sum / n as f64;
    let rms_error = (sum_sq / n as f64 - mean * mean).max(0.).sqrt();

    let sinad = 20. * (amplitude * 0.5f64.sqrt() / rms_error).log10();
    let enob = (sinad - 1.76) / 6.02;

    let carrier = fundamental.norm();
    let (spur_bin, spur) = spectrum
        .iter()
        .enumerate()
        .skip(2)
        .map(|(k, v)| (k, v.norm()))
        .fold((0, 0f64), |max, v| if v.1 > max.1 { v } else { max });
    let sfdr = 20. * (carrier / spur).log10();

    let harmonics = harmonics.min(n / 2);
    let spur = (2..=harmonics)
        .map(|k| spectrum[k].norm())
        .fold(0f64, f64::max);
    let harmonic_sfdr = 20. * (carrier / spur).log10();

    Ok(Report {
        samples: n,
        quarter_turn,
        half_turn,
        offset,
        amplitude,
        phase_offset,
        peak_error,
        rms_error,
        sinad,
        enob,
        sfdr,
        spur_bin,
        harmonic_sfdr,
        harmonics,
    })
}

/// Deviation from the nominal `amplitude * (sin, cos)` of both columns.
///
/// # Returns
/// `(rms, peak)` error in LSB.
pub fn nominal_error(x: &[Sample], amplitude: i32) -> (f64, f64) {
    let n = x.len() as f64;
    let amplitude = amplitude as f64;
    let (sum_sq, peak) =
        x.iter()
            .enumerate()
            .fold((0f64, 0f64), |(sum_sq, peak), (i, v)| {
                let (sin, cos) = (2. * PI * i as f64 / n).sin_cos();
                let e = (
                    v.sin as f64 - amplitude * sin,
                    v.cos as f64 - amplitude * cos,
                );
                (
                    sum_sq + e.0 * e.0 + e.1 * e.1,
                    peak.max(e.0.abs()).max(e.1.abs()),
                )
            });
    ((sum_sq / (2. * n)).sqrt(), peak)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lo, hi) = self.quarter_turn;
        if self.quarter_turn_exact() {
            writeln!(f, "cos(x) == sin(x+pi/2) exactly")?;
        } else {
            writeln!(f, "cos(x) == sin(x+pi/2) + ({lo} .. {hi})")?;
        }
        let (lo, hi) = self.half_turn;
        if self.half_turn_exact() {
            writeln!(f, "sin(x) == - sin(x+pi) exactly")?;
        } else {
            writeln!(f, "sin(x) == - sin(x+pi) + ({lo} .. {hi})")?;
        }
        writeln!(f)?;
        writeln!(f, "offset =        {:20.12} lsb", self.offset)?;
        writeln!(f, "amplitude =     {:20.12} lsb", self.amplitude)?;
        writeln!(f, "phase offset =  {:20.12} rad", self.phase_offset)?;
        writeln!(f)?;
        writeln!(f, "peak error =    {:20.12} lsb", self.peak_error)?;
        writeln!(f, "rms error =     {:20.12} lsb rms", self.rms_error)?;
        writeln!(f, "SINAD =         {:12.4} dB", self.sinad)?;
        writeln!(f, "ENOB =          {:12.4} bits", self.enob)?;
        writeln!(
            f,
            "SFDR =          {:12.4} dB (bin {})",
            self.sfdr, self.spur_bin
        )?;
        writeln!(
            f,
            "SFDR (2..={}) = {:12.4} dB",
            self.harmonics, self.harmonic_sfdr
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal(n: usize, amplitude: f64, phase: f64) -> Vec<Sample> {
        (0..n)
            .map(|i| {
                let (s, c) = (2. * PI * i as f64 / n as f64 + phase).sin_cos();
                Sample {
                    sin: (amplitude * s).round() as i32,
                    cos: (amplitude * c).round() as i32,
                }
            })
            .collect()
    }

    #[test]
    fn length() {
        assert!(matches!(evaluate(&[], 4), Err(Error::Length(0))));
        assert!(matches!(
            evaluate(&[Sample::default(); 2], 4),
            Err(Error::Length(2))
        ));
        assert!(matches!(
            evaluate(&[Sample::default(); 12], 4),
            Err(Error::Length(12))
        ));
    }

    #[test]
    fn rounded_sine() {
        let x = ideal(1 << 12, 1000., 0.);
        let r = evaluate(&x, HARMONICS).unwrap();
        println!("{r}");
        assert!(r.half_turn_exact());
        assert!(r.offset.abs() < 1e-9);
        assert!((r.amplitude - 1000.).abs() < 0.05);
        assert!(r.phase_offset.abs() < 1e-4);
        assert!(r.peak_error < 0.6);
        // Uniform rounding noise: 1/sqrt(12)
        assert!((r.rms_error - 0.2887).abs() < 0.02);
        assert!(r.enob > 10.5);
        assert!(r.sfdr > 80.);
        assert!(r.harmonic_sfdr >= r.sfdr);
        assert_eq!(r.harmonics, HARMONICS);
        let (rms, peak) = nominal_error(&x, 1000);
        assert!(rms < 0.31 && peak <= 0.5);
    }

    #[test]
    fn inexact_shift() {
        let mut x = ideal(64, 100., 0.);
        x[3].cos += 2;
        x[40].sin -= 1;
        let r = evaluate(&x, 4).unwrap();
        assert_eq!(r.quarter_turn, (0, 2));
        assert_eq!(r.half_turn, (-1, 0));
        assert!(!r.quarter_turn_exact());
        assert!(r.to_string().contains("cos(x) == sin(x+pi/2) + (0 .. 2)"));
    }

    #[test]
    fn phase_and_harmonic() {
        let n = 1 << 10;
        let x: Vec<Sample> = (0..n)
            .map(|i| {
                let p = 2. * PI * i as f64 / n as f64;
                Sample {
                    sin: (1e4 * (p + 0.25).sin() + 10. * (3. * p).sin())
                        .round() as i32,
                    cos: 0,
                }
            })
            .collect();
        let r = evaluate(&x, 8).unwrap();
        assert!((r.phase_offset - 0.25).abs() < 1e-4);
        // Third harmonic at -60 dBc
        assert!((r.sfdr - 60.).abs() < 0.1, "{}", r.sfdr);
        assert_eq!(r.spur_bin, 3);
        assert_eq!(r.sfdr, r.harmonic_sfdr);
    }

    #[test]
    fn spur_between_harmonics() {
        let n = 1 << 13;
        let x: Vec<Sample> = (0..n)
            .map(|i| {
                let p = 2. * PI * i as f64 / n as f64;
                Sample {
                    sin: (1e4 * p.sin() + 10. * (1025. * p).sin()).round()
                        as i32,
                    cos: 0,
                }
            })
            .collect();
        let r = evaluate(&x, HARMONICS).unwrap();
        assert_eq!(r.spur_bin, 1025);
        assert!((r.sfdr - 60.).abs() < 0.1, "{}", r.sfdr);
        // Invisible to the harmonic search
        assert!(r.harmonic_sfdr > 100., "{}", r.harmonic_sfdr);
    }
}
