//! Verification harness for the `sincos` generator core.
//!
//! Plays the part of the collaborators around the core: the testbench that
//! sweeps every phase and records a trace, the waveform quality evaluation
//! of such a trace, and the serial test driver that checks selected phases
//! against a floating point reference with and without clock enable
//! modulation.

pub mod driver;
pub mod quality;
pub mod trace;
pub mod vectors;

/// Represents the errors that can occur in the harness.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    /// A trace line does not hold exactly two columns.
    #[error("Line {0}: expecting two columns")]
    Columns(usize),
    /// A trace column is not a signed integer.
    #[error("Line {line}: invalid value")]
    Value {
        line: usize,
        #[source]
        source: std::num::ParseIntError,
    },
    /// The spectrum could not be computed.
    #[error("FFT error")]
    Fft(#[from] realfft::FftError),
    /// Quality evaluation needs a power-of-two record of at least 4 samples.
    #[error("Invalid record length {0}: expecting a power of two >= 4")]
    Length(usize),
}
