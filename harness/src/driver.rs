//! Feed phases through the cycle accurate pipeline.
use rand_core::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;
use sincos::{Pipeline, Sample, SinCos};

/// Clock enable pattern presented to the pipeline.
#[derive(Clone, Debug)]
pub enum Enable {
    /// Enabled on every clock.
    Continuous,
    /// Pseudo random enable, on half of the clocks on average.
    Modulated(XorShiftRng),
}

impl Enable {
    pub fn modulated(seed: u64) -> Self {
        Self::Modulated(XorShiftRng::seed_from_u64(seed))
    }
}

impl Iterator for Enable {
    type Item = bool;
    fn next(&mut self) -> Option<bool> {
        Some(match self {
            Self::Continuous => true,
            Self::Modulated(rng) => rng.next_u32() & 1 != 0,
        })
    }
}

/// Clock `phases` through a fresh pipeline.
///
/// Once the phases are exhausted the pipeline is flushed with zero phases.
/// `sink` receives every result in input order.
///
/// # Returns
/// Number of clocks, enabled or not.
pub fn run_with(
    core: &SinCos,
    phases: impl IntoIterator<Item = u64>,
    enable: &mut Enable,
    mut sink: impl FnMut(Sample),
) -> usize {
    let mut pipeline = Pipeline::new(core);
    let mut phases = phases.into_iter().peekable();
    let (mut accepted, mut emitted, mut clocks) = (0usize, 0usize, 0usize);
    while phases.peek().is_some() || emitted < accepted {
        clocks += 1;
        if enable.next() != Some(true) {
            pipeline.clock(false, 0);
            continue;
        }
        let phase = match phases.next() {
            Some(phase) => {
                accepted += 1;
                if accepted % (1 << 22) == 0 {
                    log::debug!("{} phases accepted", accepted);
                }
                phase
            }
            None => 0,
        };
        if let Some(y) = pipeline.clock(true, phase) {
            emitted += 1;
            sink(y);
        }
    }
    clocks
}

/// Clock `phases` through a fresh pipeline and collect the results.
pub fn run(
    core: &SinCos,
    phases: impl IntoIterator<Item = u64>,
    enable: &mut Enable,
) -> Vec<Sample> {
    let mut out = Vec::new();
    run_with(core, phases, enable, |y| out.push(y));
    out
}

/// Clock every phase value of the core in ascending order into `sink`.
///
/// # Returns
/// Number of clocks, enabled or not.
pub fn sweep_with(
    core: &SinCos,
    enable: &mut Enable,
    sink: impl FnMut(Sample),
) -> usize {
    let turn = 1u64 << core.config().phase_bits();
    log::info!("Sweeping {} phases", turn);
    run_with(core, 0..turn, enable, sink)
}

/// Every phase value of the core in ascending order.
pub fn sweep(core: &SinCos, enable: &mut Enable) -> Vec<Sample> {
    let mut out = Vec::new();
    sweep_with(core, enable, |y| out.push(y));
    out
}
