use serde::{Deserialize, Serialize};

use crate::{
    phase,
    taylor::{self, Pair},
    Config, Order, Quadrant, Table,
};

/// Output sample.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Sample {
    pub sin: i32,
    pub cos: i32,
}

/// State of one phase value in flight.
///
/// Each [`Stage`] fills in more of it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Slot {
    phase: u64,
    quadrant: Quadrant,
    sin_index: usize,
    cos_index: usize,
    // aligned remainder
    x: i64,
    // partial pi/2 product, then scaled remainder
    dphi: i64,
    base: Pair,
    acc: Pair,
}

impl Slot {
    pub fn new(phase: u64) -> Self {
        Self {
            phase,
            ..Default::default()
        }
    }

    /// Result after the last stage.
    pub fn sample(&self) -> Sample {
        Sample {
            sin: self.acc.0 as i32,
            cos: self.acc.1 as i32,
        }
    }
}

/// A pipeline stage: a pure function of the previous stage's slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Split the phase and align the remainder.
    Decompose,
    /// Read the table pair, first pi/2 step.
    Lookup,
    /// Further pi/2 steps.
    HalfPi(usize),
    /// Second order half step multiply-accumulate.
    MidpointAccumulate,
    /// Second order half step rounding to table units.
    MidpointRound,
    /// Full step multiply-accumulate.
    Accumulate,
    /// Round to output units.
    Round,
    /// Quadrant folding.
    Resolve,
    /// [`Stage::Round`] and [`Stage::Resolve`] in one cycle.
    RoundResolve,
}

pub const FIRST_ORDER: [Stage; 6] = [
    Stage::Decompose,
    Stage::Lookup,
    Stage::HalfPi(1),
    Stage::HalfPi(2),
    Stage::Accumulate,
    Stage::RoundResolve,
];

pub const SECOND_ORDER: [Stage; 9] = [
    Stage::Decompose,
    Stage::Lookup,
    Stage::HalfPi(1),
    Stage::HalfPi(2),
    Stage::MidpointAccumulate,
    Stage::MidpointRound,
    Stage::Accumulate,
    Stage::Round,
    Stage::Resolve,
];

impl Order {
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            Self::First => &FIRST_ORDER,
            Self::Second => &SECOND_ORDER,
        }
    }
}

impl Stage {
    pub fn apply(self, core: &SinCos, mut slot: Slot) -> Slot {
        let config = &core.config;
        match self {
            Self::Decompose => {
                let d = phase::decompose(config, slot.phase);
                slot.quadrant = d.quadrant;
                slot.sin_index = d.sin_index;
                slot.cos_index = d.cos_index;
                slot.x = phase::align(config, d.remainder);
            }
            Self::Lookup => {
                slot.base = (
                    core.table[slot.sin_index] as i64,
                    core.table[slot.cos_index] as i64,
                );
                // First order multiplicands
                slot.acc = slot.base;
                slot.dphi = phase::half_pi_step(0, slot.x, 0);
            }
            Self::HalfPi(step) => {
                slot.dphi = phase::half_pi_step(step, slot.x, slot.dphi);
            }
            Self::MidpointAccumulate => {
                slot.acc =
                    taylor::accumulate_midpoint(config, slot.base, slot.dphi);
            }
            Self::MidpointRound => {
                slot.acc = taylor::round(config, slot.acc);
            }
            Self::Accumulate => {
                slot.acc =
                    taylor::accumulate(config, slot.base, slot.acc, slot.dphi);
            }
            Self::Round => {
                slot.acc =
                    taylor::saturate(config, taylor::round(config, slot.acc));
            }
            Self::Resolve => {
                slot.acc = slot.quadrant.resolve(slot.acc);
            }
            Self::RoundResolve => {
                let acc =
                    taylor::saturate(config, taylor::round(config, slot.acc));
                slot.acc = slot.quadrant.resolve(acc);
            }
        }
        slot
    }
}

/// Sine/cosine generator: a validated configuration and its table.
///
/// Immutable once built. Share it by reference between any number of
/// evaluations and pipelines.
#[derive(Clone, Debug)]
pub struct SinCos {
    config: Config,
    table: Table,
}

impl SinCos {
    pub fn new(config: Config) -> Self {
        let table = Table::new(&config);
        log::debug!(
            "sincos: {} bit data, {} bit phase, {} table entries, {:?} order, latency {}",
            config.data_bits(),
            config.phase_bits(),
            table.len(),
            config.order(),
            config.latency()
        );
        Self { config, table }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn stages(&self) -> &'static [Stage] {
        self.config.order().stages()
    }

    /// Compute the sine and cosine of a phase.
    ///
    /// Runs all pipeline stages back to back. Bit identical to the
    /// [`crate::Pipeline`] output for the same phase.
    ///
    /// # Arguments
    /// * `phase` - Unsigned phase, `1 << phase_bits` being a full turn.
    ///   Higher bits are ignored.
    pub fn evaluate(&self, phase: u64) -> Sample {
        self.stages()
            .iter()
            .fold(Slot::new(phase), |slot, stage| stage.apply(self, slot))
            .sample()
    }
}
