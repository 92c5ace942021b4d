use heapless::Deque;

use crate::{Sample, SinCos, Slot, Stage};

/// Depth of the deepest stage list.
pub const MAX_LATENCY: usize = 9;

/// Cycle accurate model of the pipelined core.
///
/// One register per stage. Each enabled clock accepts one phase, advances
/// every register through its stage and emits the result of the phase
/// accepted `latency()` enabled clocks earlier. A disabled clock freezes
/// the whole pipeline: in-flight samples are delayed uniformly and never
/// corrupted or reordered. There is no other flow control.
#[derive(Clone, Debug)]
pub struct Pipeline<'a> {
    core: &'a SinCos,
    stages: &'static [Stage],
    // front: newest
    slots: Deque<Option<Slot>, MAX_LATENCY>,
}

impl<'a> Pipeline<'a> {
    pub fn new(core: &'a SinCos) -> Self {
        let mut pipeline = Self {
            core,
            stages: core.stages(),
            slots: Deque::new(),
        };
        pipeline.reset();
        pipeline
    }

    /// Discard all in-flight samples.
    pub fn reset(&mut self) {
        self.slots.clear();
        for _ in self.stages {
            // Capacity covers the deepest stage list.
            self.slots.push_back(None).ok();
        }
    }

    /// Number of enabled clocks from input to output.
    pub fn latency(&self) -> usize {
        self.stages.len()
    }

    /// Number of accepted phases whose result has not been emitted yet.
    pub fn in_flight(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Clock the pipeline.
    ///
    /// # Args
    /// * `enable` - Clock enable. If false, `phase` is ignored and nothing
    ///   is emitted.
    /// * `phase` - Input phase.
    ///
    /// # Returns
    /// The result leaving the last stage, if any.
    pub fn clock(&mut self, enable: bool, phase: u64) -> Option<Sample> {
        if !enable {
            return None;
        }
        let core = self.core;
        let out = self.slots.pop_back().flatten();
        for (slot, stage) in self.slots.iter_mut().zip(&self.stages[1..]) {
            *slot = slot.map(|s| stage.apply(core, s));
        }
        let first = self.stages[0].apply(core, Slot::new(phase));
        self.slots.push_front(Some(first)).ok();
        out.map(|s| s.sample())
    }
}
