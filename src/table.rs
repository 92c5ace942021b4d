use alloc::vec::Vec;
use core::f64::consts::PI;
use core::ops::Index;

use crate::Config;

/// Quarter period sine lookup table.
///
/// Entry `i` is the sine at the midpoint of the `i`-th of `len()` equal
/// subdivisions of `[0, pi/2)`, scaled to [`Config::table_scale`]. The
/// cosine at the same midpoint is the entry at the complemented index.
///
/// Built once and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    entries: Vec<u32>,
}

impl Table {
    pub fn new(config: &Config) -> Self {
        let size = config.table_size();
        // Treat sin as unsigned since it is always positive in [0, pi/2).
        let amplitude = config.table_scale() as f64;
        let entries: Vec<u32> = (0..size)
            .map(|i| {
                // Use midpoint samples. Mirroring the index then gives the
                // cosine at the same point.
                let x = PI / 2. * ((i as f64 + 0.5) / size as f64);
                libm::round(libm::sin(x) * amplitude) as u32
            })
            .collect();
        log::debug!(
            "Built {} entry table, scale {}, last {:?}",
            size,
            amplitude,
            entries.last()
        );
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.entries.get(index).copied()
    }

    /// Sine and cosine at the midpoint of subdivision `index`.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn sin_cos(&self, index: usize) -> (u32, u32) {
        let last = self.entries.len() - 1;
        (self.entries[index], self.entries[last - index])
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.entries
    }
}

impl Index<usize> for Table {
    type Output = u32;
    fn index(&self, index: usize) -> &u32 {
        &self.entries[index]
    }
}
