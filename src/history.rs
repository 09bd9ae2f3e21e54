use core::ops::Index;

use crate::Sample;

/// `W` visible samples, oldest first, plus one pending slot for the incoming sample.
///
/// Logically this is a sequence of exactly `W + 1` samples: indices `0..W` are
/// the visible window and index `W` is the sample pushed by the current cycle
/// that has not been committed into the window yet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RollingBuffer<const W: usize> {
    window: [Sample; W],
    pending: Sample,
}

impl<const W: usize> RollingBuffer<W> {
    pub const fn new() -> Self {
        Self {
            window: [0; W],
            pending: 0,
        }
    }

    /// Always `W + 1`.
    pub const fn len(&self) -> usize {
        W + 1
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn window(&self) -> &[Sample; W] {
        &self.window
    }

    pub fn pending(&self) -> Sample {
        self.pending
    }

    pub fn set_pending(&mut self, value: Sample) {
        self.pending = value;
    }

    /// Element `i` of the logical `W + 1` sequence, `None` past the pending slot.
    pub fn get(&self, i: usize) -> Option<Sample> {
        match i {
            i if i < W => Some(self.window[i]),
            i if i == W => Some(self.pending),
            _ => None,
        }
    }

    /// Consecutive `(buffer[i], buffer[i + 1])` pairs for every visible column `i`.
    pub fn pairs(&self) -> impl Iterator<Item = (Sample, Sample)> + '_ {
        (0..W).map(move |i| (self[i], self[i + 1]))
    }

    /// Drops the oldest visible sample and makes the pending one the newest.
    /// The pending slot keeps its value until the next push overwrites it.
    pub fn shift(&mut self) {
        if W == 0 {
            return;
        }
        self.window.copy_within(1.., 0);
        self.window[W - 1] = self.pending;
    }

    /// The newest committed sample.
    pub fn latest(&self) -> Sample {
        self.window.last().copied().unwrap_or(self.pending)
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.window.iter().copied().chain(core::iter::once(self.pending))
    }
}

impl<const W: usize> Default for RollingBuffer<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize> Index<usize> for RollingBuffer<W> {
    type Output = Sample;

    fn index(&self, i: usize) -> &Sample {
        if i == W {
            &self.pending
        } else {
            &self.window[i]
        }
    }
}
