//! Wrapping slide index used to drive the carousel.

/// Current position within a fixed-length slide set.
///
/// The length is captured once and never changes. With a non-empty set the
/// index always lies in `0..len`; with an empty set it stays at `0` and every
/// transition is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideCycler {
    len: usize,
    index: usize,
}

impl SlideCycler {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    /// Construct positioned at `start`, reduced modulo `len`.
    #[must_use]
    pub const fn with_start(len: usize, start: usize) -> Self {
        let index = if len == 0 { 0 } else { start % len };
        Self { len, index }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.index
    }

    /// Step forward, wrapping to `0` after the last slide.
    ///
    /// Returns the new index, or `None` when there are no slides.
    pub fn advance(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = (self.index + 1) % self.len;
        Some(self.index)
    }

    /// Step backward, wrapping to `len - 1` before the first slide.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = (self.index + self.len - 1) % self.len;
        Some(self.index)
    }

    /// Indices visited by `steps` successive advances, without mutating `self`.
    #[must_use]
    pub fn plan(&self, steps: usize) -> Vec<usize> {
        let mut probe = *self;
        (0..steps).filter_map(|_| probe.advance()).collect()
    }
}
