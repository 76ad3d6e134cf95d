/// Requests handled by the carousel task, one at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselCommand {
    Advance,
    Retreat,
    /// The page was scrolled to `offset` px from the top.
    Scroll { offset: f64 },
}

/// Emitted by the carousel task after the current slide is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered {
    pub index: usize,
    pub len: usize,
}
