//! Mirrors whether one tracked element is on screen into a class flag.

use tracing::debug;

use crate::document::{Document, ElementId, Rect};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub height: f64,
}

/// Whether `rect` overlaps the viewport vertically once the page is scrolled
/// down by `scroll_offset` px.
pub fn intersects_viewport(rect: Rect, scroll_offset: f64, viewport: Viewport) -> bool {
    let top = rect.top - scroll_offset;
    let bottom = rect.bottom() - scroll_offset;
    top < viewport.height && bottom >= 0.0
}

#[derive(Debug, Clone)]
pub struct ScrollVisibilityToggle {
    target: ElementId,
    flag: String,
}

impl ScrollVisibilityToggle {
    pub fn new(target: ElementId, flag: impl Into<String>) -> Self {
        Self {
            target,
            flag: flag.into(),
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// Recompute the flag for the current scroll position; returns whether it is set.
    pub fn on_scroll(
        &self,
        doc: &mut Document,
        scroll_offset: f64,
        viewport: Viewport,
    ) -> Result<bool, Error> {
        let rect = doc.get(self.target)?.rect;
        let visible = intersects_viewport(rect, scroll_offset, viewport);
        let changed = if visible {
            doc.add_class(self.target, &self.flag)?
        } else {
            doc.remove_class(self.target, &self.flag)?
        };
        if changed {
            debug!(scroll_offset, visible, flag = %self.flag, "scroll flag toggled");
        }
        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;

    const VIEW: Viewport = Viewport { height: 800.0 };

    #[test]
    fn element_inside_viewport_intersects() {
        let rect = Rect {
            top: 100.0,
            height: 50.0,
        };
        assert!(intersects_viewport(rect, 0.0, VIEW));
    }

    #[test]
    fn element_below_fold_does_not_intersect() {
        let rect = Rect {
            top: 800.0,
            height: 50.0,
        };
        // top == viewport height is outside
        assert!(!intersects_viewport(rect, 0.0, VIEW));
        assert!(intersects_viewport(rect, 1.0, VIEW));
    }

    #[test]
    fn element_scrolled_past_does_not_intersect() {
        let rect = Rect {
            top: 100.0,
            height: 50.0,
        };
        // bottom == 0 still counts
        assert!(intersects_viewport(rect, 150.0, VIEW));
        assert!(!intersects_viewport(rect, 150.5, VIEW));
    }

    #[test]
    fn toggle_adds_and_removes_flag() {
        let mut doc = Document::new();
        let id = doc.push(Element::new("tracked").with_rect(Rect {
            top: 1200.0,
            height: 300.0,
        }));
        let toggle = ScrollVisibilityToggle::new(id, "visible");

        assert!(!toggle.on_scroll(&mut doc, 0.0, VIEW).unwrap());
        assert!(!doc.has_class(id, "visible").unwrap());

        assert!(toggle.on_scroll(&mut doc, 600.0, VIEW).unwrap());
        assert!(doc.has_class(id, "visible").unwrap());

        assert!(toggle.on_scroll(&mut doc, 1400.0, VIEW).unwrap());
        assert!(!toggle.on_scroll(&mut doc, 2000.0, VIEW).unwrap());
        assert!(!doc.has_class(id, "visible").unwrap());
    }
}
