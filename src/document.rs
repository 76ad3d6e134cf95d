//! Headless page model the carousel renders into.
//!
//! The document is captured once when the page becomes ready: elements are
//! appended in document order, tagged with marker classes, and afterwards only
//! their presentation state (display, transform, transition, classes) changes.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::PageConfig;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    None,
}

/// Horizontal offset expressed in percent of the container width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslateX(pub f64);

impl fmt::Display for TranslateX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translateX({}%)", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eased transition applied to the `transform` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration: std::time::Duration,
    pub easing: Easing,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transform {}s {}",
            self.duration.as_secs_f64(),
            self.easing
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub display: Display,
    pub transform: Option<TranslateX>,
    pub transition: Option<Transition>,
}

/// Vertical extent of an element in document coordinates (px).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub label: String,
    pub classes: BTreeSet<String>,
    pub style: Style,
    pub rect: Rect,
}

impl Element {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the page described by configuration: slides first (inside the
    /// optional container), then the scroll-tracked element.
    pub fn from_page(page: &PageConfig) -> Self {
        let mut doc = Self::new();
        if let Some(marker) = page.container_marker.as_deref() {
            doc.push(Element::new("container").with_class(marker));
        }
        for label in &page.slides {
            doc.push(Element::new(label.as_str()).with_class(page.slide_marker.as_str()));
        }
        if let Some(tracked) = page.scroll_toggle.as_ref() {
            doc.push(
                Element::new("tracked")
                    .with_class(tracked.marker.as_str())
                    .with_rect(Rect {
                        top: tracked.top,
                        height: tracked.height,
                    }),
            );
        }
        doc
    }

    pub fn push(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements tagged with `marker`, in document order.
    pub fn query_all(&self, marker: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.classes.contains(marker))
            .map(|(idx, _)| ElementId(idx))
            .collect()
    }

    /// First element tagged with `marker`.
    ///
    /// # Errors
    /// Returns [`Error::MissingElement`] if no element carries `marker`.
    pub fn query_one(&self, marker: &str) -> Result<ElementId, Error> {
        self.elements
            .iter()
            .position(|el| el.classes.contains(marker))
            .map(ElementId)
            .ok_or_else(|| Error::MissingElement(marker.to_string()))
    }

    /// # Errors
    /// Returns [`Error::StaleElement`] if `id` does not belong to this document.
    pub fn get(&self, id: ElementId) -> Result<&Element, Error> {
        self.elements.get(id.0).ok_or(Error::StaleElement(id))
    }

    /// # Errors
    /// Returns [`Error::StaleElement`] if `id` does not belong to this document.
    pub fn get_mut(&mut self, id: ElementId) -> Result<&mut Element, Error> {
        self.elements.get_mut(id.0).ok_or(Error::StaleElement(id))
    }

    /// Returns `true` when the class was not present before.
    ///
    /// # Errors
    /// Returns [`Error::StaleElement`] if `id` does not belong to this document.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> Result<bool, Error> {
        Ok(self.get_mut(id)?.classes.insert(class.to_string()))
    }

    /// Returns `true` when the class was present before.
    ///
    /// # Errors
    /// Returns [`Error::StaleElement`] if `id` does not belong to this document.
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> Result<bool, Error> {
        Ok(self.get_mut(id)?.classes.remove(class))
    }

    /// # Errors
    /// Returns [`Error::StaleElement`] if `id` does not belong to this document.
    pub fn has_class(&self, id: ElementId, class: &str) -> Result<bool, Error> {
        Ok(self.get(id)?.classes.contains(class))
    }
}
