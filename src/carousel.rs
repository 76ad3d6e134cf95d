use tracing::{debug, info};

use crate::config::Configuration;
use crate::cycler::SlideCycler;
use crate::document::{Document, ElementId};
use crate::error::Error;
use crate::render::{Renderer, SlideRenderer};
use crate::scroll::{ScrollVisibilityToggle, Viewport};

/// A slide set mounted into a document together with its index and renderer.
///
/// The slide set is captured once at mount time and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Carousel {
    document: Document,
    slides: Vec<ElementId>,
    cycler: SlideCycler,
    renderer: Renderer,
    scroll: Option<ScrollVisibilityToggle>,
    viewport: Viewport,
}

impl Carousel {
    /// Capture the slides, resolve the renderer and perform the initial render.
    ///
    /// # Errors
    /// Returns [`Error::MissingElement`] if the configured container or scroll
    /// target marker matches no element.
    pub fn mount(document: Document, cfg: &Configuration) -> Result<Self, Error> {
        let slides = document.query_all(&cfg.page.slide_marker);
        let renderer = Renderer::from_config(
            &cfg.carousel.render,
            &document,
            cfg.page.container_marker.as_deref(),
        )?;
        let scroll = match cfg.page.scroll_toggle.as_ref() {
            Some(toggle) => Some(ScrollVisibilityToggle::new(
                document.query_one(&toggle.marker)?,
                toggle.flag.as_str(),
            )),
            None => None,
        };
        let cycler = SlideCycler::with_start(slides.len(), cfg.carousel.start_index);
        let mut carousel = Self {
            document,
            slides,
            cycler,
            renderer,
            scroll,
            viewport: Viewport {
                height: cfg.page.viewport_height,
            },
        };
        info!(
            slides = carousel.len(),
            index = carousel.current_index(),
            "carousel mounted"
        );
        if !carousel.slides.is_empty() {
            carousel.render()?;
        }
        Ok(carousel)
    }

    pub fn len(&self) -> usize {
        self.cycler.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycler.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.cycler.current()
    }

    pub fn cycler(&self) -> SlideCycler {
        self.cycler
    }

    pub fn slides(&self) -> &[ElementId] {
        &self.slides
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Move to the next slide and render it. `Ok(None)` without slides.
    pub fn advance(&mut self) -> Result<Option<usize>, Error> {
        match self.cycler.advance() {
            Some(index) => {
                self.render()?;
                Ok(Some(index))
            }
            None => Ok(None),
        }
    }

    pub fn retreat(&mut self) -> Result<Option<usize>, Error> {
        match self.cycler.retreat() {
            Some(index) => {
                self.render()?;
                Ok(Some(index))
            }
            None => Ok(None),
        }
    }

    pub fn render(&mut self) -> Result<(), Error> {
        let index = self.cycler.current();
        self.renderer.render(&mut self.document, &self.slides, index)?;
        debug!(index, len = self.slides.len(), "rendered slide");
        Ok(())
    }

    /// Update the scroll flag; `None` when no element is tracked.
    pub fn on_scroll(&mut self, scroll_offset: f64) -> Result<Option<bool>, Error> {
        match self.scroll.as_ref() {
            Some(toggle) => toggle
                .on_scroll(&mut self.document, scroll_offset, self.viewport)
                .map(Some),
            None => Ok(None),
        }
    }
}
