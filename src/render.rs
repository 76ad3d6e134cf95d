use tracing::trace;

use crate::config::RenderConfig;
use crate::document::{Display, Document, ElementId, TranslateX, Transition};
use crate::error::Error;

/// Reflects the current slide index onto the document.
pub trait SlideRenderer {
    fn render(&self, doc: &mut Document, slides: &[ElementId], index: usize) -> Result<(), Error>;
}

/// Shows exactly the slide at the current index and hides every other slide.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityRenderer;

impl SlideRenderer for VisibilityRenderer {
    fn render(&self, doc: &mut Document, slides: &[ElementId], index: usize) -> Result<(), Error> {
        for (pos, id) in slides.iter().enumerate() {
            let display = if pos == index {
                Display::Block
            } else {
                Display::None
            };
            doc.get_mut(*id)?.style.display = display;
        }
        trace!(index, "visibility render");
        Ok(())
    }
}

/// Moves the wrapping container left by one container width per slide.
#[derive(Debug, Clone, Copy)]
pub struct TranslationRenderer {
    pub container: ElementId,
    pub transition: Transition,
}

impl TranslationRenderer {
    pub fn offset_for(index: usize) -> TranslateX {
        TranslateX(0.0 - index as f64 * 100.0)
    }
}

impl SlideRenderer for TranslationRenderer {
    fn render(&self, doc: &mut Document, slides: &[ElementId], index: usize) -> Result<(), Error> {
        if slides.is_empty() {
            return Ok(());
        }
        let offset = Self::offset_for(index);
        let style = &mut doc.get_mut(self.container)?.style;
        style.transition = Some(self.transition);
        style.transform = Some(offset);
        trace!(index, transform = %offset, "translation render");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Renderer {
    Visibility(VisibilityRenderer),
    Translation(TranslationRenderer),
}

impl Renderer {
    /// Resolve the configured mode against the mounted document.
    pub fn from_config(
        render: &RenderConfig,
        doc: &Document,
        container_marker: Option<&str>,
    ) -> Result<Self, Error> {
        match render.transition() {
            None => Ok(Self::Visibility(VisibilityRenderer)),
            Some(transition) => {
                let marker = container_marker
                    .ok_or_else(|| Error::MissingElement("<container>".to_string()))?;
                Ok(Self::Translation(TranslationRenderer {
                    container: doc.query_one(marker)?,
                    transition,
                }))
            }
        }
    }
}

impl SlideRenderer for Renderer {
    fn render(&self, doc: &mut Document, slides: &[ElementId], index: usize) -> Result<(), Error> {
        match self {
            Self::Visibility(r) => r.render(doc, slides, index),
            Self::Translation(r) => r.render(doc, slides, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Easing, Element};
    use std::time::Duration;

    fn page(n: usize) -> (Document, ElementId, Vec<ElementId>) {
        let mut doc = Document::new();
        let container = doc.push(Element::new("container").with_class("slider"));
        let slides = (0..n)
            .map(|i| doc.push(Element::new(format!("s{i}")).with_class("slide")))
            .collect();
        (doc, container, slides)
    }

    #[test]
    fn visibility_leaves_exactly_one_slide_shown() {
        let (mut doc, _, slides) = page(4);
        for index in 0..4 {
            VisibilityRenderer.render(&mut doc, &slides, index).unwrap();
            let shown: Vec<usize> = slides
                .iter()
                .enumerate()
                .filter(|(_, id)| doc.get(**id).unwrap().style.display == Display::Block)
                .map(|(pos, _)| pos)
                .collect();
            assert_eq!(shown, vec![index]);
        }
    }

    #[test]
    fn translation_offsets_container_by_whole_widths() {
        let (mut doc, container, slides) = page(3);
        let r = TranslationRenderer {
            container,
            transition: Transition {
                duration: Duration::from_millis(500),
                easing: Easing::EaseInOut,
            },
        };
        r.render(&mut doc, &slides, 2).unwrap();
        let style = &doc.get(container).unwrap().style;
        assert_eq!(style.transform, Some(TranslateX(-200.0)));
        assert_eq!(
            style.transition.map(|t| t.to_string()).as_deref(),
            Some("transform 0.5s ease-in-out")
        );
        for id in &slides {
            assert_eq!(doc.get(*id).unwrap().style.display, Display::Block);
        }
    }

    #[test]
    fn first_slide_offset_is_zero() {
        assert_eq!(
            TranslationRenderer::offset_for(0).to_string(),
            "translateX(0%)"
        );
    }

    #[test]
    fn translation_requires_container() {
        let (doc, _, _) = page(2);
        let render = RenderConfig::Translation {
            duration: Duration::from_millis(300),
            easing: Easing::Linear,
        };
        assert!(Renderer::from_config(&render, &doc, Some("slider")).is_ok());
        assert!(matches!(
            Renderer::from_config(&render, &doc, Some("carousel")),
            Err(Error::MissingElement(m)) if m == "carousel"
        ));
        assert!(Renderer::from_config(&render, &doc, None).is_err());
    }

    #[test]
    fn render_fails_on_foreign_element() {
        let (_, _, slides) = page(3);
        let mut small = Document::new();
        small.push(Element::new("only").with_class("slide"));
        assert!(matches!(
            VisibilityRenderer.render(&mut small, &slides, 0),
            Err(Error::StaleElement(_))
        ));
    }
}
