use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::document::{Easing, Transition};

pub const DEFAULT_SLIDE_MARKER: &str = "slide";
pub const DEFAULT_AUTOPLAY_PERIOD: Duration = Duration::from_millis(5000);

/// Layout of the page the carousel is mounted into.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct PageConfig {
    /// Marker class shared by every slide element.
    pub slide_marker: String,
    /// Slide labels in document order.
    pub slides: Vec<String>,
    /// Marker of the wrapping container moved by the translation variant.
    pub container_marker: Option<String>,
    /// Height of the visible viewport in px.
    pub viewport_height: f64,
    pub scroll_toggle: Option<ScrollToggleConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            slide_marker: DEFAULT_SLIDE_MARKER.to_string(),
            slides: Vec::new(),
            container_marker: None,
            viewport_height: 800.0,
            scroll_toggle: None,
        }
    }
}

impl PageConfig {
    fn validate(&self) -> Result<()> {
        ensure!(
            !self.slide_marker.trim().is_empty(),
            "page.slide-marker must not be empty"
        );
        ensure!(
            self.viewport_height > 0.0,
            "page.viewport-height must be positive"
        );
        if let Some(marker) = self.container_marker.as_deref() {
            ensure!(
                !marker.trim().is_empty(),
                "page.container-marker must not be empty"
            );
        }
        if let Some(toggle) = self.scroll_toggle.as_ref() {
            toggle.validate().context("invalid page.scroll-toggle")?;
        }
        Ok(())
    }
}

/// Element whose viewport intersection is mirrored into a class flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScrollToggleConfig {
    #[serde(default = "ScrollToggleConfig::default_marker")]
    pub marker: String,
    #[serde(default = "ScrollToggleConfig::default_flag")]
    pub flag: String,
    /// Document-space top of the tracked element in px.
    pub top: f64,
    pub height: f64,
}

impl ScrollToggleConfig {
    fn default_marker() -> String {
        "scroll-tracked".to_string()
    }

    fn default_flag() -> String {
        "visible".to_string()
    }

    fn validate(&self) -> Result<()> {
        ensure!(!self.marker.trim().is_empty(), "marker must not be empty");
        ensure!(!self.flag.trim().is_empty(), "flag must not be empty");
        ensure!(self.height >= 0.0, "height must not be negative");
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct AutoplayConfig {
    pub enabled: bool,
    #[serde(with = "humantime_serde")]
    pub period: Duration,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period: DEFAULT_AUTOPLAY_PERIOD,
        }
    }
}

/// How the current index is made visible.
///
/// The two variants are alternative configurations of the same widget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RenderConfig {
    /// Show exactly the current slide, hide the rest.
    Visibility,
    /// Slide the container by whole slide widths.
    Translation {
        #[serde(default = "RenderConfig::default_duration", with = "humantime_serde")]
        duration: Duration,
        #[serde(default)]
        easing: Easing,
    },
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::Visibility
    }
}

impl RenderConfig {
    const fn default_duration() -> Duration {
        Duration::from_millis(500)
    }

    /// Transition applied to the container, when the mode uses one.
    pub fn transition(&self) -> Option<Transition> {
        match self {
            Self::Visibility => None,
            Self::Translation { duration, easing } => Some(Transition {
                duration: *duration,
                easing: *easing,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub start_index: usize,
    /// Accept manual prev/next commands on stdin.
    pub controls: bool,
    pub autoplay: AutoplayConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    pub page: PageConfig,
    pub carousel: CarouselConfig,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        self.page.validate()?;
        ensure!(
            self.carousel.autoplay.period > Duration::ZERO,
            "carousel.autoplay.period must be greater than zero"
        );
        let slides = self.page.slides.len();
        ensure!(
            slides == 0 || self.carousel.start_index < slides,
            "carousel.start-index {} is outside the {} configured slides",
            self.carousel.start_index,
            slides
        );
        if let RenderConfig::Translation { .. } = self.carousel.render {
            ensure!(
                self.page.container_marker.is_some(),
                "translation mode requires page.container-marker"
            );
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_widget() {
        let cfg = Configuration::default();
        assert_eq!(cfg.page.slide_marker, "slide");
        assert!(cfg.carousel.autoplay.enabled);
        assert_eq!(cfg.carousel.autoplay.period, Duration::from_secs(5));
        assert_eq!(cfg.carousel.render, RenderConfig::Visibility);
        assert!(!cfg.carousel.controls);
    }

    #[test]
    fn translation_transition_defaults() {
        let render: RenderConfig = serde_yaml::from_str("mode: translation").unwrap();
        let t = render.transition().expect("translation has a transition");
        assert_eq!(t.duration, Duration::from_millis(500));
        assert_eq!(t.easing, Easing::EaseInOut);
        assert!(RenderConfig::Visibility.transition().is_none());
    }
}
