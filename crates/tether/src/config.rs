//! Configuration types for Tether connectors.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`OverlayConfig`] - How connector overlays are sized and stacked.
//! - [`ResizeConfig`] - Debounce delay for resize-driven updates.
//! - [`StyleConfig`] - Default stroke and scene rendering options.
//! - [`StrokeFields`] - Optional stroke settings, shared with scene files.
//!
//! # Example
//!
//! ```
//! # use tether::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.overlay().z_index(), 10);
//! assert!(config.style().default_stroke().unwrap().is_none());
//! ```

use std::time::Duration;

use serde::Deserialize;

use tether_core::{
    color::Color,
    line::MIN_EXTENT,
    stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle},
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Overlay configuration section.
    #[serde(default)]
    overlay: OverlayConfig,

    /// Resize configuration section.
    #[serde(default)]
    resize: ResizeConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(overlay: OverlayConfig, resize: ResizeConfig, style: StyleConfig) -> Self {
        Self {
            overlay,
            resize,
            style,
        }
    }

    /// Returns the overlay configuration.
    pub fn overlay(&self) -> &OverlayConfig {
        &self.overlay
    }

    /// Returns the resize configuration.
    pub fn resize(&self) -> &ResizeConfig {
        &self.resize
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Sizing and stacking of connector overlays.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Smallest overlay width and height.
    min_extent: f32,

    /// CSS `z-index` of every overlay.
    z_index: i32,
}

impl OverlayConfig {
    pub fn new(min_extent: f32, z_index: i32) -> Self {
        Self {
            min_extent,
            z_index,
        }
    }

    /// Returns the smallest overlay width and height.
    pub fn min_extent(&self) -> f32 {
        self.min_extent
    }

    /// Returns the stacking order of overlays.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            min_extent: MIN_EXTENT,
            z_index: 10,
        }
    }
}

/// Resize debounce settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Quiet period after the last resize signal, in milliseconds.
    debounce_ms: u32,
}

impl ResizeConfig {
    pub fn new(debounce_ms: u32) -> Self {
        Self { debounce_ms }
    }

    /// Returns the debounce delay in milliseconds.
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// Returns the debounce delay.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_ms))
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self { debounce_ms: 1 }
    }
}

/// Optional stroke settings, each as written in TOML.
///
/// Deserialized flat (`stroke_color`, `stroke_width`, `stroke_style`,
/// `stroke_cap`, `stroke_join`) so other tables can embed it with
/// `#[serde(flatten)]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StrokeFields {
    /// CSS color string.
    stroke_color: Option<String>,

    /// Width in pixels.
    stroke_width: Option<f32>,

    /// solid, dashed, dotted, dash-dot, dash-dot-dot or dash lengths.
    stroke_style: Option<String>,

    /// butt, round or square.
    stroke_cap: Option<String>,

    /// miter, round or bevel.
    stroke_join: Option<String>,
}

impl StrokeFields {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overrides `base` with every field that is set.
    ///
    /// # Errors
    ///
    /// Returns a message for the first field that does not parse.
    pub fn apply(&self, mut base: StrokeDefinition) -> Result<StrokeDefinition, String> {
        if let Some(color) = &self.stroke_color {
            base.set_color(Color::new(color)?);
        }
        if let Some(width) = self.stroke_width {
            base.set_width(width);
        }
        if let Some(style) = &self.stroke_style {
            base.set_style(style.parse::<StrokeStyle>()?);
        }
        if let Some(cap) = &self.stroke_cap {
            base.set_cap(cap.parse::<StrokeCap>()?);
        }
        if let Some(join) = &self.stroke_join {
            base.set_join(join.parse::<StrokeJoin>()?);
        }
        Ok(base)
    }
}

/// Default stroke and scene rendering options.
///
/// Stroke fields that are not set leave the line to be styled by its CSS
/// class. Setting any of them produces a default stroke applied to every
/// connector that does not carry its own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Default stroke fields.
    #[serde(flatten)]
    stroke: StrokeFields,

    /// Whether scene output draws element outlines.
    show_elements: bool,
}

impl StyleConfig {
    /// Returns whether scene output draws element outlines.
    pub fn show_elements(&self) -> bool {
        self.show_elements
    }

    /// Returns the raw stroke fields.
    pub fn stroke(&self) -> &StrokeFields {
        &self.stroke
    }

    /// Builds the configured default stroke, or `None` if no stroke field is set.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured stroke field cannot be parsed.
    pub fn default_stroke(&self) -> Result<Option<StrokeDefinition>, String> {
        if self.stroke.is_empty() {
            return Ok(None);
        }

        self.stroke
            .apply(StrokeDefinition::default())
            .map(Some)
            .map_err(|err| format!("Invalid stroke in config: {err}"))
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke: StrokeFields::default(),
            show_elements: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.overlay().min_extent(), 2.0);
        assert_eq!(config.overlay().z_index(), 10);
        assert_eq!(config.resize().debounce_ms(), 1);
        assert_eq!(config.resize().delay(), Duration::from_millis(1));
        assert!(config.style().show_elements());
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [overlay]
            z_index = 99

            [resize]
            debounce_ms = 150
            "#,
        )
        .unwrap();

        assert_eq!(config.overlay().z_index(), 99);
        assert_eq!(config.overlay().min_extent(), 2.0);
        assert_eq!(config.resize().debounce_ms(), 150);
        assert!(config.style().show_elements());
    }

    #[test]
    fn test_default_stroke_from_style() {
        let config: AppConfig = toml::from_str(
            r##"
            [style]
            stroke_color = "#336699"
            stroke_width = 3.0
            stroke_style = "dashed"
            stroke_cap = "round"
            stroke_join = "bevel"
            show_elements = false
            "##,
        )
        .unwrap();

        let stroke = config.style().default_stroke().unwrap().unwrap();
        assert_eq!(stroke.width(), 3.0);
        assert_eq!(*stroke.style(), StrokeStyle::Dashed);
        assert_eq!(stroke.cap(), StrokeCap::Round);
        assert_eq!(stroke.join(), StrokeJoin::Bevel);
        assert!(!config.style().show_elements());
    }

    #[test]
    fn test_invalid_stroke_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            stroke_color = "not-a-color"
            "#,
        )
        .unwrap();

        let err = config.style().default_stroke().unwrap_err();
        assert!(err.starts_with("Invalid stroke in config: invalid color"));
    }

    #[test]
    fn test_invalid_stroke_keywords() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            stroke_style = "wavy"
            "#,
        )
        .unwrap();
        let err = config.style().default_stroke().unwrap_err();
        assert!(err.contains("invalid stroke style `wavy`"));

        let fields: StrokeFields = toml::from_str("stroke_cap = \"pointy\"").unwrap();
        let err = fields.apply(StrokeDefinition::default()).unwrap_err();
        assert!(err.contains("invalid stroke cap"));
    }

    #[test]
    fn test_stroke_fields_override_base() {
        let fields: StrokeFields = toml::from_str("stroke_width = 4").unwrap();
        assert!(!fields.is_empty());
        assert!(StrokeFields::default().is_empty());

        let base = StrokeDefinition::new(Color::new("red").unwrap(), 1.0);
        let stroke = fields.apply(base).unwrap();
        assert_eq!(stroke.width(), 4.0);
        assert_eq!(stroke.color().to_string(), "red");
    }
}
