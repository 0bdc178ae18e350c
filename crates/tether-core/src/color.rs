//! CSS colors for connector strokes.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
///
/// Accepts anything the `color` crate understands: named colors, hex
/// notation and the functional forms (`rgb()`, `hsl()`, `oklch()` ...).
/// Named colors keep their name when written back out.
///
/// # Examples
///
/// ```
/// use tether_core::color::Color;
///
/// let accent = Color::new("steelblue").unwrap();
/// assert_eq!(accent.to_string(), "steelblue");
///
/// let faded = Color::new("rgba(0, 0, 0, 0.25)").unwrap();
/// assert_eq!(faded.opacity(), 0.25);
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color(DynamicColor);

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected input.
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(Self)
            .map_err(|err| format!("invalid color `{css}`: {err}"))
    }

    /// Opacity between 0.0 and 1.0, written as `stroke-opacity`.
    pub fn opacity(&self) -> f32 {
        self.0.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("black is a CSS named color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_parse_forms() {
        assert!(Color::new("#336699").is_ok());
        assert!(Color::new("hsl(120, 50%, 50%)").is_ok());

        let err = Color::new("blurple").unwrap_err();
        assert!(err.contains("`blurple`"));
    }

    #[test]
    fn test_default_is_opaque_black() {
        let black = Color::default();
        assert_eq!(black.to_string(), "black");
        assert_approx_eq!(f32, black.opacity(), 1.0);
    }

    #[test]
    fn test_translucent_opacity() {
        let color = Color::new("rgba(255, 0, 0, 0.5)").unwrap();
        assert_approx_eq!(f32, color.opacity(), 0.5);
    }
}
