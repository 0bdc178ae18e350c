//! Stroke definitions for connector lines.
//!
//! A connector line takes its look either from a CSS class (set on the
//! `<line>` element and styled by the page) or from an explicit
//! [`StrokeDefinition`], which is written out as SVG presentation attributes.
//! Standalone SVG output has no stylesheet, so it relies on the latter.

use std::str::FromStr;

use crate::color::Color;

/// Declares a unit enum whose variants map one-to-one onto SVG keywords.
macro_rules! svg_keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($what:literal) {
            $($(#[$variant_meta:meta])* $variant:ident => $keyword:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &[Self] = &[$(Self::$variant),+];

            /// The SVG attribute value.
            pub fn keyword(self) -> &'static str {
                match self {
                    $(Self::$variant => $keyword),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.keyword() == s)
                    .ok_or_else(|| {
                        let valid: Vec<_> = Self::ALL.iter().map(|value| value.keyword()).collect();
                        format!("invalid {} `{s}`, valid values: {}", $what, valid.join(", "))
                    })
            }
        }
    };
}

svg_keyword_enum! {
    /// Shape drawn at both ends of the line (`stroke-linecap`).
    StrokeCap ("stroke cap") {
        #[default]
        Butt => "butt",
        Round => "round",
        Square => "square",
    }
}

svg_keyword_enum! {
    /// Corner shape (`stroke-linejoin`). A straight line has no corners, but
    /// the attribute is still written so dashes render consistently.
    StrokeJoin ("stroke join") {
        #[default]
        Miter => "miter",
        Round => "round",
        Bevel => "bevel",
    }
}

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    DashDotDot,
    /// Alternating dash and gap lengths, as in `stroke-dasharray`.
    Pattern(Vec<f32>),
}

impl StrokeStyle {
    /// The `stroke-dasharray` value, or `None` for a solid line.
    pub fn dasharray(&self) -> Option<String> {
        let lengths: &[f32] = match self {
            Self::Solid => return None,
            Self::Dashed => &[5.0, 5.0],
            Self::Dotted => &[2.0, 3.0],
            Self::DashDot => &[10.0, 5.0, 2.0, 5.0],
            Self::DashDotDot => &[10.0, 5.0, 2.0, 5.0, 2.0, 5.0],
            Self::Pattern(lengths) => lengths,
        };

        let lengths: Vec<String> = lengths.iter().map(f32::to_string).collect();
        Some(lengths.join(","))
    }
}

/// Parses comma or whitespace separated non-negative lengths.
fn parse_dash_lengths(s: &str) -> Option<Vec<f32>> {
    let lengths = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f32>()
                .ok()
                .filter(|length| length.is_finite() && *length >= 0.0)
        })
        .collect::<Option<Vec<_>>>()?;

    (!lengths.is_empty()).then_some(lengths)
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "dash-dot" => Ok(Self::DashDot),
            "dash-dot-dot" => Ok(Self::DashDotDot),
            _ => parse_dash_lengths(s).map(Self::Pattern).ok_or_else(|| {
                format!(
                    "invalid stroke style `{s}`, expected solid, dashed, dotted, dash-dot, \
                     dash-dot-dot or dash lengths such as `10,5`"
                )
            }),
        }
    }
}

/// Explicit stroke of a connector line.
///
/// # Examples
///
/// ```
/// use tether_core::color::Color;
/// use tether_core::stroke::{StrokeCap, StrokeDefinition, StrokeStyle};
///
/// let mut stroke = StrokeDefinition::new(Color::new("blue").unwrap(), 1.5);
/// stroke.set_style(StrokeStyle::Dashed);
/// stroke.set_cap(StrokeCap::Round);
///
/// let attributes = stroke.svg_attributes();
/// assert!(attributes.contains(&("stroke-linecap", "round".to_string())));
/// assert!(attributes.contains(&("stroke-dasharray", "5,5".to_string())));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// A solid stroke with butt caps and miter joins.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    pub fn set_join(&mut self, join: StrokeJoin) {
        self.join = join;
    }

    /// SVG presentation attributes for the `<line>`, in a fixed order.
    ///
    /// `stroke-dasharray` comes last and only for non-solid styles.
    pub fn svg_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = vec![
            ("stroke", self.color.to_string()),
            ("stroke-opacity", self.color.opacity().to_string()),
            ("stroke-width", self.width.to_string()),
            ("stroke-linecap", self.cap.keyword().to_string()),
            ("stroke-linejoin", self.join.keyword().to_string()),
        ];

        if let Some(dasharray) = self.style.dasharray() {
            attributes.push(("stroke-dasharray", dasharray));
        }

        attributes
    }
}

impl Default for StrokeDefinition {
    /// One pixel, solid black.
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stroke() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Miter);
    }

    #[test]
    fn test_solid_attributes_have_no_dasharray() {
        let stroke = StrokeDefinition::new(Color::new("red").unwrap(), 2.0);
        let attributes = stroke.svg_attributes();

        let names: Vec<_> = attributes.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "stroke",
                "stroke-opacity",
                "stroke-width",
                "stroke-linecap",
                "stroke-linejoin"
            ]
        );
        assert_eq!(attributes[0].1, "red");
        assert_eq!(attributes[2].1, "2");
    }

    #[test]
    fn test_named_styles() {
        assert_eq!("dotted".parse::<StrokeStyle>().unwrap().dasharray().unwrap(), "2,3");
        assert_eq!(
            "dash-dot-dot".parse::<StrokeStyle>().unwrap().dasharray().unwrap(),
            "10,5,2,5,2,5"
        );
        assert_eq!("solid".parse::<StrokeStyle>().unwrap().dasharray(), None);
    }

    #[test]
    fn test_dash_length_patterns() {
        assert_eq!(
            "10, 5 2.5".parse::<StrokeStyle>().unwrap(),
            StrokeStyle::Pattern(vec![10.0, 5.0, 2.5])
        );
        assert_eq!(
            StrokeStyle::Pattern(vec![4.0, 1.5]).dasharray().unwrap(),
            "4,1.5"
        );
    }

    #[test]
    fn test_rejects_unknown_styles() {
        for input in ["wavy", "", "5,-1", "5,,x", "NaN"] {
            let err = input.parse::<StrokeStyle>().unwrap_err();
            assert!(err.contains("invalid stroke style"), "{input}: {err}");
        }
    }

    #[test]
    fn test_cap_and_join_keywords() {
        for cap in StrokeCap::ALL {
            assert_eq!(cap.keyword().parse::<StrokeCap>().unwrap(), *cap);
        }
        assert_eq!("bevel".parse::<StrokeJoin>().unwrap(), StrokeJoin::Bevel);

        let err = "pointy".parse::<StrokeCap>().unwrap_err();
        assert_eq!(err, "invalid stroke cap `pointy`, valid values: butt, round, square");
        assert!("sharp".parse::<StrokeJoin>().unwrap_err().contains("invalid stroke join"));
    }
}
