//! Named attachment positions and anchor point computation.
//!
//! An [`Attachment`] names one of nine locations on an element's bounding box:
//! the cartesian product of a vertical keyword (`top`, `middle`, `bottom`) and
//! a horizontal keyword (`left`, `middle`, `right`), written
//! `"<vertical>-<horizontal>"`.
//!
//! Two ways of turning a name into an attachment are offered:
//!
//! - [`Attachment::from_name_lenient`] never fails. Each axis whose keyword is
//!   not recognized falls back to `top` / `left`, so `"center-center"` behaves
//!   exactly like `"top-left"`.
//! - The [`FromStr`] implementation is strict and reports unknown names.
//!
//! # Example
//!
//! ```
//! use tether_core::anchor::Attachment;
//! use tether_core::geometry::{Bounds, Point};
//!
//! let bounds = Bounds::from_rect(0.0, 0.0, 10.0, 10.0);
//! let anchor = Attachment::BOTTOM_MIDDLE.anchor_point(bounds);
//! assert_eq!(anchor, Point::new(5.0, 10.0));
//!
//! let fallback = Attachment::from_name_lenient("center-center");
//! assert_eq!(fallback, Attachment::TOP_LEFT);
//! ```

use std::{fmt, str::FromStr};

use log::trace;
use thiserror::Error;

use crate::geometry::{Bounds, Point};

const SEPARATOR: char = '-';

/// Vertical component of an attachment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    /// Top edge (fallback)
    #[default]
    Top,
    /// Vertical center
    Middle,
    /// Bottom edge
    Bottom,
}

impl VerticalAnchor {
    /// Returns the keyword used in attachment names.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "top" => Some(Self::Top),
            "middle" => Some(Self::Middle),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// Selects the y-coordinate of `bounds` this anchor refers to.
    pub fn resolve(self, bounds: Bounds) -> f32 {
        match self {
            Self::Top => bounds.min_y(),
            Self::Middle => bounds.center_y(),
            Self::Bottom => bounds.max_y(),
        }
    }
}

/// Horizontal component of an attachment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAnchor {
    /// Left edge (fallback)
    #[default]
    Left,
    /// Horizontal center
    Middle,
    /// Right edge
    Right,
}

impl HorizontalAnchor {
    /// Returns the keyword used in attachment names.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "left" => Some(Self::Left),
            "middle" => Some(Self::Middle),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Selects the x-coordinate of `bounds` this anchor refers to.
    pub fn resolve(self, bounds: Bounds) -> f32 {
        match self {
            Self::Left => bounds.min_x(),
            Self::Middle => bounds.center_x(),
            Self::Right => bounds.max_x(),
        }
    }
}

/// One of the nine named positions a connector can attach to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attachment {
    vertical: VerticalAnchor,
    horizontal: HorizontalAnchor,
}

impl Attachment {
    pub const TOP_LEFT: Self = Self::new(VerticalAnchor::Top, HorizontalAnchor::Left);
    pub const TOP_MIDDLE: Self = Self::new(VerticalAnchor::Top, HorizontalAnchor::Middle);
    pub const TOP_RIGHT: Self = Self::new(VerticalAnchor::Top, HorizontalAnchor::Right);
    pub const MIDDLE_LEFT: Self = Self::new(VerticalAnchor::Middle, HorizontalAnchor::Left);
    pub const MIDDLE_MIDDLE: Self = Self::new(VerticalAnchor::Middle, HorizontalAnchor::Middle);
    pub const MIDDLE_RIGHT: Self = Self::new(VerticalAnchor::Middle, HorizontalAnchor::Right);
    pub const BOTTOM_LEFT: Self = Self::new(VerticalAnchor::Bottom, HorizontalAnchor::Left);
    pub const BOTTOM_MIDDLE: Self = Self::new(VerticalAnchor::Bottom, HorizontalAnchor::Middle);
    pub const BOTTOM_RIGHT: Self = Self::new(VerticalAnchor::Bottom, HorizontalAnchor::Right);

    /// All nine attachments, row by row from the top-left corner.
    pub const ALL: [Self; 9] = [
        Self::TOP_LEFT,
        Self::TOP_MIDDLE,
        Self::TOP_RIGHT,
        Self::MIDDLE_LEFT,
        Self::MIDDLE_MIDDLE,
        Self::MIDDLE_RIGHT,
        Self::BOTTOM_LEFT,
        Self::BOTTOM_MIDDLE,
        Self::BOTTOM_RIGHT,
    ];

    pub const fn new(vertical: VerticalAnchor, horizontal: HorizontalAnchor) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Parses an attachment name without ever failing.
    ///
    /// Only the first two `-`-separated keywords are considered. An axis whose
    /// keyword is missing or unknown falls back to [`VerticalAnchor::Top`] or
    /// [`HorizontalAnchor::Left`].
    pub fn from_name_lenient(name: &str) -> Self {
        let mut keywords = name.split(SEPARATOR);
        let vertical = keywords.next().and_then(VerticalAnchor::from_keyword);
        let horizontal = keywords.next().and_then(HorizontalAnchor::from_keyword);

        if vertical.is_none() || horizontal.is_none() {
            trace!(name; "Attachment name not fully recognized, using fallback");
        }

        Self {
            vertical: vertical.unwrap_or_default(),
            horizontal: horizontal.unwrap_or_default(),
        }
    }

    /// Returns the vertical component
    pub fn vertical(self) -> VerticalAnchor {
        self.vertical
    }

    /// Returns the horizontal component
    pub fn horizontal(self) -> HorizontalAnchor {
        self.horizontal
    }

    /// Computes the anchor point of this attachment on `bounds`.
    pub fn anchor_point(self, bounds: Bounds) -> Point {
        Point::new(
            self.horizontal.resolve(bounds),
            self.vertical.resolve(bounds),
        )
    }
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            self.vertical.keyword(),
            self.horizontal.keyword()
        )
    }
}

/// Error returned by the strict [`FromStr`] implementation of [`Attachment`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "invalid attachment `{name}`, expected `<top|middle|bottom>-<left|middle|right>`"
)]
pub struct AttachmentParseError {
    name: String,
}

impl AttachmentParseError {
    /// Returns the rejected name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Attachment {
    type Err = AttachmentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || AttachmentParseError {
            name: s.to_string(),
        };

        let (vertical, horizontal) = s.split_once(SEPARATOR).ok_or_else(err)?;
        let vertical = VerticalAnchor::from_keyword(vertical).ok_or_else(err)?;
        let horizontal = HorizontalAnchor::from_keyword(horizontal).ok_or_else(err)?;

        Ok(Self::new(vertical, horizontal))
    }
}
