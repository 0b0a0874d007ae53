// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup placement and the anchor-alignment table.
//!
//! A [`Placement`] names the side of its target a popup sits on. Each placement
//! maps to a fixed [`Alignment`]: the edge of the popup (`my`) that meets the
//! edge of the anchor (`at`). For example [`Placement::Bottom`] aligns the
//! popup's top edge with the target's bottom edge.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_tour::{Edge, Placement};
//!
//! let alignment = Placement::Bottom.alignment();
//! assert_eq!((alignment.my, alignment.at), (Edge::Top, Edge::Bottom));
//!
//! // A 40x20 popup under a 100x10 target is centred horizontally.
//! let origin = alignment.origin(Size::new(40.0, 20.0), Rect::new(0.0, 0.0, 100.0, 10.0));
//! assert_eq!(origin, Point::new(30.0, 10.0));
//! ```

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect, Size, Vec2};

/// The side of its target a popup is placed on.
///
/// The markup spelling is lowercase: `left`, `right`, `top`, `bottom`, and
/// `default` for [`Placement::Center`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Placement {
    /// To the left of the target.
    Left,
    /// To the right of the target.
    Right,
    /// Above the target.
    Top,
    /// Below the target.
    #[default]
    Bottom,
    /// Centred on the target, or on the viewport when there is no target.
    #[cfg_attr(feature = "serde", serde(rename = "default", alias = "center"))]
    Center,
}

impl Placement {
    /// All placements, in table order.
    pub const ALL: [Self; 5] = [
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::Center,
    ];

    /// Returns the anchor alignment used for this placement.
    #[must_use]
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::Left => Alignment::new(Edge::Right, Edge::Left),
            Self::Right => Alignment::new(Edge::Left, Edge::Right),
            Self::Top => Alignment::new(Edge::Bottom, Edge::Top),
            Self::Bottom => Alignment::new(Edge::Top, Edge::Bottom),
            Self::Center => Alignment::new(Edge::Center, Edge::Center),
        }
    }

    /// Returns the markup spelling of this placement.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Center => "default",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "default" | "center" => Ok(Self::Center),
            _ => Err(ParsePlacementError),
        }
    }
}

/// Error returned when a string is not a known [`Placement`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParsePlacementError;

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of `left`, `right`, `top`, `bottom`, `default`")
    }
}

impl core::error::Error for ParsePlacementError {}

/// One edge (or the centre) of a rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The left edge, vertically centred.
    Left,
    /// The right edge, vertically centred.
    Right,
    /// The top edge, horizontally centred.
    Top,
    /// The bottom edge, horizontally centred.
    Bottom,
    /// The centre point.
    Center,
}

impl Edge {
    /// Returns the reference point of this edge on `rect`.
    #[must_use]
    pub fn point_on(self, rect: Rect) -> Point {
        let center = rect.center();
        match self {
            Self::Left => Point::new(rect.x0, center.y),
            Self::Right => Point::new(rect.x1, center.y),
            Self::Top => Point::new(center.x, rect.y0),
            Self::Bottom => Point::new(center.x, rect.y1),
            Self::Center => center,
        }
    }

    /// Returns the offset of this edge's reference point from the origin of
    /// a rectangle of the given size.
    #[must_use]
    pub fn offset_in(self, size: Size) -> Vec2 {
        let half = Vec2::new(size.width / 2.0, size.height / 2.0);
        match self {
            Self::Left => Vec2::new(0.0, half.y),
            Self::Right => Vec2::new(size.width, half.y),
            Self::Top => Vec2::new(half.x, 0.0),
            Self::Bottom => Vec2::new(half.x, size.height),
            Self::Center => half,
        }
    }
}

/// A `my`/`at` anchor pair: the popup edge `my` is placed on the anchor edge `at`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alignment {
    /// Edge of the popup.
    pub my: Edge,
    /// Edge of the anchor (the target, or the viewport).
    pub at: Edge,
}

impl Alignment {
    /// Creates an alignment from a popup edge and an anchor edge.
    #[must_use]
    pub const fn new(my: Edge, at: Edge) -> Self {
        Self { my, at }
    }

    /// Returns the origin for a popup of size `popup` aligned against `anchor`.
    #[must_use]
    pub fn origin(self, popup: Size, anchor: Rect) -> Point {
        self.at.point_on(anchor) - self.my.offset_in(popup)
    }
}
