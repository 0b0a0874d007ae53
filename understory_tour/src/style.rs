// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style maps for popup reset styles and reveal animations.
//!
//! A [`StyleMap`] is a small map from style property names (`opacity`,
//! `left`, `top`, ...) to [`StyleValue`]s. Values are either absolute or
//! relative to the property's current value, mirroring the `"+=20px"` /
//! `"-=20px"` notation used by animation toolkits:
//!
//! ```
//! use understory_tour::{StyleMap, StyleValue};
//!
//! let reveal = StyleMap::new()
//!     .with("top", "+=20px".parse().unwrap())
//!     .with("opacity", StyleValue::Absolute(1.0));
//!
//! assert_eq!(reveal.get("top"), Some(StyleValue::Relative(20.0)));
//! assert_eq!(reveal.get("top").unwrap().apply(100.0), 120.0);
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::placement::Placement;

/// A single style value.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "repr::StyleValueRepr"))]
pub enum StyleValue {
    /// Set the property to this value.
    Absolute(f64),
    /// Add this delta to the property's current value.
    Relative(f64),
}

impl StyleValue {
    /// Returns the new property value given its `current` value.
    #[must_use]
    pub fn apply(self, current: f64) -> f64 {
        match self {
            Self::Absolute(value) => value,
            Self::Relative(delta) => current + delta,
        }
    }

    /// Returns `true` if the underlying number is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            Self::Absolute(v) | Self::Relative(v) => v.is_finite(),
        }
    }
}

impl FromStr for StyleValue {
    type Err = ParseStyleValueError;

    /// Parses `"12"`, `"12px"`, `"+=20px"` and `"-=20px"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (relative, sign, rest) = if let Some(rest) = s.strip_prefix("+=") {
            (true, 1.0, rest)
        } else if let Some(rest) = s.strip_prefix("-=") {
            (true, -1.0, rest)
        } else {
            (false, 1.0, s)
        };
        let number = rest.trim().strip_suffix("px").unwrap_or(rest).trim();
        let value: f64 = number.parse().map_err(|_| ParseStyleValueError)?;
        Ok(if relative {
            Self::Relative(sign * value)
        } else {
            Self::Absolute(value)
        })
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Absolute(v) => write!(f, "{v}"),
            Self::Relative(d) if d < 0.0 => write!(f, "-={}", -d),
            Self::Relative(d) => write!(f, "+={d}"),
        }
    }
}

/// Error returned when a string is not a valid [`StyleValue`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseStyleValueError;

impl fmt::Display for ParseStyleValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected a number, optionally prefixed by `+=`/`-=` and suffixed by `px`")
    }
}

impl core::error::Error for ParseStyleValueError {}

#[cfg(feature = "serde")]
mod repr {
    use alloc::string::String;

    use super::{ParseStyleValueError, StyleValue};

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    pub(super) enum StyleValueRepr {
        Number(f64),
        Text(String),
    }

    impl TryFrom<StyleValueRepr> for StyleValue {
        type Error = ParseStyleValueError;

        fn try_from(repr: StyleValueRepr) -> Result<Self, Self::Error> {
            match repr {
                StyleValueRepr::Number(v) => Ok(Self::Absolute(v)),
                StyleValueRepr::Text(s) => s.parse(),
            }
        }
    }
}

/// An ordered map of style property names to values.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StyleMap {
    entries: BTreeMap<String, StyleValue>,
}

impl StyleMap {
    /// Creates an empty style map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns this map with `property` set to `value`.
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: StyleValue) -> Self {
        self.set(property, value);
        self
    }

    /// Sets `property` to `value`, replacing any previous value.
    pub fn set(&mut self, property: impl Into<String>, value: StyleValue) {
        self.entries.insert(property.into(), value);
    }

    /// Returns the value for `property`, if set.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<StyleValue> {
        self.entries.get(property).copied()
    }

    /// Returns the number of properties in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map sets no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(property, value)` pairs in property-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, StyleValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Reveal animations keyed by placement.
///
/// Centred popups have no reveal animation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Animations {
    /// Animation for [`Placement::Left`].
    pub left: StyleMap,
    /// Animation for [`Placement::Right`].
    pub right: StyleMap,
    /// Animation for [`Placement::Top`].
    pub top: StyleMap,
    /// Animation for [`Placement::Bottom`].
    pub bottom: StyleMap,
}

impl Animations {
    /// Returns the reveal animation for `placement`, if any.
    #[must_use]
    pub fn for_placement(&self, placement: Placement) -> Option<&StyleMap> {
        match placement {
            Placement::Left => Some(&self.left),
            Placement::Right => Some(&self.right),
            Placement::Top => Some(&self.top),
            Placement::Bottom => Some(&self.bottom),
            Placement::Center => None,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &StyleMap> + '_ {
        [&self.left, &self.right, &self.top, &self.bottom].into_iter()
    }
}

impl Default for Animations {
    /// Slide 20px away from the target while fading in.
    fn default() -> Self {
        let slide = |property: &str, delta: f64| {
            StyleMap::new()
                .with(property, StyleValue::Relative(delta))
                .with("opacity", StyleValue::Absolute(1.0))
        };
        Self {
            left: slide("left", -20.0),
            right: slide("left", 20.0),
            top: slide("top", -20.0),
            bottom: slide("top", 20.0),
        }
    }
}
