// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tour configuration.

use alloc::string::String;

use kurbo::Vec2;

use crate::error::ConfigError;
use crate::style::{Animations, StyleMap, StyleValue};

/// Selector for close buttons inside a tour container, unless configured otherwise.
///
/// Markup that marks its close buttons with another class, such as
/// `.escort-close`, sets [`TourConfig::close_selector`] instead.
pub const DEFAULT_CLOSE_SELECTOR: &str = ".tour-close";

/// Options recognised by [`Tour::new`](crate::Tour::new).
///
/// Every field has a default; start from [`TourConfig::default`] and override
/// what you need with the `with_*` methods. The configuration is validated
/// when the tour is constructed.
///
/// ```
/// use kurbo::Vec2;
/// use understory_tour::TourConfig;
///
/// let config = TourConfig::default()
///     .with_offset(Vec2::new(0.0, 100.0))
///     .with_persist_fragment(true);
/// assert!(config.position);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TourConfig {
    /// Whether the host should position popups (relative to their target, or
    /// centred in the viewport). Defaults to `true`.
    pub position: bool,
    /// Styles applied to a popup right after it is shown, before its reveal
    /// animation. Defaults to `{opacity: 0}`.
    pub reset_styles: StyleMap,
    /// Default scroll-into-view offset. Defaults to `(20, 20)`.
    pub offset: Vec2,
    /// Reveal animation per placement.
    pub animations: Animations,
    /// Write the shown popup's identifier to the URL fragment. Defaults to `false`.
    pub persist_fragment: bool,
    /// Selector for elements inside the container that close the tour.
    /// Defaults to [`DEFAULT_CLOSE_SELECTOR`].
    pub close_selector: String,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            position: true,
            reset_styles: StyleMap::new().with("opacity", StyleValue::Absolute(0.0)),
            offset: Vec2::new(20.0, 20.0),
            animations: Animations::default(),
            persist_fragment: false,
            close_selector: String::from(DEFAULT_CLOSE_SELECTOR),
        }
    }
}

impl TourConfig {
    /// Sets whether popups are positioned by the host.
    #[must_use]
    pub fn with_position(mut self, position: bool) -> Self {
        self.position = position;
        self
    }

    /// Sets the reset styles.
    #[must_use]
    pub fn with_reset_styles(mut self, styles: StyleMap) -> Self {
        self.reset_styles = styles;
        self
    }

    /// Sets the default scroll-into-view offset.
    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the reveal animations.
    #[must_use]
    pub fn with_animations(mut self, animations: Animations) -> Self {
        self.animations = animations;
        self
    }

    /// Sets whether `show` writes the popup identifier to the URL fragment.
    #[must_use]
    pub fn with_persist_fragment(mut self, persist: bool) -> Self {
        self.persist_fragment = persist;
        self
    }

    /// Sets the close-button selector.
    #[must_use]
    pub fn with_close_selector(mut self, selector: impl Into<String>) -> Self {
        self.close_selector = selector.into();
        self
    }

    /// Checks the configuration for values no host could apply.
    ///
    /// - The offset must be finite.
    /// - Reset styles must be absolute; there is no meaningful "current"
    ///   value to add a delta to before the popup is revealed.
    /// - Every style value must be finite.
    /// - The close selector must not be empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.offset.is_finite() {
            return Err(ConfigError::NonFiniteOffset);
        }
        for (property, value) in self.reset_styles.iter() {
            if matches!(value, StyleValue::Relative(_)) {
                return Err(ConfigError::RelativeResetStyle {
                    property: property.into(),
                });
            }
        }
        let all_styles = core::iter::once(&self.reset_styles).chain(self.animations.iter());
        for styles in all_styles {
            if let Some((property, _)) = styles.iter().find(|(_, v)| !v.is_finite()) {
                return Err(ConfigError::NonFiniteStyle {
                    property: property.into(),
                });
            }
        }
        if self.close_selector.trim().is_empty() {
            return Err(ConfigError::EmptyCloseSelector);
        }
        Ok(())
    }
}
