// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;
use core::fmt;

/// Errors reported by tour construction and navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TourError {
    /// The container selector matched no element.
    ContainerNotFound {
        /// The selector that was looked up.
        selector: String,
    },
    /// A container child has no `id` attribute.
    MissingId {
        /// Position of the child within the container.
        index: usize,
    },
    /// Two container children share an `id`.
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },
    /// A popup attribute could not be parsed.
    InvalidAttribute {
        /// Identifier of the popup carrying the attribute.
        popup: String,
        /// Attribute name.
        name: String,
        /// Raw attribute value.
        value: String,
    },
    /// `show` was called with an index outside the collection.
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of popups in the tour.
        len: usize,
    },
    /// No popup has the requested identifier.
    PopupNotFound {
        /// Requested identifier.
        id: String,
    },
    /// The tour configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerNotFound { selector } => {
                write!(f, "no tour container matches `{selector}`")
            }
            Self::MissingId { index } => write!(f, "popup at index {index} has no `id`"),
            Self::DuplicateId { id } => write!(f, "popup id `{id}` is used more than once"),
            Self::InvalidAttribute { popup, name, value } => {
                write!(f, "popup `{popup}` has invalid `{name}` value `{value}`")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "popup index {index} is out of range for a tour of {len}")
            }
            Self::PopupNotFound { id } => write!(f, "no popup with id `{id}`"),
            Self::Config(err) => write!(f, "invalid tour configuration: {err}"),
        }
    }
}

impl core::error::Error for TourError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for TourError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Reasons a [`TourConfig`](crate::TourConfig) is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The default scroll offset has a NaN or infinite component.
    NonFiniteOffset,
    /// A reset style uses a relative (`+=`/`-=`) value.
    RelativeResetStyle {
        /// The offending property.
        property: String,
    },
    /// A style value is NaN or infinite.
    NonFiniteStyle {
        /// The offending property.
        property: String,
    },
    /// The close selector is empty.
    EmptyCloseSelector,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteOffset => f.write_str("scroll offset must be finite"),
            Self::RelativeResetStyle { property } => {
                write!(f, "reset style `{property}` must be an absolute value")
            }
            Self::NonFiniteStyle { property } => {
                write!(f, "style `{property}` must be finite")
            }
            Self::EmptyCloseSelector => f.write_str("close selector must not be empty"),
        }
    }
}

impl core::error::Error for ConfigError {}
