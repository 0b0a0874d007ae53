// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the tour state machine and the UI toolkit.
//!
//! A [`Host`] owns the page: it resolves selectors, reads and writes element
//! attributes, toggles visibility, applies styles, lays popups out, scrolls,
//! animates, and exposes the URL fragment. The tour only decides *what* should
//! happen and in which order; all of these calls are assumed to succeed.
//!
//! Hosts also deliver three kinds of notifications back into the crate:
//!
//! - fragment changes, via [`Router::fragment_changed`](crate::Router::fragment_changed)
//!   once [`Host::listen_fragment_changes`] was called;
//! - scroll completions, via [`Router::scroll_finished`](crate::Router::scroll_finished)
//!   with the [`ScrollTicket`] passed to [`Host::scroll_into_view`];
//! - clicks on close buttons registered with [`Host::delegate_close`], via
//!   [`Router::close`](crate::Router::close).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Vec2;

use crate::placement::Alignment;
use crate::router::TourId;
use crate::style::StyleMap;

/// Page operations a tour needs from its UI toolkit.
pub trait Host {
    /// Handle to one element of the page.
    type Element: Clone + PartialEq + fmt::Debug;

    /// Returns the first element matching `selector`.
    fn select(&self, selector: &str) -> Option<Self::Element>;

    /// Returns the direct children of `element` in document order.
    fn children(&self, element: &Self::Element) -> Vec<Self::Element>;

    /// Reads an attribute.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Writes an attribute.
    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    /// Removes an attribute.
    fn remove_attribute(&mut self, element: &Self::Element, name: &str);

    /// Makes `element` visible.
    fn show(&mut self, element: &Self::Element);

    /// Hides `element`.
    fn hide(&mut self, element: &Self::Element);

    /// Takes `element` out of normal layout flow so it can be placed freely.
    fn detach_from_flow(&mut self, element: &Self::Element);

    /// Applies `styles` to `element` immediately.
    fn apply_styles(&mut self, element: &Self::Element, styles: &StyleMap);

    /// Lays `element` out against `anchoring`.
    fn position(&mut self, element: &Self::Element, anchoring: Anchoring<'_, Self::Element>);

    /// Scrolls `element` into view, keeping `offset` between it and the
    /// viewport edge.
    ///
    /// The host must hand `ticket` back once scrolling has finished.
    fn scroll_into_view(&mut self, element: &Self::Element, offset: Vec2, ticket: ScrollTicket);

    /// Animates `element` towards `styles`.
    fn animate(&mut self, element: &Self::Element, styles: &StyleMap);

    /// Returns the current URL fragment, with or without its leading `#`.
    fn fragment(&self) -> String;

    /// Replaces the URL fragment. An empty string clears it.
    fn set_fragment(&mut self, fragment: &str);

    /// Starts delivering fragment changes to the router.
    ///
    /// Called once, when the first tour is registered.
    fn listen_fragment_changes(&mut self);

    /// Starts reporting clicks on elements matching `selector` inside `container`.
    fn delegate_close(&mut self, container: &Self::Element, selector: &str) {
        let _ = (container, selector);
    }

    /// Stops reporting close clicks for `container`.
    fn undelegate_close(&mut self, container: &Self::Element) {
        let _ = container;
    }
}

/// Where a popup is laid out.
#[derive(Debug, PartialEq)]
pub enum Anchoring<'a, E> {
    /// Against a target element.
    Target {
        /// The element the popup points to.
        target: &'a E,
        /// Popup edge / target edge pair.
        alignment: Alignment,
    },
    /// Centred in the viewport.
    ViewportCenter,
}

/// Token tying a scroll completion to the `show` call that requested it.
///
/// A ticket is stale once its tour has shown another popup or closed; stale
/// tickets are ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScrollTicket {
    pub(crate) tour: Option<TourId>,
    pub(crate) generation: u64,
}

impl ScrollTicket {
    /// Returns the tour that requested the scroll, if it is registered with a router.
    #[must_use]
    pub fn tour(&self) -> Option<TourId> {
        self.tour
    }
}

/// An input event whose default action can be suppressed.
pub trait Cancelable {
    /// Suppresses the event's default action (for example following a link).
    fn prevent_default(&mut self);
}

impl Cancelable for bool {
    /// Records the suppression in the flag itself.
    fn prevent_default(&mut self) {
        *self = true;
    }
}
