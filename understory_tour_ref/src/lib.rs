// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tour_ref --heading-base-level=0

//! Understory Tour Reference Host.
//!
//! This crate provides [`RefHost`], a small in-memory implementation of
//! [`Host`] for tests, demos, and experimentation:
//! - Elements live in a flat table with attributes, a visibility flag,
//!   numeric styles, and a bounding rectangle.
//! - Selectors are limited to `#id` and `.class`.
//! - Positioning applies the requested [`Alignment`](understory_tour::Alignment)
//!   to the element's bounds; animations apply instantly.
//! - Fragment changes and scroll completions are queued and delivered to a
//!   [`Router`] by [`RefHost::run_until_idle`], the stand-in for a browser's
//!   event loop.
//! - Every mutating call is recorded as an [`Op`].
//!
//! It is intentionally *not* a layout engine: no flow layout, no scroll
//! containers, no timing.
//!
//! ```
//! use kurbo::Rect;
//! use understory_tour::{Router, Tour, TourConfig};
//! use understory_tour_ref::RefHost;
//!
//! let mut host = RefHost::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let tour = host.add(None, &[("id", "tour")]);
//! host.add(Some(tour), &[("id", "welcome")]);
//! host.add(Some(tour), &[("id", "finish")]);
//!
//! let tour = Tour::new(&mut host, "#tour", TourConfig::default()).unwrap();
//! let mut router = Router::new();
//! let id = router.register(&mut host, tour);
//!
//! // The user follows a deep link.
//! host.navigate("finish");
//! host.run_until_idle(&mut router);
//! assert_eq!(router.get(id).unwrap().current().unwrap().id(), "finish");
//! ```

#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use log::trace;
use understory_tour::{Alignment, Anchoring, Edge, Host, Router, ScrollTicket, StyleMap};

/// Handle to an element of a [`RefHost`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Mutating host call recorded by [`RefHost`].
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    /// An element was shown.
    Show(ElementId),
    /// An element was hidden.
    Hide(ElementId),
    /// An element was taken out of layout flow.
    Detach(ElementId),
    /// An attribute was written.
    SetAttribute {
        /// Element written to.
        element: ElementId,
        /// Attribute name.
        name: String,
        /// New value.
        value: String,
    },
    /// An attribute was removed.
    RemoveAttribute {
        /// Element written to.
        element: ElementId,
        /// Attribute name.
        name: String,
    },
    /// Styles were applied.
    Styles {
        /// Styled element.
        element: ElementId,
        /// Applied styles.
        styles: StyleMap,
    },
    /// An element was positioned.
    Position {
        /// Positioned element.
        element: ElementId,
        /// Its new origin.
        origin: Point,
    },
    /// An element was scrolled into view.
    Scroll {
        /// Scrolled element.
        element: ElementId,
        /// Requested offset.
        offset: Vec2,
    },
    /// An element was animated.
    Animate {
        /// Animated element.
        element: ElementId,
        /// Animation target styles.
        styles: StyleMap,
    },
    /// The fragment was written.
    SetFragment(String),
}

#[derive(Clone, Debug, Default)]
struct ElementData {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: BTreeMap<String, String>,
    shown: bool,
    out_of_flow: bool,
    bounds: Rect,
    styles: BTreeMap<String, f64>,
}

/// In-memory page implementing [`Host`].
#[derive(Debug)]
pub struct RefHost {
    elements: Vec<ElementData>,
    viewport: Rect,
    fragment: String,
    listening: bool,
    fragment_pending: bool,
    scrolls: Vec<ScrollTicket>,
    delegates: Vec<(ElementId, String)>,
    ops: Vec<Op>,
}

impl RefHost {
    /// Creates an empty page with the given viewport.
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self {
            elements: Vec::new(),
            viewport,
            fragment: String::new(),
            listening: false,
            fragment_pending: false,
            scrolls: Vec::new(),
            delegates: Vec::new(),
            ops: Vec::new(),
        }
    }

    /// Adds a visible element under `parent` (or at the top level).
    pub fn add(&mut self, parent: Option<ElementId>, attributes: &[(&str, &str)]) -> ElementId {
        let id = ElementId(self.elements.len());
        let mut data = ElementData {
            parent,
            shown: true,
            ..ElementData::default()
        };
        for (name, value) in attributes {
            data.attributes.insert((*name).into(), (*value).into());
        }
        self.elements.push(data);
        if let Some(parent) = parent {
            self.elements[parent.0].children.push(id);
        }
        id
    }

    /// Sets the bounding rectangle of `element`.
    pub fn set_bounds(&mut self, element: ElementId, bounds: Rect) {
        self.elements[element.0].bounds = bounds;
    }

    /// Returns the bounding rectangle of `element`.
    #[must_use]
    pub fn bounds(&self, element: ElementId) -> Rect {
        self.elements[element.0].bounds
    }

    /// Returns `true` if `element` and all its ancestors are shown.
    #[must_use]
    pub fn is_visible(&self, element: ElementId) -> bool {
        let mut cursor = Some(element);
        while let Some(id) = cursor {
            let data = &self.elements[id.0];
            if !data.shown {
                return false;
            }
            cursor = data.parent;
        }
        true
    }

    /// Returns `true` if `element` was taken out of layout flow.
    #[must_use]
    pub fn is_out_of_flow(&self, element: ElementId) -> bool {
        self.elements[element.0].out_of_flow
    }

    /// Reads an attribute.
    #[must_use]
    pub fn attr(&self, element: ElementId, name: &str) -> Option<&str> {
        self.elements[element.0].attributes.get(name).map(String::as_str)
    }

    /// Returns the current numeric value of a style property.
    #[must_use]
    pub fn style(&self, element: ElementId, property: &str) -> Option<f64> {
        self.elements[element.0].styles.get(property).copied()
    }

    /// Returns the first element matching `selector`.
    #[must_use]
    pub fn find(&self, selector: &str) -> Option<ElementId> {
        (0..self.elements.len())
            .map(ElementId)
            .find(|&id| self.matches(id, selector))
    }

    /// Returns the recorded operations.
    #[must_use]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Clears the recorded operations.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Returns the fragment without its leading `#`.
    #[must_use]
    pub fn current_fragment(&self) -> &str {
        &self.fragment
    }

    /// Simulates the user editing the URL fragment (or following a link).
    pub fn navigate(&mut self, fragment: &str) {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        self.write_fragment(fragment);
    }

    /// Returns `true` once if the fragment changed since the last call, while
    /// fragment changes are being listened for.
    pub fn take_fragment_change(&mut self) -> bool {
        core::mem::take(&mut self.fragment_pending)
    }

    /// Drains the scroll tickets waiting for completion.
    pub fn take_scrolls(&mut self) -> Vec<ScrollTicket> {
        core::mem::take(&mut self.scrolls)
    }

    /// Delivers queued fragment changes and scroll completions to `router`
    /// until none are left. Returns the number of notifications delivered.
    pub fn run_until_idle(&mut self, router: &mut Router<ElementId>) -> usize {
        let mut delivered = 0;
        loop {
            if self.take_fragment_change() {
                router.fragment_changed(self);
                delivered += 1;
                continue;
            }
            let tickets = self.take_scrolls();
            if tickets.is_empty() {
                return delivered;
            }
            for ticket in tickets {
                router.scroll_finished(self, ticket);
                delivered += 1;
            }
        }
    }

    /// Simulates a click on `element`.
    ///
    /// If it matches a close selector delegated by a tour container it sits
    /// in, that tour is closed. Returns `true` if the click's default action
    /// was prevented.
    pub fn click(&mut self, router: &mut Router<ElementId>, element: ElementId) -> bool {
        let container = self
            .delegates
            .iter()
            .find(|(container, selector)| {
                self.is_descendant(element, *container) && self.matches(element, selector)
            })
            .map(|(container, _)| *container);
        let Some(tour) = container.and_then(|c| router.find_by_container(&c)) else {
            trace!("click on {element:?} reaches no close delegate");
            return false;
        };
        let mut prevented = false;
        router.close(self, tour, Some(&mut prevented));
        prevented
    }

    fn matches(&self, element: ElementId, selector: &str) -> bool {
        let attributes = &self.elements[element.0].attributes;
        if let Some(id) = selector.strip_prefix('#') {
            attributes.get("id").is_some_and(|v| v == id)
        } else if let Some(class) = selector.strip_prefix('.') {
            attributes
                .get("class")
                .is_some_and(|v| v.split_whitespace().any(|c| c == class))
        } else {
            false
        }
    }

    fn is_descendant(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut cursor = self.elements[element.0].parent;
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.elements[id.0].parent;
        }
        false
    }

    fn write_fragment(&mut self, fragment: &str) {
        if self.fragment == fragment {
            return;
        }
        self.fragment = fragment.into();
        if self.listening {
            self.fragment_pending = true;
        }
    }

    fn restyle(&mut self, element: ElementId, styles: &StyleMap) {
        let current = &mut self.elements[element.0].styles;
        for (property, value) in styles.iter() {
            let old = current.get(property).copied().unwrap_or(0.0);
            current.insert(property.into(), value.apply(old));
        }
    }
}

impl Host for RefHost {
    type Element = ElementId;

    fn select(&self, selector: &str) -> Option<ElementId> {
        self.find(selector)
    }

    fn children(&self, element: &ElementId) -> Vec<ElementId> {
        self.elements[element.0].children.clone()
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.attr(*element, name).map(String::from)
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) {
        self.elements[element.0]
            .attributes
            .insert(name.into(), value.into());
        self.ops.push(Op::SetAttribute {
            element: *element,
            name: name.into(),
            value: value.into(),
        });
    }

    fn remove_attribute(&mut self, element: &ElementId, name: &str) {
        self.elements[element.0].attributes.remove(name);
        self.ops.push(Op::RemoveAttribute {
            element: *element,
            name: name.into(),
        });
    }

    fn show(&mut self, element: &ElementId) {
        self.elements[element.0].shown = true;
        self.ops.push(Op::Show(*element));
    }

    fn hide(&mut self, element: &ElementId) {
        self.elements[element.0].shown = false;
        self.ops.push(Op::Hide(*element));
    }

    fn detach_from_flow(&mut self, element: &ElementId) {
        self.elements[element.0].out_of_flow = true;
        self.ops.push(Op::Detach(*element));
    }

    fn apply_styles(&mut self, element: &ElementId, styles: &StyleMap) {
        self.restyle(*element, styles);
        self.ops.push(Op::Styles {
            element: *element,
            styles: styles.clone(),
        });
    }

    fn position(&mut self, element: &ElementId, anchoring: Anchoring<'_, ElementId>) {
        let (anchor, alignment) = match anchoring {
            Anchoring::Target { target, alignment } => (self.bounds(*target), alignment),
            Anchoring::ViewportCenter => (self.viewport, Alignment::new(Edge::Center, Edge::Center)),
        };
        let size: Size = self.bounds(*element).size();
        let origin = alignment.origin(size, anchor);
        self.set_bounds(*element, Rect::from_origin_size(origin, size));
        self.ops.push(Op::Position {
            element: *element,
            origin,
        });
    }

    fn scroll_into_view(&mut self, element: &ElementId, offset: Vec2, ticket: ScrollTicket) {
        self.scrolls.push(ticket);
        self.ops.push(Op::Scroll {
            element: *element,
            offset,
        });
    }

    fn animate(&mut self, element: &ElementId, styles: &StyleMap) {
        self.restyle(*element, styles);
        self.ops.push(Op::Animate {
            element: *element,
            styles: styles.clone(),
        });
    }

    fn fragment(&self) -> String {
        if self.fragment.is_empty() {
            String::new()
        } else {
            format!("#{}", self.fragment)
        }
    }

    fn set_fragment(&mut self, fragment: &str) {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        self.ops.push(Op::SetFragment(fragment.into()));
        self.write_fragment(fragment);
    }

    fn listen_fragment_changes(&mut self) {
        self.listening = true;
    }

    fn delegate_close(&mut self, container: &ElementId, selector: &str) {
        self.delegates.push((*container, selector.into()));
    }

    fn undelegate_close(&mut self, container: &ElementId) {
        self.delegates.retain(|(c, _)| c != container);
    }
}
