// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tour --heading-base-level=0

//! Understory Tour: a headless guided-tour state machine.
//!
//! A guided tour is a sequence of popup callouts laid over a page. Users step
//! through it by clicking, and any step can be deep-linked through the URL
//! fragment (`page#step-id`). This crate owns the navigation core:
//!
//! - which popup is current (at most one per tour),
//! - how that changes on [`Tour::show`], [`Tour::start`], [`Tour::close`] and on
//!   fragment changes,
//! - the lifecycle events fired around each transition.
//!
//! It does **not** touch a DOM. Every page operation (selecting elements,
//! showing and hiding them, positioning, scrolling, animating, reading the
//! fragment) goes through the [`Host`] trait, which a UI toolkit implements.
//! The crate decides *what* happens and in which order; the host does it.
//!
//! ## Pieces
//!
//! - [`PopupCollection`]: the ordered popups of a tour, read once from the
//!   container's children (see the [`popup`] module for the markup contract).
//! - [`Tour`]: the state machine. Tracks the current popup, appends and strips
//!   `href` suffixes, emits [`TourEvent`]s to handlers registered with
//!   [`Tour::on`].
//! - [`Router`]: the registry of all tours on a page. Routes fragment changes
//!   to the first tour that owns a popup with that identifier.
//!
//! ## Events
//!
//! | When                       | Event                    | Name            |
//! |----------------------------|--------------------------|-----------------|
//! | a popup is about to show   | [`TourEvent::Before`]    | `"<id>:before"` |
//! | a popup was shown          | [`TourEvent::Shown`]     | `"<id>"`        |
//! | a popup was hidden         | [`TourEvent::Hidden`]    | `"<id>:hide"`   |
//! | the tour was closed        | [`TourEvent::Closed`]    | `"hide"`        |
//!
//! Showing `c` while `b` is current fires `b:hide`, `c:before`, `c`, in that order.
//!
//! ## Host callbacks
//!
//! Three things happen asynchronously on the host side and are handed back
//! to the [`Router`]:
//!
//! - fragment changes → [`Router::fragment_changed`];
//! - scroll completions → [`Router::scroll_finished`], carrying the
//!   [`ScrollTicket`] from [`Host::scroll_into_view`]. Tickets issued before a
//!   later `show` or `close` are stale and ignored, so a reveal animation
//!   never runs for a popup that is no longer current;
//! - close-button clicks → [`Router::close`].
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: `debug` for transitions, `trace`
//! for ignored input, `warn` for popups whose target selector matches nothing
//! and for `href` values changed behind the tour's back.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to `kurbo`.
//! - `serde`: deserialize [`TourConfig`] and its parts from JSON-shaped input.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod placement;
pub mod popup;
pub mod router;
pub mod style;
pub mod tour;

#[cfg(test)]
mod test_host;

pub use config::TourConfig;
pub use error::{ConfigError, TourError};
pub use event::{HandlerId, Listeners, TourEvent};
pub use host::{Anchoring, Cancelable, Host, ScrollTicket};
pub use placement::{Alignment, Edge, ParsePlacementError, Placement};
pub use popup::{Popup, PopupCollection};
pub use router::{Router, TourId};
pub use style::{Animations, ParseStyleValueError, StyleMap, StyleValue};
pub use tour::Tour;
