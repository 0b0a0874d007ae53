// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tour lifecycle events and the subscription table.
//!
//! Events have a string form that matches the fragment-friendly naming used in
//! page scripts:
//!
//! | Event                       | Name            |
//! |-----------------------------|-----------------|
//! | [`TourEvent::Before`]       | `"<id>:before"` |
//! | [`TourEvent::Shown`]        | `"<id>"`        |
//! | [`TourEvent::Hidden`]       | `"<id>:hide"`   |
//! | [`TourEvent::Closed`]       | `"hide"`        |
//!
//! ```
//! use understory_tour::TourEvent;
//!
//! assert_eq!(TourEvent::parse("intro:before"), TourEvent::Before("intro".into()));
//! assert_eq!(TourEvent::Hidden("intro".into()).to_string(), "intro:hide");
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

const BEFORE_SUFFIX: &str = ":before";
const HIDE_SUFFIX: &str = ":hide";
const CLOSED_NAME: &str = "hide";

/// A tour lifecycle event. Also used as the subscription key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TourEvent {
    /// The popup with this identifier is about to be shown.
    Before(String),
    /// The popup with this identifier was shown.
    Shown(String),
    /// The popup with this identifier was hidden.
    Hidden(String),
    /// The tour was closed.
    Closed,
}

impl TourEvent {
    /// Parses an event name.
    ///
    /// `"hide"` always parses as [`TourEvent::Closed`], so a popup whose
    /// identifier is literally `hide` can only be observed through
    /// [`TourEvent::Shown`] constructed directly.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == CLOSED_NAME {
            Self::Closed
        } else if let Some(id) = name.strip_suffix(BEFORE_SUFFIX) {
            Self::Before(id.into())
        } else if let Some(id) = name.strip_suffix(HIDE_SUFFIX) {
            Self::Hidden(id.into())
        } else {
            Self::Shown(name.into())
        }
    }

    /// Returns the popup identifier this event concerns, if any.
    #[must_use]
    pub fn popup_id(&self) -> Option<&str> {
        match self {
            Self::Before(id) | Self::Shown(id) | Self::Hidden(id) => Some(id),
            Self::Closed => None,
        }
    }
}

impl fmt::Display for TourEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before(id) => write!(f, "{id}{BEFORE_SUFFIX}"),
            Self::Shown(id) => f.write_str(id),
            Self::Hidden(id) => write!(f, "{id}{HIDE_SUFFIX}"),
            Self::Closed => f.write_str(CLOSED_NAME),
        }
    }
}

/// Handle returned by [`Listeners::add`], used to remove the handler again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

type Handler = Box<dyn FnMut(&TourEvent)>;

/// Event subscription table: event → handlers in subscription order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    table: HashMap<TourEvent, Vec<(HandlerId, Handler)>>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("events", &self.table.len())
            .field("handlers", &self.len())
            .finish_non_exhaustive()
    }
}

impl Listeners {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `handler` to `event`.
    pub fn add(&mut self, event: TourEvent, handler: impl FnMut(&TourEvent) + 'static) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.table
            .entry(event)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Unsubscribes the handler `id` from `event`. Returns `true` if it was subscribed.
    pub fn remove(&mut self, event: &TourEvent, id: HandlerId) -> bool {
        let Some(handlers) = self.table.get_mut(event) else {
            return false;
        };
        let Some(pos) = handlers.iter().position(|(h, _)| *h == id) else {
            return false;
        };
        handlers.remove(pos);
        if handlers.is_empty() {
            self.table.remove(event);
        }
        true
    }

    /// Runs every handler subscribed to `event`, in subscription order.
    ///
    /// Returns the number of handlers run.
    pub fn emit(&mut self, event: &TourEvent) -> usize {
        let Some(handlers) = self.table.get_mut(event) else {
            return 0;
        };
        for (_, handler) in handlers.iter_mut() {
            handler(event);
        }
        handlers.len()
    }

    /// Returns the number of handlers subscribed to `event`.
    #[must_use]
    pub fn count(&self, event: &TourEvent) -> usize {
        self.table.get(event).map_or(0, Vec::len)
    }

    /// Returns the total number of subscribed handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }

    /// Returns `true` if no handlers are subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
