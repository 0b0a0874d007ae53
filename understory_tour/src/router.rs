// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fragment routing across tours.
//!
//! The [`Router`] is the registry of every tour on a page. It is created once
//! by the application and owns the tours registered with it. When the host
//! reports a URL-fragment change, the router asks each tour, in registration
//! order, whether the fragment names one of its popups; the first tour that
//! answers navigates there and later tours are not consulted. A user clearing
//! the fragment closes whatever tour is running; the clear written by a tour's
//! own `close` is not routed.
//!
//! ## Minimal example
//!
//! ```ignore
//! let mut router = Router::new();
//! let tour = Tour::new(&mut host, "#tour", TourConfig::default())?;
//! let id = router.register(&mut host, tour);
//!
//! // Host callbacks:
//! router.fragment_changed(&mut host);          // on `hashchange`
//! router.scroll_finished(&mut host, ticket);   // when a scroll completes
//! router.close(&mut host, id, Some(&mut ev));  // on a close-button click
//! ```

use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace, warn};

use crate::host::{Cancelable, Host, ScrollTicket};
use crate::tour::Tour;

/// Identifier of a tour registered with a [`Router`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TourId(usize);

impl TourId {
    /// Returns the registration position of the tour.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Registry of tours, in registration order.
pub struct Router<E> {
    tours: Vec<Tour<E>>,
}

impl<E: fmt::Debug> fmt::Debug for Router<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("tours", &self.tours.len())
            .finish_non_exhaustive()
    }
}

impl<E> Default for Router<E> {
    fn default() -> Self {
        Self { tours: Vec::new() }
    }
}

impl<E> Router<E> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered tours.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Returns `true` if no tour is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// Returns the tour registered as `id`.
    #[must_use]
    pub fn get(&self, id: TourId) -> Option<&Tour<E>> {
        self.tours.get(id.0)
    }

    /// Returns the tour registered as `id`, mutably.
    pub fn get_mut(&mut self, id: TourId) -> Option<&mut Tour<E>> {
        self.tours.get_mut(id.0)
    }

    /// Iterates over the registered tours in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TourId, &Tour<E>)> + '_ {
        self.tours.iter().enumerate().map(|(i, t)| (TourId(i), t))
    }
}

impl<E: Clone + PartialEq + fmt::Debug> Router<E> {
    /// Registers `tour` and returns its identifier.
    ///
    /// The first registration asks the host for fragment-change notifications
    /// and immediately routes the current fragment. An empty fragment closes
    /// nothing here, so a tour started before registration keeps running.
    pub fn register<H>(&mut self, host: &mut H, mut tour: Tour<E>) -> TourId
    where
        H: Host<Element = E>,
    {
        let id = TourId(self.tours.len());
        tour.set_id(host, id);
        let first = self.tours.is_empty();
        self.tours.push(tour);
        debug!("registered tour {}", id.0);
        if first {
            host.listen_fragment_changes();
            self.route(host);
        }
        id
    }

    /// Routes the current URL fragment to the first tour that has a popup with
    /// that identifier.
    ///
    /// Returns the matching tour and popup index. A tour already showing that
    /// popup is left as is.
    ///
    /// An empty fragment closes every running tour, unless it was cleared by
    /// a tour's own [`Tour::close`].
    pub fn fragment_changed<H>(&mut self, host: &mut H) -> Option<(TourId, usize)>
    where
        H: Host<Element = E>,
    {
        let fragment = host.fragment();
        let mut cleared_by_close = false;
        for tour in &mut self.tours {
            cleared_by_close |= tour.take_cleared_fragment();
        }
        if fragment.strip_prefix('#').unwrap_or(&fragment).is_empty() {
            if cleared_by_close {
                trace!("fragment cleared by a closing tour");
                return None;
            }
            for (position, tour) in self.tours.iter_mut().enumerate() {
                if tour.is_running() {
                    debug!("empty fragment closes tour {position}");
                    tour.close(host, None);
                }
            }
            return None;
        }
        self.route(host)
    }

    fn route<H>(&mut self, host: &mut H) -> Option<(TourId, usize)>
    where
        H: Host<Element = E>,
    {
        let Some((position, index)) = self
            .tours
            .iter()
            .enumerate()
            .find_map(|(i, tour)| tour.index_from_fragment(&*host).map(|index| (i, index)))
        else {
            trace!("fragment `{}` matches no tour", host.fragment());
            return None;
        };
        let tour = &mut self.tours[position];
        if tour.current_index() == Some(index) {
            trace!("tour {position} already shows popup {index}");
        } else {
            debug!("fragment routes to tour {position}, popup {index}");
            if let Err(err) = tour.navigate(host, index) {
                warn!("routing fragment to tour {position} failed: {err}");
                return None;
            }
        }
        Some((TourId(position), index))
    }

    /// Delivers a scroll completion to the tour that requested it.
    ///
    /// Returns `true` if the reveal animation ran.
    pub fn scroll_finished<H>(&mut self, host: &mut H, ticket: ScrollTicket) -> bool
    where
        H: Host<Element = E>,
    {
        match ticket.tour().and_then(|id| self.tours.get_mut(id.0)) {
            Some(tour) => tour.scroll_finished(host, ticket),
            None => {
                trace!("scroll ticket {ticket:?} belongs to no registered tour");
                false
            }
        }
    }

    /// Closes the tour registered as `id`. Returns `false` if there is none.
    pub fn close<H>(&mut self, host: &mut H, id: TourId, event: Option<&mut dyn Cancelable>) -> bool
    where
        H: Host<Element = E>,
    {
        match self.tours.get_mut(id.0) {
            Some(tour) => {
                tour.close(host, event);
                true
            }
            None => false,
        }
    }

    /// Returns the tour whose container is `container`.
    #[must_use]
    pub fn find_by_container(&self, container: &E) -> Option<TourId> {
        self.tours
            .iter()
            .position(|t| t.container() == container)
            .map(TourId)
    }
}
