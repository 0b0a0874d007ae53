// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tour state machine.
//!
//! ## Transitions
//!
//! A [`Tour`] has at most one current popup. [`Tour::show`] moves to another
//! popup in a fixed order:
//!
//! 1. the current popup (if any) emits `{id}:hide`, gets its appended `href`
//!    suffix stripped, and is hidden;
//! 2. the new popup becomes current;
//! 3. it emits `{id}:before`, and its `append-hash` is appended to its target's `href`;
//! 4. it is shown with the reset styles applied;
//! 5. it is positioned (if enabled);
//! 6. it is scrolled into view; its reveal animation runs when the host reports
//!    the scroll finished;
//! 7. it emits `{id}`.
//!
//! [`Tour::close`] hides everything, clears the fragment and emits `hide`.
//!
//! ## Example
//!
//! ```ignore
//! let mut tour = Tour::new(&mut host, "#tour", TourConfig::default())?;
//! tour.on(TourEvent::Shown("finish".into()), |_| println!("done"));
//! tour.start(&mut host)?;
//! ```

use alloc::format;
use alloc::string::String;

use log::{debug, trace, warn};

use crate::config::TourConfig;
use crate::error::TourError;
use crate::event::{HandlerId, Listeners, TourEvent};
use crate::host::{Anchoring, Cancelable, Host, ScrollTicket};
use crate::popup::{Popup, PopupCollection};
use crate::router::TourId;

/// An `href` suffix appended while a popup is visible.
#[derive(Clone, Debug)]
struct AppendedHash<E> {
    target: E,
    suffix: String,
    had_href: bool,
}

/// One guided tour over the children of a container element.
#[derive(Debug)]
pub struct Tour<E> {
    id: Option<TourId>,
    container: E,
    popups: PopupCollection<E>,
    config: TourConfig,
    current: Option<usize>,
    running: bool,
    appended: Option<AppendedHash<E>>,
    generation: u64,
    cleared_fragment: bool,
    listeners: Listeners,
}

impl<E: Clone + PartialEq + core::fmt::Debug> Tour<E> {
    /// Builds a tour over the children of the element matching `selector`.
    ///
    /// Validates `config`, builds the popup collection, registers the close
    /// button delegate, and hides the container. The tour is not running
    /// until [`Tour::start`] (or a fragment change routed by a
    /// [`Router`](crate::Router)) shows a popup.
    pub fn new<H>(host: &mut H, selector: &str, config: TourConfig) -> Result<Self, TourError>
    where
        H: Host<Element = E>,
    {
        config.validate()?;
        let container = host
            .select(selector)
            .ok_or_else(|| TourError::ContainerNotFound {
                selector: selector.into(),
            })?;
        let popups = PopupCollection::build(host, &container)?;
        host.delegate_close(&container, &config.close_selector);
        host.hide(&container);
        debug!("tour `{selector}` built with {} popups", popups.len());
        Ok(Self {
            id: None,
            container,
            popups,
            config,
            current: None,
            running: false,
            appended: None,
            generation: 0,
            cleared_fragment: false,
            listeners: Listeners::new(),
        })
    }

    /// Starts the tour.
    ///
    /// Shows the popup named by the URL fragment, or the first popup. Does
    /// nothing if a popup is already current, so a page may call this more
    /// than once.
    pub fn start<H>(&mut self, host: &mut H) -> Result<&mut Self, TourError>
    where
        H: Host<Element = E>,
    {
        if self.current.is_some() {
            trace!("start ignored: tour already showing a popup");
            return Ok(self);
        }
        let index = self.index_from_fragment(&*host).unwrap_or(0);
        self.navigate(host, index)
    }

    /// Shows the popup at `index`, hiding the current one first.
    pub fn show<H>(&mut self, host: &mut H, index: usize) -> Result<&mut Self, TourError>
    where
        H: Host<Element = E>,
    {
        let popup = self.popups.get(index).ok_or(TourError::IndexOutOfRange {
            index,
            len: self.popups.len(),
        })?;
        let element = popup.element().clone();
        let id = String::from(popup.id());
        let placement = popup.placement();
        let offset = popup.offset_or(self.config.offset);
        let target_selector = popup.target().map(String::from);
        let append = popup.append_hash().map(String::from);

        self.hide_current(host);
        self.current = Some(index);
        self.generation = self.generation.wrapping_add(1);
        debug!("showing popup `{id}` ({index})");

        self.listeners.emit(&TourEvent::Before(id.clone()));

        let target = match &target_selector {
            Some(selector) => {
                let found = host.select(selector);
                if found.is_none() {
                    warn!("popup `{id}` points to `{selector}`, which matches no element");
                }
                found
            }
            None => None,
        };
        if let (Some(value), Some(target)) = (&append, &target) {
            self.append_hash(host, target, value);
        }

        host.show(&element);
        host.apply_styles(&element, &self.config.reset_styles);
        self.popups.set_visible(index, true);

        if self.config.position {
            match (&target_selector, &target) {
                (_, Some(target)) => host.position(
                    &element,
                    Anchoring::Target {
                        target,
                        alignment: placement.alignment(),
                    },
                ),
                (None, None) => host.position(&element, Anchoring::ViewportCenter),
                // Declared target that did not resolve: leave the popup where it is.
                (Some(_), None) => {}
            }
        }

        host.scroll_into_view(&element, offset, self.ticket());

        self.listeners.emit(&TourEvent::Shown(id.clone()));
        if self.config.persist_fragment {
            host.set_fragment(&id);
        }
        Ok(self)
    }

    /// Shows the popup with identifier `id`.
    pub fn show_id<H>(&mut self, host: &mut H, id: &str) -> Result<&mut Self, TourError>
    where
        H: Host<Element = E>,
    {
        let index = self
            .popups
            .index_of(id)
            .ok_or_else(|| TourError::PopupNotFound { id: id.into() })?;
        self.show(host, index)
    }

    /// Shows the container if the tour is not running, then shows `index`.
    pub fn navigate<H>(&mut self, host: &mut H, index: usize) -> Result<&mut Self, TourError>
    where
        H: Host<Element = E>,
    {
        if index >= self.popups.len() {
            return Err(TourError::IndexOutOfRange {
                index,
                len: self.popups.len(),
            });
        }
        if !self.running {
            host.show(&self.container);
            self.running = true;
        }
        self.show(host, index)
    }

    /// Closes the tour.
    ///
    /// Hides the current popup and the container, clears the URL fragment,
    /// emits `hide`, and suppresses the default action of `event` if given.
    pub fn close<H>(&mut self, host: &mut H, event: Option<&mut dyn Cancelable>) -> &mut Self
    where
        H: Host<Element = E>,
    {
        self.hide_current(host);
        self.generation = self.generation.wrapping_add(1);
        host.hide(&self.container);
        self.running = false;
        if let Some(event) = event {
            event.prevent_default();
        }
        let fragment = host.fragment();
        self.cleared_fragment = !fragment.strip_prefix('#').unwrap_or(&fragment).is_empty();
        host.set_fragment("");
        debug!("tour closed");
        self.listeners.emit(&TourEvent::Closed);
        self
    }

    /// Handles a finished scroll: runs the reveal animation if `ticket` still
    /// belongs to the current popup.
    ///
    /// Returns `false` for stale tickets.
    pub fn scroll_finished<H>(&mut self, host: &mut H, ticket: ScrollTicket) -> bool
    where
        H: Host<Element = E>,
    {
        if ticket.generation != self.generation || ticket.tour != self.id {
            trace!("ignoring stale scroll ticket {ticket:?}");
            return false;
        }
        let Some(popup) = self.current() else {
            return false;
        };
        if let Some(animation) = self.config.animations.for_placement(popup.placement()) {
            host.animate(popup.element(), animation);
        }
        true
    }

    /// Returns the index of the popup named by the URL fragment.
    ///
    /// Returns `None` when the fragment is empty or names no popup of this tour.
    pub fn index_from_fragment<H>(&self, host: &H) -> Option<usize>
    where
        H: Host<Element = E>,
    {
        let fragment = host.fragment();
        let id = fragment.strip_prefix('#').unwrap_or(&fragment);
        if id.is_empty() {
            return None;
        }
        self.popups.index_of(id)
    }

    /// Stops listening for close clicks. The tour stays usable programmatically.
    pub fn detach<H>(&mut self, host: &mut H)
    where
        H: Host<Element = E>,
    {
        host.undelegate_close(&self.container);
    }

    /// Records the router-assigned identifier.
    ///
    /// A popup shown before registration was scrolled with an unregistered
    /// ticket; it is scrolled again so its reveal animation can run.
    pub(crate) fn set_id<H>(&mut self, host: &mut H, id: TourId)
    where
        H: Host<Element = E>,
    {
        self.id = Some(id);
        let Some(popup) = self.current() else {
            return;
        };
        let element = popup.element().clone();
        let offset = popup.offset_or(self.config.offset);
        debug!("re-scrolling popup `{}` after registration", popup.id());
        self.generation = self.generation.wrapping_add(1);
        host.scroll_into_view(&element, offset, self.ticket());
    }

    fn ticket(&self) -> ScrollTicket {
        ScrollTicket {
            tour: self.id,
            generation: self.generation,
        }
    }

    fn hide_current<H>(&mut self, host: &mut H)
    where
        H: Host<Element = E>,
    {
        let Some(index) = self.current.take() else {
            return;
        };
        let Some(popup) = self.popups.get(index) else {
            return;
        };
        let element = popup.element().clone();
        let id = String::from(popup.id());
        debug!("hiding popup `{id}` ({index})");
        self.listeners.emit(&TourEvent::Hidden(id));
        self.remove_appended_hash(host);
        host.hide(&element);
        self.popups.set_visible(index, false);
    }

    fn append_hash<H>(&mut self, host: &mut H, target: &E, value: &str)
    where
        H: Host<Element = E>,
    {
        let href = host.attribute(target, "href");
        let had_href = href.is_some();
        let suffix = format!("#{value}");
        let updated = format!("{}{suffix}", href.unwrap_or_default());
        host.set_attribute(target, "href", &updated);
        self.appended = Some(AppendedHash {
            target: target.clone(),
            suffix,
            had_href,
        });
    }

    fn remove_appended_hash<H>(&mut self, host: &mut H)
    where
        H: Host<Element = E>,
    {
        let Some(appended) = self.appended.take() else {
            return;
        };
        let href = host.attribute(&appended.target, "href").unwrap_or_default();
        match href.strip_suffix(appended.suffix.as_str()) {
            Some("") if !appended.had_href => {
                host.remove_attribute(&appended.target, "href");
            }
            Some(original) => host.set_attribute(&appended.target, "href", original),
            None => warn!(
                "href `{href}` of {:?} no longer ends with `{}`; leaving it as is",
                appended.target, appended.suffix
            ),
        }
    }
}

impl<E> Tour<E> {
    /// Subscribes `handler` to `event`.
    pub fn on(&mut self, event: TourEvent, handler: impl FnMut(&TourEvent) + 'static) -> HandlerId {
        self.listeners.add(event, handler)
    }

    /// Subscribes `handler` to the event named `name` (see [`TourEvent::parse`]).
    pub fn on_name(&mut self, name: &str, handler: impl FnMut(&TourEvent) + 'static) -> HandlerId {
        self.listeners.add(TourEvent::parse(name), handler)
    }

    /// Unsubscribes a handler. Returns `true` if it was subscribed to `event`.
    pub fn off(&mut self, event: &TourEvent, handler: HandlerId) -> bool {
        self.listeners.remove(event, handler)
    }

    /// Returns the popups of this tour.
    #[must_use]
    pub fn popups(&self) -> &PopupCollection<E> {
        &self.popups
    }

    /// Returns the index of the current popup.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Returns the current popup.
    #[must_use]
    pub fn current(&self) -> Option<&Popup<E>> {
        self.current.and_then(|i| self.popups.get(i))
    }

    /// Returns `true` while the container is shown.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Returns the container element.
    #[must_use]
    pub fn container(&self) -> &E {
        &self.container
    }

    /// Returns the router-assigned identifier, once registered.
    #[must_use]
    pub fn id(&self) -> Option<TourId> {
        self.id
    }

    /// Returns `true` once after [`Tour::close`] cleared a non-empty fragment.
    pub(crate) fn take_cleared_fragment(&mut self) -> bool {
        core::mem::take(&mut self.cleared_fragment)
    }
}
