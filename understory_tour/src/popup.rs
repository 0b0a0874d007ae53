// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup records and the per-tour popup collection.
//!
//! Each direct child of a tour container is one popup. The markup contract:
//!
//! | Attribute                  | Meaning                                              |
//! |----------------------------|------------------------------------------------------|
//! | `id`                       | Identifier; required and unique.                     |
//! | `position`                 | [`Placement`]; defaults to `bottom`.                 |
//! | `points-to` / `points-at`  | Selector of the element the popup anchors to.        |
//! | `append-hash`              | Suffix appended as `#value` to the target's `href`.  |
//! | `offset-x` / `offset-y`    | Per-popup scroll offset, overriding the tour default.|
//!
//! Every attribute except `id` may also be given in its `data-` form
//! (`data-position`, `data-points-to`, ...); the plain form wins.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Vec2;

use crate::error::TourError;
use crate::host::Host;
use crate::placement::Placement;

/// One step of a tour.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup<E> {
    element: E,
    id: String,
    placement: Placement,
    target: Option<String>,
    offset_x: Option<f64>,
    offset_y: Option<f64>,
    append_hash: Option<String>,
    visible: bool,
}

impl<E> Popup<E> {
    /// Returns the host element backing this popup.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Returns the popup identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the side of the target the popup is placed on.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the target selector, if the popup points at an element.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Returns the value appended to the target's `href` while visible.
    #[must_use]
    pub fn append_hash(&self) -> Option<&str> {
        self.append_hash.as_deref()
    }

    /// Returns the scroll offset, falling back to `default` per axis.
    #[must_use]
    pub fn offset_or(&self, default: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x.unwrap_or(default.x),
            self.offset_y.unwrap_or(default.y),
        )
    }

    /// Returns `true` while the owning tour shows this popup.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The ordered popups of one tour, built once from the container's children.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupCollection<E> {
    popups: Vec<Popup<E>>,
}

impl<E: Clone + PartialEq> PopupCollection<E> {
    /// Builds the collection from the direct children of `container`.
    ///
    /// Every child is hidden and taken out of layout flow.
    pub fn build<H>(host: &mut H, container: &E) -> Result<Self, TourError>
    where
        H: Host<Element = E>,
    {
        let children = host.children(container);
        let mut popups: Vec<Popup<E>> = Vec::with_capacity(children.len());
        for (index, element) in children.into_iter().enumerate() {
            let popup = read_popup(host, element, index)?;
            if popups.iter().any(|p| p.id == popup.id) {
                return Err(TourError::DuplicateId { id: popup.id });
            }
            popups.push(popup);
        }
        for popup in &popups {
            host.hide(&popup.element);
            host.detach_from_flow(&popup.element);
        }
        Ok(Self { popups })
    }
}

impl<E> PopupCollection<E> {
    /// Returns the number of popups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.popups.len()
    }

    /// Returns `true` if the tour has no popups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }

    /// Returns the popup at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Popup<E>> {
        self.popups.get(index)
    }

    /// Iterates over the popups in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Popup<E>> {
        self.popups.iter()
    }

    /// Returns the index of the popup with identifier `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.popups.iter().position(|p| p.id == id)
    }

    pub(crate) fn set_visible(&mut self, index: usize, visible: bool) {
        if let Some(popup) = self.popups.get_mut(index) {
            popup.visible = visible;
        }
    }
}

impl<'a, E> IntoIterator for &'a PopupCollection<E> {
    type Item = &'a Popup<E>;
    type IntoIter = core::slice::Iter<'a, Popup<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn read_popup<H: Host>(
    host: &H,
    element: H::Element,
    index: usize,
) -> Result<Popup<H::Element>, TourError> {
    let id = host
        .attribute(&element, "id")
        .filter(|id| !id.is_empty())
        .ok_or(TourError::MissingId { index })?;

    let invalid = |name: &str, value: String| TourError::InvalidAttribute {
        popup: id.clone(),
        name: name.into(),
        value,
    };

    let placement = match read(host, &element, &["position"]) {
        Some(raw) => raw.parse().map_err(|_| invalid("position", raw))?,
        None => Placement::default(),
    };
    let offset_x = read_number(host, &element, "offset-x").map_err(|raw| invalid("offset-x", raw))?;
    let offset_y = read_number(host, &element, "offset-y").map_err(|raw| invalid("offset-y", raw))?;
    let target = read(host, &element, &["points-to", "points-at"]).filter(|s| !s.is_empty());
    let append_hash = read(host, &element, &["append-hash"]).filter(|s| !s.is_empty());

    Ok(Popup {
        element,
        id,
        placement,
        target,
        offset_x,
        offset_y,
        append_hash,
        visible: false,
    })
}

/// Reads the first present attribute among `names`, then their `data-` forms.
fn read<H: Host>(host: &H, element: &H::Element, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| host.attribute(element, name))
        .or_else(|| {
            names
                .iter()
                .find_map(|name| host.attribute(element, &format!("data-{name}")))
        })
}

fn read_number<H: Host>(host: &H, element: &H::Element, name: &str) -> Result<Option<f64>, String> {
    let Some(raw) = read(host, element, &[name]) else {
        return Ok(None);
    };
    match raw.trim().trim_end_matches("px").trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(raw),
    }
}
