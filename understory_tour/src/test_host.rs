// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording host for unit tests.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Vec2;

use crate::host::{Anchoring, Host, ScrollTicket};
use crate::placement::Alignment;
use crate::style::StyleMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Node(usize);

#[derive(Debug, Default)]
struct Entry {
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    shown: bool,
    detached: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Positioned {
    Target(Node, Alignment),
    ViewportCenter,
}

#[derive(Debug, Default)]
pub(crate) struct TestHost {
    nodes: Vec<Entry>,
    pub(crate) fragment: String,
    pub(crate) listening: usize,
    pub(crate) scrolls: Vec<(Node, Vec2, ScrollTicket)>,
    pub(crate) animations: Vec<(Node, StyleMap)>,
    pub(crate) styled: Vec<(Node, StyleMap)>,
    pub(crate) positioned: Vec<(Node, Positioned)>,
    pub(crate) delegated: Vec<(Node, String)>,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a detached top-level element. An empty `id` adds no `id` attribute.
    pub(crate) fn element(&mut self, id: &str, attributes: &[(&str, &str)]) -> Node {
        let node = Node(self.nodes.len());
        let mut entry = Entry {
            shown: true,
            ..Entry::default()
        };
        if !id.is_empty() {
            entry.attributes.push(("id".into(), id.into()));
        }
        for (name, value) in attributes {
            entry.attributes.push(((*name).into(), (*value).into()));
        }
        self.nodes.push(entry);
        node
    }

    pub(crate) fn child(&mut self, parent: Node, id: &str, attributes: &[(&str, &str)]) -> Node {
        let node = self.element(id, attributes);
        self.nodes[parent.0].children.push(node);
        node
    }

    pub(crate) fn is_shown(&self, node: Node) -> bool {
        self.nodes[node.0].shown
    }

    pub(crate) fn is_detached(&self, node: Node) -> bool {
        self.nodes[node.0].detached
    }

    pub(crate) fn attr(&self, node: Node, name: &str) -> Option<String> {
        self.attribute(&node, name)
    }

    pub(crate) fn take_scrolls(&mut self) -> Vec<ScrollTicket> {
        self.scrolls.drain(..).map(|(_, _, t)| t).collect()
    }
}

impl Host for TestHost {
    type Element = Node;

    fn select(&self, selector: &str) -> Option<Node> {
        let id = selector.strip_prefix('#')?;
        (0..self.nodes.len())
            .map(Node)
            .find(|n| self.attribute(n, "id").as_deref() == Some(id))
    }

    fn children(&self, element: &Node) -> Vec<Node> {
        self.nodes[element.0].children.clone()
    }

    fn attribute(&self, element: &Node, name: &str) -> Option<String> {
        self.nodes[element.0]
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&mut self, element: &Node, name: &str, value: &str) {
        let attributes = &mut self.nodes[element.0].attributes;
        match attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.into(),
            None => attributes.push((name.into(), value.into())),
        }
    }

    fn remove_attribute(&mut self, element: &Node, name: &str) {
        self.nodes[element.0].attributes.retain(|(k, _)| k != name);
    }

    fn show(&mut self, element: &Node) {
        self.nodes[element.0].shown = true;
    }

    fn hide(&mut self, element: &Node) {
        self.nodes[element.0].shown = false;
    }

    fn detach_from_flow(&mut self, element: &Node) {
        self.nodes[element.0].detached = true;
    }

    fn apply_styles(&mut self, element: &Node, styles: &StyleMap) {
        self.styled.push((*element, styles.clone()));
    }

    fn position(&mut self, element: &Node, anchoring: Anchoring<'_, Node>) {
        let positioned = match anchoring {
            Anchoring::Target { target, alignment } => Positioned::Target(*target, alignment),
            Anchoring::ViewportCenter => Positioned::ViewportCenter,
        };
        self.positioned.push((*element, positioned));
    }

    fn scroll_into_view(&mut self, element: &Node, offset: Vec2, ticket: ScrollTicket) {
        self.scrolls.push((*element, offset, ticket));
    }

    fn animate(&mut self, element: &Node, styles: &StyleMap) {
        self.animations.push((*element, styles.clone()));
    }

    fn fragment(&self) -> String {
        if self.fragment.is_empty() {
            String::new()
        } else {
            format!("#{}", self.fragment)
        }
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.into();
    }

    fn listen_fragment_changes(&mut self) {
        self.listening += 1;
    }

    fn delegate_close(&mut self, container: &Node, selector: &str) {
        self.delegated.push((*container, selector.into()));
    }

    fn undelegate_close(&mut self, container: &Node) {
        self.delegated.retain(|(c, _)| c != container);
    }
}
