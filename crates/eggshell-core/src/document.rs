//! Document model for eggshell.
//!
//! Provides the retained element tree the page behaviors operate on:
//! - Unique element identifiers via arena-based storage
//! - Parent-child links with cascade removal
//! - Attributes, classes, and text content
//! - Selector queries in document order
//! - Keyboard focus state and a page scroll lock
//! - A mutation serial that advances on every structural change
//!
//! # Key Types
//!
//! - [`ElementId`] - Unique stable identifier for each element
//! - [`Document`] - Central arena managing all elements and page state
//!
//! # Mutation Tracking
//!
//! Structural mutations (attaching or removing elements) bump the document's
//! [mutation serial](Document::mutation_serial). Attribute, class, and text
//! changes do not; observers of the tree only care about elements appearing
//! and disappearing.

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use crate::error::{Error, Result};
use crate::selector::{self, SelectorList};

new_key_type! {
    /// A unique identifier for an element in a [`Document`].
    ///
    /// `ElementId`s are stable handles that remain valid as the tree changes.
    /// They become invalid when the element is removed.
    pub struct ElementId;
}

/// Internal data stored for each element.
#[derive(Debug)]
struct ElementData {
    /// Lowercase tag name (e.g., `img`, `article`).
    tag: String,
    /// Class list, in insertion order.
    classes: Vec<String>,
    /// Attribute map. The `id` attribute also feeds the document id index.
    attributes: HashMap<String, String>,
    /// The element's own text content (not including descendants).
    text: String,
    /// Parent element (None while detached or for the root).
    parent: Option<ElementId>,
    /// Child elements in document order.
    children: Vec<ElementId>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: HashMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The retained element tree plus the page-level state tied to it.
///
/// Uses arena-based storage via `SlotMap` for stable element IDs and
/// efficient parent-child management.
#[derive(Debug)]
pub struct Document {
    elements: SlotMap<ElementId, ElementData>,
    root: ElementId,
    /// Index from `id` attribute values to elements.
    ids: HashMap<String, ElementId>,
    /// The element that currently holds keyboard focus.
    focused: Option<ElementId>,
    /// Whether page scrolling is suppressed (modal open).
    scroll_locked: bool,
    /// Advances on every structural mutation.
    mutation_serial: u64,
}

impl Document {
    /// Create a new document containing only the root (`body`) element.
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let root = elements.insert(ElementData::new("body"));
        Self {
            elements,
            root,
            ids: HashMap::new(),
            focused: None,
            scroll_locked: false,
            mutation_serial: 0,
        }
    }

    /// The root element.
    #[inline]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Check whether an element still exists.
    #[inline]
    pub fn exists(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// The number of live elements, including the root.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// The current mutation serial.
    ///
    /// Compare against a previously observed value to detect structural
    /// changes since then.
    #[inline]
    pub fn mutation_serial(&self) -> u64 {
        self.mutation_serial
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Create a detached element with the given tag name.
    ///
    /// The element joins the tree once passed to [`append_child`](Self::append_child);
    /// until then it is invisible to selector queries.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = self.elements.insert(ElementData::new(tag));
        tracing::trace!(target: "eggshell_core::document", ?id, tag, "created element");
        id
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Detaches the child from its previous parent first. Counts as a
    /// structural mutation.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidElementId`] if either element does not exist
    /// - [`Error::RootImmutable`] if `child` is the root
    /// - [`Error::CircularParentage`] if `child` is `parent` or an ancestor of it
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        if !self.exists(parent) || !self.exists(child) {
            return Err(Error::InvalidElementId);
        }
        if child == self.root {
            return Err(Error::RootImmutable);
        }
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(Error::CircularParentage);
        }

        self.detach(child);
        self.elements[child].parent = Some(parent);
        self.elements[parent].children.push(child);
        self.mutation_serial += 1;
        tracing::trace!(
            target: "eggshell_core::document",
            ?parent,
            ?child,
            serial = self.mutation_serial,
            "attached element"
        );
        Ok(())
    }

    /// Remove an element and its entire subtree.
    ///
    /// Focus is cleared if it was inside the removed subtree, and any `id`
    /// index entries for removed elements are dropped. Counts as a structural
    /// mutation.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidElementId`] if the element does not exist
    /// - [`Error::RootImmutable`] when asked to remove the root
    pub fn remove(&mut self, id: ElementId) -> Result<()> {
        if !self.exists(id) {
            return Err(Error::InvalidElementId);
        }
        if id == self.root {
            return Err(Error::RootImmutable);
        }

        let mut doomed = vec![id];
        doomed.extend(self.descendants(id));

        self.detach(id);
        for element in doomed {
            if self.focused == Some(element) {
                self.focused = None;
            }
            if let Some(value) = self.elements[element].attributes.get("id")
                && self.ids.get(value) == Some(&element)
            {
                self.ids.remove(value);
            }
            self.elements.remove(element);
        }

        self.mutation_serial += 1;
        tracing::trace!(
            target: "eggshell_core::document",
            ?id,
            serial = self.mutation_serial,
            "removed subtree"
        );
        Ok(())
    }

    /// Unlink an element from its parent without removing it.
    fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.elements[id].parent.take() {
            self.elements[parent].children.retain(|&c| c != id);
        }
    }

    /// Whether `candidate` is an ancestor of `element`.
    fn is_ancestor_of(&self, candidate: ElementId, element: ElementId) -> bool {
        let mut current = self.parent(element);
        while let Some(ancestor) = current {
            if ancestor == candidate {
                return true;
            }
            current = self.parent(ancestor);
        }
        false
    }

    /// The element's parent, if attached.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|data| data.parent)
    }

    /// The element's children in document order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|data| data.children.as_slice())
            .unwrap_or_default()
    }

    /// Ancestors from the immediate parent up to the root.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            ancestors.push(ancestor);
            current = self.parent(ancestor);
        }
        ancestors
    }

    /// All descendants of an element in depth-first pre-order.
    ///
    /// Does not include the element itself.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: ElementId, out: &mut Vec<ElementId>) {
        for &child in self.children(id) {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    // =========================================================================
    // Tags, attributes, classes, text
    // =========================================================================

    /// The element's tag name (lowercase).
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).map(|data| data.tag.as_str())
    }

    /// Read an attribute value.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(id)
            .and_then(|data| data.attributes.get(name))
            .map(String::as_str)
    }

    /// Set an attribute value, replacing any existing value.
    ///
    /// Setting the `id` attribute also updates the document's id index;
    /// when two elements claim the same id, the most recent write wins.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> Result<()> {
        if !self.exists(id) {
            return Err(Error::InvalidElementId);
        }
        if name == "id" {
            let previous = self.elements[id].attributes.get("id").cloned();
            if let Some(old) = previous
                && self.ids.get(&old) == Some(&id)
            {
                self.ids.remove(&old);
            }
            self.ids.insert(value.to_string(), id);
        }
        self.elements[id]
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Remove an attribute, if present.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Result<()> {
        if !self.exists(id) {
            return Err(Error::InvalidElementId);
        }
        if let Some(value) = self.elements[id].attributes.remove(name)
            && name == "id"
            && self.ids.get(&value) == Some(&id)
        {
            self.ids.remove(&value);
        }
        Ok(())
    }

    /// Look up an element by its `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied().filter(|&e| self.exists(e))
    }

    /// The element's class list.
    pub fn classes(&self, id: ElementId) -> &[String] {
        self.elements
            .get(id)
            .map(|data| data.classes.as_slice())
            .unwrap_or_default()
    }

    /// Check whether the element carries a class.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    /// Add a class to the element's class list (no-op if already present).
    pub fn add_class(&mut self, id: ElementId, class: &str) -> Result<()> {
        if !self.exists(id) {
            return Err(Error::InvalidElementId);
        }
        if !self.has_class(id, class) {
            self.elements[id].classes.push(class.to_string());
        }
        Ok(())
    }

    /// Remove a class from the element's class list.
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> Result<()> {
        if !self.exists(id) {
            return Err(Error::InvalidElementId);
        }
        self.elements[id].classes.retain(|c| c != class);
        Ok(())
    }

    /// Set the element's own text content.
    ///
    /// Not a structural mutation; text is data on the element, not a node.
    pub fn set_text(&mut self, id: ElementId, text: &str) -> Result<()> {
        if !self.exists(id) {
            return Err(Error::InvalidElementId);
        }
        self.elements[id].text = text.to_string();
        Ok(())
    }

    /// The element's own text content.
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).map(|data| data.text.as_str())
    }

    /// The concatenated text of the element and all its descendants.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        if let Some(data) = self.elements.get(id) {
            out.push_str(&data.text);
            for &child in &data.children {
                self.collect_text(child, out);
            }
        }
    }

    // =========================================================================
    // Selector queries
    // =========================================================================

    /// Check whether an element matches a selector list.
    pub fn matches(&self, id: ElementId, selectors: &SelectorList) -> bool {
        self.exists(id) && selector::list_matches(self, id, selectors)
    }

    /// All attached elements matching the selector list, in document order.
    pub fn query_selector_all(&self, selectors: &SelectorList) -> Vec<ElementId> {
        let mut out = Vec::new();
        if self.matches(self.root, selectors) {
            out.push(self.root);
        }
        for id in self.descendants(self.root) {
            if self.matches(id, selectors) {
                out.push(id);
            }
        }
        out
    }

    /// The first attached element matching the selector list.
    pub fn query_selector(&self, selectors: &SelectorList) -> Option<ElementId> {
        self.query_selector_all(selectors).into_iter().next()
    }

    /// The nearest element (starting from `id` itself, then ancestors)
    /// matching the selector list.
    pub fn closest(&self, id: ElementId, selectors: &SelectorList) -> Option<ElementId> {
        if self.matches(id, selectors) {
            return Some(id);
        }
        self.ancestors(id)
            .into_iter()
            .find(|&ancestor| self.matches(ancestor, selectors))
    }

    // =========================================================================
    // Focus and scroll
    // =========================================================================

    /// Whether an element can take keyboard focus.
    ///
    /// True for interactive controls (`button`, `input`, `select`,
    /// `textarea`), links with an `href`, and any element with an explicit
    /// non-negative `tabindex`.
    pub fn is_focusable(&self, id: ElementId) -> bool {
        let Some(tag) = self.tag(id) else {
            return false;
        };
        if matches!(tag, "button" | "input" | "select" | "textarea") {
            return true;
        }
        if tag == "a" && self.attribute(id, "href").is_some() {
            return true;
        }
        self.attribute(id, "tabindex")
            .and_then(|value| value.parse::<i32>().ok())
            .is_some_and(|index| index >= 0)
    }

    /// Move keyboard focus to an element.
    ///
    /// Returns `false` (leaving focus unchanged) if the element does not
    /// exist or cannot take focus.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        self.focused = Some(id);
        tracing::trace!(target: "eggshell_core::document", ?id, "focused element");
        true
    }

    /// Clear keyboard focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The element that currently holds keyboard focus.
    #[inline]
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Suppress or restore page scrolling.
    pub fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    /// Whether page scrolling is currently suppressed.
    #[inline]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
