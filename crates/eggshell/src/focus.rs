//! Tab-order computation and focus navigation.
//!
//! Tab order is depth-first pre-order over a subtree, filtered to elements
//! the document considers focusable. The same computation serves two
//! consumers: the modal's focus trap (subtree = the modal container) and the
//! page's default Tab traversal (subtree = the whole document).

use eggshell_core::{Document, ElementId};

/// The focusable elements under `root` (including `root` itself if
/// focusable), in depth-first pre-order.
///
/// Computed fresh on every call rather than cached, so it tolerates content
/// changing under it.
pub fn tab_order(doc: &Document, root: ElementId) -> Vec<ElementId> {
    let mut order = Vec::new();
    if doc.is_focusable(root) {
        order.push(root);
    }
    for id in doc.descendants(root) {
        if doc.is_focusable(id) {
            order.push(id);
        }
    }
    order
}

/// Move focus to the next focusable element under `root`, wrapping at the
/// end.
///
/// If no element is focused, or the focused element is outside the subtree,
/// focuses the first focusable element. Returns `false` if the subtree has
/// no focusable elements.
pub fn focus_next(doc: &mut Document, root: ElementId) -> bool {
    let order = tab_order(doc, root);
    if order.is_empty() {
        return false;
    }

    let next = match doc.focused().and_then(|cur| order.iter().position(|&id| id == cur)) {
        Some(pos) => order[(pos + 1) % order.len()],
        None => order[0],
    };
    doc.focus(next)
}

/// Move focus to the previous focusable element under `root`, wrapping at
/// the start.
pub fn focus_previous(doc: &mut Document, root: ElementId) -> bool {
    let order = tab_order(doc, root);
    if order.is_empty() {
        return false;
    }

    let previous = match doc.focused().and_then(|cur| order.iter().position(|&id| id == cur)) {
        Some(0) => order[order.len() - 1],
        Some(pos) => order[pos - 1],
        None => order[order.len() - 1],
    };
    doc.focus(previous)
}
