//! Selector matching against a document tree.

use crate::document::{Document, ElementId};

use super::{AttributeOp, Combinator, Selector, SelectorList, SelectorPart, TypeSelector};

/// Check if an element matches any selector in a list.
pub fn list_matches(doc: &Document, element: ElementId, list: &SelectorList) -> bool {
    list.selectors
        .iter()
        .any(|selector| selector_matches(doc, element, selector))
}

/// Check if a full selector matches, considering combinators.
///
/// Walks the selector from right to left. The subject part must match the
/// element itself; each part to its left must match an ancestor according to
/// the combinator between them. Descendant combinators take the nearest
/// matching ancestor (greedy), which is sufficient for the selector subset
/// this crate supports.
pub fn selector_matches(doc: &Document, element: ElementId, selector: &Selector) -> bool {
    let Some(subject) = selector.subject() else {
        return false;
    };
    if !part_matches(doc, element, subject) {
        return false;
    }

    // Candidate ancestor for the next part to the left.
    let mut current = doc.parent(element);

    for i in (0..selector.parts.len().saturating_sub(1)).rev() {
        let part = &selector.parts[i];
        match selector.combinators[i] {
            Combinator::Child => {
                let Some(parent) = current else {
                    return false;
                };
                if !part_matches(doc, parent, part) {
                    return false;
                }
                current = doc.parent(parent);
            }
            Combinator::Descendant => {
                let mut cursor = current;
                loop {
                    let Some(ancestor) = cursor else {
                        return false;
                    };
                    if part_matches(doc, ancestor, part) {
                        current = doc.parent(ancestor);
                        break;
                    }
                    cursor = doc.parent(ancestor);
                }
            }
        }
    }

    true
}

/// Check if a single selector part matches an element.
pub fn part_matches(doc: &Document, element: ElementId, part: &SelectorPart) -> bool {
    let Some(tag) = doc.tag(element) else {
        return false;
    };

    // Check type selector
    if let Some(type_sel) = &part.type_selector {
        match type_sel {
            TypeSelector::Universal => {}
            TypeSelector::Type(name) => {
                if name != tag {
                    return false;
                }
            }
        }
    }

    // Check ID selector
    if let Some(id) = &part.id {
        match doc.attribute(element, "id") {
            Some(value) if value == id => {}
            _ => return false,
        }
    }

    // Check class selectors (all must match)
    for class in &part.classes {
        if !doc.has_class(element, class) {
            return false;
        }
    }

    // Check attribute selectors (all must match)
    for attr in &part.attributes {
        match (&attr.op, doc.attribute(element, &attr.name)) {
            (AttributeOp::Present, Some(_)) => {}
            (AttributeOp::Equals(expected), Some(value)) if value == expected => {}
            _ => return false,
        }
    }

    true
}
