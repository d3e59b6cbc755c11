//! Logging and debugging facilities.
//!
//! This module provides:
//! - `tracing` target names used throughout the crate, for log filtering
//! - A debug visualization for document trees
//!
//! # Tracing Integration
//!
//! eggshell uses the `tracing` crate for instrumentation. Install a
//! subscriber in your application or test to see logs:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! # Debug Visualization
//!
//! Use [`DocumentTreeDebug`] to render the element tree:
//!
//! ```
//! use eggshell_core::{Document, logging::DocumentTreeDebug};
//!
//! let doc = Document::new();
//! println!("{}", DocumentTreeDebug::new(&doc).format_tree());
//! ```

use crate::document::{Document, ElementId};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Document tree target.
    pub const DOCUMENT: &str = "eggshell_core::document";
    /// Selector engine target.
    pub const SELECTOR: &str = "eggshell_core::selector";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for document tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show element IDs.
    pub show_ids: bool,
    /// Whether to show classes and the `id` attribute.
    pub show_selectors: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_selectors: true,
            max_depth: None,
        }
    }
}

/// Debug formatter for a document's element tree.
pub struct DocumentTreeDebug<'a> {
    doc: &'a Document,
    options: TreeFormatOptions,
}

impl<'a> DocumentTreeDebug<'a> {
    /// Create a formatter with default options.
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            options: TreeFormatOptions::default(),
        }
    }

    /// Create a formatter with custom options.
    pub fn with_options(doc: &'a Document, options: TreeFormatOptions) -> Self {
        Self { doc, options }
    }

    /// Render the whole tree as an indented listing.
    pub fn format_tree(&self) -> String {
        let mut out = String::new();
        self.format_element(self.doc.root(), 0, &mut out);
        out
    }

    fn format_element(&self, id: ElementId, depth: usize, out: &mut String) {
        if let Some(max) = self.options.max_depth
            && depth > max
        {
            return;
        }

        if depth > 0 {
            let branch = match self.options.style {
                TreeStyle::Ascii => "|- ",
                TreeStyle::Unicode => "├─ ",
            };
            out.push_str(&"   ".repeat(depth - 1));
            out.push_str(branch);
        }
        out.push_str(self.doc.tag(id).unwrap_or("?"));

        if self.options.show_selectors {
            if let Some(attr_id) = self.doc.attribute(id, "id") {
                out.push('#');
                out.push_str(attr_id);
            }
            for class in self.doc.classes(id) {
                out.push('.');
                out.push_str(class);
            }
        }
        if self.options.show_ids {
            out.push_str(&format!(" ({id:?})"));
        }
        out.push('\n');

        for &child in self.doc.children(id) {
            self.format_element(child, depth + 1, out);
        }
    }
}
