//! Core element model for eggshell.
//!
//! This crate provides the foundational pieces the page behaviors build on:
//!
//! - **Document Tree**: arena-backed element storage with parent-child
//!   ownership, attributes, classes, and text
//! - **Selector Engine**: a CSS-subset query language for locating elements
//! - **Input Events**: click and key-press event types with accept/ignore
//!   propagation control
//! - **Focus & Scroll State**: document-level keyboard focus and a page
//!   scroll lock
//! - **Mutation Tracking**: a serial that advances on structural changes so
//!   observers can react to content being injected
//!
//! # Example
//!
//! ```
//! use eggshell_core::{Document, parse_selector_list};
//!
//! let mut doc = Document::new();
//! let img = doc.create_element("img");
//! doc.add_class(img, "gallery-image")?;
//! doc.append_child(doc.root(), img)?;
//!
//! let selector = parse_selector_list(".gallery-image")?;
//! assert_eq!(doc.query_selector_all(&selector), vec![img]);
//! # Ok::<(), eggshell_core::Error>(())
//! ```

pub mod document;
mod error;
pub mod input;
pub mod logging;
pub mod selector;

pub use document::{Document, ElementId};
pub use error::{Error, Result};
pub use input::{ClickEvent, EventBase, Key, KeyPressEvent, KeyboardModifiers};
pub use logging::{DocumentTreeDebug, TreeFormatOptions, TreeStyle};
pub use selector::{Selector, SelectorList, SelectorPart, parse_selector_list};
