//! Interactive behavior engine for the Good Egg marketing page.
//!
//! The page is content-driven: structured data is rendered into a retained
//! element tree ([`eggshell_core::Document`]), and the interactive behaviors
//! attach themselves to elements *after* they appear. This crate provides:
//!
//! - **Deferred Binding** ([`binder`]): one-shot watches that fire a callback
//!   the first time a selector matches, then retire
//! - **Gallery Lightbox** ([`modal`]): the open/close/navigate state machine
//!   with focus restore, a keyboard contract, and a focus trap
//! - **Interaction Dispatch** ([`dispatcher`]): wiring from clicks and key
//!   presses on bound elements to modal operations and analytics events
//! - **Analytics** ([`analytics`]): a fire-and-forget sink abstraction with
//!   tracing-backed and in-memory implementations
//! - **Content & Rendering** ([`content`], [`render`]): the serde data model
//!   and the pass that turns it into elements
//! - **Composition Root** ([`page`]): [`Page`] owns all of the above and
//!   routes input; no global singletons
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use eggshell::analytics::MemorySink;
//! use eggshell::content::{CardsSection, GallerySection, PageContent, PerfectEgg};
//! use eggshell::page::Page;
//!
//! let sink = Arc::new(MemorySink::new());
//! let mut page = Page::new(Box::new(sink.clone()))?;
//!
//! let content = PageContent {
//!     gallery: GallerySection {
//!         title: "How to cook the perfect egg".into(),
//!         content: vec![],
//!         perfect_egg: PerfectEgg {
//!             title: "The perfect result".into(),
//!             description: "Jammy yolk.".into(),
//!         },
//!         images: vec![],
//!     },
//!     cards: CardsSection { title: "More recipes".into(), items: vec![] },
//! };
//! page.render_content(&content)?;
//! assert_eq!(sink.names(), vec!["app_initialized"]);
//! # Ok::<(), eggshell::page::PageError>(())
//! ```

pub mod analytics;
pub mod binder;
pub mod content;
pub mod dispatcher;
pub mod focus;
pub mod modal;
pub mod page;
pub mod render;

pub use analytics::{AnalyticsEvent, AnalyticsSink, ConsoleSink, MemorySink};
pub use binder::{BindHost, DeferredBinder};
pub use content::PageContent;
pub use dispatcher::InteractionDispatcher;
pub use modal::{GalleryModal, ModalError, ModalSession};
pub use page::{Page, PageError, PageState};
