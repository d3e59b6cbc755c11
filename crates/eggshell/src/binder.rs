//! Deferred element binding.
//!
//! Page content is injected into the document after the behavior components
//! are constructed, so the elements they need to wire up do not exist yet.
//! [`DeferredBinder`] bridges the gap: each [`watch`](DeferredBinder::watch)
//! registers a selector and a one-shot callback; the first time the selector
//! yields a non-empty result the callback runs synchronously with the full
//! matched set, and the watch is permanently retired.
//!
//! # Timing
//!
//! The owner of the binder runs [`process`](DeferredBinder::process)
//! immediately after registering watches *and* after every structural
//! mutation batch. Elements that already exist when a watch is registered
//! therefore bind on the next `process` call; there is no window in which
//! content present before the watcher can be missed.
//!
//! A retired watch never re-arms, even if its elements are later removed and
//! re-inserted; attaching behavior twice to the same collection would double
//! up handlers. Rebinding requires a fresh watch.

use eggshell_core::selector::parse_selector_list;
use eggshell_core::{Document, ElementId, Result, SelectorList};

/// Gives the binder read access to the document during a `process` pass.
///
/// The bind context type `C` is typically the composition root owning the
/// document and the behavior components; callbacks receive `&mut C` so they
/// can wire components up without global lookups.
pub trait BindHost {
    /// The document to query watches against.
    fn document(&self) -> &Document;
}

impl BindHost for Document {
    fn document(&self) -> &Document {
        self
    }
}

/// A one-shot bind callback.
pub type BindCallback<C> = Box<dyn FnOnce(&mut C, Vec<ElementId>)>;

/// One registered watch: a selector plus its pending callback.
///
/// The callback doubles as the lifecycle flag: `Some` while armed, `None`
/// once fired.
struct BindingWatch<C> {
    /// The selector source, kept for logging.
    source: String,
    selector: SelectorList,
    on_found: Option<BindCallback<C>>,
}

/// Watches a live document for elements matching registered selectors and
/// fires each watch's callback exactly once.
pub struct DeferredBinder<C> {
    watches: Vec<BindingWatch<C>>,
}

impl<C: BindHost> DeferredBinder<C> {
    /// Create a binder with no watches.
    pub fn new() -> Self {
        Self {
            watches: Vec::new(),
        }
    }

    /// Register interest in a selector.
    ///
    /// `on_found` is invoked at most once, with the full matched set in
    /// document order, during the first [`process`](Self::process) pass in
    /// which the selector matches at least one element.
    ///
    /// # Errors
    ///
    /// Returns [`eggshell_core::Error::InvalidSelector`] if the selector
    /// fails to parse; nothing is registered in that case.
    pub fn watch(
        &mut self,
        selector: &str,
        on_found: impl FnOnce(&mut C, Vec<ElementId>) + 'static,
    ) -> Result<()> {
        let parsed = parse_selector_list(selector)?;
        tracing::debug!(target: "eggshell::binder", selector, "registered watch");
        self.watches.push(BindingWatch {
            source: selector.to_string(),
            selector: parsed,
            on_found: Some(Box::new(on_found)),
        });
        Ok(())
    }

    /// Run one detection pass over all armed watches.
    ///
    /// Each watch whose selector now matches fires synchronously and is
    /// retired before the next watch is considered, so a callback can never
    /// be invoked twice even if it mutates the tree itself.
    pub fn process(&mut self, ctx: &mut C) {
        for index in 0..self.watches.len() {
            if self.watches[index].on_found.is_none() {
                continue;
            }
            let matched = ctx.document().query_selector_all(&self.watches[index].selector);
            if matched.is_empty() {
                continue;
            }
            let Some(on_found) = self.watches[index].on_found.take() else {
                continue;
            };
            tracing::debug!(
                target: "eggshell::binder",
                selector = %self.watches[index].source,
                count = matched.len(),
                "watch matched, binding"
            );
            on_found(ctx, matched);
        }
        self.watches.retain(|watch| watch.on_found.is_some());
    }

    /// The number of watches still armed.
    pub fn active_watches(&self) -> usize {
        self.watches.len()
    }
}

impl<C: BindHost> Default for DeferredBinder<C> {
    fn default() -> Self {
        Self::new()
    }
}
