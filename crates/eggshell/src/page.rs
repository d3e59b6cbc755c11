//! The composition root.
//!
//! [`Page`] constructs and owns every component — document, modal,
//! dispatcher, binder, and the injected analytics sink — and routes input
//! into them. There is no global application object; tests construct a
//! `Page` with a recording sink and drive it directly.
//!
//! # Control flow
//!
//! 1. [`Page::new`] builds the static scaffold, constructs the modal
//!    against it, and registers the deferred watches (with an immediate
//!    detection pass, so content present early still binds).
//! 2. [`Page::load_content`] renders the content data into the tree; every
//!    mutation batch is followed synchronously by a binder pass, so binding
//!    always completes before any user event can reach the new elements.
//! 3. [`Page::click`] and [`Page::key_press`] feed user input through the
//!    modal and the dispatcher.

use eggshell_core::{ClickEvent, Document, ElementId, Key, KeyPressEvent, KeyboardModifiers};
use serde_json::json;

use crate::analytics::{AnalyticsSink, timestamp_ms};
use crate::binder::{BindHost, DeferredBinder};
use crate::content::{ContentError, PageContent};
use crate::dispatcher::InteractionDispatcher;
use crate::focus;
use crate::modal::GalleryModal;
use crate::render;

/// Errors from page construction and content loading.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The content document could not be parsed.
    #[error(transparent)]
    Content(#[from] ContentError),
    /// A document or selector operation failed.
    #[error(transparent)]
    Core(#[from] eggshell_core::Error),
}

/// Everything the page owns apart from the binder.
///
/// Bind callbacks receive `&mut PageState`, giving them the document and the
/// components without global lookups.
pub struct PageState {
    /// The element tree.
    pub document: Document,
    /// The lightbox state machine.
    pub modal: GalleryModal,
    /// The interaction dispatcher.
    pub dispatcher: InteractionDispatcher,
    /// The injected analytics sink.
    pub analytics: Box<dyn AnalyticsSink>,
}

impl BindHost for PageState {
    fn document(&self) -> &Document {
        &self.document
    }
}

/// The page: component owner and input router.
pub struct Page {
    state: PageState,
    binder: DeferredBinder<PageState>,
}

impl Page {
    /// Build the scaffold, construct the components, and arm the watches.
    pub fn new(analytics: Box<dyn AnalyticsSink>) -> Result<Self, PageError> {
        let mut document = Document::new();
        render::build_scaffold(&mut document)?;
        let modal = GalleryModal::new(&document);

        let state = PageState {
            document,
            modal,
            dispatcher: InteractionDispatcher::new(),
            analytics,
        };

        let mut binder = DeferredBinder::new();
        binder.watch(".gallery-image", |state: &mut PageState, elements| {
            state.dispatcher.bind_gallery(&mut state.document, &elements);
            state.modal.set_gallery(elements);
        })?;
        binder.watch(".card a", |state: &mut PageState, elements| {
            state.dispatcher.bind_card_links(&mut state.document, &elements);
        })?;

        let mut page = Self { state, binder };
        // Immediate detection pass: elements that already exist bind now.
        page.flush_bindings();
        Ok(page)
    }

    /// Parse a JSON content document and render it.
    pub fn load_content(&mut self, json: &str) -> Result<(), PageError> {
        let content = PageContent::from_json(json)?;
        self.render_content(&content)
    }

    /// Render content into the tree, bind the new elements, and report
    /// readiness.
    pub fn render_content(&mut self, content: &PageContent) -> Result<(), PageError> {
        render::render(&mut self.state.document, content)?;
        self.flush_bindings();
        self.state
            .analytics
            .record("app_initialized", json!({ "timestamp": timestamp_ms() }));
        tracing::info!(target: "eggshell::page", "page initialized");
        Ok(())
    }

    /// Register an additional deferred watch.
    ///
    /// Runs an immediate detection pass, so a selector that already matches
    /// fires before this returns.
    pub fn watch(
        &mut self,
        selector: &str,
        on_found: impl FnOnce(&mut PageState, Vec<ElementId>) + 'static,
    ) -> Result<(), PageError> {
        self.binder.watch(selector, on_found)?;
        self.flush_bindings();
        Ok(())
    }

    /// Run binder passes until the tree settles.
    ///
    /// Call after mutating the document from outside the page API; the
    /// content-loading path calls it automatically. Each pass runs
    /// synchronously, so bound handlers are in place before this returns.
    pub fn flush_bindings(&mut self) {
        loop {
            let before = self.state.document.mutation_serial();
            self.binder.process(&mut self.state);
            if self.state.document.mutation_serial() == before {
                break;
            }
        }
    }

    /// Route a click on `target` through the page behaviors.
    ///
    /// The click propagates from the target up its ancestor chain until a
    /// handler accepts it.
    pub fn click(&mut self, target: ElementId) {
        let mut event = ClickEvent::new();
        let mut chain = vec![target];
        chain.extend(self.state.document.ancestors(target));

        for node in chain {
            self.state.modal.handle_click(
                &mut self.state.document,
                self.state.analytics.as_ref(),
                node,
                target,
                &mut event,
            );
            if event.is_accepted() {
                return;
            }
            self.state.dispatcher.handle_click(
                &mut self.state.document,
                &mut self.state.modal,
                self.state.analytics.as_ref(),
                node,
                &mut event,
            );
            if event.is_accepted() {
                return;
            }
        }
    }

    /// Route a key press through the page behaviors.
    ///
    /// The modal sees the event first (its keyboard contract applies only
    /// while open); the dispatcher then handles activation keys on the
    /// focused element. An unaccepted Tab falls back to default traversal
    /// over the whole document.
    pub fn key_press(&mut self, key: Key, modifiers: KeyboardModifiers) {
        let mut event = KeyPressEvent::new(key, modifiers);

        self.state.modal.handle_key(
            &mut self.state.document,
            self.state.analytics.as_ref(),
            &mut event,
        );
        if event.is_accepted() {
            return;
        }

        self.state.dispatcher.handle_key(
            &mut self.state.document,
            &mut self.state.modal,
            self.state.analytics.as_ref(),
            &mut event,
        );
        if event.is_accepted() {
            return;
        }

        if event.key == Key::Tab {
            let root = self.state.document.root();
            if event.modifiers.shift {
                focus::focus_previous(&mut self.state.document, root);
            } else {
                focus::focus_next(&mut self.state.document, root);
            }
        }
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.state.document
    }

    /// Mutable access to the document, for embedders injecting content
    /// outside the render pass. Follow structural changes with
    /// [`flush_bindings`](Self::flush_bindings).
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.state.document
    }

    /// The lightbox state machine.
    pub fn modal(&self) -> &GalleryModal {
        &self.state.modal
    }

    /// The interaction dispatcher.
    pub fn dispatcher(&self) -> &InteractionDispatcher {
        &self.state.dispatcher
    }

    /// The number of deferred watches still armed.
    pub fn active_watches(&self) -> usize {
        self.binder.active_watches()
    }
}
