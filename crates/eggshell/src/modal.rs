//! The gallery lightbox.
//!
//! [`GalleryModal`] owns the lightbox lifecycle: it is either closed, or
//! holds exactly one [`ModalSession`] naming the image on display and the
//! element to give focus back to. All transitions happen synchronously
//! inside the event that caused them.
//!
//! # Transitions
//!
//! - `Closed → Open` via [`open`](GalleryModal::open)
//! - `Open → Open` via [`navigate`](GalleryModal::navigate) (clamped to the
//!   gallery bounds) or a repeated `open` (replace-in-place)
//! - `Open → Closed` via [`close`](GalleryModal::close); closing a closed
//!   modal is a defined no-op
//!
//! Each navigation step is modeled as opening the new image, so it re-runs
//! the full set of open side effects, including the `gallery_image_opened`
//! analytics event.

use eggshell_core::{ClickEvent, Document, ElementId, Key, KeyPressEvent};
use serde_json::json;

use crate::analytics::{AnalyticsSink, timestamp_ms};
use crate::focus;

/// Element id of the modal container (doubles as the backdrop).
pub const MODAL_CONTAINER_ID: &str = "imageModal";
/// Element id of the enlarged image surface inside the modal.
pub const MODAL_IMAGE_ID: &str = "modalImage";
/// Element id of the modal's close control.
pub const MODAL_CLOSE_ID: &str = "closeModal";

/// The class that makes the modal visible.
const ACTIVE_CLASS: &str = "active";

/// Errors from lightbox operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    /// `open` was asked for an image index outside the gallery.
    #[error("image index {index} is out of range for a gallery of {len}")]
    InvalidIndex {
        /// The requested index.
        index: usize,
        /// The gallery length at the time of the call.
        len: usize,
    },
}

/// The required modal markup, resolved once at construction.
#[derive(Debug, Clone, Copy)]
struct ModalParts {
    container: ElementId,
    image: ElementId,
    close_button: ElementId,
}

/// State of one open lightbox, destroyed on close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalSession {
    /// Index of the displayed image in the gallery collection.
    pub current_index: usize,
    /// The element focused immediately before the modal opened, if any.
    pub restore_focus: Option<ElementId>,
}

/// The lightbox state machine.
pub struct GalleryModal {
    /// `None` when required markup was missing at construction; the modal is
    /// then permanently disabled and every operation is a no-op.
    parts: Option<ModalParts>,
    /// The gallery collection, fixed at bind time.
    gallery: Vec<ElementId>,
    session: Option<ModalSession>,
}

impl GalleryModal {
    /// Resolve the modal markup in `doc` and construct the state machine.
    ///
    /// If the container, image surface, or close control is missing, the
    /// component logs an error and constructs disabled — no partial
    /// functionality, no retries.
    pub fn new(doc: &Document) -> Self {
        let container = doc.element_by_id(MODAL_CONTAINER_ID);
        let image = doc.element_by_id(MODAL_IMAGE_ID);
        let close_button = doc.element_by_id(MODAL_CLOSE_ID);

        let parts = match (container, image, close_button) {
            (Some(container), Some(image), Some(close_button)) => Some(ModalParts {
                container,
                image,
                close_button,
            }),
            _ => {
                tracing::error!(
                    target: "eggshell::modal",
                    "gallery modal elements not found; modal disabled"
                );
                None
            }
        };

        Self {
            parts,
            gallery: Vec::new(),
            session: None,
        }
    }

    /// Whether the required markup was found at construction.
    pub fn is_enabled(&self) -> bool {
        self.parts.is_some()
    }

    /// Whether a session is active.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&ModalSession> {
        self.session.as_ref()
    }

    /// The index of the displayed image, while open.
    pub fn current_index(&self) -> Option<usize> {
        self.session.map(|s| s.current_index)
    }

    /// The bound gallery collection.
    pub fn gallery(&self) -> &[ElementId] {
        &self.gallery
    }

    /// Adopt the gallery collection discovered by the deferred binder.
    ///
    /// The collection is immutable once bound; a second call is ignored.
    pub fn set_gallery(&mut self, elements: Vec<ElementId>) {
        if !self.gallery.is_empty() {
            tracing::warn!(
                target: "eggshell::modal",
                "gallery collection already bound; ignoring rebind"
            );
            return;
        }
        tracing::debug!(target: "eggshell::modal", count = elements.len(), "gallery collection bound");
        self.gallery = elements;
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Open the lightbox on the image at `index`.
    ///
    /// If the modal is already open this is a replace-in-place transition:
    /// the session keeps its original focus-restore target so closing still
    /// returns focus to whatever held it before the first open.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::InvalidIndex`] if `index` is outside the bound
    /// gallery collection.
    pub fn open(
        &mut self,
        doc: &mut Document,
        analytics: &dyn AnalyticsSink,
        index: usize,
    ) -> Result<(), ModalError> {
        if self.parts.is_none() {
            tracing::trace!(target: "eggshell::modal", "open ignored, modal disabled");
            return Ok(());
        }
        if index >= self.gallery.len() {
            return Err(ModalError::InvalidIndex {
                index,
                len: self.gallery.len(),
            });
        }
        self.show(doc, analytics, index);
        Ok(())
    }

    /// Step the open lightbox by `delta` images.
    ///
    /// Out-of-range targets are silently ignored: no state change, no
    /// analytics, no wraparound. A no-op while closed.
    pub fn navigate(&mut self, doc: &mut Document, analytics: &dyn AnalyticsSink, delta: isize) {
        let Some(session) = self.session else {
            return;
        };
        let target = session.current_index as isize + delta;
        if target < 0 || target as usize >= self.gallery.len() {
            tracing::trace!(target: "eggshell::modal", delta, "navigate out of range, ignored");
            return;
        }
        self.show(doc, analytics, target as usize);
    }

    /// Close the lightbox and restore focus and page scroll.
    ///
    /// Guarded: closing an already-closed modal does nothing.
    pub fn close(&mut self, doc: &mut Document, analytics: &dyn AnalyticsSink) {
        let Some(parts) = self.parts else {
            return;
        };
        let Some(session) = self.session.take() else {
            tracing::trace!(target: "eggshell::modal", "close ignored, modal not open");
            return;
        };

        let _ = doc.remove_class(parts.container, ACTIVE_CLASS);
        doc.set_scroll_locked(false);
        if let Some(restore) = session.restore_focus {
            doc.focus(restore);
        }

        analytics.record(
            "gallery_modal_closed",
            json!({
                "imageIndex": session.current_index,
                "timestamp": timestamp_ms(),
            }),
        );
        tracing::debug!(target: "eggshell::modal", index = session.current_index, "modal closed");
    }

    /// Display the image at `index` (assumed in range) and run the open side
    /// effects.
    fn show(&mut self, doc: &mut Document, analytics: &dyn AnalyticsSink, index: usize) {
        let Some(parts) = self.parts else {
            return;
        };

        // Replace-in-place keeps the restore target captured at first open;
        // a fresh session captures whatever holds focus right now.
        let restore_focus = match self.session.take() {
            Some(session) => session.restore_focus,
            None => doc.focused(),
        };

        let element = self.gallery[index];
        let source = doc
            .attribute(element, "data-high-res")
            .or_else(|| doc.attribute(element, "src"))
            .unwrap_or_default()
            .to_string();
        let alt = doc.attribute(element, "alt").unwrap_or_default().to_string();

        let _ = doc.set_attribute(parts.image, "src", &source);
        let _ = doc.set_attribute(parts.image, "alt", &alt);
        let _ = doc.add_class(parts.container, ACTIVE_CLASS);
        doc.focus(parts.close_button);
        doc.set_scroll_locked(true);

        analytics.record(
            "gallery_image_opened",
            json!({
                "imageIndex": index,
                "imageAlt": alt,
                "timestamp": timestamp_ms(),
            }),
        );

        self.session = Some(ModalSession {
            current_index: index,
            restore_focus,
        });
        tracing::debug!(target: "eggshell::modal", index, "opened gallery image");
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Handle a key press.
    ///
    /// Keyboard events are ignored entirely while closed. While open:
    /// `Escape` closes, the horizontal arrows navigate, and `Tab` runs the
    /// focus trap; everything else is a no-op.
    pub fn handle_key(
        &mut self,
        doc: &mut Document,
        analytics: &dyn AnalyticsSink,
        event: &mut KeyPressEvent,
    ) {
        if self.session.is_none() {
            return;
        }

        match event.key {
            Key::Escape => {
                self.close(doc, analytics);
                event.accept();
            }
            Key::ArrowLeft => {
                self.navigate(doc, analytics, -1);
                event.accept();
            }
            Key::ArrowRight => {
                self.navigate(doc, analytics, 1);
                event.accept();
            }
            Key::Tab => self.trap_focus(doc, event),
            _ => {}
        }
    }

    /// Handle a click that has propagated to `node`.
    ///
    /// `target` is the element originally clicked: a backdrop click counts
    /// only when the container itself was the target, not when a click
    /// inside the modal content bubbled up to it.
    pub fn handle_click(
        &mut self,
        doc: &mut Document,
        analytics: &dyn AnalyticsSink,
        node: ElementId,
        target: ElementId,
        event: &mut ClickEvent,
    ) {
        let Some(parts) = self.parts else {
            return;
        };

        if node == parts.close_button {
            self.close(doc, analytics);
            event.accept();
        } else if node == parts.container && target == parts.container {
            self.close(doc, analytics);
            event.accept();
        }
    }

    /// Keep Tab cycles inside the modal.
    ///
    /// The focusable set is recomputed on every press rather than cached, so
    /// content added to the modal while open participates immediately. Only
    /// boundary presses are accepted; interior presses fall through to the
    /// default traversal, which stays inside the modal anyway.
    fn trap_focus(&self, doc: &mut Document, event: &mut KeyPressEvent) {
        let Some(parts) = self.parts else {
            return;
        };
        let order = focus::tab_order(doc, parts.container);
        let (Some(&first), Some(&last)) = (order.first(), order.last()) else {
            return;
        };

        let focused = doc.focused();
        if event.modifiers.shift {
            if focused == Some(first) {
                doc.focus(last);
                event.accept();
            }
        } else if focused == Some(last) {
            doc.focus(first);
            event.accept();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::MemorySink;
    use eggshell_core::KeyboardModifiers;

    /// A document with modal markup and `count` bound gallery images.
    fn setup(count: usize) -> (Document, GalleryModal) {
        let mut doc = Document::new();

        let container = doc.create_element("div");
        doc.set_attribute(container, "id", MODAL_CONTAINER_ID).unwrap();
        let content = doc.create_element("div");
        doc.add_class(content, "modal-content").unwrap();
        let image = doc.create_element("img");
        doc.set_attribute(image, "id", MODAL_IMAGE_ID).unwrap();
        let close = doc.create_element("button");
        doc.set_attribute(close, "id", MODAL_CLOSE_ID).unwrap();
        doc.append_child(doc.root(), container).unwrap();
        doc.append_child(container, content).unwrap();
        doc.append_child(content, image).unwrap();
        doc.append_child(content, close).unwrap();

        let mut gallery = Vec::new();
        for index in 0..count {
            let img = doc.create_element("img");
            doc.set_attribute(img, "src", &format!("/img/{index}.jpg")).unwrap();
            doc.set_attribute(img, "data-high-res", &format!("/img/{index}-large.jpg"))
                .unwrap();
            doc.set_attribute(img, "alt", &format!("Egg {index}")).unwrap();
            doc.set_attribute(img, "tabindex", "0").unwrap();
            doc.append_child(doc.root(), img).unwrap();
            gallery.push(img);
        }

        let mut modal = GalleryModal::new(&doc);
        modal.set_gallery(gallery);
        (doc, modal)
    }

    #[test]
    fn test_open_side_effects() {
        let (mut doc, mut modal) = setup(3);
        let sink = MemorySink::new();

        let thumb = modal.gallery()[1];
        doc.focus(thumb);
        modal.open(&mut doc, &sink, 1).unwrap();

        assert!(modal.is_open());
        assert_eq!(modal.current_index(), Some(1));
        let image = doc.element_by_id(MODAL_IMAGE_ID).unwrap();
        assert_eq!(doc.attribute(image, "src"), Some("/img/1-large.jpg"));
        assert_eq!(doc.attribute(image, "alt"), Some("Egg 1"));
        let container = doc.element_by_id(MODAL_CONTAINER_ID).unwrap();
        assert!(doc.has_class(container, "active"));
        assert_eq!(doc.focused(), doc.element_by_id(MODAL_CLOSE_ID));
        assert!(doc.is_scroll_locked());

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "gallery_image_opened");
        assert_eq!(events[0].payload["imageIndex"], 1);
        assert_eq!(events[0].payload["imageAlt"], "Egg 1");
        assert!(events[0].payload["timestamp"].is_i64());
    }

    #[test]
    fn test_open_out_of_range_is_an_error() {
        let (mut doc, mut modal) = setup(3);
        let sink = MemorySink::new();

        assert_eq!(
            modal.open(&mut doc, &sink, 3),
            Err(ModalError::InvalidIndex { index: 3, len: 3 })
        );
        assert!(!modal.is_open());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_close_restores_focus_and_scroll() {
        let (mut doc, mut modal) = setup(3);
        let sink = MemorySink::new();

        let thumb = modal.gallery()[0];
        doc.focus(thumb);
        modal.open(&mut doc, &sink, 0).unwrap();
        modal.close(&mut doc, &sink);

        assert!(!modal.is_open());
        assert_eq!(doc.focused(), Some(thumb));
        assert!(!doc.is_scroll_locked());
        let container = doc.element_by_id(MODAL_CONTAINER_ID).unwrap();
        assert!(!doc.has_class(container, "active"));
        assert_eq!(
            sink.names(),
            vec!["gallery_image_opened", "gallery_modal_closed"]
        );
        assert_eq!(sink.events()[1].payload["imageIndex"], 0);
    }

    #[test]
    fn test_close_when_never_opened_is_a_noop() {
        let (mut doc, mut modal) = setup(3);
        let sink = MemorySink::new();

        modal.close(&mut doc, &sink);
        assert!(!modal.is_open());
        assert!(sink.is_empty());
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_navigate_clamps_to_bounds() {
        let (mut doc, mut modal) = setup(3);
        let sink = MemorySink::new();

        modal.open(&mut doc, &sink, 0).unwrap();
        modal.navigate(&mut doc, &sink, 1);
        modal.navigate(&mut doc, &sink, 1);
        modal.navigate(&mut doc, &sink, 1); // past the end, ignored

        assert_eq!(modal.current_index(), Some(2));
        let indices: Vec<_> = sink
            .events()
            .iter()
            .filter(|e| e.name == "gallery_image_opened")
            .map(|e| e.payload["imageIndex"].as_u64().unwrap())
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);

        modal.navigate(&mut doc, &sink, -5);
        assert_eq!(modal.current_index(), Some(2));
    }

    #[test]
    fn test_navigate_while_closed_is_ignored() {
        let (mut doc, mut modal) = setup(3);
        let sink = MemorySink::new();

        modal.navigate(&mut doc, &sink, 1);
        assert!(!modal.is_open());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_duplicate_open_replaces_in_place() {
        let (mut doc, mut modal) = setup(3);
        let sink = MemorySink::new();

        let thumb = modal.gallery()[0];
        doc.focus(thumb);
        modal.open(&mut doc, &sink, 0).unwrap();
        // Focus is now on the close button; a second open must not capture it
        // as the restore target.
        modal.open(&mut doc, &sink, 2).unwrap();
        assert_eq!(modal.current_index(), Some(2));

        modal.close(&mut doc, &sink);
        assert_eq!(doc.focused(), Some(thumb));
    }

    #[test]
    fn test_keyboard_ignored_while_closed() {
        let (mut doc, mut modal) = setup(3);
        let sink = MemorySink::new();

        let mut event = KeyPressEvent::new(Key::Escape, KeyboardModifiers::NONE);
        modal.handle_key(&mut doc, &sink, &mut event);
        assert!(!event.is_accepted());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_keyboard_contract_while_open() {
        let (mut doc, mut modal) = setup(3);
        let sink = MemorySink::new();

        modal.open(&mut doc, &sink, 0).unwrap();

        let mut right = KeyPressEvent::new(Key::ArrowRight, KeyboardModifiers::NONE);
        modal.handle_key(&mut doc, &sink, &mut right);
        assert!(right.is_accepted());
        assert_eq!(modal.current_index(), Some(1));

        let mut left = KeyPressEvent::new(Key::ArrowLeft, KeyboardModifiers::NONE);
        modal.handle_key(&mut doc, &sink, &mut left);
        assert_eq!(modal.current_index(), Some(0));

        let mut other = KeyPressEvent::new(Key::Char('x'), KeyboardModifiers::NONE);
        modal.handle_key(&mut doc, &sink, &mut other);
        assert!(!other.is_accepted());
        assert_eq!(modal.current_index(), Some(0));

        let mut escape = KeyPressEvent::new(Key::Escape, KeyboardModifiers::NONE);
        modal.handle_key(&mut doc, &sink, &mut escape);
        assert!(escape.is_accepted());
        assert!(!modal.is_open());
    }

    #[test]
    fn test_focus_trap_wraps_both_ways() {
        let (mut doc, mut modal) = setup(1);
        let sink = MemorySink::new();

        // Give the modal a second focusable control after the close button.
        let container = doc.element_by_id(MODAL_CONTAINER_ID).unwrap();
        let extra = doc.create_element("button");
        doc.append_child(container, extra).unwrap();
        let close = doc.element_by_id(MODAL_CLOSE_ID).unwrap();

        modal.open(&mut doc, &sink, 0).unwrap();
        assert_eq!(doc.focused(), Some(close));

        // Close button is first in the trap order; Shift+Tab wraps to last.
        let mut backtab = KeyPressEvent::new(Key::Tab, KeyboardModifiers::SHIFT);
        modal.handle_key(&mut doc, &sink, &mut backtab);
        assert!(backtab.is_accepted());
        assert_eq!(doc.focused(), Some(extra));

        // From the last element, Tab wraps to first.
        let mut tab = KeyPressEvent::new(Key::Tab, KeyboardModifiers::NONE);
        modal.handle_key(&mut doc, &sink, &mut tab);
        assert!(tab.is_accepted());
        assert_eq!(doc.focused(), Some(close));
    }

    #[test]
    fn test_backdrop_click_closes_but_content_click_does_not() {
        let (mut doc, mut modal) = setup(2);
        let sink = MemorySink::new();

        modal.open(&mut doc, &sink, 0).unwrap();
        let container = doc.element_by_id(MODAL_CONTAINER_ID).unwrap();
        let image = doc.element_by_id(MODAL_IMAGE_ID).unwrap();

        // Click on the image bubbles to the container: not a backdrop click.
        let mut event = ClickEvent::new();
        modal.handle_click(&mut doc, &sink, container, image, &mut event);
        assert!(!event.is_accepted());
        assert!(modal.is_open());

        // Click directly on the backdrop closes.
        let mut event = ClickEvent::new();
        modal.handle_click(&mut doc, &sink, container, container, &mut event);
        assert!(event.is_accepted());
        assert!(!modal.is_open());
    }

    #[test]
    fn test_missing_markup_disables_modal() {
        let doc = Document::new();
        let mut modal = GalleryModal::new(&doc);
        modal.set_gallery(Vec::new());
        let sink = MemorySink::new();
        let mut doc = doc;

        assert!(!modal.is_enabled());
        assert!(modal.open(&mut doc, &sink, 0).is_ok());
        assert!(!modal.is_open());
        modal.close(&mut doc, &sink);
        assert!(sink.is_empty());
    }
}
