//! Interaction wiring for bound collections.
//!
//! [`InteractionDispatcher`] adopts the element collections discovered by
//! the deferred binder, decorates them for assistive technology, and routes
//! user input to the modal state machine and the analytics sink:
//!
//! - gallery image `i`: click, `Enter`, or `Space` → open the lightbox on
//!   image `i`
//! - card link `i`: click → a `card_link_clicked` analytics event carrying
//!   the link's identity and the enclosing card's title
//!
//! Binding is purely additive and runs exactly once per collection; handlers
//! are never removed.

use eggshell_core::selector::{Selector, SelectorList};
use eggshell_core::{ClickEvent, Document, ElementId, Key, KeyPressEvent};
use serde_json::{Value, json};

use crate::analytics::{AnalyticsSink, timestamp_ms};
use crate::modal::GalleryModal;

/// Routes clicks and key presses on bound elements to the modal and the
/// analytics sink.
pub struct InteractionDispatcher {
    /// The gallery image collection, fixed at bind time.
    gallery: Vec<ElementId>,
    /// The card link collection, fixed at bind time.
    card_links: Vec<ElementId>,
    /// Selector for resolving a link's enclosing card.
    card_selector: SelectorList,
}

impl InteractionDispatcher {
    /// Create a dispatcher with nothing bound yet.
    pub fn new() -> Self {
        Self {
            gallery: Vec::new(),
            card_links: Vec::new(),
            card_selector: SelectorList::single(Selector::class("card")),
        }
    }

    /// The bound gallery collection.
    pub fn gallery(&self) -> &[ElementId] {
        &self.gallery
    }

    /// The bound card link collection.
    pub fn card_links(&self) -> &[ElementId] {
        &self.card_links
    }

    /// Adopt the gallery images and mark each as an activatable control.
    ///
    /// Each image becomes focusable (`tabindex="0"`) and exposes a `button`
    /// role for assistive technology. A second call is ignored; the
    /// collection is immutable once bound.
    pub fn bind_gallery(&mut self, doc: &mut Document, elements: &[ElementId]) {
        if !self.gallery.is_empty() {
            tracing::warn!(
                target: "eggshell::dispatcher",
                "gallery collection already bound; ignoring rebind"
            );
            return;
        }
        for &image in elements {
            let _ = doc.set_attribute(image, "tabindex", "0");
            let _ = doc.set_attribute(image, "role", "button");
        }
        self.gallery = elements.to_vec();
        tracing::debug!(
            target: "eggshell::dispatcher",
            count = self.gallery.len(),
            "bound events to gallery images"
        );
    }

    /// Adopt the card links and decorate each with its stable index and an
    /// accessibility cross-reference to its card's description.
    pub fn bind_card_links(&mut self, doc: &mut Document, elements: &[ElementId]) {
        if !self.card_links.is_empty() {
            tracing::warn!(
                target: "eggshell::dispatcher",
                "card link collection already bound; ignoring rebind"
            );
            return;
        }
        for (index, &link) in elements.iter().enumerate() {
            let _ = doc.set_attribute(link, "data-link-index", &index.to_string());
            let _ = doc.set_attribute(link, "aria-describedby", &format!("card-{index}-description"));
        }
        self.card_links = elements.to_vec();
        tracing::debug!(
            target: "eggshell::dispatcher",
            count = self.card_links.len(),
            "bound tracking to card links"
        );
    }

    /// Handle a click that has propagated to `node`.
    pub fn handle_click(
        &mut self,
        doc: &mut Document,
        modal: &mut GalleryModal,
        analytics: &dyn AnalyticsSink,
        node: ElementId,
        event: &mut ClickEvent,
    ) {
        if let Some(index) = self.gallery.iter().position(|&image| image == node) {
            event.accept();
            if let Err(error) = modal.open(doc, analytics, index) {
                tracing::warn!(target: "eggshell::dispatcher", %error, "could not open modal");
            }
            return;
        }

        if let Some(index) = self.card_links.iter().position(|&link| link == node) {
            event.accept();
            self.record_link_click(doc, analytics, index, node);
        }
    }

    /// Handle a key press targeting the focused element.
    ///
    /// `Enter` and `Space` on a focused gallery image activate it like a
    /// click, with the default action suppressed.
    pub fn handle_key(
        &mut self,
        doc: &mut Document,
        modal: &mut GalleryModal,
        analytics: &dyn AnalyticsSink,
        event: &mut KeyPressEvent,
    ) {
        if !matches!(event.key, Key::Enter | Key::Space) {
            return;
        }
        let Some(focused) = doc.focused() else {
            return;
        };
        let Some(index) = self.gallery.iter().position(|&image| image == focused) else {
            return;
        };

        event.accept();
        if let Err(error) = modal.open(doc, analytics, index) {
            tracing::warn!(target: "eggshell::dispatcher", %error, "could not open modal");
        }
    }

    /// Emit the `card_link_clicked` analytics event for the link at `index`.
    fn record_link_click(
        &self,
        doc: &Document,
        analytics: &dyn AnalyticsSink,
        index: usize,
        link: ElementId,
    ) {
        let href = doc.attribute(link, "href").unwrap_or_default().to_string();
        let text = doc.text_content(link).trim().to_string();
        let card_title = doc
            .closest(link, &self.card_selector)
            .and_then(|card| self.card_heading_text(doc, card))
            .unwrap_or_else(|| "Unknown".to_string());

        let element_id = match doc.attribute(link, "id") {
            Some(id) => Value::from(id),
            None => Value::Null,
        };
        let classes = doc.classes(link);
        let element_classes = if classes.is_empty() {
            Value::Null
        } else {
            Value::from(classes.join(" "))
        };

        tracing::debug!(
            target: "eggshell::dispatcher",
            index,
            href = %href,
            card = %card_title,
            "card link clicked"
        );
        analytics.record(
            "card_link_clicked",
            json!({
                "linkIndex": index,
                "linkHref": href,
                "linkText": text,
                "cardTitle": card_title,
                "timestamp": timestamp_ms(),
                "elementId": element_id,
                "elementClasses": element_classes,
            }),
        );
    }

    /// The text of the first heading inside a card, if any.
    fn card_heading_text(&self, doc: &Document, card: ElementId) -> Option<String> {
        doc.descendants(card)
            .into_iter()
            .find(|&child| doc.tag(child) == Some("h3"))
            .map(|heading| doc.text_content(heading).trim().to_string())
    }

    /// A summary of the bound links, for diagnostics dashboards.
    pub fn link_summary(&self, doc: &Document) -> Value {
        let link_data: Vec<Value> = self
            .card_links
            .iter()
            .enumerate()
            .map(|(index, &link)| {
                let card_title = doc
                    .closest(link, &self.card_selector)
                    .and_then(|card| self.card_heading_text(doc, card))
                    .unwrap_or_else(|| "Unknown".to_string());
                json!({
                    "index": index,
                    "href": doc.attribute(link, "href").unwrap_or_default(),
                    "text": doc.text_content(link).trim(),
                    "cardTitle": card_title,
                })
            })
            .collect();

        json!({
            "totalLinks": self.card_links.len(),
            "linkData": link_data,
        })
    }
}

impl Default for InteractionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
