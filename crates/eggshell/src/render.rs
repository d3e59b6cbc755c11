//! Content rendering.
//!
//! A thin, order-independent pass that turns [`PageContent`](crate::content::PageContent)
//! into elements. The static scaffold carries the anchors the renderer and
//! the behavior components address by id; the render functions fill it in.
//!
//! Rendered markup contract relied on elsewhere:
//! - gallery images carry `data-high-res` and alt text and the
//!   `gallery-image` class
//! - each card has an `h3` heading and a description paragraph with the id
//!   `card-{index}-description`
//! - the modal markup uses the ids in [`crate::modal`]

use eggshell_core::selector::{Selector, SelectorList, SelectorPart};
use eggshell_core::{Document, ElementId, Result};

use crate::content::{CardsSection, GallerySection, PageContent};
use crate::modal::{MODAL_CLOSE_ID, MODAL_CONTAINER_ID, MODAL_IMAGE_ID};

/// Build the static page skeleton into an empty document.
///
/// Creates the gallery and cards sections with their id-addressed anchors,
/// and the (initially hidden) modal markup.
pub fn build_scaffold(doc: &mut Document) -> Result<()> {
    let root = doc.root();

    // Gallery section
    let gallery = doc.create_element("section");
    doc.add_class(gallery, "gallery")?;
    let title = doc.create_element("h2");
    doc.set_attribute(title, "id", "gallery-title")?;
    let text = doc.create_element("div");
    doc.set_attribute(text, "id", "gallery-text")?;
    let images = doc.create_element("div");
    doc.add_class(images, "gallery-images")?;
    doc.set_attribute(images, "data-gallery", "main")?;
    let egg = doc.create_element("aside");
    doc.add_class(egg, "perfect-egg")?;
    let egg_title = doc.create_element("h3");
    doc.set_attribute(egg_title, "id", "egg-title")?;
    let egg_text = doc.create_element("p");
    doc.set_attribute(egg_text, "id", "egg-text")?;

    doc.append_child(root, gallery)?;
    doc.append_child(gallery, title)?;
    doc.append_child(gallery, text)?;
    doc.append_child(gallery, images)?;
    doc.append_child(gallery, egg)?;
    doc.append_child(egg, egg_title)?;
    doc.append_child(egg, egg_text)?;

    // Cards section
    let cards = doc.create_element("section");
    doc.add_class(cards, "cards")?;
    let cards_title = doc.create_element("h2");
    doc.set_attribute(cards_title, "id", "cards-title")?;
    let cards_container = doc.create_element("div");
    doc.set_attribute(cards_container, "id", "cards-container")?;

    doc.append_child(root, cards)?;
    doc.append_child(cards, cards_title)?;
    doc.append_child(cards, cards_container)?;

    // Modal markup
    let modal = doc.create_element("div");
    doc.set_attribute(modal, "id", MODAL_CONTAINER_ID)?;
    doc.add_class(modal, "modal")?;
    doc.set_attribute(modal, "role", "dialog")?;
    doc.set_attribute(modal, "aria-modal", "true")?;
    let modal_content = doc.create_element("div");
    doc.add_class(modal_content, "modal-content")?;
    let modal_image = doc.create_element("img");
    doc.set_attribute(modal_image, "id", MODAL_IMAGE_ID)?;
    let close = doc.create_element("button");
    doc.set_attribute(close, "id", MODAL_CLOSE_ID)?;
    doc.set_attribute(close, "aria-label", "Close image")?;
    doc.set_text(close, "\u{00d7}")?;

    doc.append_child(root, modal)?;
    doc.append_child(modal, modal_content)?;
    doc.append_child(modal_content, modal_image)?;
    doc.append_child(modal_content, close)?;

    tracing::debug!(target: "eggshell::render", "page scaffold built");
    Ok(())
}

/// Render the full content document into the scaffold.
pub fn render(doc: &mut Document, content: &PageContent) -> Result<()> {
    render_gallery(doc, &content.gallery)?;
    render_cards(doc, &content.cards)?;
    Ok(())
}

/// Render the gallery section.
pub fn render_gallery(doc: &mut Document, gallery: &GallerySection) -> Result<()> {
    set_text_by_id(doc, "gallery-title", &gallery.title)?;
    set_text_by_id(doc, "egg-title", &gallery.perfect_egg.title)?;
    set_text_by_id(doc, "egg-text", &gallery.perfect_egg.description)?;

    if let Some(text) = doc.element_by_id("gallery-text") {
        for paragraph in &gallery.content {
            let p = doc.create_element("p");
            doc.set_text(p, paragraph)?;
            doc.append_child(text, p)?;
        }
    }

    let container_selector = SelectorList::single(Selector {
        parts: vec![SelectorPart::new().with_attribute_value("data-gallery", "main")],
        combinators: vec![],
    });
    let Some(container) = doc.query_selector(&container_selector) else {
        tracing::warn!(target: "eggshell::render", "gallery container missing; images skipped");
        return Ok(());
    };

    for (index, image) in gallery.images.iter().enumerate() {
        let img = doc.create_element("img");
        doc.set_attribute(img, "src", &image.src)?;
        doc.set_attribute(img, "data-high-res", &image.high_res)?;
        doc.set_attribute(img, "alt", &image.alt)?;
        for class in &image.classes {
            doc.add_class(img, class)?;
        }
        doc.set_attribute(img, "tabindex", "0")?;
        doc.set_attribute(img, "role", "button")?;
        doc.set_attribute(
            img,
            "aria-label",
            &format!("Click to view larger image {}", index + 1),
        )?;
        if index != 0 {
            doc.set_attribute(img, "loading", "lazy")?;
        }
        doc.append_child(container, img)?;
    }

    tracing::debug!(
        target: "eggshell::render",
        images = gallery.images.len(),
        "gallery rendered"
    );
    Ok(())
}

/// Render the cards section.
pub fn render_cards(doc: &mut Document, cards: &CardsSection) -> Result<()> {
    set_text_by_id(doc, "cards-title", &cards.title)?;

    let Some(container) = doc.element_by_id("cards-container") else {
        tracing::warn!(target: "eggshell::render", "cards container missing; cards skipped");
        return Ok(());
    };

    for (index, card) in cards.items.iter().enumerate() {
        let article = create_card(doc, index, card)?;
        doc.append_child(container, article)?;
    }

    tracing::debug!(target: "eggshell::render", cards = cards.items.len(), "cards rendered");
    Ok(())
}

/// Create one card element (detached).
fn create_card(doc: &mut Document, index: usize, card: &crate::content::Card) -> Result<ElementId> {
    let article = doc.create_element("article");
    doc.add_class(article, "card")?;

    let img = doc.create_element("img");
    doc.set_attribute(img, "src", &card.image.src)?;
    doc.set_attribute(img, "data-high-res", &card.image.high_res)?;
    doc.set_attribute(img, "alt", &card.image.alt)?;
    doc.add_class(img, "card-image")?;
    doc.set_attribute(img, "loading", "lazy")?;

    let heading = doc.create_element("h3");
    doc.set_text(heading, &card.title)?;

    let description = doc.create_element("p");
    doc.set_attribute(description, "id", &format!("card-{index}-description"))?;
    doc.set_text(description, &format!("{} ", card.description))?;

    let link = doc.create_element("a");
    doc.set_attribute(link, "href", &card.link.href)?;
    if let Some(target) = &card.link.target {
        doc.set_attribute(link, "target", target)?;
    }
    if let Some(rel) = &card.link.rel {
        doc.set_attribute(link, "rel", rel)?;
    }
    doc.set_text(link, &card.link.text)?;

    doc.append_child(article, img)?;
    doc.append_child(article, heading)?;
    doc.append_child(article, description)?;
    doc.append_child(description, link)?;
    Ok(article)
}

fn set_text_by_id(doc: &mut Document, id: &str, text: &str) -> Result<()> {
    if let Some(element) = doc.element_by_id(id) {
        doc.set_text(element, text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Card, CardImage, CardLink, GalleryImage, PerfectEgg};
    use eggshell_core::parse_selector_list;

    fn sample_gallery() -> GallerySection {
        GallerySection {
            title: "How to cook the perfect egg".into(),
            content: vec!["Start fresh.".into(), "Mind the clock.".into()],
            perfect_egg: PerfectEgg {
                title: "The perfect result".into(),
                description: "Jammy yolk.".into(),
            },
            images: (0..3)
                .map(|n| GalleryImage {
                    src: format!("/images/egg-{n}.jpg"),
                    high_res: format!("/images/egg-{n}-large.jpg"),
                    alt: format!("Egg {n}"),
                    classes: vec!["gallery-image".into()],
                })
                .collect(),
        }
    }

    fn sample_cards() -> CardsSection {
        CardsSection {
            title: "More recipes".into(),
            items: vec![Card {
                image: CardImage {
                    src: "/images/boiled.jpg".into(),
                    high_res: "/images/boiled-large.jpg".into(),
                    alt: "Boiled egg".into(),
                },
                title: "Perfect Boiled Egg".into(),
                description: "Six minutes.".into(),
                link: CardLink {
                    href: "/recipes/egg".into(),
                    target: Some("_blank".into()),
                    rel: Some("noopener".into()),
                    text: "Learn more".into(),
                },
            }],
        }
    }

    #[test]
    fn test_scaffold_exposes_anchors() {
        let mut doc = Document::new();
        build_scaffold(&mut doc).unwrap();

        for id in [
            "gallery-title",
            "gallery-text",
            "egg-title",
            "egg-text",
            "cards-title",
            "cards-container",
            MODAL_CONTAINER_ID,
            MODAL_IMAGE_ID,
            MODAL_CLOSE_ID,
        ] {
            assert!(doc.element_by_id(id).is_some(), "missing #{id}");
        }

        let close = doc.element_by_id(MODAL_CLOSE_ID).unwrap();
        assert_eq!(doc.tag(close), Some("button"));
        assert!(doc.is_focusable(close));
    }

    #[test]
    fn test_render_gallery_markup_contract() {
        let mut doc = Document::new();
        build_scaffold(&mut doc).unwrap();
        render_gallery(&mut doc, &sample_gallery()).unwrap();

        let selector = parse_selector_list(".gallery-image").unwrap();
        let images = doc.query_selector_all(&selector);
        assert_eq!(images.len(), 3);

        assert_eq!(
            doc.attribute(images[0], "data-high-res"),
            Some("/images/egg-0-large.jpg")
        );
        assert_eq!(doc.attribute(images[0], "alt"), Some("Egg 0"));
        assert_eq!(doc.attribute(images[0], "loading"), None);
        assert_eq!(doc.attribute(images[1], "loading"), Some("lazy"));
        assert!(doc.is_focusable(images[2]));

        let title = doc.element_by_id("gallery-title").unwrap();
        assert_eq!(doc.text(title), Some("How to cook the perfect egg"));
        let text = doc.element_by_id("gallery-text").unwrap();
        assert_eq!(doc.children(text).len(), 2);
    }

    #[test]
    fn test_render_cards_markup_contract() {
        let mut doc = Document::new();
        build_scaffold(&mut doc).unwrap();
        render_cards(&mut doc, &sample_cards()).unwrap();

        let cards = doc.query_selector_all(&parse_selector_list(".card").unwrap());
        assert_eq!(cards.len(), 1);

        let description = doc.element_by_id("card-0-description").unwrap();
        assert_eq!(doc.parent(description), Some(cards[0]));
        assert_eq!(doc.text_content(description), "Six minutes. Learn more");

        let links = doc.query_selector_all(&parse_selector_list(".card a").unwrap());
        assert_eq!(links.len(), 1);
        assert_eq!(doc.attribute(links[0], "href"), Some("/recipes/egg"));
        assert_eq!(doc.attribute(links[0], "target"), Some("_blank"));
        assert_eq!(doc.attribute(links[0], "rel"), Some("noopener"));
    }

    #[test]
    fn test_render_into_bare_document_is_harmless() {
        let mut doc = Document::new();
        render_gallery(&mut doc, &sample_gallery()).unwrap();
        render_cards(&mut doc, &sample_cards()).unwrap();
        assert_eq!(doc.element_count(), 1);
    }
}
