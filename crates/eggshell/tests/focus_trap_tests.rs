//! Focus-trap behavior driven through the page input router.

use std::sync::Arc;

use eggshell::analytics::MemorySink;
use eggshell::page::Page;
use eggshell_core::{ElementId, Key, KeyboardModifiers};

const CONTENT: &str = r#"{
    "gallery": {
        "title": "Gallery",
        "content": [],
        "perfectEgg": {"title": "Result", "description": "Done."},
        "images": [
            {"src": "/a.jpg", "highRes": "/a-l.jpg", "alt": "a", "classes": ["gallery-image"]},
            {"src": "/b.jpg", "highRes": "/b-l.jpg", "alt": "b", "classes": ["gallery-image"]}
        ]
    },
    "cards": {"title": "Cards", "items": []}
}"#;

/// A loaded page whose modal contains an extra focusable control after the
/// close button, so the trap has more than one stop.
fn page_with_busy_modal() -> (Page, ElementId, ElementId) {
    let sink = Arc::new(MemorySink::new());
    let mut page = Page::new(Box::new(sink)).unwrap();
    page.load_content(CONTENT).unwrap();

    let doc = page.document_mut();
    let container = doc.element_by_id("imageModal").unwrap();
    let extra = doc.create_element("button");
    doc.set_attribute(extra, "aria-label", "Download image").unwrap();
    doc.append_child(container, extra).unwrap();
    page.flush_bindings();

    let close = page.document().element_by_id("closeModal").unwrap();
    (page, close, extra)
}

#[test]
fn test_tab_cycles_stay_inside_the_modal() {
    let (mut page, close, extra) = page_with_busy_modal();
    page.click(page.dispatcher().gallery()[0]);
    assert_eq!(page.document().focused(), Some(close));

    let trap: &[ElementId] = &[close, extra];
    for _ in 0..6 {
        page.key_press(Key::Tab, KeyboardModifiers::NONE);
        let focused = page.document().focused().unwrap();
        assert!(trap.contains(&focused), "focus escaped the modal");
    }
}

#[test]
fn test_tab_wraps_at_the_boundaries() {
    let (mut page, close, extra) = page_with_busy_modal();
    page.click(page.dispatcher().gallery()[0]);

    // Forward from the last focusable wraps to the first.
    page.key_press(Key::Tab, KeyboardModifiers::NONE);
    assert_eq!(page.document().focused(), Some(extra));
    page.key_press(Key::Tab, KeyboardModifiers::NONE);
    assert_eq!(page.document().focused(), Some(close));

    // Shift+Tab from the first wraps back to the last.
    page.key_press(Key::Tab, KeyboardModifiers::SHIFT);
    assert_eq!(page.document().focused(), Some(extra));
}

#[test]
fn test_trap_tolerates_content_added_while_open() {
    let (mut page, close, extra) = page_with_busy_modal();
    page.click(page.dispatcher().gallery()[0]);

    // Add a third control while the modal is open; the focusable set is
    // recomputed per press, so it joins the cycle immediately.
    let doc = page.document_mut();
    let container = doc.element_by_id("imageModal").unwrap();
    let late = doc.create_element("button");
    doc.append_child(container, late).unwrap();
    page.flush_bindings();

    page.key_press(Key::Tab, KeyboardModifiers::NONE);
    assert_eq!(page.document().focused(), Some(extra));
    page.key_press(Key::Tab, KeyboardModifiers::NONE);
    assert_eq!(page.document().focused(), Some(late));
    page.key_press(Key::Tab, KeyboardModifiers::NONE);
    assert_eq!(page.document().focused(), Some(close));
}

#[test]
fn test_default_traversal_cycles_page_focusables_while_closed() {
    let (mut page, _close, _extra) = page_with_busy_modal();
    let gallery: Vec<ElementId> = page.dispatcher().gallery().to_vec();

    // With nothing focused, Tab lands on the first focusable element, which
    // is the first gallery image.
    page.key_press(Key::Tab, KeyboardModifiers::NONE);
    assert_eq!(page.document().focused(), Some(gallery[0]));
    page.key_press(Key::Tab, KeyboardModifiers::NONE);
    assert_eq!(page.document().focused(), Some(gallery[1]));

    page.key_press(Key::Tab, KeyboardModifiers::SHIFT);
    assert_eq!(page.document().focused(), Some(gallery[0]));
}
