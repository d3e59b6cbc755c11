//! The page content data model.
//!
//! Content arrives as structured JSON (in a real deployment from a CMS; here
//! from an embedded document) and is rendered into the element tree by
//! [`crate::render`]. The behavior components never read this data directly;
//! they consume only the rendered elements.

use serde::{Deserialize, Serialize};

/// Errors from loading page content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The content document was not valid JSON for the expected shape.
    #[error("failed to parse page content: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The full content document for the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    /// The gallery section.
    pub gallery: GallerySection,
    /// The cards section.
    pub cards: CardsSection,
}

impl PageContent {
    /// Parse a content document from JSON.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The gallery section: intro copy plus the image collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GallerySection {
    /// Section title.
    pub title: String,
    /// Intro paragraphs, in order.
    pub content: Vec<String>,
    /// The "perfect result" sub-block.
    pub perfect_egg: PerfectEgg,
    /// The gallery images.
    pub images: Vec<GalleryImage>,
}

/// The highlighted sub-block inside the gallery section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfectEgg {
    /// Sub-block title.
    pub title: String,
    /// Sub-block body text.
    pub description: String,
}

/// One gallery image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    /// Thumbnail source, always loaded.
    pub src: String,
    /// The larger asset the lightbox displays.
    pub high_res: String,
    /// Accessible alternative text.
    pub alt: String,
    /// Presentation classes.
    #[serde(default)]
    pub classes: Vec<String>,
}

/// The cards section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsSection {
    /// Section title.
    pub title: String,
    /// The cards, in display order.
    pub items: Vec<Card>,
}

/// One card: image, title, description, and a tracked link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// The card's image.
    pub image: CardImage,
    /// The card title (rendered as the card's heading).
    pub title: String,
    /// The card body text.
    pub description: String,
    /// The tracked link rendered after the description.
    pub link: CardLink,
}

/// A card's image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    /// Thumbnail source.
    pub src: String,
    /// The larger asset.
    pub high_res: String,
    /// Accessible alternative text.
    pub alt: String,
}

/// A card's call-to-action link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLink {
    /// Link target.
    pub href: String,
    /// Browsing-context target (e.g., `_blank`).
    #[serde(default)]
    pub target: Option<String>,
    /// Relationship tokens (e.g., `noopener noreferrer`).
    #[serde(default)]
    pub rel: Option<String>,
    /// Link text.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "gallery": {
            "title": "How to cook the perfect egg",
            "content": ["Start with fresh eggs.", "Timing is everything."],
            "perfectEgg": {
                "title": "The perfect result",
                "description": "A just-set white and a jammy yolk."
            },
            "images": [
                {
                    "src": "/images/egg-1.jpg",
                    "highRes": "/images/egg-1-large.jpg",
                    "alt": "Soft boiled egg on toast",
                    "classes": ["gallery-image", "tall"]
                }
            ]
        },
        "cards": {
            "title": "More egg recipes",
            "items": [
                {
                    "image": {
                        "src": "/images/boiled.jpg",
                        "highRes": "/images/boiled-large.jpg",
                        "alt": "Boiled egg"
                    },
                    "title": "Perfect Boiled Egg",
                    "description": "Six minutes, then an ice bath.",
                    "link": {
                        "href": "/recipes/egg",
                        "target": "_blank",
                        "rel": "noopener",
                        "text": "Learn more"
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_sample_content() {
        let content = PageContent::from_json(SAMPLE).unwrap();
        assert_eq!(content.gallery.images.len(), 1);
        assert_eq!(content.gallery.images[0].high_res, "/images/egg-1-large.jpg");
        assert_eq!(content.gallery.perfect_egg.title, "The perfect result");
        assert_eq!(content.cards.items[0].title, "Perfect Boiled Egg");
        assert_eq!(content.cards.items[0].link.target.as_deref(), Some("_blank"));
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "gallery": {
                "title": "t", "content": [],
                "perfectEgg": {"title": "p", "description": "d"},
                "images": [{"src": "s", "highRes": "h", "alt": "a"}]
            },
            "cards": {
                "title": "c",
                "items": [{
                    "image": {"src": "s", "highRes": "h", "alt": "a"},
                    "title": "T", "description": "D",
                    "link": {"href": "/x", "text": "Go"}
                }]
            }
        }"#;
        let content = PageContent::from_json(json).unwrap();
        assert!(content.gallery.images[0].classes.is_empty());
        assert_eq!(content.cards.items[0].link.rel, None);
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(PageContent::from_json("{").is_err());
        assert!(PageContent::from_json(r#"{"gallery": {}}"#).is_err());
    }
}
