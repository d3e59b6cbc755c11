//! CSS-subset selector types, parsing, and matching.
//!
//! The page behaviors locate elements with a small selector language:
//! type, `#id`, `.class`, and `[attr]`/`[attr=value]` simple selectors,
//! compounded freely, connected with descendant (whitespace) and child
//! (`>`) combinators, and grouped with commas.

mod matcher;
mod parser;
mod types;

pub use matcher::{list_matches, part_matches, selector_matches};
pub use parser::parse_selector_list;
pub use types::{
    AttributeOp, AttributeSelector, Combinator, Selector, SelectorList, SelectorPart, TypeSelector,
};
