//! Selector type definitions.

use std::fmt;

/// A group of selectors separated by commas (e.g., `button, [href]`).
///
/// An element matches the list if it matches any member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorList {
    /// The member selectors, in source order.
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    /// Create a list from a single selector.
    pub fn single(selector: Selector) -> Self {
        Self {
            selectors: vec![selector],
        }
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

/// A complete selector (e.g., `.card a` or `section > img.gallery-image`).
///
/// A selector consists of one or more parts connected by combinators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    /// Chain of selector parts, left to right.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Create a simple type selector.
    pub fn type_selector(tag: impl Into<String>) -> Self {
        Self {
            parts: vec![SelectorPart::type_only(tag)],
            combinators: vec![],
        }
    }

    /// Create a class selector.
    pub fn class(class_name: impl Into<String>) -> Self {
        Self {
            parts: vec![SelectorPart::class_only(class_name)],
            combinators: vec![],
        }
    }

    /// Create an ID selector.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            parts: vec![SelectorPart::id_only(id)],
            combinators: vec![],
        }
    }

    /// Add a descendant selector part.
    pub fn descendant(mut self, part: SelectorPart) -> Self {
        if !self.parts.is_empty() {
            self.combinators.push(Combinator::Descendant);
        }
        self.parts.push(part);
        self
    }

    /// Add a child selector part.
    pub fn child(mut self, part: SelectorPart) -> Self {
        if !self.parts.is_empty() {
            self.combinators.push(Combinator::Child);
        }
        self.parts.push(part);
        self
    }

    /// Get the rightmost (subject) selector part.
    pub fn subject(&self) -> Option<&SelectorPart> {
        self.parts.last()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match &self.combinators[i - 1] {
                    Combinator::Descendant => write!(f, " ")?,
                    Combinator::Child => write!(f, " > ")?,
                }
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// A single selector segment (e.g., `img.gallery-image[data-high-res]`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorPart {
    /// Type selector (tag name or universal).
    pub type_selector: Option<TypeSelector>,
    /// ID selector (`#id`).
    pub id: Option<String>,
    /// Class selectors (`.class`).
    pub classes: Vec<String>,
    /// Attribute selectors (`[attr]`, `[attr=value]`).
    pub attributes: Vec<AttributeSelector>,
}

impl SelectorPart {
    /// Create a new empty selector part.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a type-only selector.
    pub fn type_only(tag: impl Into<String>) -> Self {
        Self {
            type_selector: Some(TypeSelector::Type(tag.into())),
            ..Default::default()
        }
    }

    /// Create a universal selector part.
    pub fn universal() -> Self {
        Self {
            type_selector: Some(TypeSelector::Universal),
            ..Default::default()
        }
    }

    /// Create a class-only selector.
    pub fn class_only(class_name: impl Into<String>) -> Self {
        Self {
            classes: vec![class_name.into()],
            ..Default::default()
        }
    }

    /// Create an ID-only selector.
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Add a class selector.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add an attribute-presence selector.
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(AttributeSelector {
            name: name.into(),
            op: AttributeOp::Present,
        });
        self
    }

    /// Add an attribute-equals selector.
    pub fn with_attribute_value(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.push(AttributeSelector {
            name: name.into(),
            op: AttributeOp::Equals(value.into()),
        });
        self
    }

    /// Check if this part carries no constraints at all.
    pub fn is_empty(&self) -> bool {
        self.type_selector.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_selector {
            Some(TypeSelector::Universal) => write!(f, "*")?,
            Some(TypeSelector::Type(t)) => write!(f, "{t}")?,
            None => {}
        }

        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }

        for class in &self.classes {
            write!(f, ".{class}")?;
        }

        for attr in &self.attributes {
            write!(f, "{attr}")?;
        }

        Ok(())
    }
}

/// Type selector - matches the element's tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSelector {
    /// Universal selector (`*`) - matches any element.
    Universal,
    /// Named tag (e.g., `img`, `a`, `article`).
    Type(String),
}

/// Combinator between selector parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (whitespace): matches any descendant.
    Descendant,
    /// Child combinator (`>`): matches direct children only.
    Child,
}

/// An attribute constraint within a selector part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    /// The attribute name.
    pub name: String,
    /// How the attribute value is constrained.
    pub op: AttributeOp,
}

/// Attribute matching operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeOp {
    /// `[attr]` - the attribute exists.
    Present,
    /// `[attr=value]` - the attribute equals the value exactly.
    Equals(String),
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.op {
            AttributeOp::Present => write!(f, "[{}]", self.name),
            AttributeOp::Equals(value) => write!(f, "[{}=\"{}\"]", self.name, value),
        }
    }
}
