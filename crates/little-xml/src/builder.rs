/*
 * builder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Programmatic construction of element trees.
//!
//! All names and values handed to the builder are raw text; escaping happens
//! only when the tree is rendered.
//!
//! An empty text child renders as nothing, and two adjacent text children
//! render as one run of text, so neither survives a render/parse round trip.
//! The builder accepts them anyway.

use crate::error::BuildError;
use crate::types::{Attribute, Element, Node};

/// Incremental builder for an [`Element`].
///
/// ```rust
/// use little_xml::Element;
///
/// let doc = Element::builder("tag-name")
///     .attr("attr-name-1", "attr-value-1")
///     .text("Some text & stuff in the tag")
///     .child(Element::builder("child-tag").build().unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     doc.to_xml_string(),
///     r#"<tag-name attr-name-1="attr-value-1">Some text &amp; stuff in the tag<child-tag/></tag-name>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl ElementBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute. Duplicate names are kept in order.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append several attributes given as `(name, value)` pairs.
    pub fn attrs<N, V>(mut self, pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(pairs.into_iter().map(|(name, value)| Attribute {
                name: name.into(),
                value: value.into(),
            }));
        self
    }

    /// Append a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append a child node (an [`Element`], a [`Node`], or text).
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn children<C: Into<Node>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Finish the element.
    ///
    /// # Errors
    ///
    /// Fails if the element name or any attribute name is empty.
    pub fn build(self) -> Result<Element, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::EmptyElementName);
        }
        if self.attributes.iter().any(|a| a.name.is_empty()) {
            return Err(BuildError::EmptyAttributeName { element: self.name });
        }
        Ok(Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
        })
    }
}

impl Element {
    /// Start building an element named `name`.
    pub fn builder(name: impl Into<String>) -> ElementBuilder {
        ElementBuilder::new(name)
    }
}

/// Build an element from a name, attribute pairs and children in one call.
///
/// ```rust
/// use little_xml::{element, Node};
///
/// let query = element(
///     "query",
///     [("lang", "en")],
///     [Node::from("TEST"), element("position", [("lat", "23.01515")], Vec::<Node>::new())?.into()],
/// )?;
/// assert_eq!(query.to_xml_string(), r#"<query lang="en">TEST<position lat="23.01515"/></query>"#);
/// # Ok::<(), little_xml::BuildError>(())
/// ```
pub fn element<N, V, C>(
    name: impl Into<String>,
    attributes: impl IntoIterator<Item = (N, V)>,
    children: impl IntoIterator<Item = C>,
) -> Result<Element, BuildError>
where
    N: Into<String>,
    V: Into<String>,
    C: Into<Node>,
{
    ElementBuilder::new(name)
        .attrs(attributes)
        .children(children)
        .build()
}
