/*
 * types.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Core document types and name-based lookup.

/// A node in an XML tree: either raw text or an element.
///
/// Text is held unescaped; escaping only happens when the tree is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Character content between tags.
    Text(String),

    /// A named element with attributes and children.
    Element(Element),
}

/// An XML element.
///
/// Elements are created by [`ElementBuilder`](crate::ElementBuilder) or by the
/// [parser](crate::parse), both of which guarantee a non-empty element name and
/// non-empty attribute names. Once built, an element is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) children: Vec<Node>,
}

/// A single `name="value"` pair. The value is stored unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub(crate) name: String,
    pub(crate) value: String,
}

impl Node {
    /// Check if this node is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Check if this node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Find the first child element named `name`. Always `None` for text.
    pub fn get_child(&self, name: &str) -> Option<&Element> {
        self.as_element().and_then(|e| e.get_child(name))
    }

    /// Find the value of the first attribute named `name`. Always `None` for text.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.as_element().and_then(|e| e.get_attr(name))
    }
}

impl Element {
    /// The element name, exactly as written in the tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in declaration order, duplicates included.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Children in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Check if this element has no children (renders as `<name/>`).
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Get the value of the first attribute whose name matches exactly.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Get the first child element whose name matches exactly.
    ///
    /// Text children are skipped; only direct children are searched.
    pub fn get_child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Get all direct child elements named `name`, in document order.
    pub fn get_children(&self, name: &str) -> Vec<&Element> {
        self.elements().filter(|e| e.name == name).collect()
    }

    /// Iterate over the direct child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenation of the direct text children.
    ///
    /// Returns `None` when the element has no text children at all.
    pub fn text(&self) -> Option<String> {
        let mut texts = self.children.iter().filter_map(Node::as_text).peekable();
        texts.peek()?;
        Some(texts.collect())
    }
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element {
            name: "root".to_string(),
            attributes: vec![
                Attribute {
                    name: "id".to_string(),
                    value: "first".to_string(),
                },
                Attribute {
                    name: "id".to_string(),
                    value: "second".to_string(),
                },
            ],
            children: vec![
                Node::Text("lead ".to_string()),
                Node::Element(Element {
                    name: "item".to_string(),
                    attributes: vec![Attribute {
                        name: "n".to_string(),
                        value: "1".to_string(),
                    }],
                    children: vec![],
                }),
                Node::Text("tail".to_string()),
                Node::Element(Element {
                    name: "item".to_string(),
                    attributes: vec![Attribute {
                        name: "n".to_string(),
                        value: "2".to_string(),
                    }],
                    children: vec![],
                }),
            ],
        }
    }

    #[test]
    fn test_get_attr_first_match_wins() {
        let root = sample();
        assert_eq!(root.get_attr("id"), Some("first"));
        assert_eq!(root.get_attr("ID"), None);
        assert_eq!(root.get_attr("missing"), None);
    }

    #[test]
    fn test_get_child_skips_text() {
        let root = sample();
        let item = root.get_child("item").unwrap();
        assert_eq!(item.get_attr("n"), Some("1"));
        assert!(root.get_child("lead ").is_none());
        assert!(root.get_child("missing").is_none());
    }

    #[test]
    fn test_get_children() {
        let root = sample();
        let items = root.get_children("item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].get_attr("n"), Some("2"));
        assert_eq!(root.elements().count(), 2);
    }

    #[test]
    fn test_text_concatenates_direct_text() {
        let root = sample();
        assert_eq!(root.text(), Some("lead tail".to_string()));
        assert_eq!(root.get_child("item").unwrap().text(), None);
    }

    #[test]
    fn test_node_accessors() {
        let text = Node::from("hello");
        assert!(text.is_text());
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.get_child("x").is_none());
        assert!(text.get_attr("x").is_none());

        let element = Node::from(sample());
        assert!(element.is_element());
        assert_eq!(element.get_attr("id"), Some("first"));
        assert_eq!(element.get_child("item").map(Element::name), Some("item"));
    }

    #[test]
    fn test_model_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Node>();
        assert_send_sync::<Element>();
    }
}
