/*
 * writer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Rendering trees to XML text.
//!
//! Rendering is done in two steps: [`serialized_len`] computes the exact byte
//! length of the output, then [`to_xml_string`] allocates a buffer of that size
//! once and fills it. The two must agree byte for byte.

use crate::escape::{escape_into, escaped_len};
use crate::{Element, Node};
use std::convert::Infallible;
use std::fmt;

/// Output target shared by [`to_xml_string`] and [`write_node`].
pub(crate) trait Sink {
    type Error;

    fn put(&mut self, s: &str) -> Result<(), Self::Error>;
}

impl Sink for String {
    type Error = Infallible;

    fn put(&mut self, s: &str) -> Result<(), Infallible> {
        self.push_str(s);
        Ok(())
    }
}

struct FmtSink<'w, W: ?Sized>(&'w mut W);

impl<W: fmt::Write + ?Sized> Sink for FmtSink<'_, W> {
    type Error = fmt::Error;

    fn put(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s)
    }
}

/// Exact byte length of the rendered form of `node`.
pub fn serialized_len(node: &Node) -> usize {
    match node {
        Node::Text(text) => escaped_len(text),
        Node::Element(element) => element_len(element),
    }
}

fn element_len(element: &Element) -> usize {
    let name_len = element.name.len();
    let tags = if element.children.is_empty() {
        // <name/>
        3 + name_len
    } else {
        // <name></name>
        5 + 2 * name_len + element.children.iter().map(serialized_len).sum::<usize>()
    };
    let attrs: usize = element
        .attributes
        .iter()
        // (space)name="value"
        .map(|a| 4 + a.name.len() + escaped_len(&a.value))
        .sum();
    tags + attrs
}

/// Render `node` to a string allocated once with its exact final size.
pub fn to_xml_string(node: &Node) -> String {
    let len = serialized_len(node);
    let mut out = String::with_capacity(len);
    let Ok(()) = render_node(node, &mut out);
    debug_assert_eq!(out.len(), len, "serialized length mismatch");
    out
}

/// Render `node` into any [`fmt::Write`] sink.
///
/// Produces the same text as [`to_xml_string`], without the up-front sizing.
pub fn write_node<W: fmt::Write + ?Sized>(node: &Node, w: &mut W) -> fmt::Result {
    render_node(node, &mut FmtSink(w))
}

fn render_node<S: Sink>(node: &Node, out: &mut S) -> Result<(), S::Error> {
    match node {
        Node::Text(text) => escape_into(text, out),
        Node::Element(element) => render_element(element, out),
    }
}

fn render_element<S: Sink>(element: &Element, out: &mut S) -> Result<(), S::Error> {
    out.put("<")?;
    out.put(&element.name)?;
    for attr in &element.attributes {
        out.put(" ")?;
        out.put(&attr.name)?;
        out.put("=\"")?;
        escape_into(&attr.value, out)?;
        out.put("\"")?;
    }
    if element.children.is_empty() {
        return out.put("/>");
    }
    out.put(">")?;
    for child in &element.children {
        render_node(child, out)?;
    }
    out.put("</")?;
    out.put(&element.name)?;
    out.put(">")
}

impl Node {
    /// See [`serialized_len`].
    pub fn serialized_len(&self) -> usize {
        serialized_len(self)
    }

    /// See [`to_xml_string`].
    pub fn to_xml_string(&self) -> String {
        to_xml_string(self)
    }
}

impl Element {
    pub fn serialized_len(&self) -> usize {
        element_len(self)
    }

    pub fn to_xml_string(&self) -> String {
        let len = element_len(self);
        let mut out = String::with_capacity(len);
        let Ok(()) = render_element(self, &mut out);
        debug_assert_eq!(out.len(), len, "serialized length mismatch");
        out
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(self, f)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_element(self, &mut FmtSink(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element;

    #[test]
    fn test_empty_element_self_closes() {
        let x = element("x", Vec::<(&str, &str)>::new(), Vec::<Node>::new()).unwrap();
        assert_eq!(x.to_xml_string(), "<x/>");
        assert_eq!(x.serialized_len(), 4);
    }

    #[test]
    fn test_element_with_attribute_and_text() {
        let x = element("x", [("a", "1")], ["hi"]).unwrap();
        assert_eq!(x.to_xml_string(), "<x a=\"1\">hi</x>");
        assert_eq!(x.serialized_len(), 15);
    }

    #[test]
    fn test_escapes_values_but_not_names() {
        let x = Element::builder("p")
            .attr("title", "\"quoted\" & <angled>")
            .text("1 < 2 & it's fine")
            .build()
            .unwrap();
        insta::assert_snapshot!(
            x.to_xml_string(),
            @r#"<p title="&quot;quoted&quot; &amp; &lt;angled&gt;">1 &lt; 2 &amp; it's fine</p>"#
        );
    }

    #[test]
    fn test_children_have_no_separators() {
        let x = Element::builder("row")
            .child(Element::builder("a").build().unwrap())
            .text("mid")
            .child(Element::builder("b").attr("k", "v").build().unwrap())
            .build()
            .unwrap();
        insta::assert_snapshot!(x.to_xml_string(), @r#"<row><a/>mid<b k="v"/></row>"#);
    }

    #[test]
    fn test_text_node_renders_escaped() {
        let node = Node::from("a<b&c\"d");
        assert_eq!(to_xml_string(&node), "a&lt;b&amp;c&quot;d");
        assert_eq!(serialized_len(&node), 19);
    }

    #[test]
    fn test_display_matches_to_xml_string() {
        let x = Element::builder("doc")
            .attr("lang", "en & fr")
            .child(Element::builder("title").text("<Intro>").build().unwrap())
            .text("body")
            .build()
            .unwrap();
        let node = Node::from(x.clone());
        assert_eq!(x.to_string(), x.to_xml_string());
        assert_eq!(format!("{node}"), node.to_xml_string());
    }

    #[test]
    fn test_write_node_shares_the_renderer() {
        let node = Node::from(
            Element::builder("a")
                .attr("q", "\"x\" & y")
                .child(Element::builder("b").text("1 < 2").build().unwrap())
                .text("tail>")
                .build()
                .unwrap(),
        );
        let mut out = String::new();
        write_node(&node, &mut out).unwrap();
        assert_eq!(out, to_xml_string(&node));
        assert_eq!(out.len(), serialized_len(&node));
    }

    #[test]
    fn test_write_node_propagates_sink_errors() {
        struct Refuse;
        impl fmt::Write for Refuse {
            fn write_str(&mut self, _: &str) -> fmt::Result {
                Err(fmt::Error)
            }
        }
        let node = Node::from(Element::builder("a").build().unwrap());
        assert_eq!(write_node(&node, &mut Refuse), Err(fmt::Error));
    }

    #[test]
    fn test_length_counts_utf8_bytes() {
        let x = Element::builder("größe").attr("ä", "ö").text("ü").build().unwrap();
        assert_eq!(x.serialized_len(), x.to_xml_string().len());
    }
}
