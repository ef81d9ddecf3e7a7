/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! A minimal in-memory XML document model.
//!
//! Build a tree programmatically, render it to text with correct escaping,
//! parse text back into a tree with error-position reporting, and query
//! children and attributes by name.
//!
//! # Overview
//!
//! The main types are:
//! - [`Node`]: either text or an [`Element`]
//! - [`Element`]: a name, ordered [`Attribute`]s and ordered children
//! - [`ElementBuilder`]: construction of elements from raw (unescaped) values
//! - [`ParseError`]: a syntax error with the byte offset where it was found
//!
//! Only a small subset of XML is understood: elements, double-quoted
//! attributes, text and the entities `&lt;`, `&gt;`, `&amp;` and `&quot;`.
//! Namespaces get no special treatment, and comments, CDATA, DOCTYPE and
//! processing instructions are syntax errors.
//!
//! # Example
//!
//! ```rust
//! use little_xml::{parse, Element};
//!
//! let doc = Element::builder("tag-name")
//!     .attr("attr-name-1", "attr-value-1")
//!     .attr("attr-name-2", "attr-value-2")
//!     .text("Some text & stuff in the tag")
//!     .child(Element::builder("child-tag").build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let text = doc.to_xml_string();
//! assert_eq!(text.len(), doc.serialized_len());
//!
//! let parsed = parse(&text).unwrap();
//! assert_eq!(parsed, doc);
//! assert_eq!(parsed.get_attr("attr-name-2"), Some("attr-value-2"));
//! assert!(parsed.get_child("child-tag").unwrap().is_empty());
//! ```
//!
//! # Errors
//!
//! ```rust
//! use little_xml::{parse, ParseErrorKind};
//!
//! let err = parse("<a><!--c--></a>").unwrap_err();
//! assert_eq!(err.kind(), &ParseErrorKind::UnsupportedMarkup);
//! assert_eq!(err.offset(), 4);
//! ```

pub mod builder;
pub mod error;
pub mod escape;
pub mod options;
pub mod parser;
pub mod types;
pub mod writer;

// Re-export main types
pub use builder::{ElementBuilder, element};
pub use error::{BuildError, ParseError, ParseErrorKind, ParseResult};
pub use escape::{escape, escaped_len, unescape};
pub use options::{DEFAULT_MAX_DEPTH, ParseOptions};
pub use parser::{Parser, parse, parse_bytes, parse_with_options};
pub use types::{Attribute, Element, Node};
pub use writer::{serialized_len, to_xml_string, write_node};
