/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Recursive-descent parser producing [`Element`] trees.
//!
//! The accepted grammar is deliberately small:
//!
//! ```text
//! element := '<' ws name ws attr* ( '/' ws '>' | '>' content* '<' ws '/' ws name ws '>' )
//! attr    := name ws '=' ws '"' <text up to next '"'> '"' ws
//! content := element | <text up to next '<'>
//! ```
//!
//! A name is any run of bytes other than `>`, `/`, `"`, `=` and whitespace.
//! Comments, CDATA sections, DOCTYPE declarations and processing instructions
//! are not supported and fail at their `!` or `?`. The input must hold exactly
//! one element with nothing after it, not even whitespace.

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::escape::unescape;
use crate::options::ParseOptions;
use crate::types::{Attribute, Element, Node};
use memchr::memchr;

/// Parse a complete document consisting of a single element.
///
/// # Example
///
/// ```rust
/// use little_xml::parse;
///
/// let xml = parse(r#"<wwxtp><query><command>TEST</command><position lat="23.01515" long="-15.132"/></query></wwxtp>"#).unwrap();
/// let position = xml.get_child("query").and_then(|q| q.get_child("position")).unwrap();
/// assert_eq!(position.get_attr("long"), Some("-15.132"));
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the byte offset of the first violation.
pub fn parse(content: &str) -> ParseResult<Element> {
    Parser::new(content).parse()
}

/// Parse with explicit [`ParseOptions`].
pub fn parse_with_options(content: &str, options: ParseOptions) -> ParseResult<Element> {
    Parser::new(content).with_options(options).parse()
}

/// Parse a length-delimited byte buffer.
///
/// Invalid UTF-8 fails with [`ParseErrorKind::InvalidUtf8`] at the offset of
/// the first invalid byte.
pub fn parse_bytes(content: &[u8]) -> ParseResult<Element> {
    match std::str::from_utf8(content) {
        Ok(text) => parse(text),
        Err(err) => {
            let err = ParseError::new(ParseErrorKind::InvalidUtf8, err.valid_up_to());
            tracing::debug!(offset = err.offset(), "XML input is not valid UTF-8");
            Err(err)
        }
    }
}

/// Parser state: the input and a byte cursor into it.
pub struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    options: ParseOptions,
}

#[inline]
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

#[inline]
fn is_name_byte(byte: u8) -> bool {
    !matches!(byte, b'>' | b'/' | b'"' | b'=') && !is_space(byte)
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse the whole input as one element.
    pub fn parse(mut self) -> ParseResult<Element> {
        tracing::trace!(
            len = self.source.len(),
            max_depth = self.options.max_depth,
            "Parsing XML"
        );
        match self.parse_document() {
            Ok(root) => {
                tracing::trace!(root = %root.name, "Parsed XML");
                Ok(root)
            }
            Err(err) => {
                tracing::debug!(offset = err.offset(), error = %err.kind(), "XML parse failed");
                Err(err)
            }
        }
    }

    fn parse_document(&mut self) -> ParseResult<Element> {
        let root = self.parse_element(1)?;
        if self.pos < self.bytes.len() {
            return Err(self.error(ParseErrorKind::TrailingContent));
        }
        Ok(root)
    }

    fn parse_element(&mut self, depth: usize) -> ParseResult<Element> {
        if depth > self.options.max_depth {
            return Err(self.error(ParseErrorKind::NestingTooDeep {
                max_depth: self.options.max_depth,
            }));
        }

        self.expect(b'<', "'<'")?;
        self.skip_spaces();
        if matches!(self.peek(), Some(b'!' | b'?')) {
            return Err(self.error(ParseErrorKind::UnsupportedMarkup));
        }
        let name = self.parse_name()?;
        self.skip_spaces();

        let mut attributes = Vec::new();
        while self.peek().is_some_and(is_name_byte) {
            attributes.push(self.parse_attribute()?);
        }

        match self.peek() {
            Some(b'/') => {
                self.pos += 1;
                self.skip_spaces();
                self.expect(b'>', "'>'")?;
                Ok(Element {
                    name: name.to_string(),
                    attributes,
                    children: Vec::new(),
                })
            }
            Some(b'>') => {
                self.pos += 1;
                let children = self.parse_content(name, depth)?;
                Ok(Element {
                    name: name.to_string(),
                    attributes,
                    children,
                })
            }
            Some(_) => Err(self.unexpected("'>' or '/>'")),
            None => Err(self.error(ParseErrorKind::UnexpectedEof {
                expected: "'>' or '/>'",
            })),
        }
    }

    fn parse_attribute(&mut self) -> ParseResult<Attribute> {
        let name = self.parse_name()?;
        self.skip_spaces();
        self.expect(b'=', "'='")?;
        self.skip_spaces();
        self.expect(b'"', "'\"'")?;

        let start = self.pos;
        let Some(len) = memchr(b'"', &self.bytes[start..]) else {
            self.pos = self.bytes.len();
            return Err(self.error(ParseErrorKind::UnexpectedEof {
                expected: "closing '\"'",
            }));
        };
        let value = unescape(&self.source[start..start + len]).into_owned();
        self.pos = start + len + 1;
        self.skip_spaces();

        Ok(Attribute {
            name: name.to_string(),
            value,
        })
    }

    /// Children up to and including the closing tag of `name`.
    fn parse_content(&mut self, name: &str, depth: usize) -> ParseResult<Vec<Node>> {
        let mut children = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(self.error(ParseErrorKind::UnexpectedEof {
                        expected: "a closing tag",
                    }));
                }
                Some(b'<') => {
                    let tag_start = self.pos;
                    self.pos += 1;
                    self.skip_spaces();
                    if self.peek() == Some(b'/') {
                        self.pos += 1;
                        self.parse_end_tag(name)?;
                        return Ok(children);
                    }
                    self.pos = tag_start;
                    children.push(Node::Element(self.parse_element(depth + 1)?));
                }
                Some(_) => {
                    let start = self.pos;
                    let Some(len) = memchr(b'<', &self.bytes[start..]) else {
                        self.pos = self.bytes.len();
                        return Err(self.error(ParseErrorKind::UnexpectedEof {
                            expected: "'<'",
                        }));
                    };
                    self.pos = start + len;
                    let text = unescape(&self.source[start..self.pos]).into_owned();
                    children.push(Node::Text(text));
                }
            }
        }
    }

    /// The remainder of `</name>`, after the `/`.
    fn parse_end_tag(&mut self, expected: &str) -> ParseResult<()> {
        self.skip_spaces();
        let start = self.pos;
        self.skip_name();
        let found = &self.source[start..self.pos];
        if found != expected {
            let common: usize = found
                .chars()
                .zip(expected.chars())
                .take_while(|(a, b)| a == b)
                .map(|(c, _)| c.len_utf8())
                .sum();
            return Err(ParseError::new(
                ParseErrorKind::MismatchedEndTag {
                    expected: expected.to_string(),
                    found: found.to_string(),
                },
                start + common,
            ));
        }
        self.skip_spaces();
        self.expect(b'>', "'>'")
    }

    fn parse_name(&mut self) -> ParseResult<&'a str> {
        let start = self.pos;
        self.skip_name();
        if self.pos == start {
            return Err(match self.peek() {
                None => self.error(ParseErrorKind::UnexpectedEof {
                    expected: "a name",
                }),
                Some(_) => self.error(ParseErrorKind::EmptyName),
            });
        }
        Ok(&self.source[start..self.pos])
    }

    fn skip_name(&mut self) {
        while self.peek().is_some_and(is_name_byte) {
            self.pos += 1;
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> ParseResult<()> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(self.unexpected(expected)),
            None => Err(self.error(ParseErrorKind::UnexpectedEof { expected })),
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let found = self.source[self.pos..].chars().next().unwrap_or('\0');
        self.error(ParseErrorKind::UnexpectedByte { expected, found })
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.pos)
    }
}
