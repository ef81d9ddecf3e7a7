/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for building and parsing.

use thiserror::Error;

/// Result type for parse operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors that can occur when building an element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("element name must not be empty")]
    EmptyElementName,

    #[error("empty attribute name on element <{element}>")]
    EmptyAttributeName { element: String },
}

/// A syntax error, with the byte offset into the input where it was detected.
///
/// The offset is diagnostic only: parsing never resumes after an error and no
/// partial tree is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: usize,
}

/// What went wrong during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The input ended in the middle of a construct.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    /// A byte other than the one the grammar requires.
    #[error("expected {expected}, found {found:?}")]
    UnexpectedByte { expected: &'static str, found: char },

    /// A tag or attribute with no name.
    #[error("expected a name")]
    EmptyName,

    /// Comments, CDATA sections, DOCTYPE and processing instructions.
    #[error("unsupported markup")]
    UnsupportedMarkup,

    /// A closing tag that does not match the open element.
    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    /// Bytes left over after the top-level element.
    #[error("trailing content after the root element")]
    TrailingContent,

    /// Elements nested deeper than the configured limit.
    #[error("elements nested too deep (max depth: {max_depth})")]
    NestingTooDeep { max_depth: usize },

    /// The input bytes are not valid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Byte offset into the original input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(
            ParseErrorKind::MismatchedEndTag {
                expected: "a".to_string(),
                found: "b".to_string(),
            },
            9,
        );
        insta::assert_snapshot!(
            err.to_string(),
            @"mismatched end tag: expected </a>, found </b> at byte 9"
        );
        assert_eq!(err.offset(), 9);
    }

    #[test]
    fn test_unexpected_byte_display() {
        let err = ParseError::new(
            ParseErrorKind::UnexpectedByte {
                expected: "'='",
                found: '>',
            },
            3,
        );
        insta::assert_snapshot!(err.to_string(), @"expected '=', found '>' at byte 3");
    }
}
