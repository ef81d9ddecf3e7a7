/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parser configuration.

/// Default limit on element nesting accepted by the parser.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options controlling [`Parser`](crate::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum element nesting depth. The top-level element has depth 1.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// No nesting limit. Recursion then grows with document depth.
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}
