/*
 * escape.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Conversion between raw text and the four supported XML entities.
//!
//! Only `<`, `>`, `&` and `"` are ever escaped. Unescaping is lenient: anything
//! that is not exactly `&lt;`, `&gt;`, `&amp;` or `&quot;` is kept as written.

use crate::writer::Sink;
use memchr::memchr;
use std::borrow::Cow;

/// The entity written for a byte, if it needs one.
#[inline]
fn entity_for(byte: u8) -> Option<&'static str> {
    match byte {
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        b'&' => Some("&amp;"),
        b'"' => Some("&quot;"),
        _ => None,
    }
}

/// Byte length of `text` after escaping.
pub fn escaped_len(text: &str) -> usize {
    text.bytes()
        .map(|b| entity_for(b).map_or(1, str::len))
        .sum()
}

/// Escape `<`, `>`, `&` and `"`. The single quote is left alone.
///
/// The output is allocated once with its exact final size.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(escaped_len(text));
    let Ok(()) = escape_into(text, &mut out);
    out
}

/// Write the escaped form of `text` to `out`.
pub(crate) fn escape_into<S: Sink>(text: &str, out: &mut S) -> Result<(), S::Error> {
    let mut start = 0;
    for (i, byte) in text.bytes().enumerate() {
        if let Some(entity) = entity_for(byte) {
            out.put(&text[start..i])?;
            out.put(entity)?;
            start = i + 1;
        }
    }
    out.put(&text[start..])
}

/// Replace the four supported entity references with the characters they name.
///
/// Unknown entities, malformed references and bare `&` are copied through
/// unchanged. Input without any `&` is returned borrowed.
pub fn unescape(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);
    let mut pos = first;

    while pos < bytes.len() {
        let Some(amp) = memchr(b'&', &bytes[pos..]) else {
            out.push_str(&text[pos..]);
            break;
        };
        out.push_str(&text[pos..pos + amp]);
        pos += amp;

        match decode_entity(&bytes[pos..]) {
            Some((c, consumed)) => {
                out.push(c);
                pos += consumed;
            }
            None => {
                out.push('&');
                pos += 1;
            }
        }
    }

    Cow::Owned(out)
}

/// Decode a reference at the start of `input` (which begins with `&`).
fn decode_entity(input: &[u8]) -> Option<(char, usize)> {
    const ENTITIES: [(&[u8], char); 4] = [
        (b"&lt;", '<'),
        (b"&gt;", '>'),
        (b"&amp;", '&'),
        (b"&quot;", '"'),
    ];
    ENTITIES
        .iter()
        .find(|(entity, _)| input.starts_with(entity))
        .map(|(entity, c)| (*c, entity.len()))
}
