//! Canonical event serialization.
//!
//! The identifier is computed over a fixed-shape array with no whitespace:
//!
//! ```text
//! [0,"<pubkey>",<created_at>,<kind>,[["<item>",...],...],"<content>"]
//! ```
//!
//! `id` and `sig` are excluded, so the identifier never depends on itself or
//! on the signature. Output is a pure function of the five remaining fields;
//! any byte difference yields a different identifier, so the layout here is a
//! compatibility contract and must not change.

use crate::event::Event;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Fixed bytes outside content and tags (brackets, commas, pubkey, numbers)
const BASE_CAPACITY: usize = 100;

/// Rough allowance per tag; the buffer still grows past it as needed
const PER_TAG_CAPACITY: usize = 80;

/// Serialize an event into its canonical bytes.
pub fn serialize(event: &Event) -> Vec<u8> {
    let mut dst = Vec::with_capacity(capacity_hint(event));
    serialize_into(event, &mut dst);
    dst
}

/// Append the canonical bytes of `event` to `dst`.
///
/// Lets callers reuse one scratch buffer across events. Existing contents of
/// `dst` are left in place.
pub fn serialize_into(event: &Event, dst: &mut Vec<u8>) {
    // [0,"pubkey",created_at,kind,[
    dst.extend_from_slice(b"[0,\"");
    dst.extend_from_slice(event.pubkey.as_bytes());
    dst.extend_from_slice(b"\",");
    dst.extend_from_slice(event.created_at.as_secs().to_string().as_bytes());
    dst.push(b',');
    dst.extend_from_slice(event.kind.to_string().as_bytes());
    dst.push(b',');

    dst.push(b'[');
    for (i, tag) in event.tags.iter().enumerate() {
        if i > 0 {
            dst.push(b',');
        }
        dst.push(b'[');
        for (j, item) in tag.as_slice().iter().enumerate() {
            if j > 0 {
                dst.push(b',');
            }
            escape_string(dst, item);
        }
        dst.push(b']');
    }
    dst.extend_from_slice(b"],");

    // Content is user generated, always escaped
    escape_string(dst, &event.content);
    dst.push(b']');
}

/// Append `s` to `dst` as a quoted JSON string literal.
///
/// Escapes `"` and `\`, the control characters below U+0020 (short forms
/// for `\b \t \n \f \r`, `\u00xx` otherwise) and the line and paragraph
/// separators U+2028 and U+2029. Everything else is copied as UTF-8.
pub fn escape_string(dst: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    dst.push(b'"');

    let mut start = 0;
    for (i, c) in s.char_indices() {
        let escaped: &[u8] = match c {
            '"' => b"\\\"",
            '\\' => b"\\\\",
            '\n' => b"\\n",
            '\r' => b"\\r",
            '\t' => b"\\t",
            '\u{08}' => b"\\b",
            '\u{0c}' => b"\\f",
            '\u{2028}' => b"\\u2028",
            '\u{2029}' => b"\\u2029",
            c if c < ' ' => {
                dst.extend_from_slice(&bytes[start..i]);
                let b = c as u8;
                dst.extend_from_slice(b"\\u00");
                dst.push(HEX_DIGITS[(b >> 4) as usize]);
                dst.push(HEX_DIGITS[(b & 0x0f) as usize]);
                start = i + 1;
                continue;
            },
            _ => continue,
        };

        dst.extend_from_slice(&bytes[start..i]);
        dst.extend_from_slice(escaped);
        start = i + c.len_utf8();
    }

    dst.extend_from_slice(&bytes[start..]);
    dst.push(b'"');
}

fn capacity_hint(event: &Event) -> usize {
    BASE_CAPACITY + event.content.len() + event.tags.len() * PER_TAG_CAPACITY
}
