//! Segment splitting and joining.
//!
//! Table stores cap the size of a single binary cell, so an encoded
//! state payload is split across ordered, deterministically-named
//! cells: `d00`, `d01`, … `dFF`. The two-hex-digit name width makes
//! lexicographic field order coincide with numeric segment order, and
//! also caps a row at 256 segments (16 MiB of payload) — a hard limit
//! this module enforces rather than wrapping names.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{StateError, StateResult};

/// Maximum bytes a single segment cell may hold.
pub const MAX_SEGMENT_BYTES: usize = 64 * 1024;

/// Maximum segments addressable by the two-hex-digit naming scheme.
pub const MAX_SEGMENTS: usize = 256;

/// Fixed prefix of every segment field name.
pub const SEGMENT_PREFIX: char = 'd';

/// One named, size-bounded cell of an encoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Field name, `d` + two uppercase hex digits.
    pub name: String,
    /// Cell contents, at most [`MAX_SEGMENT_BYTES`].
    pub bytes: Vec<u8>,
}

/// Build the field name for a segment index: 0 → `d00`, 255 → `dFF`.
pub fn segment_name(index: usize) -> String {
    debug_assert!(index < MAX_SEGMENTS);
    format!("{SEGMENT_PREFIX}{index:02X}")
}

/// Check whether a row field name addresses a data segment.
///
/// Matches the prefix plus exactly two uppercase hex digits. Anything
/// else on the row (future metadata fields) is not a segment.
pub fn is_segment_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() == 3
        && bytes[0] == SEGMENT_PREFIX as u8
        && bytes[1..].iter().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(b))
}

/// Split a payload into ordered segments of at most [`MAX_SEGMENT_BYTES`].
///
/// Deterministic: the same payload always yields the same segment
/// sequence. An empty payload yields no segments.
///
/// # Errors
///
/// Returns [`StateError::Capacity`] when the payload would need more
/// than [`MAX_SEGMENTS`] segments.
pub fn split(payload: &[u8]) -> StateResult<Vec<Segment>> {
    split_with(payload, MAX_SEGMENT_BYTES)
}

/// [`split`] with an explicit segment size, for stores with a different
/// cell ceiling. The 256-segment naming cap applies regardless.
///
/// # Errors
///
/// Returns [`StateError::Configuration`] when `max_segment_bytes` is
/// zero, and [`StateError::Capacity`] when the payload would need more
/// than [`MAX_SEGMENTS`] segments.
pub fn split_with(payload: &[u8], max_segment_bytes: usize) -> StateResult<Vec<Segment>> {
    if max_segment_bytes == 0 {
        return Err(StateError::Configuration(
            "segment size must be at least one byte".to_string(),
        ));
    }
    let required = payload.len().div_ceil(max_segment_bytes);
    if required > MAX_SEGMENTS {
        return Err(StateError::Capacity {
            required,
            max: MAX_SEGMENTS,
        });
    }

    let segments: Vec<Segment> = payload
        .chunks(max_segment_bytes)
        .enumerate()
        .map(|(index, chunk)| Segment {
            name: segment_name(index),
            bytes: chunk.to_vec(),
        })
        .collect();
    trace!(payload_len = payload.len(), segments = segments.len(), "payload split");
    Ok(segments)
}

/// Reassemble a payload from a row's fields.
///
/// Fields whose names do not match the segment pattern are ignored.
/// Matching fields are concatenated in ascending name order, which is
/// ascending segment order. No matching fields yields an empty payload.
pub fn join(fields: &BTreeMap<String, Vec<u8>>) -> Vec<u8> {
    // BTreeMap iterates in lexicographic key order already.
    let mut payload = Vec::new();
    for (name, bytes) in fields {
        if is_segment_name(name) {
            payload.extend_from_slice(bytes);
        }
    }
    payload
}
