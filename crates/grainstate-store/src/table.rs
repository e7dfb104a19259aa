//! Row-level types: addressing, concurrency tokens, and the physical row.
//!
//! A logical state record is addressed by an (owner key, kind) identity
//! pair. Both strings pass through to the store verbatim: the owner key
//! becomes the partition key and the kind becomes the row key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// Physical coordinates of one identity's row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowAddress {
    /// Partition key — the owner key, untransformed.
    pub partition_key: String,
    /// Row key — the kind name, untransformed.
    pub row_key: String,
}

impl RowAddress {
    /// Map an identity to its row coordinates. Both parts are opaque to
    /// the store and copied exactly as supplied.
    pub fn new(owner_key: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            partition_key: owner_key.into(),
            row_key: kind.into(),
        }
    }
}

impl std::fmt::Display for RowAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.partition_key, self.row_key)
    }
}

/// Token attached to writes and deletes for conflict detection.
///
/// The persistence core always sends [`ConcurrencyToken::Any`],
/// reproducing the reference provider's last-writer-wins behavior.
/// Clients must still honor [`ConcurrencyToken::Tag`] so callers that
/// drive the client directly can opt into optimistic concurrency.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyToken {
    /// Match any stored version (unconditional write/delete).
    #[default]
    Any,
    /// Match only the stored version carrying this tag.
    Tag(String),
}

impl ConcurrencyToken {
    /// Whether this token matches a row's current version tag.
    pub fn matches(&self, current: &str) -> bool {
        match self {
            ConcurrencyToken::Any => true,
            ConcurrencyToken::Tag(tag) => tag == current,
        }
    }
}

/// The physical row for one identity: addressed segments plus a token.
///
/// A write always builds a fresh row and replaces the stored one
/// wholesale, so stale segments from a longer previous payload cannot
/// survive a shrink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Row coordinates.
    pub address: RowAddress,
    /// Named binary cells. Data segments live alongside whatever
    /// metadata fields a store attaches; the joiner filters by name.
    pub fields: BTreeMap<String, Vec<u8>>,
    /// Token governing replace/delete of the stored version.
    pub token: ConcurrencyToken,
}

impl TableRow {
    /// Build a row holding the given segments, with a match-any token.
    pub fn from_segments(address: RowAddress, segments: Vec<Segment>) -> Self {
        Self {
            address,
            fields: segments.into_iter().map(|s| (s.name, s.bytes)).collect(),
            token: ConcurrencyToken::Any,
        }
    }
}
