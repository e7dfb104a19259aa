//! grainstate-store — chunked grain-state persistence for table stores.
//!
//! Persists arbitrarily large, dynamically-typed state records into a
//! table-style key-value store whose cells cap out at 64 KiB, behind a
//! plain get/put/delete-by-identity contract.
//!
//! # Architecture
//!
//! ```text
//! GrainStateStore (provider)
//!   ├── grainstate-codec     encode/decode the attribute map
//!   ├── segment              split/join ≤64 KiB cells, d00..dFF
//!   ├── table                RowAddress, ConcurrencyToken, TableRow
//!   └── TableClient          store collaborator (MemoryTableClient here;
//!                            real table-store clients live elsewhere)
//! ```
//!
//! On write: state → bytes → segments → fresh row → `insert_or_replace`
//! (full replace, match-any token). On read: `retrieve` → join segments
//! → decode; an absent row reads as empty state. On clear: delete; an
//! absent row is an error — that asymmetry is part of the contract.

pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod provider;
pub mod segment;
pub mod table;

pub use client::{ClientFuture, TableClient};
pub use config::{StoreConfig, DEFAULT_TABLE_NAME};
pub use error::{StateError, StateResult};
pub use memory::MemoryTableClient;
pub use provider::{GrainStateStore, GrainStorage};
pub use segment::{Segment, MAX_SEGMENTS, MAX_SEGMENT_BYTES};
pub use table::{ConcurrencyToken, RowAddress, TableRow};
