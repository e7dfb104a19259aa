//! GrainStateStore — the persistence core.
//!
//! Orchestrates codec, segmenting, and addressing over a
//! [`TableClient`]: read decodes the row's joined segments, write
//! replaces the row wholesale with a freshly split payload, clear
//! deletes the row. The store is stateless between calls — the only
//! thing it owns is the client handle, which is read-only after `init`
//! and shared by concurrent in-flight requests.

use std::sync::Arc;

use tracing::debug;

use grainstate_codec::{decode_state, encode_state, StateMap};

use crate::client::{ClientFuture, TableClient};
use crate::error::{StateError, StateResult};
use crate::segment;
use crate::table::{ConcurrencyToken, RowAddress, TableRow};

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Host-facing storage seam: what a grain runtime invokes on an
/// activation's behalf. Implemented by [`GrainStateStore`]; hosts hold
/// it as `Arc<dyn GrainStorage>`.
pub trait GrainStorage: Send + Sync {
    /// Read one identity's state. Absent rows read as empty state.
    fn read_state<'a>(&'a self, owner_key: &'a str, kind: &'a str) -> ClientFuture<'a, StateMap>;

    /// Replace one identity's state wholesale.
    fn write_state<'a>(
        &'a self,
        owner_key: &'a str,
        kind: &'a str,
        state: &'a StateMap,
    ) -> ClientFuture<'a, ()>;

    /// Delete one identity's state. Deleting absent state is an error.
    fn clear_state<'a>(&'a self, owner_key: &'a str, kind: &'a str) -> ClientFuture<'a, ()>;
}

/// Persistence core bound to a table client for its lifetime.
///
/// Cheap to clone; clones share the client handle.
pub struct GrainStateStore<C: TableClient> {
    client: Arc<C>,
}

impl<C: TableClient> Clone for GrainStateStore<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: TableClient> GrainStateStore<C> {
    /// Take ownership of a client and make sure the backing table
    /// exists. Fails fast if the table cannot be ensured.
    pub async fn init(client: C) -> StateResult<Self> {
        client.ensure_table().await?;
        debug!("grain state store initialized");
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Read the state record for an identity.
    ///
    /// An absent row is valid and reads as an empty record. A present
    /// row that fails to decode surfaces as
    /// [`StateError::Deserialize`] without touching caller state.
    pub async fn read_state(&self, owner_key: &str, kind: &str) -> StateResult<StateMap> {
        let address = RowAddress::new(owner_key, kind);
        let Some(row) = self.client.retrieve(&address).await? else {
            debug!(%address, "no stored state");
            return Ok(StateMap::new());
        };
        let payload = segment::join(&row.fields);
        let state = decode_state(&payload).map_err(map_err!(Deserialize))?;
        debug!(%address, bytes = payload.len(), "state read");
        Ok(state)
    }

    /// Replace the state record for an identity.
    ///
    /// Encodes, splits into segments (capacity-checked), and issues a
    /// single unconditional insert-or-replace: the stored row is
    /// swapped out atomically, never merged.
    pub async fn write_state(
        &self,
        owner_key: &str,
        kind: &str,
        state: &StateMap,
    ) -> StateResult<()> {
        let address = RowAddress::new(owner_key, kind);
        let payload = encode_state(state).map_err(map_err!(Serialize))?;
        let segments = segment::split(&payload)?;
        let count = segments.len();
        let row = TableRow::from_segments(address.clone(), segments);
        self.client.insert_or_replace(row).await?;
        debug!(%address, bytes = payload.len(), segments = count, "state written");
        Ok(())
    }

    /// Delete the state record for an identity.
    ///
    /// Unconditional. Unlike reads, deleting an identity that has no
    /// row is an error ([`StateError::NotFound`]) — an asymmetry
    /// inherited from the reference provider and kept deliberately.
    pub async fn clear_state(&self, owner_key: &str, kind: &str) -> StateResult<()> {
        let address = RowAddress::new(owner_key, kind);
        self.client.delete(&address, &ConcurrencyToken::Any).await?;
        debug!(%address, "state cleared");
        Ok(())
    }

    /// Release the store handle. A no-op when this is the last clone's
    /// only resource, which it is: the core keeps no other state.
    pub async fn close(self) -> StateResult<()> {
        debug!("grain state store closed");
        Ok(())
    }
}

impl<C: TableClient + 'static> GrainStorage for GrainStateStore<C> {
    fn read_state<'a>(&'a self, owner_key: &'a str, kind: &'a str) -> ClientFuture<'a, StateMap> {
        Box::pin(self.read_state(owner_key, kind))
    }

    fn write_state<'a>(
        &'a self,
        owner_key: &'a str,
        kind: &'a str,
        state: &'a StateMap,
    ) -> ClientFuture<'a, ()> {
        Box::pin(self.write_state(owner_key, kind, state))
    }

    fn clear_state<'a>(&'a self, owner_key: &'a str, kind: &'a str) -> ClientFuture<'a, ()> {
        Box::pin(self.clear_state(owner_key, kind))
    }
}
