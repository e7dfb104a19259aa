//! In-memory table client.
//!
//! A complete [`TableClient`] over a process-local map: the reference
//! implementation for tests and local development. Rows carry a real
//! monotonic version tag, so [`ConcurrencyToken::Tag`] conflicts behave
//! the way a remote table store's etags would.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::client::{ClientFuture, TableClient};
use crate::config::StoreConfig;
use crate::error::{StateError, StateResult};
use crate::table::{ConcurrencyToken, RowAddress, TableRow};

/// Connection-string scheme accepted by [`MemoryTableClient::from_config`].
pub const MEMORY_SCHEME: &str = "memory://";

#[derive(Debug)]
struct StoredRow {
    fields: BTreeMap<String, Vec<u8>>,
    version: u64,
}

#[derive(Debug, Default)]
struct Shared {
    rows: HashMap<RowAddress, StoredRow>,
    next_version: u64,
    table_ready: bool,
}

/// Thread-safe in-memory table client.
#[derive(Clone, Debug, Default)]
pub struct MemoryTableClient {
    shared: Arc<Mutex<Shared>>,
}

impl MemoryTableClient {
    /// Create an empty in-memory client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client from validated configuration.
    ///
    /// Accepts only `memory://` connection strings; anything else
    /// belongs to a real store client and is a configuration error here.
    /// The table name is validated but not used for namespacing: each
    /// client instance models exactly one table, where a remote client
    /// would bind to the named table inside a shared account.
    pub fn from_config(config: &StoreConfig) -> StateResult<Self> {
        config.validate()?;
        if !config.connection_string.starts_with(MEMORY_SCHEME) {
            return Err(StateError::Configuration(format!(
                "unsupported connection string scheme: {}",
                config.connection_string
            )));
        }
        Ok(Self::new())
    }

    /// Number of rows currently stored (test/diagnostic helper).
    pub async fn row_count(&self) -> usize {
        self.shared.lock().await.rows.len()
    }
}

impl TableClient for MemoryTableClient {
    fn retrieve<'a>(&'a self, address: &'a RowAddress) -> ClientFuture<'a, Option<TableRow>> {
        Box::pin(async move {
            let shared = self.shared.lock().await;
            Ok(shared.rows.get(address).map(|stored| TableRow {
                address: address.clone(),
                fields: stored.fields.clone(),
                token: ConcurrencyToken::Tag(stored.version.to_string()),
            }))
        })
    }

    fn insert_or_replace(&self, row: TableRow) -> ClientFuture<'_, ()> {
        Box::pin(async move {
            let mut shared = self.shared.lock().await;
            if let Some(stored) = shared.rows.get(&row.address) {
                if !row.token.matches(&stored.version.to_string()) {
                    return Err(StateError::Conflict(format!(
                        "row {} changed since it was read",
                        row.address
                    )));
                }
            }
            shared.next_version += 1;
            let version = shared.next_version;
            let replaced = shared
                .rows
                .insert(
                    row.address.clone(),
                    StoredRow {
                        fields: row.fields,
                        version,
                    },
                )
                .is_some();
            debug!(address = %row.address, replaced, "row stored");
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        address: &'a RowAddress,
        token: &'a ConcurrencyToken,
    ) -> ClientFuture<'a, ()> {
        Box::pin(async move {
            let mut shared = self.shared.lock().await;
            let Some(stored) = shared.rows.get(address) else {
                return Err(StateError::NotFound {
                    partition_key: address.partition_key.clone(),
                    row_key: address.row_key.clone(),
                });
            };
            if !token.matches(&stored.version.to_string()) {
                return Err(StateError::Conflict(format!(
                    "row {address} changed since it was read"
                )));
            }
            shared.rows.remove(address);
            debug!(%address, "row deleted");
            Ok(())
        })
    }

    fn ensure_table(&self) -> ClientFuture<'_, ()> {
        Box::pin(async move {
            let mut shared = self.shared.lock().await;
            if !shared.table_ready {
                shared.table_ready = true;
                debug!("in-memory table created");
            }
            Ok(())
        })
    }
}
