//! Table-store client contract.
//!
//! The store itself — connection bootstrap, auth, retries — is an
//! external collaborator. This module pins down only the four calls the
//! persistence core needs, as an async trait in boxed-future form so a
//! host can hold a `dyn TableClient` and inject fakes in tests.

use std::future::Future;
use std::pin::Pin;

use crate::error::StateResult;
use crate::table::{ConcurrencyToken, RowAddress, TableRow};

/// Boxed future alias for client call results.
pub type ClientFuture<'a, T> = Pin<Box<dyn Future<Output = StateResult<T>> + Send + 'a>>;

/// Minimal contract a backing table store must satisfy.
///
/// Semantics the persistence core relies on:
///
/// - `retrieve` returns `Ok(None)` for an absent row — absence is an
///   expected state, never an error.
/// - `insert_or_replace` replaces the whole row atomically; a
///   [`ConcurrencyToken::Tag`] mismatch fails with
///   [`StateError::Conflict`](crate::StateError::Conflict).
/// - `delete` of an absent row fails with
///   [`StateError::NotFound`](crate::StateError::NotFound).
/// - `ensure_table` creates the backing table if needed and is safe to
///   call repeatedly.
///
/// Implementations must not retry internally on behalf of the core;
/// transient failures propagate as
/// [`StateError::Storage`](crate::StateError::Storage).
pub trait TableClient: Send + Sync {
    /// Fetch the row at the given coordinates, if one exists.
    fn retrieve<'a>(&'a self, address: &'a RowAddress) -> ClientFuture<'a, Option<TableRow>>;

    /// Atomically replace (or create) the row, honoring its token.
    fn insert_or_replace(&self, row: TableRow) -> ClientFuture<'_, ()>;

    /// Delete the row at the given coordinates, honoring the token.
    fn delete<'a>(
        &'a self,
        address: &'a RowAddress,
        token: &'a ConcurrencyToken,
    ) -> ClientFuture<'a, ()>;

    /// Create the backing table/collection if it does not exist.
    fn ensure_table(&self) -> ClientFuture<'_, ()>;
}
