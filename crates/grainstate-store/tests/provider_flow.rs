//! End-to-end provider flow tests.
//!
//! Drives the full path a host would: config from a property map,
//! client construction, init, then write/read/clear cycles over the
//! in-memory table client.

use std::collections::HashMap;

use grainstate_codec::{StateMap, Value};
use grainstate_store::*;

async fn bootstrapped_store() -> GrainStateStore<MemoryTableClient> {
    let mut properties = HashMap::new();
    properties.insert("connectionString".to_string(), "memory://test".to_string());
    let config = StoreConfig::from_properties(&properties).unwrap();
    let client = MemoryTableClient::from_config(&config).unwrap();
    GrainStateStore::init(client).await.unwrap()
}

fn counter_state(count: i64) -> StateMap {
    let mut state = StateMap::new();
    state.insert("count".to_string(), Value::Int(count));
    state.insert("enabled".to_string(), Value::Bool(true));
    state.insert("rate".to_string(), Value::Float(0.25));
    state.insert("owner".to_string(), Value::from("alice"));
    state.insert("raw".to_string(), Value::Bytes(vec![0, 159, 146, 150]));
    state
}

#[tokio::test]
async fn full_lifecycle_roundtrip() {
    let store = bootstrapped_store().await;

    // First read of a never-written identity: empty, not an error.
    let initial = store.read_state("grain-1", "Counter").await.unwrap();
    assert!(initial.is_empty());

    let state = counter_state(1);
    store.write_state("grain-1", "Counter", &state).await.unwrap();
    assert_eq!(store.read_state("grain-1", "Counter").await.unwrap(), state);

    // Overwrite wholesale.
    let updated = counter_state(2);
    store.write_state("grain-1", "Counter", &updated).await.unwrap();
    assert_eq!(store.read_state("grain-1", "Counter").await.unwrap(), updated);

    store.clear_state("grain-1", "Counter").await.unwrap();
    assert!(store.read_state("grain-1", "Counter").await.unwrap().is_empty());

    // Clearing again: the documented delete-absent error.
    let err = store.clear_state("grain-1", "Counter").await.unwrap_err();
    assert!(matches!(err, StateError::NotFound { .. }));

    store.close().await.unwrap();
}

#[tokio::test]
async fn deeply_nested_state_survives_chunking() {
    let store = bootstrapped_store().await;

    let mut inner = StateMap::new();
    inner.insert("id".to_string(), Value::Int(9));
    inner.insert(
        "blob".to_string(),
        Value::Bytes((0..200_000u32).map(|i| (i % 256) as u8).collect()),
    );
    let mut state = StateMap::new();
    state.insert(
        "entries".to_string(),
        Value::List(vec![Value::Map(inner), Value::Null]),
    );

    store.write_state("grain-big", "Journal", &state).await.unwrap();
    assert_eq!(store.read_state("grain-big", "Journal").await.unwrap(), state);
}

#[tokio::test]
async fn missing_connection_string_fails_before_any_client_exists() {
    let err = StoreConfig::from_properties(&HashMap::new()).unwrap_err();
    assert!(matches!(err, StateError::Configuration(_)));
}
