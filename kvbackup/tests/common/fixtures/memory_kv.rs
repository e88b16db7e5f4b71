//! In-memory KV store that behaves like Consul for listing and upserts

use async_trait::async_trait;
use kvbackup::{KeyValuePair, KvStore, StoreError};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    /// key -> (value, create_index)
    entries: BTreeMap<String, (Vec<u8>, u64)>,
    next_index: u64,
    puts: Vec<String>,
    list_calls: usize,
    fail_on: Option<String>,
}

#[derive(Default)]
pub struct MemoryKvStore {
    state: Mutex<State>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with explicit create indexes
    pub fn with_pairs(pairs: &[(&str, &str, u64)]) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().unwrap();
            for (key, value, index) in pairs {
                state
                    .entries
                    .insert(key.to_string(), (value.as_bytes().to_vec(), *index));
                state.next_index = state.next_index.max(*index);
            }
        }
        store
    }

    /// Make `put` fail for this key
    pub fn fail_on(self, key: &str) -> Self {
        self.state.lock().unwrap().fail_on = Some(key.to_string());
        self
    }

    pub fn contents(&self) -> HashMap<String, String> {
        self.state
            .lock()
            .unwrap()
            .entries
            .iter()
            .map(|(k, (v, _))| (k.clone(), String::from_utf8_lossy(v).into_owned()))
            .collect()
    }

    pub fn put_keys(&self) -> Vec<String> {
        self.state.lock().unwrap().puts.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn list(&self, prefix: &str) -> Result<Vec<KeyValuePair>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        Ok(state
            .entries
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, (v, index))| KeyValuePair::new(k.clone(), v.clone(), *index))
            .collect())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_on.as_deref() == Some(key) {
            return Err(StoreError::Status {
                operation: format!("put '{}'", key),
                status: 500,
                body: "injected failure".to_string(),
            });
        }

        state.puts.push(key.to_string());
        state.next_index += 1;
        let next_index = state.next_index;
        // Updates keep the original create index, as Consul does
        let entry = state
            .entries
            .entry(key.to_string())
            .or_insert_with(|| (Vec::new(), next_index));
        entry.0 = value.to_vec();
        Ok(())
    }
}
