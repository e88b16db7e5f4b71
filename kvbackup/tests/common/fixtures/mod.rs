//! Shared test utilities:
//! - In-memory KV store
//! - Recording object store
//! - Mock Consul HTTP server

// Not every test binary uses every fixture
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod memory_kv;
pub mod mock_consul;
pub mod mock_object_store;

pub use memory_kv::MemoryKvStore;
pub use mock_consul::MockConsulServer;
pub use mock_object_store::{MockObjectStore, RecordedPut};
