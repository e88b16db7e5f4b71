//! Object store that keeps objects in memory and records every upload

use async_trait::async_trait;
use kvbackup::storage::{ObjectStore, ObjectStoreError, PutObject, Visibility};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedPut {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
    pub visibility: Visibility,
    pub content_md5: String,
}

#[derive(Default)]
pub struct MockObjectStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    puts: Mutex<Vec<RecordedPut>>,
    versioned: bool,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a version id to every upload
    pub fn versioned() -> Self {
        Self {
            versioned: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, bucket: &str, key: &str, body: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body.to_vec());
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        self.object(bucket, key).ok_or(ObjectStoreError::NotFound)
    }

    async fn put(&self, request: PutObject<'_>) -> Result<Option<String>, ObjectStoreError> {
        let mut puts = self.puts.lock().unwrap();
        puts.push(RecordedPut {
            bucket: request.bucket.to_string(),
            key: request.key.to_string(),
            body: request.body.to_vec(),
            content_type: request.content_type.to_string(),
            visibility: request.visibility,
            content_md5: request.content_md5.clone(),
        });
        self.insert(request.bucket, request.key, request.body);

        Ok(self.versioned.then(|| format!("v{}", puts.len())))
    }
}
