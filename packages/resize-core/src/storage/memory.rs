use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::StorageError;
use crate::storage::{ObjectLocation, ObjectStore};

/// 格納済みオブジェクト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
}

/// プロセス内メモリのオブジェクトストア
///
/// ローカル実行とテスト用。`bucket/key` をキーに保持する
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// オブジェクトを直接登録する
    pub fn insert(&self, location: &ObjectLocation, data: impl Into<Bytes>, content_type: &str) {
        let object = StoredObject {
            data: data.into(),
            content_type: content_type.to_string(),
        };
        self.lock().insert(location.path(), object);
    }

    pub fn get(&self, location: &ObjectLocation) -> Option<StoredObject> {
        self.lock().get(&location.path()).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredObject>> {
        // 保持中にパニックしてもマップ自体は壊れない
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn fetch(&self, location: &ObjectLocation) -> Result<Bytes, StorageError> {
        self.get(location)
            .map(|object| object.data)
            .ok_or_else(|| StorageError::NotFound {
                key: location.key.clone(),
            })
    }

    async fn store(
        &self,
        location: &ObjectLocation,
        data: Bytes,
        content_type: &'static str,
    ) -> Result<(), StorageError> {
        self.insert(location, data, content_type);
        Ok(())
    }
}
