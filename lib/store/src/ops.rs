use std::sync::Arc;

use medfleet_core::{ListParams, ListResult, ServiceError};
use medfleet_kv::{KvError, KvStore};

use crate::record::Record;

/// CRUD operations for one record collection. Holds a reference to the KV backend.
///
/// One `Ops` per entity type is the repository surface: collections are held
/// independently, and nothing here enforces referential integrity across them.
pub struct Ops<T: Record> {
    kv: Arc<dyn KvStore>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Record> Ops<T> {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            _phantom: std::marker::PhantomData,
        }
    }

    fn make_key(id: &str) -> String {
        format!("{}{}", T::kind(), id)
    }

    fn kv_err(e: KvError) -> ServiceError {
        ServiceError::Storage(e.to_string())
    }

    /// Get a record by key value. Returns None if not found.
    pub fn get(&self, id: &str) -> Result<Option<T>, ServiceError> {
        let key = Self::make_key(id);
        match self.kv.get(&key).map_err(Self::kv_err)? {
            Some(bytes) => {
                let record: T = serde_json::from_slice(&bytes)
                    .map_err(|e| ServiceError::Internal(format!("deserialize: {}", e)))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Get a record or return NotFound error.
    pub fn get_or_err(&self, id: &str) -> Result<T, ServiceError> {
        self.get(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("{} '{}' not found", T::label(), id)))
    }

    /// List all records in this collection, ordered by key.
    pub fn list(&self) -> Result<Vec<T>, ServiceError> {
        let entries = self
            .kv
            .scan(T::kind())
            .map_err(Self::kv_err)?;
        let mut records = Vec::with_capacity(entries.len());
        for (_key, bytes) in entries {
            let record: T = serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Internal(format!("deserialize: {}", e)))?;
            records.push(record);
        }
        Ok(records)
    }

    /// List records with pagination (limit/offset).
    ///
    /// Scans all entries then slices in memory; collections here are sized in
    /// the tens of records, so the full scan is the intended access pattern.
    pub fn list_paginated(&self, params: &ListParams) -> Result<ListResult<T>, ServiceError> {
        let all = self.list()?;
        let total = all.len();
        let items: Vec<T> = all.into_iter().skip(params.offset).take(params.limit).collect();
        Ok(ListResult { items, total })
    }

    /// Count all records in this collection.
    pub fn count(&self) -> Result<usize, ServiceError> {
        let entries = self.kv.scan(T::kind()).map_err(Self::kv_err)?;
        Ok(entries.len())
    }

    /// Create a new record. Calls before_create hook, checks for duplicates.
    pub fn save_new(&self, mut record: T) -> Result<T, ServiceError> {
        record.before_create();

        let id = record.key();
        let key = Self::make_key(&id);

        if self.kv.get(&key).map_err(Self::kv_err)?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "{} '{}' already exists",
                T::label(),
                id
            )));
        }

        let bytes = serde_json::to_vec(&record)
            .map_err(|e| ServiceError::Internal(format!("serialize: {}", e)))?;
        self.kv.set(&key, &bytes).map_err(Self::kv_err)?;
        tracing::debug!(kind = T::label(), id = %id, "record created");

        Ok(record)
    }

    /// Upsert a record (full replacement). Calls before_update hook.
    pub fn save(&self, mut record: T) -> Result<T, ServiceError> {
        record.before_update();

        let id = record.key();
        let key = Self::make_key(&id);

        let bytes = serde_json::to_vec(&record)
            .map_err(|e| ServiceError::Internal(format!("serialize: {}", e)))?;
        self.kv.set(&key, &bytes).map_err(Self::kv_err)?;
        tracing::debug!(kind = T::label(), id = %id, "record saved");

        Ok(record)
    }

    /// Delete a record by key value. NotFound if the record does not exist.
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.get_or_err(id)?;
        let key = Self::make_key(id);
        self.kv.delete(&key).map_err(Self::kv_err)?;
        tracing::debug!(kind = T::label(), id = %id, "record deleted");
        Ok(())
    }
}
