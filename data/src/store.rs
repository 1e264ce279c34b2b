use tokio::sync::Mutex;

use crate::error::{Result, ServiceError};

/// A record held by a [`Store`]: cloneable, with a numeric identifier and a
/// display name used in not-found messages.
pub trait Record: Clone {
    /// Entity name as it appears in error messages ("Doctor not found").
    const ENTITY: &'static str;

    fn id(&self) -> u32;
}

/// Normalize an externally supplied identifier (search box, CLI argument).
///
/// Identifiers are accepted as numeric strings only; anything non-numeric
/// never matches a record and therefore surfaces as not-found downstream.
pub fn parse_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// An in-memory collection owning the records of one entity.
///
/// Stores are explicit, injectable objects rather than process-wide globals:
/// tests construct isolated instances with whatever contents they need. Every
/// operation completes fully under the lock, so no caller can observe a
/// partially applied mutation.
///
/// Identifiers count up from `max(seed ids) + 1` and are never reused, even
/// after deletions.
pub struct Store<T: Record> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    records: Vec<T>,
    next_id: u32,
}

impl<T: Record> Store<T> {
    pub fn new(records: Vec<T>) -> Self {
        let next_id = records.iter().map(Record::id).max().map_or(1, |max| max + 1);
        Self {
            inner: Mutex::new(Inner { records, next_id }),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Snapshot of the whole collection.
    pub async fn all(&self) -> Vec<T> {
        self.inner.lock().await.records.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Copy of the record with the given id.
    pub async fn get(&self, id: u32) -> Result<T> {
        self.inner
            .lock()
            .await
            .records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or(ServiceError::NotFound { entity: T::ENTITY })
    }

    /// Append a record built from the next free identifier.
    pub async fn insert(&self, build: impl FnOnce(u32) -> T) -> T {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let record = build(id);
        inner.records.push(record.clone());
        record
    }

    /// Apply an in-place mutation to the record with the given id and return
    /// the updated copy. The identifier itself is never touched here; update
    /// payloads carry no id field.
    pub async fn modify(&self, id: u32, apply: impl FnOnce(&mut T)) -> Result<T> {
        let mut inner = self.inner.lock().await;
        let record = inner
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(ServiceError::NotFound { entity: T::ENTITY })?;
        apply(record);
        Ok(record.clone())
    }

    /// Remove and return the record with the given id.
    pub async fn remove(&self, id: u32) -> Result<T> {
        let mut inner = self.inner.lock().await;
        let index = inner
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(ServiceError::NotFound { entity: T::ENTITY })?;
        Ok(inner.records.remove(index))
    }

    /// Copies of all records matching the predicate.
    pub async fn matching(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.inner
            .lock()
            .await
            .records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }
}
