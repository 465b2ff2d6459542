//! Typed collections keyed by `ObjectId`.

use std::collections::BTreeMap;

use landgrid_types::ObjectId;
use serde::Serialize;

use crate::error::StoreError;
use crate::filter::Filter;

/// A record that can live in a [`Collection`].
pub trait Document: Clone + Serialize {
    /// The document's identifier.
    fn id(&self) -> &ObjectId;
}

/// One entity type's documents.
///
/// Filters are evaluated against the serialized wire form of each document,
/// so condition paths use camelCase field names exactly as API callers see
/// them.
#[derive(Debug, Clone)]
pub struct Collection<T: Document> {
    name: &'static str,
    docs: BTreeMap<ObjectId, T>,
}

impl<T: Document> Collection<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            docs: BTreeMap::new(),
        }
    }

    /// Collection name, used in store errors.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Inserts a new document. The id must not already exist.
    pub fn insert(&mut self, doc: T) -> Result<(), StoreError> {
        let id = doc.id().clone();
        if self.docs.contains_key(&id) {
            return Err(StoreError::DuplicateId {
                collection: self.name,
                id,
            });
        }
        self.docs.insert(id, doc);
        Ok(())
    }

    /// Looks up a document by id.
    pub fn get(&self, id: &ObjectId) -> Option<&T> {
        self.docs.get(id)
    }

    /// Replaces an existing document. The replacement keeps the same id.
    pub fn update(&mut self, doc: T) -> Result<(), StoreError> {
        let id = doc.id().clone();
        match self.docs.get_mut(&id) {
            Some(slot) => {
                *slot = doc;
                Ok(())
            }
            None => Err(StoreError::Missing {
                collection: self.name,
                id,
            }),
        }
    }

    /// Permanently removes a document, returning it.
    pub fn remove(&mut self, id: &ObjectId) -> Result<T, StoreError> {
        self.docs.remove(id).ok_or_else(|| StoreError::Missing {
            collection: self.name,
            id: id.clone(),
        })
    }

    /// Returns every document matching the filter, in id order.
    pub fn find(&self, filter: &Filter) -> Result<Vec<T>, StoreError> {
        let mut out = Vec::new();
        for doc in self.docs.values() {
            if filter.is_empty() || filter.matches(&self.encode(doc)?) {
                out.push(doc.clone());
            }
        }
        Ok(out)
    }

    /// Counts documents matching the filter without cloning them.
    pub fn count(&self, filter: &Filter) -> Result<u64, StoreError> {
        if filter.is_empty() {
            return Ok(self.docs.len() as u64);
        }
        let mut n = 0;
        for doc in self.docs.values() {
            if filter.matches(&self.encode(doc)?) {
                n += 1;
            }
        }
        Ok(n)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn encode(&self, doc: &T) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(doc).map_err(|err| StoreError::Encode {
            collection: self.name,
            detail: err.to_string(),
        })
    }
}
