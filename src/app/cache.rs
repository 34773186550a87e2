// src/app/cache.rs
use std::collections::HashMap;

use tracing::debug;

use super::data::MovieRecord;
use crate::error::FetchError;

/// Per-session memo of lookup outcomes, keyed by exact catalog title.
/// `Some(None)` means the service answered "no such title".
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: HashMap<String, Option<MovieRecord>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, title: &str) -> Option<Option<&MovieRecord>> {
        self.entries.get(title).map(Option::as_ref)
    }

    /// Keep hits and definitive misses. Transport failures stay uncached so
    /// the next pass asks again.
    pub fn record(&mut self, title: &str, outcome: &Result<MovieRecord, FetchError>) {
        match outcome {
            Ok(record) => {
                self.entries.insert(title.to_string(), Some(record.clone()));
            }
            Err(err) if err.is_definitive() => {
                self.entries.insert(title.to_string(), None);
            }
            Err(err) => debug!("not caching '{title}': {err}"),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
