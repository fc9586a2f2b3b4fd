use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use streamdex_core::{DocId, FieldValue, InvertedIndex, Normalizer, SearchEngine, SearchMode, Term};

use crate::error::{CatalogError, Result};
use crate::show::{Show, ShowRecord};

/// A cataloged show, or the tombstone left behind where one was removed.
struct Slot {
    show: Show,
    live: bool,
}

struct Inner {
    index: InvertedIndex,
    /// DocId -> slot. Never shrinks, so ids stay monotonic and unique.
    slots: Vec<Slot>,
    by_title: HashMap<String, DocId>,
}

/// The catalog: owns the shows, assigns document ids, keeps the inverted
/// index fed and resolves search hits back to records.
///
/// State sits behind a reader/writer lock: searches take the read side
/// and observe a consistent point-in-time index, insertion and removal
/// take the write side. The usual pattern is still a sequential build
/// phase (see [`StreamingService::from_records`]) followed by queries.
pub struct StreamingService {
    name: String,
    normalizer: Arc<Normalizer>,
    engine: SearchEngine,
    inner: RwLock<Inner>,
}

impl StreamingService {
    pub fn new(name: impl Into<String>) -> Self {
        let normalizer = Arc::new(Normalizer::new());
        let engine = SearchEngine::new(Arc::clone(&normalizer));
        Self {
            name: name.into(),
            normalizer,
            engine,
            inner: RwLock::new(Inner {
                index: InvertedIndex::new(),
                slots: Vec::new(),
                by_title: HashMap::new(),
            }),
        }
    }

    /// Build a catalog from a batch of records: the whole index is
    /// populated before any query runs.
    pub fn from_records(name: impl Into<String>, records: Vec<ShowRecord>) -> Result<Self> {
        let service = Self::new(name);
        for record in records {
            service.add_show(record)?;
        }
        Ok(service)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalog a show, index its fields and return the assigned id. Ids
    /// grow monotonically and are never reused, even across removals.
    pub fn add_show(&self, record: ShowRecord) -> Result<DocId> {
        let mut inner = self.inner.write();
        if inner.by_title.contains_key(&record.title) {
            return Err(CatalogError::DuplicateTitle(record.title));
        }
        let id = inner.slots.len() as DocId;
        let show = Show::from_record(id, record);
        for field in show.index_fields() {
            match &field {
                FieldValue::Text(_) => {
                    for term in self.normalizer.normalize(&field)? {
                        inner.index.insert(&term, id);
                    }
                }
                FieldValue::Number(value) => inner.index.insert_numeric(*value, id),
            }
        }
        tracing::debug!(title = %show.title, doc_id = id, "cataloged show");
        inner.by_title.insert(show.title.clone(), id);
        inner.slots.push(Slot { show, live: true });
        Ok(id)
    }

    /// The show with this exact title (case and spacing included).
    pub fn get_show(&self, title: &str) -> Result<Show> {
        let inner = self.inner.read();
        inner
            .by_title
            .get(title)
            .and_then(|&id| inner.slots.get(id as usize))
            .filter(|slot| slot.live)
            .map(|slot| slot.show.clone())
            .ok_or_else(|| CatalogError::ShowNotFound {
                title: title.to_string(),
                service: self.name.clone(),
            })
    }

    /// Resolve a document id to its record, if the show is still live.
    pub fn find_show(&self, id: DocId) -> Option<Show> {
        let inner = self.inner.read();
        inner
            .slots
            .get(id as usize)
            .filter(|slot| slot.live)
            .map(|slot| slot.show.clone())
    }

    /// Every live show, in insertion (document id) order.
    pub fn all_shows(&self) -> Vec<Show> {
        let inner = self.inner.read();
        inner
            .slots
            .iter()
            .filter(|slot| slot.live)
            .map(|slot| slot.show.clone())
            .collect()
    }

    /// Drop a show from the catalog. Its postings stay in the index
    /// (the index never retracts); the id is tombstoned and filtered
    /// out when search results are resolved.
    pub fn remove_show(&self, title: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let id = inner
            .by_title
            .remove(title)
            .ok_or_else(|| CatalogError::ShowNotFound {
                title: title.to_string(),
                service: self.name.clone(),
            })?;
        if let Some(slot) = inner.slots.get_mut(id as usize) {
            slot.live = false;
        }
        Ok(())
    }

    /// Search the catalog and resolve the hits to records.
    pub fn search(&self, query: &str, mode: SearchMode) -> Result<Vec<Show>> {
        let inner = self.inner.read();
        let ids = self.engine.search(&inner.index, query, mode)?;
        Ok(ids
            .into_iter()
            .filter_map(|id| inner.slots.get(id as usize))
            .filter(|slot| slot.live)
            .map(|slot| slot.show.clone())
            .collect())
    }

    /// Clone of the index mapping, for diagnostics and the CLI's stats.
    pub fn index_snapshot(&self) -> HashMap<Term, Vec<DocId>> {
        self.inner.read().index.snapshot().clone()
    }
}
