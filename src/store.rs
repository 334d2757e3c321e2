// Client-side resource store
//
// The store is the in-memory last-known-good view of server resources. It is
// injected into the client rather than living in a process-wide global, and
// mutation is limited to upsert/remove driven by successful API calls. Reads
// may be stale but never torn: each write is a single atomic key operation.

use crate::resources::databases::Database;
use crate::resources::domains::Domain;
use crate::resources::firewalls::Firewall;
use crate::resources::instances::Instance;
use dashmap::DashMap;

/// A record the store can key by id.
pub trait StoreRecord: Clone + Send + Sync + 'static {
    fn record_id(&self) -> i64;
}

/// Typed cache for one resource kind.
///
/// Whichever write completes last owns the entry (last-completed-wins);
/// serializing mutations per id is the caller's responsibility.
#[derive(Debug)]
pub struct ResourceCache<T: StoreRecord> {
    entries: DashMap<i64, T>,
}

impl<T: StoreRecord> Default for ResourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreRecord> ResourceCache<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert or replace the entry for the record's id.
    pub fn upsert(&self, record: T) {
        self.entries.insert(record.record_id(), record);
    }

    /// Remove the entry for an id, if present.
    pub fn remove(&self, id: i64) {
        self.entries.remove(&id);
    }

    /// The last-known-good view of a record.
    pub fn get(&self, id: i64) -> Option<T> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn ids(&self) -> Vec<i64> {
        self.entries.iter().map(|entry| *entry.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full client-side store, one typed cache per resource kind.
#[derive(Debug, Default)]
pub struct Store {
    pub domains: ResourceCache<Domain>,
    pub databases: ResourceCache<Database>,
    pub firewalls: ResourceCache<Firewall>,
    pub instances: ResourceCache<Instance>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
