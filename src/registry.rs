use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::backend::ObjectKey;
use crate::error::{QilanResult, UsageError};

static NEXT_PROXY_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a proxy handle. Ids are never reused within a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProxyId(u64);

impl ProxyId {
    pub(crate) fn mint() -> Self {
        Self(NEXT_PROXY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ProxyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a proxy stands in for a mock object or a bare spy function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProxyKind {
    Mock,
    Spy,
}

#[derive(Clone, Debug)]
pub(crate) struct ProxyEntry {
    pub object: ObjectKey,
    pub kind: ProxyKind,
    pub name: std::sync::Arc<str>,
}

/// Append-only table from proxy handles to backend objects.
#[derive(Default)]
pub(crate) struct ProxyRegistry {
    entries: BTreeMap<ProxyId, ProxyEntry>,
}

impl ProxyRegistry {
    pub fn register(&mut self, id: ProxyId, entry: ProxyEntry) -> QilanResult<()> {
        if self.entries.contains_key(&id) {
            return Err(UsageError::DuplicateHandle(id));
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    pub fn resolve(&self, id: ProxyId) -> QilanResult<&ProxyEntry> {
        self.entries.get(&id).ok_or(UsageError::UnknownHandle(id))
    }
}
