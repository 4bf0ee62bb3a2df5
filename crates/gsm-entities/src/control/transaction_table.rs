use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use gsm_core::{ChannelDesc, TransactionId};
use gsm_pdus::l3::fields::mobile_identity::MobileIdentity;


/// Procedure a transaction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    LocationUpdating,
    ImsiDetach,
    /// Started by CM SERVICE REQUEST
    MobileOriginated,
    /// Started by PAGING RESPONSE
    MobileTerminated,
    Assignment,
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionKind::LocationUpdating => write!(f, "LocationUpdating"),
            TransactionKind::ImsiDetach => write!(f, "ImsiDetach"),
            TransactionKind::MobileOriginated => write!(f, "MobileOriginated"),
            TransactionKind::MobileTerminated => write!(f, "MobileTerminated"),
            TransactionKind::Assignment => write!(f, "Assignment"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionEntry {
    pub id: TransactionId,
    pub subscriber: MobileIdentity,
    pub kind: TransactionKind,
    /// Channel the procedure runs on
    pub channel: ChannelDesc,
    pub created: Instant,
}

impl TransactionEntry {
    pub fn new(id: TransactionId, subscriber: MobileIdentity, kind: TransactionKind, channel: ChannelDesc) -> Self {
        Self { id, subscriber, kind, channel, created: Instant::now() }
    }

    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }
}

/// Registry of in-flight transactions, shared by all channel loops.
/// Clearing is idempotent: clearing an unknown or already cleared id is a no-op.
pub struct TransactionTable {
    entries: Mutex<HashMap<TransactionId, TransactionEntry>>,
    next_id: AtomicU32,
}

impl Default for TransactionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionTable {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            next_id: AtomicU32::new(1),
        }
    }

    /// Allocate a fresh transaction id. Ids are never reused within a process.
    pub fn new_id(&self) -> TransactionId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn insert(&self, entry: TransactionEntry) {
        tracing::debug!(chan=%entry.channel, "insert transaction {} {} {}", entry.id, entry.kind, entry.subscriber);
        let mut entries = self.lock();
        if entries.insert(entry.id, entry).is_some() {
            tracing::warn!("transaction id reused, previous entry replaced");
        }
    }

    pub fn lookup(&self, id: TransactionId) -> Option<TransactionEntry> {
        self.lock().get(&id).cloned()
    }

    /// Most recent transaction bound to `channel`, if any
    pub fn find_by_channel(&self, channel: &ChannelDesc) -> Option<TransactionId> {
        self.lock()
            .values()
            .filter(|e| e.channel == *channel)
            .map(|e| e.id)
            .max()
    }

    /// Most recent transaction bound to `channel` that was created at or after `since`.
    /// Entries left behind by earlier sessions on the channel are not returned.
    pub fn find_by_channel_since(&self, channel: &ChannelDesc, since: Instant) -> Option<TransactionId> {
        self.lock()
            .values()
            .filter(|e| e.channel == *channel && e.created >= since)
            .map(|e| e.id)
            .max()
    }

    /// Remove a transaction. Returns whether an entry was present.
    pub fn clear(&self, id: TransactionId) -> bool {
        let removed = self.lock().remove(&id);
        match removed {
            Some(entry) => {
                tracing::debug!(chan=%entry.channel, "cleared transaction {} {} after {:?}", id, entry.kind, entry.age());
                true
            }
            None => {
                tracing::trace!("clear of unknown transaction {}", id);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<TransactionId, TransactionEntry>> {
        // Every operation leaves the map consistent, so a poisoned lock is still usable
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use gsm_core::{ChannelType, debug};

    use super::*;

    fn sdcch(sub: u8) -> ChannelDesc {
        ChannelDesc::new(ChannelType::Sdcch, 0, sub)
    }

    #[test]
    fn test_insert_lookup_clear() {
        debug::setup_logging_verbose();
        let table = TransactionTable::new();
        let id = table.new_id();
        table.insert(TransactionEntry::new(id, MobileIdentity::Tmsi(1), TransactionKind::LocationUpdating, sdcch(0)));

        let entry = table.lookup(id).expect("entry present");
        assert_eq!(entry.kind, TransactionKind::LocationUpdating);
        assert_eq!(table.find_by_channel(&sdcch(0)), Some(id));
        assert_eq!(table.find_by_channel(&sdcch(1)), None);

        assert!(table.clear(id));
        assert!(table.lookup(id).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let table = TransactionTable::new();
        let id = table.new_id();
        table.insert(TransactionEntry::new(id, MobileIdentity::NoIdentity, TransactionKind::ImsiDetach, sdcch(2)));
        assert!(table.clear(id));
        assert!(!table.clear(id));
        assert!(!table.clear(9999));
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_find_by_channel_prefers_latest() {
        let table = TransactionTable::new();
        let first = table.new_id();
        let second = table.new_id();
        table.insert(TransactionEntry::new(first, MobileIdentity::Tmsi(1), TransactionKind::MobileOriginated, sdcch(3)));
        table.insert(TransactionEntry::new(second, MobileIdentity::Tmsi(1), TransactionKind::MobileOriginated, sdcch(3)));
        assert_eq!(table.find_by_channel(&sdcch(3)), Some(second));
    }

    #[test]
    fn test_find_by_channel_since_skips_older_entries() {
        let table = TransactionTable::new();
        let earlier = table.new_id();
        table.insert(TransactionEntry::new(earlier, MobileIdentity::Tmsi(1), TransactionKind::MobileOriginated, sdcch(0)));
        thread::sleep(Duration::from_millis(1));
        let since = Instant::now();
        assert_eq!(table.find_by_channel_since(&sdcch(0), since), None);
        assert_eq!(table.find_by_channel(&sdcch(0)), Some(earlier));

        let current = table.new_id();
        table.insert(TransactionEntry::new(current, MobileIdentity::Tmsi(2), TransactionKind::LocationUpdating, sdcch(0)));
        assert_eq!(table.find_by_channel_since(&sdcch(0), since), Some(current));
        assert_eq!(table.find_by_channel_since(&sdcch(1), since), None);
    }

    #[test]
    fn test_concurrent_access() {
        let table = Arc::new(TransactionTable::new());
        let handles: Vec<_> = (0..4u8)
            .map(|sub| {
                let table = Arc::clone(&table);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let id = table.new_id();
                        table.insert(TransactionEntry::new(id, MobileIdentity::Tmsi(id), TransactionKind::LocationUpdating, sdcch(sub)));
                        assert!(table.lookup(id).is_some());
                        assert!(table.clear(id));
                        assert!(!table.clear(id));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(table.is_empty());
        assert_eq!(table.new_id(), 401);
    }
}
