//! Bounded log of flow outcomes shown to the player.
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    /// Finalized transaction.
    Info,
    /// Stale data after a failed refresh.
    Warning,
    /// Rejected or aborted submission.
    Error,
}

#[derive(Clone, Debug)]
pub struct MessageEntry {
    pub text: String,
    /// Ledger version of the finalized transaction, if any.
    pub version: Option<u64>,
    pub level: MessageLevel,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, version: Option<u64>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            version,
            level,
        }
    }
}

/// Keeps the newest `capacity` entries (at least one).
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finalized(version: u64) -> MessageEntry {
        MessageEntry::new("buy_units finalized", Some(version), MessageLevel::Info)
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let mut log = MessageLog::new(2);
        log.push(finalized(1));
        log.push(finalized(2));
        log.push(MessageEntry::new("balances are stale", None, MessageLevel::Warning));

        let recent: Vec<_> = log.recent(10).map(|e| (e.version, e.level)).collect();
        assert_eq!(
            recent,
            [(None, MessageLevel::Warning), (Some(2), MessageLevel::Info)]
        );
    }

    #[test]
    fn zero_capacity_keeps_the_latest_entry() {
        let mut log = MessageLog::new(0);
        log.push(finalized(1));
        log.push(finalized(2));

        let versions: Vec<_> = log.recent(10).map(|e| e.version).collect();
        assert_eq!(versions, [Some(2)]);
    }
}
