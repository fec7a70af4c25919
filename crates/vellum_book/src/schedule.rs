//! Cancellable host-pumped timers
//!
//! The controller never owns a thread or a wall clock; every delayed effect
//! is an entry here, drained by `pump(now_ms)` on the host's frame loop.
//! Entries are cancellable handles; nothing may fire after teardown, and
//! lifecycle-bound entries carry the epoch current at scheduling time so a
//! competing transition invalidates them.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::trace;

new_key_type! {
    /// Handle for one scheduled timer.
    pub struct TimerId;
}

/// What a due timer should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// `opening` settles into `open`.
    SettleOpen,
    /// `closing` finalizes into `closed`.
    SettleClose,
    /// One backward step of the cascade close.
    CascadeStep,
    /// Auto-advance to the next page.
    AutoPlay,
    /// Clear the resizing marker.
    ResizeSettle,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    deadline_ms: u64,
    /// Tie-breaker: equal deadlines fire in scheduling order.
    seq: u64,
    /// Lifecycle epoch at scheduling time; `None` for timers that outlive
    /// lifecycle transitions (auto-play, resize settle).
    epoch: Option<u64>,
    kind: TimerKind,
}

/// A fired timer, as handed back to the controller.
#[derive(Debug, Clone, Copy)]
pub struct DueTimer {
    pub kind: TimerKind,
    pub epoch: Option<u64>,
}

/// Deadline-ordered timer store.
pub struct TimerQueue {
    entries: SlotMap<TimerId, Entry>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Schedule `kind` to fire at `deadline_ms`.
    pub fn schedule(&mut self, kind: TimerKind, deadline_ms: u64, epoch: Option<u64>) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(?kind, deadline_ms, ?epoch, "schedule timer");
        self.entries.insert(Entry {
            deadline_ms,
            seq,
            epoch,
            kind,
        })
    }

    /// Cancel one timer; returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Cancel every pending timer of `kind`.
    pub fn cancel_kind(&mut self, kind: TimerKind) {
        self.entries.retain(|_, entry| entry.kind != kind);
    }

    /// Cancel everything (disable/destroy teardown).
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Whether a timer of `kind` is pending.
    pub fn has(&self, kind: TimerKind) -> bool {
        self.entries.values().any(|entry| entry.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every timer due at `now_ms`, ordered by deadline
    /// then scheduling order.
    pub fn drain_due(&mut self, now_ms: u64) -> SmallVec<[DueTimer; 4]> {
        let mut due: SmallVec<[(TimerId, Entry); 4]> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline_ms <= now_ms)
            .map(|(id, entry)| (id, *entry))
            .collect();
        due.sort_by_key(|(_, entry)| (entry.deadline_ms, entry.seq));

        due.iter()
            .map(|(id, entry)| {
                self.entries.remove(*id);
                DueTimer {
                    kind: entry.kind,
                    epoch: entry.epoch,
                }
            })
            .collect()
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}
