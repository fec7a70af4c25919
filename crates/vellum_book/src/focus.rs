//! Keyboard focus registry
//!
//! At most one book instance owns keyboard focus at a time. The registry is
//! process-wide state with explicit acquire/release. Reassignment detaches
//! the previous holder before attaching the new one, atomically with
//! respect to the single-threaded event loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

/// Identifies one book instance for focus arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(u64);

impl BookId {
    /// Allocate a fresh, process-unique id.
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        BookId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

fn registry() -> &'static Mutex<Option<BookId>> {
    static FOCUS: OnceLock<Mutex<Option<BookId>>> = OnceLock::new();
    FOCUS.get_or_init(|| Mutex::new(None))
}

/// Claim keyboard focus for `id`. Returns the previous holder, which is now
/// detached.
pub fn acquire(id: BookId) -> Option<BookId> {
    let mut holder = registry().lock().unwrap();
    let previous = (*holder).filter(|prev| *prev != id);
    *holder = Some(id);
    previous
}

/// Give up focus if `id` still holds it.
pub fn release(id: BookId) {
    let mut holder = registry().lock().unwrap();
    if *holder == Some(id) {
        *holder = None;
    }
}

/// The current focus holder, if any.
pub fn holder() -> Option<BookId> {
    *registry().lock().unwrap()
}

/// Whether `id` currently holds focus.
pub fn is_holder(id: BookId) -> bool {
    holder() == Some(id)
}
