//! Deduplicated warnings for rejected or unsupported input.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the selector engine to report selector clauses it had to drop.
//! Messages are forwarded to [`tracing::warn!`]; installing a subscriber is
//! left to the embedding application.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    // A panic while holding the lock cannot leave the set half-updated.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about rejected input (emits once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Selector", "dropped clause 'div >': combinator '>' is missing an operand");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_emit = warned()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_emit {
        tracing::warn!(component, "{message}");
    }
}

/// Whether `message` has already been emitted for `component`.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call when switching to an unrelated workload)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}
