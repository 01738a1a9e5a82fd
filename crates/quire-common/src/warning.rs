//! Layout warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times
//! when a document repeats the same degenerate input (a zero-sized image used
//! on every page, for instance). Every warning is also forwarded to the `log`
//! facade so embedders with a logger installed see it in their own output.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a degenerate layout input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Replaced", "intrinsic width is zero, substituting epsilon");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        log::warn!(target: "quire", "[{component}] {message}");
        eprintln!("{}", format!("[Quire {component}] ⚠ {message}").yellow());
    }
}

/// Returns whether `warn_once` has already reported this message.
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call when starting a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
