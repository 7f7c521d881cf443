//! Correlation id generation
//!
//! Every correlatable message carries a decimal-text `Id` drawn from a
//! shared monotonically increasing counter. Responses echo the id of the
//! request they answer, which is how callers pair the two.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Largest id handed out before the counter restarts at 1
///
/// Keeps the textual id at most seven digits for wire compactness.
pub const MAX_MESSAGE_ID: u32 = 9_999_999;

/// Process-wide counter backing [`next_message_id`]
static GLOBAL_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Draw the next correlation id from the process-wide source
///
/// Lock-free and safe to call from any thread; this sits on the hot path
/// of every outgoing message.
pub fn next_message_id() -> String {
    next_from(&GLOBAL_COUNTER)
}

/// Correlation id source
///
/// Thread-safe and can be cloned cheaply (Arc internally). Most callers
/// use the process-wide [`next_message_id`]; a private source is useful
/// for tests and for hosts multiplexing several independent sessions.
#[derive(Debug, Clone, Default)]
pub struct MessageIdSource {
    counter: Arc<AtomicU32>,
}

impl MessageIdSource {
    /// Create a fresh source starting before id 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id as decimal text, cycling through `1..=9_999_999`
    pub fn next(&self) -> String {
        next_from(&self.counter)
    }

    /// Force the counter to a specific value (used in testing)
    #[cfg(test)]
    pub fn set(&self, value: u32) {
        self.counter.store(value, Ordering::Release);
    }
}

fn next_from(counter: &AtomicU32) -> String {
    // Two distinct atomic steps, deliberately: a reset check racing a
    // concurrent increment near the boundary is an accepted property of
    // the protocol's id scheme and must not be fused into one operation.
    let _ = counter.compare_exchange(MAX_MESSAGE_ID, 0, Ordering::AcqRel, Ordering::Relaxed);

    let id = counter.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
    id.to_string()
}
