//! Deprecation warning collection for wire decoding.
//!
//! The collector is an explicit side channel passed into decode calls, never
//! process-global state. Repeated use of the same deprecated key during one
//! decode records a single warning.

use ahash::AHashSet;

/// Collects deprecation warnings emitted while decoding wire input.
#[derive(Debug, Default)]
pub struct DeprecationWarnings {
    seen: AHashSet<String>,
    messages: Vec<String>,
}

impl DeprecationWarnings {
    /// Create an empty collector.
    pub fn new() -> Self {
        DeprecationWarnings::default()
    }

    /// Record a deprecation warning, deduplicating identical messages.
    pub fn deprecated<S: Into<String>>(&mut self, message: S) {
        let message = message.into();
        if self.seen.insert(message.clone()) {
            self.messages.push(message);
        }
    }

    /// All distinct warnings, in first-use order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Whether any warning was recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
