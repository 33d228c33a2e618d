//! Unique id generation.
//!
//! Mutators never mint ids themselves; they take an [`IdGenerator`] handle so
//! production code gets UUIDs while tests get deterministic sequences.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh entity ids.
pub trait IdGenerator: Send + Sync {
    /// Return a new id carrying the given domain prefix (e.g. `view`, `agr`).
    fn next_id(&self, prefix: &str) -> String;
}

/// Production generator: `<prefix>-<uuid v4>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4())
    }
}

/// Deterministic generator for tests: `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug, Default)]
pub struct SequentialGenerator {
    counter: AtomicU64,
}

impl IdGenerator for SequentialGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }
}
