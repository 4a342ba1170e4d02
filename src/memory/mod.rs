//! Memory module - the ordered, session-scoped transcript of turns
//!
//! `Memory` is an append-only sequence of [`Turn`]s owned by exactly one
//! session. The dispatcher never sees the live transcript; it receives a
//! [`MemorySnapshot`], an immutable view that later appends cannot alter.
//!
//! # Example
//!
//! ```
//! use careerpilot::memory::{Memory, Turn};
//!
//! let mut memory = Memory::new();
//! memory.append(Turn::answered("Hello", "Hi! How can I help with your career?"));
//!
//! let snapshot = memory.snapshot();
//! memory.append(Turn::answered("Thanks", "Anytime."));
//!
//! // The snapshot is isolated from the later append
//! assert_eq!(snapshot.len(), 1);
//! assert_eq!(memory.len(), 2);
//! ```

mod types;

pub use types::{InvocationResult, ToolInvocationRecord, Turn, TurnOutcome};

use std::sync::Arc;

/// Ordered, append-only transcript of turns for one session.
///
/// Mutation requires `&mut self`, so two processing cycles can never
/// interleave appends against the same transcript. Insertion order is
/// chronological and preserved exactly; there is no reordering and no
/// deduplication.
#[derive(Debug, Default)]
pub struct Memory {
    turns: Vec<Turn>,
}

impl Memory {
    /// Create a new empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the end of the transcript.
    ///
    /// Never rejects a well-formed turn; O(1) amortized.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Return an immutable, ordered view of all turns at call time.
    ///
    /// Later appends do not retroactively alter a snapshot already handed
    /// out; the snapshot owns its own copy of the turns.
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            turns: self.turns.clone().into(),
        }
    }

    /// Empty the transcript. Idempotent.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Number of turns in the transcript.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

/// Immutable point-in-time view of a transcript.
///
/// Cheap to clone; the underlying turns are shared, never mutated.
#[derive(Debug, Clone)]
pub struct MemorySnapshot {
    turns: Arc<[Turn]>,
}

impl MemorySnapshot {
    /// An empty snapshot.
    pub fn empty() -> Self {
        Self {
            turns: Arc::from(Vec::new()),
        }
    }

    /// The turns in this snapshot, in append order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns in this snapshot.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether this snapshot contains no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent turn in this snapshot, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}
