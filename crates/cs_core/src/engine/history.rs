use crate::engine::MatchCore;

/// Append-only stack of full-state snapshots backing single-step undo.
///
/// A snapshot is pushed after an action validates and before it mutates, so
/// popping one restores the exact pre-action state, including any
/// pending-input flag and match phase. Cleared whenever a new innings or a
/// new match starts.
#[derive(Debug, Default, Clone)]
pub struct SnapshotHistory {
    stack: Vec<MatchCore>,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: MatchCore) {
        self.stack.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<MatchCore> {
        self.stack.pop()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
