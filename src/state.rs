use crate::data::model::{SignalEntry, SignalSet};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The datasets are immutable after load; the cursor is the only thing the
/// two navigation buttons mutate.
pub struct AppState {
    /// Loaded signal pairs, in display order.
    pub signals: SignalSet,

    /// Index of the signal currently shown.
    pub cursor: usize,
}

impl AppState {
    pub fn new(signals: SignalSet) -> Self {
        Self { signals, cursor: 0 }
    }

    /// The signal pair under the cursor.
    pub fn current(&self) -> &SignalEntry {
        &self.signals.entries[self.cursor]
    }

    /// Move the cursor to the next signal, wrapping at the end.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.signals.len();
    }

    /// Move the cursor to the previous signal, wrapping at the start.
    pub fn retreat(&mut self) {
        let n = self.signals.len();
        self.cursor = (self.cursor + n - 1) % n;
    }
}
