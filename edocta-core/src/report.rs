//! Injectable parse diagnostics.
//!
//! Parsers never print and never fail a whole document over a bad row;
//! they emit structured events through a caller-supplied reporter. Tests
//! capture them with [`CollectingReporter`], the CLI relays them to stderr,
//! and callers that do not care pass [`NoopReporter`].

use std::sync::Mutex;

/// Why a tokenized row was discarded before assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingDate,
    MissingDescription,
    TooFewColumns,
    UnrecognizedLine,
}

/// One diagnostic emitted during a document parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// The tokenizer could not locate the data block; the parse yields
    /// zero transactions rather than an error.
    HeaderNotFound { bank: &'static str },
    /// Spreadsheet bytes could not be opened as a workbook.
    WorkbookUnreadable { bank: &'static str },
    RowSkipped {
        bank: &'static str,
        line: usize,
        reason: SkipReason,
    },
}

pub trait ParseReporter: Sync {
    fn report(&self, event: ParseEvent);
}

/// Discards every event.
pub struct NoopReporter;

impl ParseReporter for NoopReporter {
    fn report(&self, _event: ParseEvent) {}
}

/// Buffers events for later inspection.
#[derive(Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<ParseEvent>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ParseEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().map(|e| e.is_empty()).unwrap_or(true)
    }
}

impl ParseReporter for CollectingReporter {
    fn report(&self, event: ParseEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
