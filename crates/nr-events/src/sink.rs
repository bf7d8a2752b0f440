//! Event sinks - where the core hands records to presentation

use crate::event::EventRecord;

/// Consumer of engine events. Implemented by the presentation bridge; the
/// engine only ever pushes, it never reads back.
pub trait EventSink: Send {
    fn emit(&mut self, record: EventRecord);
}

/// Sink that buffers every record, for tests and headless runs.
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: Vec<EventRecord>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn drain(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EventSink for CollectingSink {
    fn emit(&mut self, record: EventRecord) {
        self.records.push(record);
    }
}

/// Sink that drops everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _record: EventRecord) {}
}
