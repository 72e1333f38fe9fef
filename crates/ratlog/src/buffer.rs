use crate::error::{RatlogError, Result};
use crate::ir::Record;
use crate::parser::{RecordReader, RecordWriter};
use std::collections::VecDeque;

/// An in-memory FIFO of records.
///
/// The buffer distinguishes "never populated" from "populated but empty":
/// [`records`](Self::records) fails with [`RatlogError::EmptyBuffer`] on a
/// buffer from [`new`](Self::new), and again once [`record`](RecordReader::record)
/// has removed the last queued entry.
#[derive(Debug, Clone, Default)]
pub struct RecordBuffer {
    entries: Option<VecDeque<Record>>,
}

impl RecordBuffer {
    /// Creates a buffer that has never been written to.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding a copy of `records`.
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            entries: Some(records.iter().cloned().collect()),
        }
    }

    /// Returns a copy of every queued record, oldest first.
    ///
    /// # Errors
    ///
    /// [`RatlogError::EmptyBuffer`] if the buffer was never populated or has
    /// been drained by [`record`](RecordReader::record).
    pub fn records(&self) -> Result<Vec<Record>> {
        match &self.entries {
            Some(entries) => Ok(entries.iter().cloned().collect()),
            None => Err(RatlogError::EmptyBuffer),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordWriter for RecordBuffer {
    fn write(&mut self, record: Record) -> Result<()> {
        self.entries.get_or_insert_with(VecDeque::new).push_back(record);
        Ok(())
    }
}

impl RecordReader for RecordBuffer {
    fn record(&mut self) -> Result<Record> {
        let entries = self.entries.as_mut().ok_or(RatlogError::EndOfData)?;
        let record = entries.pop_front().ok_or(RatlogError::EndOfData)?;
        if entries.is_empty() {
            self.entries = None;
        }
        Ok(record)
    }
}

impl From<Vec<Record>> for RecordBuffer {
    fn from(records: Vec<Record>) -> Self {
        Self {
            entries: Some(records.into()),
        }
    }
}
