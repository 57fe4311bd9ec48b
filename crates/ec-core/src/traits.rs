//! Stream traits the correction pipeline reads through.
//!
//! Both sources are lazy, finite and non-restartable. `Ok(None)` marks the
//! end of the stream; an `Err` is fatal for the dataset being read.

use crate::Result;
use crate::types::EventRecord;

/// Source of kinematic event records.
pub trait RecordSource {
    /// Read the next record, or `None` at end of stream.
    fn next_record(&mut self) -> Result<Option<EventRecord>>;
}

/// Source of raw per-event efficiency estimates, aligned 1:1 with a
/// [`RecordSource`] by read order.
pub trait WeightSource {
    /// Read the next raw efficiency, or `None` at end of stream.
    fn next_weight(&mut self) -> Result<Option<f64>>;
}

impl RecordSource for std::vec::IntoIter<EventRecord> {
    fn next_record(&mut self) -> Result<Option<EventRecord>> {
        Ok(self.next())
    }
}

impl WeightSource for std::vec::IntoIter<f64> {
    fn next_weight(&mut self) -> Result<Option<f64>> {
        Ok(self.next())
    }
}

impl<T: RecordSource + ?Sized> RecordSource for Box<T> {
    fn next_record(&mut self) -> Result<Option<EventRecord>> {
        (**self).next_record()
    }
}

impl<T: WeightSource + ?Sized> WeightSource for Box<T> {
    fn next_weight(&mut self) -> Result<Option<f64>> {
        (**self).next_weight()
    }
}
