use super::Record;

/// Writes a record to an output destination with [`Recorder::write`].
pub trait Recorder {
    /// Write a record to the [`Recorder`].
    fn write(&mut self, record: Record);
}

/// A recorder that buffers records and writes them in aggregated form.
///
/// Implementations typically hold a [`RecordStorage`](super::RecordStorage):
/// [`AggregateRecorder::store`] collects records and
/// [`AggregateRecorder::flush`] writes one aggregated record, carrying
/// `epoch` as its step.
pub trait AggregateRecorder: Recorder {
    /// Store the record.
    fn store(&mut self, record: Record);

    /// Writes values aggregated from the stored records.
    ///
    /// `epoch` is inserted into the aggregated record under the `epoch` key.
    fn flush(&mut self, epoch: i64);
}
