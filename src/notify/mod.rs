//! Outcome notification
//!
//! The engine reports every operation through an [`OutcomeSink`]. What the
//! sink does with a record (collect it, forward it to another thread, log
//! it) is up to the caller.

pub mod outcome_data;

use crossbeam_channel::{Receiver, Sender, TrySendError};

pub use outcome_data::OutcomeRecord;

/// Receiver side of the outbound outcome channel
pub trait OutcomeSink {
    fn publish(&mut self, record: OutcomeRecord);
}

/// Collects records in memory
impl OutcomeSink for Vec<OutcomeRecord> {
    fn publish(&mut self, record: OutcomeRecord) {
        self.push(record);
    }
}

/// Forwards records to another thread. A full or disconnected channel drops
/// the record.
impl OutcomeSink for Sender<OutcomeRecord> {
    fn publish(&mut self, record: OutcomeRecord) {
        match self.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => {
                log::warn!("[Notify] Outcome channel full, dropping {:?}", record.operation_type);
            }
            Err(TrySendError::Disconnected(_)) => {
                log::warn!("[Notify] Outcome receiver disconnected");
            }
        }
    }
}

/// Logs every record and keeps nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl OutcomeSink for LogSink {
    fn publish(&mut self, record: OutcomeRecord) {
        if record.success {
            log::info!(
                "[Notify] {:?} parent={:?} child={:?} direction={} removed={:?}",
                record.operation_type,
                record.parent_id,
                record.child_id,
                record.resolved_direction,
                record.removed
            );
        } else {
            log::warn!(
                "[Notify] {:?} parent={:?} child={:?} failed: {:?}",
                record.operation_type,
                record.parent_id,
                record.child_id,
                record.failure
            );
        }
    }
}

/// Bounded channel for handing outcomes to a consumer thread
pub fn channel_sink(capacity: usize) -> (Sender<OutcomeRecord>, Receiver<OutcomeRecord>) {
    crossbeam_channel::bounded(capacity.max(1))
}
