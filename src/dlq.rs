use tracing::warn;

use crate::domain::{DeadLetterQueue, Error};

/// Logs every rejected request; nothing is retried.
#[derive(Default, Debug)]
pub struct LogDLQ {}

impl DeadLetterQueue for LogDLQ {
    fn report(&self, error: &Error) {
        warn!(retryable = error.is_retryable(), "DLQ Report - Error: {}", error);
    }
}
