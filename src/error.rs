use crate::types::Slot;
use chrono::NaiveDate;

/// Reasons a booking request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("invalid booking request: {0}")]
    InvalidInput(String),

    #[error("{time} on {date} is already booked")]
    Conflict { date: NaiveDate, time: Slot },
}

/// Failures of a persistence backend. Never surfaced to booking callers.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored bookings are corrupted: {0}")]
    Corrupted(#[source] serde_json::Error),

    #[error("bookings can't be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
