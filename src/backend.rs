use crate::{error::StorageError, types::Booking};

pub const DEFAULT_STORAGE_KEY: &str = "littleLemonBookings";

/// Where the booking list lives between requests.
///
/// `load` returns bookings in insertion order and `save` replaces the whole
/// list. The reservation store serialises calls, so implementations don't
/// need their own check-then-write atomicity.
#[cfg_attr(test, mockall::automock)]
pub trait BookingPersistence: Send + Sync + 'static {
    fn load(&self) -> Result<Vec<Booking>, StorageError>;
    fn save(&self, bookings: &[Booking]) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}
