use crate::{
    backend::BookingPersistence,
    error::BookingError,
    slot_generator,
    types::{BookedSlot, Booking, BookingRequest, Slot},
};
use chrono::{NaiveDate, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch::{self, Sender};
use tokio_stream::wrappers::WatchStream;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Booking list of one session, backed by a persistence port.
///
/// Clones share the same store. Every mutation runs load, check and save
/// while holding `write_lock`, so two submissions for the same slot can't
/// both commit.
pub struct ReservationStore<P: BookingPersistence> {
    inner: Arc<Inner<P>>,
}

struct Inner<P> {
    persistence: P,
    write_lock: Mutex<()>,
    sender: Sender<Vec<BookedSlot>>,
}

impl<P: BookingPersistence> Clone for ReservationStore<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P: BookingPersistence> ReservationStore<P> {
    pub fn new(persistence: P) -> Self {
        let (sender, _) = watch::channel(vec![]);
        let store = Self {
            inner: Arc::new(Inner {
                persistence,
                write_lock: Mutex::new(()),
                sender,
            }),
        };
        store.send_booked_slots(&store.load_bookings());
        store
    }

    /// Generated slots for `date` minus the ones already booked.
    pub fn available_slots(&self, date: NaiveDate) -> Vec<Slot> {
        let bookings = self.load_bookings();
        slot_generator::generate(date)
            .into_iter()
            .filter(|slot| !is_booked(&bookings, date, *slot))
            .collect()
    }

    pub fn submit(&self, request: &BookingRequest) -> Result<Booking, BookingError> {
        let (date, time) = parse_request(request).inspect_err(|err| {
            warn!(%err, ?request, "Booking rejected");
        })?;

        let _guard = self.lock();
        let mut bookings = self.load_bookings();
        if is_booked(&bookings, date, time) {
            let err = BookingError::Conflict { date, time };
            warn!(%err, "Booking rejected");
            return Err(err);
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            date,
            time,
            guests: request.guests,
            occasion: request.occasion.clone().unwrap_or_default(),
            created_at: Utc::now(),
        };
        bookings.push(booking.clone());

        match self.inner.persistence.save(&bookings) {
            Ok(()) => self.send_booked_slots(&bookings),
            Err(err) => {
                error!(?err, "Failed to save bookings, booking is kept for this response only");
                self.send_booked_slots(&self.load_bookings());
            }
        }

        info!(id = %booking.id, %date, %time, guests = booking.guests, "Booking successful");
        Ok(booking)
    }

    /// `submit` reduced to whether the booking was committed.
    pub fn try_submit(&self, request: &BookingRequest) -> bool {
        self.submit(request).is_ok()
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.load_bookings()
    }

    pub fn clear(&self) {
        let _guard = self.lock();
        if let Err(err) = self.inner.persistence.clear() {
            error!(?err, "Failed to clear bookings");
        }
        self.send_booked_slots(&[]);
    }

    /// Stream of occupied slots, starting with the current ones.
    pub fn subscribe(&self) -> WatchStream<Vec<BookedSlot>> {
        WatchStream::new(self.inner.sender.subscribe())
    }

    fn load_bookings(&self) -> Vec<Booking> {
        self.inner.persistence.load().unwrap_or_else(|err| {
            error!(?err, "Failed to read bookings, treating store as empty");
            vec![]
        })
    }

    fn send_booked_slots(&self, bookings: &[Booking]) {
        let booked_slots = bookings.iter().map(Booking::booked_slot).collect();
        self.inner.sender.send_replace(booked_slots);
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.inner
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn is_booked(bookings: &[Booking], date: NaiveDate, time: Slot) -> bool {
    bookings
        .iter()
        .any(|booking| booking.date == date && booking.time == time)
}

fn parse_request(request: &BookingRequest) -> Result<(NaiveDate, Slot), BookingError> {
    request
        .validate()
        .map_err(|err| BookingError::InvalidInput(err.to_string()))?;

    let date = NaiveDate::parse_from_str(request.date.trim(), "%Y-%m-%d").map_err(|err| {
        BookingError::InvalidInput(format!("date '{}' is not YYYY-MM-DD: {err}", request.date))
    })?;
    let time = request.time.trim().parse().map_err(BookingError::InvalidInput)?;
    Ok((date, time))
}
