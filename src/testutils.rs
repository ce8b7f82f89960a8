use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use crate::{
    backend::BookingPersistence, configuration::Configuration, error::StorageError,
    session_storage::SessionStorage, types::Booking,
};

pub const TEST_PASSWORD: &str = "123";

/// Session storage that counts calls and can be told to fail writes.
pub struct CountingStorageInner {
    pub writes_succeed: AtomicBool,
    pub calls_to_load: AtomicU64,
    pub calls_to_save: AtomicU64,
    pub calls_to_clear: AtomicU64,
    pub storage: SessionStorage,
}

#[derive(Clone)]
pub struct CountingStorage(pub Arc<CountingStorageInner>);

impl CountingStorage {
    pub fn new() -> Self {
        Self(Arc::new(CountingStorageInner {
            writes_succeed: AtomicBool::new(true),
            calls_to_load: AtomicU64::default(),
            calls_to_save: AtomicU64::default(),
            calls_to_clear: AtomicU64::default(),
            storage: SessionStorage::default(),
        }))
    }

    fn write_result(&self) -> Result<(), StorageError> {
        match self.0.writes_succeed.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(StorageError::Unavailable("Supposed to fail".into())),
        }
    }
}

impl BookingPersistence for CountingStorage {
    fn load(&self) -> Result<Vec<Booking>, StorageError> {
        self.0.calls_to_load.fetch_add(1, Ordering::SeqCst);
        self.0.storage.load()
    }

    fn save(&self, bookings: &[Booking]) -> Result<(), StorageError> {
        self.0.calls_to_save.fetch_add(1, Ordering::SeqCst);
        self.write_result()?;
        self.0.storage.save(bookings)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.0.calls_to_clear.fetch_add(1, Ordering::SeqCst);
        self.write_result()?;
        self.0.storage.clear()
    }
}

#[derive(Clone)]
pub struct TestConfiguration;

impl Configuration for TestConfiguration {
    fn password(&self) -> String {
        TEST_PASSWORD.into()
    }

    fn port(&self) -> String {
        "0".into()
    }

    fn storage_path(&self) -> Option<std::path::PathBuf> {
        None
    }

    fn storage_key(&self) -> String {
        crate::backend::DEFAULT_STORAGE_KEY.into()
    }
}
