use crate::{
    backend::{BookingPersistence, DEFAULT_STORAGE_KEY},
    error::StorageError,
    types::Booking,
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// In-process key-value storage holding JSON strings, scoped to one session.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    key: String,
}

impl Default for SessionStorage {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_KEY)
    }
}

impl SessionStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            items: Arc::default(),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw value stored under `key`, bypassing booking encoding.
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: impl Into<String>) {
        self.items().insert(key.to_owned(), value.into());
    }

    pub fn remove_item(&self, key: &str) {
        self.items().remove(key);
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BookingPersistence for SessionStorage {
    fn load(&self) -> Result<Vec<Booking>, StorageError> {
        match self.get_item(&self.key) {
            Some(stored) => serde_json::from_str(&stored).map_err(StorageError::Corrupted),
            None => Ok(vec![]),
        }
    }

    fn save(&self, bookings: &[Booking]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(bookings).map_err(StorageError::Encode)?;
        self.set_item(&self.key, encoded);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.remove_item(&self.key);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn booking(day: u32, time: &str) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 12, day).unwrap(),
            time: time.parse().unwrap(),
            guests: 2,
            occasion: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_storage_loads_nothing() {
        let storage = SessionStorage::default();
        assert_eq!(storage.key(), DEFAULT_STORAGE_KEY);
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_clear() {
        let storage = SessionStorage::default();
        let bookings = vec![booking(24, "19:00"), booking(25, "18:00")];

        storage.save(&bookings).unwrap();
        assert_eq!(storage.load().unwrap(), bookings);

        let raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"2025-12-25\""));

        storage.clear().unwrap();
        assert!(storage.get_item(DEFAULT_STORAGE_KEY).is_none());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_clones_share_items() {
        let storage = SessionStorage::new("bookings");
        let clone = storage.clone();

        storage.save(&[booking(1, "17:00")]).unwrap();
        assert_eq!(clone.load().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupted_value_is_reported() {
        let storage = SessionStorage::default();
        storage.set_item(DEFAULT_STORAGE_KEY, "{not json");

        let err = storage.load().unwrap_err();
        assert!(matches!(err, StorageError::Corrupted(_)));
    }

    #[test]
    fn test_other_keys_are_untouched() {
        let storage = SessionStorage::default();
        storage.set_item("theme", "dark");
        storage.save(&[booking(2, "20:30")]).unwrap();
        storage.clear().unwrap();

        assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
    }
}
