use crate::{backend::BookingPersistence, error::StorageError, types::Booking};
use std::{
    collections::BTreeMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::warn;

type Document = BTreeMap<String, Vec<Booking>>;

/// JSON file mapping storage keys to booking lists.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    key: String,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Document, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Document::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(StorageError::Corrupted),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces the file through a sibling temporary file and a rename.
    fn write_document(&self, document: &Document) -> Result<(), StorageError> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let encoded = serde_json::to_vec_pretty(document).map_err(StorageError::Encode)?;

        let mut file = NamedTempFile::new_in(directory)?;
        file.write_all(&encoded)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    /// Current document for a rewrite. Only a corrupted document is
    /// replaced; io failures leave the file untouched.
    fn existing_document(&self) -> Result<Document, StorageError> {
        match self.read_document() {
            Err(StorageError::Corrupted(err)) => {
                warn!(?err, path = %self.path.display(), "Discarding corrupted booking file");
                Ok(Document::new())
            }
            result => result,
        }
    }
}

impl BookingPersistence for FileStorage {
    fn load(&self) -> Result<Vec<Booking>, StorageError> {
        let mut document = self.read_document()?;
        Ok(document.remove(&self.key).unwrap_or_default())
    }

    fn save(&self, bookings: &[Booking]) -> Result<(), StorageError> {
        let mut document = self.existing_document()?;
        document.insert(self.key.clone(), bookings.to_vec());
        self.write_document(&document)
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut document = self.existing_document()?;
        if document.remove(&self.key).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_document(&document)
    }
}
