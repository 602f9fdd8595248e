//! Storage infrastructure adapters
//!
//! Filesystem-backed implementations of the two persistence ports: a
//! JSON-document metadata index and a versioned blob container directory.

mod blob_dir;
mod json_index;

pub use blob_dir::{DirBlobStore, SCHEMA_VERSION};
pub use json_index::JsonFileIndex;

use crate::application::ports::StorageError;

/// Map filesystem errors onto the storage taxonomy
pub(crate) fn map_io_error(err: std::io::Error) -> StorageError {
    use std::io::ErrorKind;

    match err.kind() {
        ErrorKind::StorageFull | ErrorKind::QuotaExceeded => StorageError::QuotaExceeded,
        ErrorKind::NotFound | ErrorKind::PermissionDenied => {
            StorageError::Unavailable(err.to_string())
        }
        _ => StorageError::Io(err.to_string()),
    }
}
