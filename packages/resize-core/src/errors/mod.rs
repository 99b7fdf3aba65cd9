mod types;

pub use types::{ErrorKind, MediaError, StorageError, TransformError, ValidationError};
