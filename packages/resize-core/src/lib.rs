pub mod constants;
pub mod errors;
pub mod pipeline;
pub mod storage;
pub mod transform;
pub mod validation;

// 公開API
pub use constants::{MAX_DIMENSION, MAX_INPUT_SIZE, MAX_KEY_LENGTH, MAX_PIXELS, OUTPUT_QUALITY};
pub use errors::{ErrorKind, MediaError, StorageError, TransformError, ValidationError};
pub use pipeline::{run, ResizeOutcome};
pub use storage::{MemoryStore, ObjectLocation, ObjectStore, StorageProxyClient};
pub use transform::{
    calculate_target_dimensions, decode_image, encode_image, resample_image, resize,
    validate_output_dimensions, EncodedImage, OutputFormat,
};
pub use validation::{
    validate_bucket, validate_key, validate_request, Measurement, ResizeJob, ResizeRequest,
};
