pub mod key;
pub mod request;

pub use key::{validate_bucket, validate_key};
pub use request::{validate_request, Measurement, ResizeJob, ResizeRequest};
