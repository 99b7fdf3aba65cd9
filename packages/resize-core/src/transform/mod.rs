pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod engine;
pub mod format;
pub mod resample;

pub use decode::decode_image;
pub use dimensions::{calculate_target_dimensions, validate_output_dimensions};
pub use encode::encode_image;
pub use engine::{resize, EncodedImage};
pub use format::OutputFormat;
pub use resample::resample_image;
