pub mod decode_error;
pub mod decoded_segment;
pub mod yenc_decoder;

pub use decode_error::DecodeError;
pub use decoded_segment::{DecodedSegment, SegmentMetadata};
pub use yenc_decoder::YencDecoder;
