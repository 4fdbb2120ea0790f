pub mod segment_decoder;

pub use segment_decoder::SegmentDecoder;
