pub mod select_segments;

pub use select_segments::{RequiredSegment, select_segments};
