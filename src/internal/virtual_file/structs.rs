pub mod file_window;
pub mod readable_stream;
pub mod segment_chunks;
pub mod virtual_file;
pub mod virtual_file_error;

pub use file_window::{FileWindow, SliceOutcome};
pub use readable_stream::ReadableStream;
pub use segment_chunks::SegmentChunks;
pub use virtual_file::{NewVirtualFileParams, VirtualFile};
pub use virtual_file_error::VirtualFileError;
