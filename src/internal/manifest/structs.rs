pub mod manifest_entry;
pub mod manifest_error;
pub mod segment;

pub use manifest_entry::ManifestEntry;
pub use manifest_error::ManifestError;
pub use segment::Segment;
