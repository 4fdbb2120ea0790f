pub mod impl_raw_nzb;
pub mod raw_nzb;

pub use impl_raw_nzb::ToManifestEntries;
pub use raw_nzb::*;
