pub mod parse_nzb;

pub use parse_nzb::parse_nzb;
