pub mod fetch_error;
pub mod nntp_config;
pub mod nntp_session;

pub use fetch_error::FetchError;
pub use nntp_config::NntpConfig;
pub use nntp_session::NntpSession;
