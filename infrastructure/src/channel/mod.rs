//! Endorsement channel adapters
//!
//! Implementations of the [`EndorsementChannel`](confirm_application::EndorsementChannel)
//! port:
//!
//! - [`StaticEndorsementChannel`] — scripted in-process peers
//! - `HttpEndorsementChannel` — peers reached over HTTP (feature `http-channel`)

#[cfg(feature = "http-channel")]
mod http_channel;
mod static_channel;

#[cfg(feature = "http-channel")]
pub use http_channel::{DEFAULT_REQUEST_TIMEOUT, HttpEndorsementChannel};
pub use static_channel::StaticEndorsementChannel;
