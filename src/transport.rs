//! [`RulerTransport`](crate::traits::RulerTransport) implementations.
//!
//! | Module | Feature | Backend |
//! |--------|---------|---------|
//! | `http` | `transport-reqwest` | [reqwest](https://docs.rs/reqwest) |
//!
//! Wrap any transport in [`InstrumentedTransport`](crate::reliability::InstrumentedTransport)
//! to record request metrics.

#[cfg(feature = "transport-reqwest")]
pub(crate) mod remote_common;

#[cfg(feature = "transport-reqwest")]
pub mod http;

#[cfg(feature = "transport-reqwest")]
pub use http::HttpTransport;
