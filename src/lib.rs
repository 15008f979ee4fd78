//! Async client for ruler-compatible alerting rule APIs.
//!
//! A "ruler" manages alerting and recording rule groups organised into
//! namespaces. Several backends speak roughly the same API but disagree on URL
//! layout, query parameters and how they report missing resources. This crate
//! hides those differences:
//!
//! - **[`RulerUrlBuilder`](url_builder::RulerUrlBuilder)** produces the correct
//!   paths and query parameters for a data source's
//!   [`RulerDialect`](api::RulerDialect).
//! - **[`RulerClient`](client::RulerClient)** issues reads, writes and deletes
//!   through a [`RulerTransport`](traits::RulerTransport) and normalizes
//!   failures: "does not exist" responses become empty results, and responses
//!   showing that the data source has no ruler at all are rewritten to carry
//!   [`RULER_NOT_SUPPORTED_MSG`](error::RULER_NOT_SUPPORTED_MSG).
//! - **[`HttpTransport`](transport::HttpTransport)** (feature
//!   `transport-reqwest`, on by default) is the bundled reqwest transport.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use ruler_client::api::{HttpTransportConfig, RulerDataSourceConfig, RulerDialect};
//! use ruler_client::client::RulerClient;
//! # #[cfg(feature = "transport-reqwest")]
//! use ruler_client::transport::HttpTransport;
//!
//! # #[cfg(feature = "transport-reqwest")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(&HttpTransportConfig::new("http://localhost:3000"))?;
//! let client = RulerClient::new(transport);
//!
//! let mimir = RulerDataSourceConfig::new("mimir", RulerDialect::Config);
//! match client.fetch_all(&mimir, None).await {
//!     Ok(rules) => println!("{} namespaces", rules.len()),
//!     Err(e) if e.is_ruler_not_supported() => println!("no ruler on this data source"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod classify;
pub mod client;
pub mod error;
pub mod reliability;
pub mod traits;
pub mod transport;
pub mod url_builder;

#[cfg(test)]
mod mock;
