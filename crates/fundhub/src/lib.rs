//! # fundhub
//!
//! Async data-access client for the fund administration back office:
//! - One transport path for every endpoint (interceptors, timeout, unwrapping)
//! - Uniform classification of failures into six kinds
//! - User-facing notification of every failure through an injected notifier
//! - Multipart spreadsheet uploads and binary exports
//! - Typed query parameters for the NAV, position, strategy, trade,
//!   transaction, project holding and stage performance endpoints
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fundhub::{Client, types::NavListParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("http://localhost:8001")?;
//!
//!     let page = client
//!         .nav()
//!         .list(&NavListParams::fund("SX1234").page(1, 50))
//!         .await?;
//!
//!     println!("{}", page["total"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! ```rust,no_run
//! use fundhub::{Client, ErrorKind};
//!
//! # async fn example(client: Client) {
//! match client.nav().latest("SX1234").await {
//!     Ok(nav) => println!("{nav}"),
//!     Err(e) if e.kind() == Some(ErrorKind::NotFound) => println!("no NAV yet"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::time::Duration;

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use download::{DirectorySink, DownloadSink};
pub use error::{Error, ErrorEnvelope, ErrorKind, Result, TransportFailure};
pub use http::{BlobResponse, FilePart, Payload, RequestDescriptor, UploadOptions, UploadPayload};
pub use notify::{
    ChannelNotifier, DEFAULT_NOTIFICATION_CAPACITY, Notification, Notifier, NoopNotifier, Severity,
    TracingNotifier,
};

// Core modules
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod notify;
pub mod observability;
pub mod resources;
pub mod types;

pub use serde_json::Value as JsonValue;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use fundhub::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BlobResponse, Client, ClientConfig, Error, ErrorKind, FilePart, Result, UploadOptions,
        UploadPayload,
        http::RequestDescriptor,
        notify::{Notifier, Severity},
        types::*,
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG`
/// (default `fundhub=info`).
///
/// Does nothing if a global subscriber is already set.
#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fundhub=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
