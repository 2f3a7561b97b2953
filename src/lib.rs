//! # meshapi
//!
//! Hand-written protobuf records for a handful of service-mesh APIs, with
//! byte-exact binary wire encoding (`prost`) and protobuf-JSON text encoding
//! (`serde`).
//!
//! ## Records
//!
//! - [`xds::filters::network::TcpClusterRewrite`]: config of the TCP cluster
//!   rewrite network filter, with null-safe accessors through
//!   [`ClusterRewriteRule`](xds::ClusterRewriteRule)
//! - [`networking::v1alpha3::DestinationRule`] and its traffic-policy family
//! - [`networking::v1alpha3::WorkloadEntry`], aliased as
//!   [`networking::v1::WorkloadEntry`]
//!
//! ## Example Usage
//!
//! ```rust
//! use meshapi::codec::JsonShim;
//! use meshapi::xds::{ClusterRewriteRule, TcpClusterRewrite};
//!
//! let rule = TcpClusterRewrite::unmarshal_json(
//!     br#"{"cluster_pattern":"outbound|80||foo","cluster_replacement":"foo.internal"}"#,
//! )?;
//! let decoded = TcpClusterRewrite::from_bytes(&rule.to_bytes())?;
//! assert_eq!(decoded.cluster_replacement(), "foo.internal");
//! # Ok::<(), meshapi::Error>(())
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod errors;
pub mod networking;
pub mod observability;
pub mod types;
pub mod xds;

// Re-export commonly used types and traits
pub use config::Config;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
