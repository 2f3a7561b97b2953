//! Envoy data-plane configuration carried by this crate.
//!
//! Filter configs are packed into `google.protobuf.Any` and attached to
//! listener filter chains by name; see [`filters`].

pub mod filters;

pub use filters::network::{ClusterRewriteRule, TcpClusterRewrite};
pub use filters::{any_from_message, unpack, TypedConfig};
