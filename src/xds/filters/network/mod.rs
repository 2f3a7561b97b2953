//! Envoy network (L4) filter configurations.

pub mod tcp_cluster_rewrite;

pub use tcp_cluster_rewrite::{ClusterRewriteRule, TcpClusterRewrite};
