//! TCP cluster rewrite network filter configuration.
//!
//! The filter rewrites the upstream cluster name selected for a TCP connection:
//! the cluster name is matched against `cluster_pattern` and the match replaced
//! with `cluster_replacement`. This module only carries the configuration; the
//! matching itself happens in the proxy.
//!
//! Wire layout (`istio.envoy.config.filter.network.tcp_cluster_rewrite.v2alpha1`):
//!
//! | field                 | number | type   |
//! |-----------------------|--------|--------|
//! | `cluster_pattern`     | 1      | string |
//! | `cluster_replacement` | 2      | string |

use std::fmt;

use envoy_types::pb::envoy::config::listener::v3::{filter::ConfigType, Filter};
use envoy_types::pb::google::protobuf::Any;
use prost::Name;
use serde::{Deserialize, Serialize};

use crate::codec::{self, json_shim, proto_name};
use crate::errors::{Error, Result};
use crate::xds::filters::{any_from_message, unpack};

/// Protobuf package of the filter configuration.
pub const PACKAGE: &str = "istio.envoy.config.filter.network.tcp_cluster_rewrite.v2alpha1";

/// Type URL of [`TcpClusterRewrite`] when packed in an `Any`.
pub const TCP_CLUSTER_REWRITE_TYPE_URL: &str =
    "type.googleapis.com/istio.envoy.config.filter.network.tcp_cluster_rewrite.v2alpha1.TcpClusterRewrite";

/// Name the filter is registered under in the proxy.
pub const TCP_CLUSTER_REWRITE_FILTER_NAME: &str = "envoy.filters.network.tcp_cluster_rewrite";

/// Config for the TCP cluster rewrite filter.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TcpClusterRewrite {
    /// Regex pattern to be matched in the cluster name.
    #[prost(string, tag = "1")]
    #[serde(alias = "cluster_pattern", skip_serializing_if = "String::is_empty")]
    pub cluster_pattern: String,
    /// Replacement for the matched cluster pattern.
    #[prost(string, tag = "2")]
    #[serde(alias = "cluster_replacement", skip_serializing_if = "String::is_empty")]
    pub cluster_replacement: String,
}

proto_name!(PACKAGE; TcpClusterRewrite => "TcpClusterRewrite");

json_shim!(codec::MARSHALER, codec::UNMARSHALER; TcpClusterRewrite);

impl TcpClusterRewrite {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self { cluster_pattern: pattern.into(), cluster_replacement: replacement.into() }
    }

    /// Decode from the binary wire format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        codec::decode_message(bytes)
    }

    /// Encode to the binary wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode_message(self)
    }

    /// Pack as a typed config.
    pub fn to_any(&self) -> Any {
        any_from_message(self)
    }

    /// Unpack from a typed config; fails if the `Any` holds another type.
    pub fn from_any(any: &Any) -> Result<Self> {
        unpack(any)
    }

    /// Build the listener network filter entry carrying this config.
    pub fn to_network_filter(&self) -> Filter {
        Filter {
            name: TCP_CLUSTER_REWRITE_FILTER_NAME.to_string(),
            config_type: Some(ConfigType::TypedConfig(self.to_any())),
        }
    }

    /// Recover the config from a listener network filter entry.
    pub fn from_network_filter(filter: &Filter) -> Result<Self> {
        if filter.name != TCP_CLUSTER_REWRITE_FILTER_NAME {
            return Err(Error::decode(format!(
                "Filter '{}' is not a TCP cluster rewrite filter",
                filter.name
            )));
        }
        match &filter.config_type {
            Some(ConfigType::TypedConfig(any)) => Self::from_any(any),
            _ => Err(Error::decode("TCP cluster rewrite filter has no typed config")),
        }
    }
}

/// Null-safe reads of the rewrite rule.
///
/// An absent rule (`None`) reads as empty strings, the same as a rule whose
/// fields were never set.
pub trait ClusterRewriteRule {
    fn cluster_pattern(&self) -> &str;

    fn cluster_replacement(&self) -> &str;
}

impl ClusterRewriteRule for TcpClusterRewrite {
    fn cluster_pattern(&self) -> &str {
        &self.cluster_pattern
    }

    fn cluster_replacement(&self) -> &str {
        &self.cluster_replacement
    }
}

impl ClusterRewriteRule for Option<&TcpClusterRewrite> {
    fn cluster_pattern(&self) -> &str {
        self.map_or("", |rule| rule.cluster_pattern.as_str())
    }

    fn cluster_replacement(&self) -> &str {
        self.map_or("", |rule| rule.cluster_replacement.as_str())
    }
}

impl ClusterRewriteRule for Option<TcpClusterRewrite> {
    fn cluster_pattern(&self) -> &str {
        self.as_ref().map_or("", |rule| rule.cluster_pattern.as_str())
    }

    fn cluster_replacement(&self) -> &str {
        self.as_ref().map_or("", |rule| rule.cluster_replacement.as_str())
    }
}

/// Text rendering: set fields in declared order, `name:"value"` pairs.
impl fmt::Display for TcpClusterRewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for (name, value) in [
            ("cluster_pattern", &self.cluster_pattern),
            ("cluster_replacement", &self.cluster_replacement),
        ] {
            if !value.is_empty() {
                write!(f, "{}{}:{:?}", sep, name, value)?;
                sep = " ";
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::JsonShim;
    use prost::Message;

    const PATTERN: &str = "outbound|80||foo.default.svc.cluster.local";
    const REPLACEMENT: &str = "outbound|80||foo.internal";

    #[test]
    fn scenario_survives_binary_round_trip() {
        let rule = TcpClusterRewrite::new(PATTERN, REPLACEMENT);
        let decoded = TcpClusterRewrite::from_bytes(&rule.to_bytes()).unwrap();
        assert_eq!(decoded.cluster_pattern(), PATTERN);
        assert_eq!(decoded.cluster_replacement(), REPLACEMENT);
        assert_eq!(decoded, rule);
    }

    #[test]
    fn wire_layout_matches_schema() {
        let bytes = TcpClusterRewrite::new("ab", "c").to_bytes();
        assert_eq!(bytes, vec![0x0a, 2, b'a', b'b', 0x12, 1, b'c']);

        // unset fields are not written
        assert!(TcpClusterRewrite::default().to_bytes().is_empty());
        assert_eq!(TcpClusterRewrite::new("", "c").to_bytes(), vec![0x12, 1, b'c']);
    }

    #[test]
    fn absent_rule_reads_as_empty() {
        let absent: Option<&TcpClusterRewrite> = None;
        assert_eq!(absent.cluster_pattern(), "");
        assert_eq!(absent.cluster_replacement(), "");

        let owned: Option<TcpClusterRewrite> = None;
        assert_eq!(owned.cluster_pattern(), "");

        let present = TcpClusterRewrite::new("a", "b");
        assert_eq!(Some(&present).cluster_replacement(), "b");
    }

    #[test]
    fn truncated_payload_is_a_decode_error() {
        let bytes = TcpClusterRewrite::new(PATTERN, REPLACEMENT).to_bytes();
        let err = TcpClusterRewrite::from_bytes(&bytes[..bytes.len() - 3]).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let err = TcpClusterRewrite::from_bytes(&[0x0a, 2, 0xff, 0xfe]).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn unknown_binary_fields_are_skipped() {
        // field 3, varint 7, followed by field 1
        let bytes = [0x18, 7, 0x0a, 1, b'x'];
        let decoded = TcpClusterRewrite::decode(&bytes[..]).unwrap();
        assert_eq!(decoded.cluster_pattern(), "x");
    }

    #[test]
    fn display_lists_set_fields_in_order() {
        assert_eq!(
            TcpClusterRewrite::new("a.*", "b").to_string(),
            r#"cluster_pattern:"a.*" cluster_replacement:"b""#
        );
        assert_eq!(TcpClusterRewrite::new("", "b").to_string(), r#"cluster_replacement:"b""#);
        assert_eq!(TcpClusterRewrite::default().to_string(), "");
    }

    #[test]
    fn json_accepts_both_field_spellings_and_ignores_unknown_keys() {
        let snake = TcpClusterRewrite::unmarshal_json(
            br#"{"cluster_pattern":"a","cluster_replacement":"b","extra_field":1}"#,
        )
        .unwrap();
        let camel =
            TcpClusterRewrite::unmarshal_json(br#"{"clusterPattern":"a","clusterReplacement":"b"}"#)
                .unwrap();
        assert_eq!(snake, camel);
        assert_eq!(snake, TcpClusterRewrite::new("a", "b"));
    }

    #[test]
    fn json_output_uses_camel_case_and_omits_empty_fields() {
        let json = TcpClusterRewrite::new("a", "").marshal_json_string().unwrap();
        assert_eq!(json, r#"{"clusterPattern":"a"}"#);
    }

    #[test]
    fn name_and_type_url() {
        assert_eq!(TcpClusterRewrite::full_name(), format!("{}.TcpClusterRewrite", PACKAGE));
        assert_eq!(TcpClusterRewrite::type_url(), TCP_CLUSTER_REWRITE_TYPE_URL);
    }

    #[test]
    fn packs_into_network_filter() {
        let rule = TcpClusterRewrite::new(PATTERN, REPLACEMENT);
        let filter = rule.to_network_filter();
        assert_eq!(filter.name, TCP_CLUSTER_REWRITE_FILTER_NAME);

        match &filter.config_type {
            Some(ConfigType::TypedConfig(any)) => {
                assert_eq!(any.type_url, TCP_CLUSTER_REWRITE_TYPE_URL);
            }
            other => panic!("unexpected config type: {:?}", other),
        }
        assert_eq!(TcpClusterRewrite::from_network_filter(&filter).unwrap(), rule);
    }

    #[test]
    fn rejects_foreign_filters() {
        let filter = Filter { name: "envoy.filters.network.tcp_proxy".into(), config_type: None };
        assert!(TcpClusterRewrite::from_network_filter(&filter).is_err());

        let filter = Filter { name: TCP_CLUSTER_REWRITE_FILTER_NAME.into(), config_type: None };
        assert!(TcpClusterRewrite::from_network_filter(&filter).is_err());
    }
}
