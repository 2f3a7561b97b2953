//! Wire and JSON behaviour of the TCP cluster rewrite filter config.

use meshapi::codec::JsonShim;
use meshapi::xds::filters::network::tcp_cluster_rewrite::TCP_CLUSTER_REWRITE_TYPE_URL;
use meshapi::xds::{ClusterRewriteRule, TcpClusterRewrite, TypedConfig};
use meshapi::Error;
use proptest::prelude::*;

proptest! {
    #[test]
    fn binary_round_trip_preserves_fields(pattern in ".*", replacement in ".*") {
        let rule = TcpClusterRewrite::new(pattern.clone(), replacement.clone());
        let decoded = TcpClusterRewrite::from_bytes(&rule.to_bytes()).unwrap();
        prop_assert_eq!(decoded.cluster_pattern(), pattern.as_str());
        prop_assert_eq!(decoded.cluster_replacement(), replacement.as_str());
    }

    #[test]
    fn json_round_trip_preserves_fields(pattern in "\\PC*", replacement in "\\PC*") {
        let rule = TcpClusterRewrite::new(pattern, replacement);
        let decoded = TcpClusterRewrite::unmarshal_json(&rule.marshal_json().unwrap()).unwrap();
        prop_assert_eq!(decoded, rule);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        match TcpClusterRewrite::from_bytes(&bytes) {
            Ok(_) => {}
            Err(err) => prop_assert!(err.is_decode()),
        }
    }
}

#[test]
fn scenario_encoding_is_byte_exact() {
    let pattern = "outbound|80||foo.default.svc.cluster.local";
    let replacement = "outbound|80||foo.internal";
    let bytes = TcpClusterRewrite::new(pattern, replacement).to_bytes();

    let mut expected = vec![0x0a, pattern.len() as u8];
    expected.extend_from_slice(pattern.as_bytes());
    expected.extend_from_slice(&[0x12, replacement.len() as u8]);
    expected.extend_from_slice(replacement.as_bytes());
    assert_eq!(bytes, expected);
}

#[test]
fn wrong_wire_type_is_rejected() {
    // field 1 declared as varint instead of length-delimited
    let err = TcpClusterRewrite::from_bytes(&[0x08, 0x01]).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn typed_config_json_round_trip() {
    let rule = TcpClusterRewrite::new("^(.*)\\.local$", "$1.internal");
    let typed = TypedConfig::from_message(&rule);
    assert_eq!(typed.type_url, TCP_CLUSTER_REWRITE_TYPE_URL);

    let json = serde_json::to_string(&typed).unwrap();
    let back: TypedConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_message::<TcpClusterRewrite>().unwrap(), rule);
    assert_eq!(TcpClusterRewrite::from_any(&back.to_any()).unwrap(), rule);
}

#[test]
fn foreign_any_is_rejected() {
    let mut any = TcpClusterRewrite::new("a", "b").to_any();
    any.type_url = "type.googleapis.com/istio.networking.v1alpha3.WorkloadEntry".into();
    let err = TcpClusterRewrite::from_any(&any).unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn malformed_json_is_rejected() {
    assert!(TcpClusterRewrite::unmarshal_json(b"{\"clusterPattern\":").is_err());
    assert!(TcpClusterRewrite::unmarshal_json(b"{\"clusterPattern\":7}").is_err());
}
