//! Protobuf-JSON mapping of the traffic-policy family.

use meshapi::codec::JsonShim;
use meshapi::networking::v1::{self, load_balancer_settings};
use meshapi::networking::v1alpha3::connection_pool_settings::http_settings::H2UpgradePolicy;
use meshapi::networking::v1alpha3::load_balancer_settings::persistent_session::SessionKey;
use meshapi::networking::v1alpha3::{
    DestinationRule, LoadBalancerSettings, LocalityLoadBalancerSetting, PersistentCookie,
    TrafficPolicy,
};
use meshapi::networking::v1alpha3::connection_pool_settings::HttpSettings;
use prost::Message;
use serde_json::{json, Value};

const RULE: &str = r#"{
  "host": "ratings.prod.svc.cluster.local",
  "exportTo": ["."],
  "workloadSelector": {"matchLabels": {"app": "ratings"}},
  "trafficPolicy": {
    "loadBalancer": {
      "simple": "LEAST_REQUEST",
      "warmupDurationSecs": "60s",
      "localityLbSetting": {
        "distribute": [{"from": "us-west/zone1/*", "to": {"us-west/zone1/*": 80, "us-west/zone2/*": 20}}],
        "failoverPriority": ["topology.kubernetes.io/region"]
      }
    },
    "connectionPool": {
      "tcp": {"maxConnections": 100, "tcpKeepalive": {"time": "7200s", "interval": "75s"}},
      "http": {"http2MaxRequests": 1000, "h2UpgradePolicy": "UPGRADE", "idleTimeout": "1.500s"}
    },
    "outlierDetection": {"consecutive5xxErrors": 7, "interval": "5m0s"},
    "tls": {"mode": "SIMPLE", "sni": "ratings.example.com", "subjectAltNames": ["ratings"]},
    "portLevelSettings": [
      {"port": {"number": 80}, "loadBalancer": {"simple": "ROUND_ROBIN"}}
    ],
    "tunnel": {"protocol": "CONNECT", "targetHost": "ratings.internal", "targetPort": 8443}
  },
  "subsets": [
    {"name": "testversion", "labels": {"version": "v3"},
     "trafficPolicy": {"loadBalancer": {"consistentHash": {"httpQueryParameterName": "user", "maglev": {"tableSize": "65537"}}}}}
  ]
}"#;

fn without_outlier_interval(text: &str) -> String {
    // "5m0s" is not a protobuf-JSON duration
    text.replace(r#", "interval": "5m0s""#, "")
}

#[test]
fn full_rule_round_trips_through_json_and_binary() {
    let rule = DestinationRule::unmarshal_json(without_outlier_interval(RULE).as_bytes()).unwrap();

    let json_again = DestinationRule::unmarshal_json(&rule.marshal_json().unwrap()).unwrap();
    assert_eq!(json_again, rule);

    let binary_again = DestinationRule::decode(rule.encode_to_vec().as_slice()).unwrap();
    assert_eq!(binary_again, rule);
}

#[test]
fn output_matches_input_modulo_ordering() {
    let input: Value = serde_json::from_str(&without_outlier_interval(RULE)).unwrap();
    let rule = DestinationRule::unmarshal_json(input.to_string().as_bytes()).unwrap();
    let output: Value = serde_json::from_slice(&rule.marshal_json().unwrap()).unwrap();
    assert_eq!(output, input);
}

#[test]
fn non_protobuf_duration_is_rejected() {
    assert!(DestinationRule::unmarshal_json(RULE.as_bytes()).is_err());
}

#[test]
fn typed_accessors_read_decoded_values() {
    let rule = DestinationRule::unmarshal_json(without_outlier_interval(RULE).as_bytes()).unwrap();
    let policy = rule.traffic_policy.as_ref().unwrap();

    let http = policy.connection_pool.as_ref().and_then(|p| p.http.as_ref()).unwrap();
    assert_eq!(http.h2_upgrade_policy(), H2UpgradePolicy::Upgrade);

    let port80 = policy.port_policy(80).unwrap();
    let simple = port80.load_balancer.as_ref().and_then(|lb| lb.lb_policy.as_ref()).and_then(|p| p.simple());
    assert_eq!(simple, Some(load_balancer_settings::SimpleLb::RoundRobin));

    let locality = policy
        .load_balancer
        .as_ref()
        .and_then(|lb| lb.locality_lb_setting.as_ref())
        .unwrap();
    assert!(locality.is_enabled());
    assert_eq!(locality.distribute[0].to.get("us-west/zone2/*"), Some(&20));

    let selector = rule.workload_selector.as_ref().unwrap();
    let labels = [("app".to_string(), "ratings".to_string())].into_iter().collect();
    assert!(selector.matches(&labels));

    assert!(rule.subset("testversion").is_some());
}

#[test]
fn zero_values_are_omitted_and_wrappers_kept() {
    let settings = LocalityLoadBalancerSetting { enabled: Some(false), ..Default::default() };
    assert_eq!(settings.marshal_json_string().unwrap(), r#"{"enabled":false}"#);

    assert_eq!(HttpSettings::default().marshal_json_string().unwrap(), "{}");
    assert_eq!(TrafficPolicy::default().marshal_json_string().unwrap(), "{}");
}

#[test]
fn persistent_session_cookie() {
    let lb = LoadBalancerSettings {
        persistent_session: Some(load_balancer_settings::PersistentSession {
            session_key: Some(SessionKey::Cookie(PersistentCookie {
                name: "session".into(),
                ttl: Some(prost_types::Duration { seconds: 3600, nanos: 0 }),
                ..Default::default()
            })),
        }),
        ..Default::default()
    };
    let value: Value = serde_json::from_slice(&lb.marshal_json().unwrap()).unwrap();
    assert_eq!(value, json!({"persistentSession": {"cookie": {"name": "session", "ttl": "3600s"}}}));
    assert_eq!(LoadBalancerSettings::unmarshal_json(value.to_string().as_bytes()).unwrap(), lb);
}

#[test]
fn stable_alias_decodes_the_same_payload() {
    let stable = v1::DestinationRule::unmarshal_json(br#"{"host":"a","subsets":[{"name":"v1"}]}"#).unwrap();
    let versioned = DestinationRule::unmarshal_json(br#"{"host":"a","subsets":[{"name":"v1"}]}"#).unwrap();
    assert_eq!(stable, versioned);
}

#[test]
fn concurrent_use_of_shared_codecs() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let rule = DestinationRule { host: format!("svc-{}", i), ..Default::default() };
                let bytes = rule.marshal_json().unwrap();
                DestinationRule::unmarshal_json(&bytes).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().host, format!("svc-{}", i));
    }
}
