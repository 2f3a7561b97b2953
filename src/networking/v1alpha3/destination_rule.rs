//! Destination rules: policies applied to traffic for a service after routing
//! has occurred.
//!
//! A [`DestinationRule`] names a host, an optional [`TrafficPolicy`] and a set
//! of named [`Subset`]s. The traffic policy bundles load balancing, connection
//! pool sizing, outlier detection and client TLS settings, and can be overridden
//! per port.
//!
//! Every record in this file forwards its JSON encode/decode to the
//! [`DESTINATION_RULE_MARSHALER`] / [`DESTINATION_RULE_UNMARSHALER`] pair.

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};

use super::{PortSelector, PACKAGE};
use crate::codec::wkt::{is_default, oneof};
use crate::codec::{json_shim, proto_name, JsonMarshaler, JsonUnmarshaler};
use crate::types::v1beta1::WorkloadSelector;

pub use self::client_tls_settings::TlsMode;
pub use self::load_balancer_settings::SimpleLb;

/// Marshaler shared by every destination-rule record.
pub static DESTINATION_RULE_MARSHALER: JsonMarshaler = JsonMarshaler::new();

/// Unmarshaler shared by every destination-rule record; unknown keys are ignored.
pub static DESTINATION_RULE_UNMARSHALER: JsonUnmarshaler = JsonUnmarshaler::new();

/// Policies that apply to traffic intended for a service after routing.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DestinationRule {
    /// The name of a service from the service registry.
    #[prost(string, tag = "1")]
    #[serde(skip_serializing_if = "is_default")]
    pub host: String,
    /// Traffic policies to apply (load balancing policy, connection pool
    /// sizes, outlier detection).
    #[prost(message, optional, tag = "2")]
    #[serde(alias = "traffic_policy", skip_serializing_if = "Option::is_none")]
    pub traffic_policy: Option<TrafficPolicy>,
    /// One or more named sets that represent individual versions of a service.
    #[prost(message, repeated, tag = "3")]
    #[serde(skip_serializing_if = "is_default")]
    pub subsets: Vec<Subset>,
    /// Namespaces to which this destination rule is exported.
    #[prost(string, repeated, tag = "4")]
    #[serde(alias = "export_to", skip_serializing_if = "is_default")]
    pub export_to: Vec<String>,
    /// Workloads this rule applies to; all workloads when unset.
    #[prost(message, optional, tag = "5")]
    #[serde(alias = "workload_selector", skip_serializing_if = "Option::is_none")]
    pub workload_selector: Option<WorkloadSelector>,
}

impl DestinationRule {
    /// Look up a subset by name.
    pub fn subset(&self, name: &str) -> Option<&Subset> {
        self.subsets.iter().find(|subset| subset.name == name)
    }
}

/// Traffic policies to apply for a specific destination, across all
/// destination ports.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrafficPolicy {
    /// Settings controlling the load balancer algorithms.
    #[prost(message, optional, tag = "1")]
    #[serde(alias = "load_balancer", skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<LoadBalancerSettings>,
    /// Settings controlling the volume of connections to an upstream service.
    #[prost(message, optional, tag = "2")]
    #[serde(alias = "connection_pool", skip_serializing_if = "Option::is_none")]
    pub connection_pool: Option<ConnectionPoolSettings>,
    /// Settings controlling eviction of unhealthy hosts from the pool.
    #[prost(message, optional, tag = "3")]
    #[serde(alias = "outlier_detection", skip_serializing_if = "Option::is_none")]
    pub outlier_detection: Option<OutlierDetection>,
    /// TLS related settings for connections to the upstream service.
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<ClientTlsSettings>,
    /// Traffic policies specific to individual ports. Port-level settings
    /// override the destination-level settings.
    #[prost(message, repeated, tag = "5")]
    #[serde(alias = "port_level_settings", skip_serializing_if = "is_default")]
    pub port_level_settings: Vec<traffic_policy::PortTrafficPolicy>,
    /// Configuration of tunneling TCP over other transport or application
    /// layers for the host.
    #[prost(message, optional, tag = "6")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tunnel: Option<traffic_policy::TunnelSettings>,
}

impl TrafficPolicy {
    /// Port-level override for `port`, if one is configured.
    pub fn port_policy(&self, port: u32) -> Option<&traffic_policy::PortTrafficPolicy> {
        self.port_level_settings
            .iter()
            .find(|policy| policy.port.is_some_and(|selector| selector.number == port))
    }
}

/// Nested message types in `TrafficPolicy`.
pub mod traffic_policy {
    use serde::{Deserialize, Serialize};

    use super::{
        ClientTlsSettings, ConnectionPoolSettings, LoadBalancerSettings, OutlierDetection,
        PortSelector,
    };
    use crate::codec::wkt::is_default;

    /// Traffic policies that apply to a specific port of the service.
    #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct PortTrafficPolicy {
        /// Specifies the number of a port on the destination service on which
        /// this policy is being applied.
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub port: Option<PortSelector>,
        #[prost(message, optional, tag = "2")]
        #[serde(alias = "load_balancer", skip_serializing_if = "Option::is_none")]
        pub load_balancer: Option<LoadBalancerSettings>,
        #[prost(message, optional, tag = "3")]
        #[serde(alias = "connection_pool", skip_serializing_if = "Option::is_none")]
        pub connection_pool: Option<ConnectionPoolSettings>,
        #[prost(message, optional, tag = "4")]
        #[serde(alias = "outlier_detection", skip_serializing_if = "Option::is_none")]
        pub outlier_detection: Option<OutlierDetection>,
        #[prost(message, optional, tag = "5")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub tls: Option<ClientTlsSettings>,
    }

    #[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct TunnelSettings {
        /// Application layer protocol used to tunnel TCP traffic: `CONNECT` or
        /// `POST`.
        #[prost(string, tag = "1")]
        #[serde(skip_serializing_if = "is_default")]
        pub protocol: String,
        /// Host the proxy is asked to open a tunnel to.
        #[prost(string, tag = "2")]
        #[serde(alias = "target_host", skip_serializing_if = "is_default")]
        pub target_host: String,
        /// Port the proxy is asked to open a tunnel to.
        #[prost(uint32, tag = "3")]
        #[serde(
            alias = "target_port",
            deserialize_with = "crate::codec::wkt::number::deserialize",
            skip_serializing_if = "is_default"
        )]
        pub target_port: u32,
    }
}

/// A subset of endpoints of a service, typically one version.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Subset {
    /// Name of the subset.
    #[prost(string, tag = "1")]
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    /// Labels applied as a filter on the endpoints of the service.
    #[prost(btree_map = "string, string", tag = "2")]
    #[serde(skip_serializing_if = "is_default")]
    pub labels: BTreeMap<String, String>,
    /// Traffic policies that apply to this subset. Subsets inherit the
    /// destination-level policies; settings here override them.
    #[prost(message, optional, tag = "3")]
    #[serde(alias = "traffic_policy", skip_serializing_if = "Option::is_none")]
    pub traffic_policy: Option<TrafficPolicy>,
}

/// Load balancing policy for a destination.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerSettings {
    /// Locality load balancer settings; overrides the mesh-wide settings.
    #[prost(message, optional, tag = "3")]
    #[serde(alias = "locality_lb_setting", skip_serializing_if = "Option::is_none")]
    pub locality_lb_setting: Option<LocalityLoadBalancerSetting>,
    /// Slow-start window during which a newly added host receives
    /// proportionally less traffic.
    #[prost(message, optional, tag = "4")]
    #[serde(
        alias = "warmup_duration_secs",
        with = "crate::codec::wkt::duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub warmup_duration_secs: Option<::prost_types::Duration>,
    /// Session affinity kept through a cookie or header.
    #[prost(message, optional, tag = "5")]
    #[serde(alias = "persistent_session", skip_serializing_if = "Option::is_none")]
    pub persistent_session: Option<load_balancer_settings::PersistentSession>,
    /// Upstream load balancing policy.
    #[prost(oneof = "load_balancer_settings::LbPolicy", tags = "1, 2")]
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub lb_policy: Option<load_balancer_settings::LbPolicy>,
}

/// JSON input form of [`LoadBalancerSettings`], one field per `lbPolicy` member.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LoadBalancerSettingsFields {
    #[serde(alias = "locality_lb_setting")]
    locality_lb_setting: Option<LocalityLoadBalancerSetting>,
    #[serde(
        alias = "warmup_duration_secs",
        deserialize_with = "crate::codec::wkt::duration::deserialize"
    )]
    warmup_duration_secs: Option<::prost_types::Duration>,
    #[serde(alias = "persistent_session")]
    persistent_session: Option<load_balancer_settings::PersistentSession>,
    #[serde(
        deserialize_with = "crate::codec::wkt::enumeration::deserialize_option::<SimpleLb, _>"
    )]
    simple: Option<i32>,
    #[serde(alias = "consistent_hash")]
    consistent_hash: Option<load_balancer_settings::ConsistentHashLb>,
}

impl<'de> Deserialize<'de> for LoadBalancerSettings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use load_balancer_settings::LbPolicy;

        let fields = LoadBalancerSettingsFields::deserialize(deserializer)?;
        let lb_policy = oneof(
            "lbPolicy",
            [
                fields.simple.map(LbPolicy::Simple),
                fields.consistent_hash.map(LbPolicy::ConsistentHash),
            ],
        )
        .map_err(<D::Error as de::Error>::custom)?;

        Ok(Self {
            locality_lb_setting: fields.locality_lb_setting,
            warmup_duration_secs: fields.warmup_duration_secs,
            persistent_session: fields.persistent_session,
            lb_policy,
        })
    }
}

/// Nested message and enum types in `LoadBalancerSettings`.
pub mod load_balancer_settings {
    use serde::{de, Deserialize, Deserializer, Serialize};

    use super::PersistentCookie;
    use crate::codec::wkt::{is_default, oneof, proto_enum};

    /// Standard load balancing algorithms that require no tuning.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum SimpleLb {
        /// No load balancing algorithm specified; the proxy picks its default.
        Unspecified = 0,
        /// Deprecated. Use `LeastRequest` instead.
        LeastConn = 1,
        /// Selects a random healthy host.
        Random = 2,
        /// Forwards to the original destination address without load balancing.
        Passthrough = 3,
        /// Basic round robin.
        RoundRobin = 4,
        /// Picks the host with fewer active requests out of two random ones.
        LeastRequest = 5,
    }

    proto_enum!(SimpleLb {
        Unspecified => "UNSPECIFIED",
        LeastConn => "LEAST_CONN",
        Random => "RANDOM",
        Passthrough => "PASSTHROUGH",
        RoundRobin => "ROUND_ROBIN",
        LeastRequest => "LEAST_REQUEST",
    });

    /// Soft session affinity based on a hash of request properties.
    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ConsistentHashLb {
        /// Deprecated. Use `RingHash` instead.
        #[prost(uint64, tag = "4")]
        #[serde(
            alias = "minimum_ring_size",
            with = "crate::codec::wkt::u64_string",
            skip_serializing_if = "is_default"
        )]
        pub minimum_ring_size: u64,
        /// The hash key to use.
        #[prost(oneof = "consistent_hash_lb::HashKey", tags = "1, 2, 3, 5")]
        #[serde(flatten, skip_serializing_if = "Option::is_none")]
        pub hash_key: Option<consistent_hash_lb::HashKey>,
        /// The hash algorithm to use.
        #[prost(oneof = "consistent_hash_lb::HashAlgorithm", tags = "6, 7")]
        #[serde(flatten, skip_serializing_if = "Option::is_none")]
        pub hash_algorithm: Option<consistent_hash_lb::HashAlgorithm>,
    }

    /// JSON input form of [`ConsistentHashLb`], one field per member of
    /// `hashKey` and `hashAlgorithm`.
    #[derive(Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    struct ConsistentHashLbFields {
        #[serde(
            alias = "minimum_ring_size",
            deserialize_with = "crate::codec::wkt::u64_string::deserialize"
        )]
        minimum_ring_size: u64,
        #[serde(alias = "http_header_name")]
        http_header_name: Option<String>,
        #[serde(alias = "http_cookie")]
        http_cookie: Option<consistent_hash_lb::HttpCookie>,
        #[serde(alias = "use_source_ip")]
        use_source_ip: Option<bool>,
        #[serde(alias = "http_query_parameter_name")]
        http_query_parameter_name: Option<String>,
        #[serde(alias = "ring_hash")]
        ring_hash: Option<consistent_hash_lb::RingHash>,
        maglev: Option<consistent_hash_lb::MagLev>,
    }

    impl<'de> Deserialize<'de> for ConsistentHashLb {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            use consistent_hash_lb::{HashAlgorithm, HashKey};

            let fields = ConsistentHashLbFields::deserialize(deserializer)?;
            let hash_key = oneof(
                "hashKey",
                [
                    fields.http_header_name.map(HashKey::HttpHeaderName),
                    fields.http_cookie.map(HashKey::HttpCookie),
                    fields.use_source_ip.map(HashKey::UseSourceIp),
                    fields.http_query_parameter_name.map(HashKey::HttpQueryParameterName),
                ],
            )
            .map_err(<D::Error as de::Error>::custom)?;
            let hash_algorithm = oneof(
                "hashAlgorithm",
                [
                    fields.ring_hash.map(HashAlgorithm::RingHash),
                    fields.maglev.map(HashAlgorithm::Maglev),
                ],
            )
            .map_err(<D::Error as de::Error>::custom)?;

            Ok(Self { minimum_ring_size: fields.minimum_ring_size, hash_key, hash_algorithm })
        }
    }

    /// Nested message and oneof types in `ConsistentHashLB`.
    pub mod consistent_hash_lb {
        use serde::{Deserialize, Serialize};

        use crate::codec::wkt::is_default;

        #[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct RingHash {
            /// Minimum number of virtual nodes to use for the hash ring.
            #[prost(uint64, tag = "1")]
            #[serde(
                alias = "minimum_ring_size",
                with = "crate::codec::wkt::u64_string",
                skip_serializing_if = "is_default"
            )]
            pub minimum_ring_size: u64,
        }

        #[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct MagLev {
            /// Table size for Maglev hashing; must be prime.
            #[prost(uint64, tag = "1")]
            #[serde(
                alias = "table_size",
                with = "crate::codec::wkt::u64_string",
                skip_serializing_if = "is_default"
            )]
            pub table_size: u64,
        }

        /// Cookie used as the hash key. The cookie is generated when absent.
        #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct HttpCookie {
            /// Name of the cookie.
            #[prost(string, tag = "1")]
            #[serde(skip_serializing_if = "is_default")]
            pub name: String,
            /// Path to set for the cookie.
            #[prost(string, tag = "2")]
            #[serde(skip_serializing_if = "is_default")]
            pub path: String,
            /// Lifetime of the cookie.
            #[prost(message, optional, tag = "3")]
            #[serde(with = "crate::codec::wkt::duration", skip_serializing_if = "Option::is_none")]
            pub ttl: Option<::prost_types::Duration>,
        }

        #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub enum HashKey {
            /// Hash based on a specific HTTP header.
            #[prost(string, tag = "1")]
            HttpHeaderName(String),
            /// Hash based on an HTTP cookie.
            #[prost(message, tag = "2")]
            HttpCookie(HttpCookie),
            /// Hash based on the source IP address.
            #[prost(bool, tag = "3")]
            UseSourceIp(bool),
            /// Hash based on a specific HTTP query parameter.
            #[prost(string, tag = "5")]
            HttpQueryParameterName(String),
        }

        #[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Oneof, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub enum HashAlgorithm {
            /// Ring/modulo hash load balancer algorithm.
            #[prost(message, tag = "6")]
            RingHash(RingHash),
            /// Maglev load balancer algorithm.
            #[prost(message, tag = "7")]
            Maglev(MagLev),
        }
    }

    /// Stateful session affinity: requests carrying the same cookie or header
    /// value go to the same host for as long as it stays healthy.
    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PersistentSession {
        #[prost(oneof = "persistent_session::SessionKey", tags = "1, 2")]
        #[serde(flatten, skip_serializing_if = "Option::is_none")]
        pub session_key: Option<persistent_session::SessionKey>,
    }

    #[derive(Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    struct PersistentSessionFields {
        cookie: Option<PersistentCookie>,
        #[serde(alias = "header_name")]
        header_name: Option<String>,
    }

    impl<'de> Deserialize<'de> for PersistentSession {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            use persistent_session::SessionKey;

            let fields = PersistentSessionFields::deserialize(deserializer)?;
            let session_key = oneof(
                "sessionKey",
                [fields.cookie.map(SessionKey::Cookie), fields.header_name.map(SessionKey::HeaderName)],
            )
            .map_err(<D::Error as de::Error>::custom)?;

            Ok(Self { session_key })
        }
    }

    /// Nested oneof types in `PersistentSession`.
    pub mod persistent_session {
        use serde::Serialize;

        use super::PersistentCookie;

        #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub enum SessionKey {
            /// Session kept in a cookie set by the proxy.
            #[prost(message, tag = "1")]
            Cookie(PersistentCookie),
            /// Session kept in a request header.
            #[prost(string, tag = "2")]
            HeaderName(String),
        }
    }

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub enum LbPolicy {
        #[prost(enumeration = "SimpleLb", tag = "1")]
        Simple(
            #[serde(serialize_with = "crate::codec::wkt::enumeration::serialize::<SimpleLb, _>")] i32,
        ),
        #[prost(message, tag = "2")]
        ConsistentHash(ConsistentHashLb),
    }

    impl LbPolicy {
        /// The simple algorithm, when this policy names one.
        pub fn simple(&self) -> Option<SimpleLb> {
            match self {
                LbPolicy::Simple(value) => SimpleLb::try_from(*value).ok(),
                LbPolicy::ConsistentHash(_) => None,
            }
        }
    }

    impl From<SimpleLb> for LbPolicy {
        fn from(simple: SimpleLb) -> Self {
            LbPolicy::Simple(simple.into())
        }
    }
}

/// Cookie settings for persistent sessions.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistentCookie {
    /// Name of the cookie.
    #[prost(string, tag = "1")]
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    /// Path to set for the cookie.
    #[prost(string, tag = "2")]
    #[serde(skip_serializing_if = "is_default")]
    pub path: String,
    /// Lifetime of the cookie; a session cookie when unset.
    #[prost(message, optional, tag = "3")]
    #[serde(with = "crate::codec::wkt::duration", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<::prost_types::Duration>,
}

/// Connection pool settings for an upstream host. Applied to each individual
/// host in the upstream service.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionPoolSettings {
    /// Settings common to both HTTP and TCP upstream connections.
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp: Option<connection_pool_settings::TcpSettings>,
    /// HTTP connection pool settings.
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<connection_pool_settings::HttpSettings>,
}

/// Nested message and enum types in `ConnectionPoolSettings`.
pub mod connection_pool_settings {
    use serde::{Deserialize, Serialize};

    use crate::codec::wkt::{is_default, proto_enum};

    #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct TcpSettings {
        /// Maximum number of HTTP1/TCP connections to a destination host.
        #[prost(int32, tag = "1")]
        #[serde(
            alias = "max_connections",
            deserialize_with = "crate::codec::wkt::number::deserialize",
            skip_serializing_if = "is_default"
        )]
        pub max_connections: i32,
        /// TCP connection timeout.
        #[prost(message, optional, tag = "2")]
        #[serde(
            alias = "connect_timeout",
            with = "crate::codec::wkt::duration",
            skip_serializing_if = "Option::is_none"
        )]
        pub connect_timeout: Option<::prost_types::Duration>,
        /// Enables the SO_KEEPALIVE socket option with the given settings.
        #[prost(message, optional, tag = "3")]
        #[serde(alias = "tcp_keepalive", skip_serializing_if = "Option::is_none")]
        pub tcp_keepalive: Option<tcp_settings::TcpKeepalive>,
        /// Maximum duration of a connection.
        #[prost(message, optional, tag = "4")]
        #[serde(
            alias = "max_connection_duration",
            with = "crate::codec::wkt::duration",
            skip_serializing_if = "Option::is_none"
        )]
        pub max_connection_duration: Option<::prost_types::Duration>,
        /// Idle timeout for TCP connections.
        #[prost(message, optional, tag = "5")]
        #[serde(
            alias = "idle_timeout",
            with = "crate::codec::wkt::duration",
            skip_serializing_if = "Option::is_none"
        )]
        pub idle_timeout: Option<::prost_types::Duration>,
    }

    /// Nested message types in `TCPSettings`.
    pub mod tcp_settings {
        use serde::{Deserialize, Serialize};

        use crate::codec::wkt::is_default;

        /// TCP keepalive.
        #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct TcpKeepalive {
            /// Maximum number of keepalive probes to send without response
            /// before deciding the connection is dead.
            #[prost(uint32, tag = "1")]
            #[serde(
                deserialize_with = "crate::codec::wkt::number::deserialize",
                skip_serializing_if = "is_default"
            )]
            pub probes: u32,
            /// Time a connection must be idle before keep-alive probes start.
            #[prost(message, optional, tag = "2")]
            #[serde(with = "crate::codec::wkt::duration", skip_serializing_if = "Option::is_none")]
            pub time: Option<::prost_types::Duration>,
            /// Time between keep-alive probes.
            #[prost(message, optional, tag = "3")]
            #[serde(with = "crate::codec::wkt::duration", skip_serializing_if = "Option::is_none")]
            pub interval: Option<::prost_types::Duration>,
        }
    }

    /// Settings applicable to HTTP1.1/HTTP2/GRPC connections.
    #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct HttpSettings {
        /// Maximum number of requests that will be queued while waiting for a
        /// ready connection pool connection.
        #[prost(int32, tag = "1")]
        #[serde(
            alias = "http1_max_pending_requests",
            deserialize_with = "crate::codec::wkt::number::deserialize",
            skip_serializing_if = "is_default"
        )]
        pub http1_max_pending_requests: i32,
        /// Maximum number of active requests to a destination.
        #[prost(int32, tag = "2")]
        #[serde(
            alias = "http2_max_requests",
            deserialize_with = "crate::codec::wkt::number::deserialize",
            skip_serializing_if = "is_default"
        )]
        pub http2_max_requests: i32,
        /// Maximum number of requests per connection to a backend.
        #[prost(int32, tag = "3")]
        #[serde(
            alias = "max_requests_per_connection",
            deserialize_with = "crate::codec::wkt::number::deserialize",
            skip_serializing_if = "is_default"
        )]
        pub max_requests_per_connection: i32,
        /// Maximum number of retries outstanding to all hosts in a cluster.
        #[prost(int32, tag = "4")]
        #[serde(
            alias = "max_retries",
            deserialize_with = "crate::codec::wkt::number::deserialize",
            skip_serializing_if = "is_default"
        )]
        pub max_retries: i32,
        /// Idle timeout for upstream connection pool connections.
        #[prost(message, optional, tag = "5")]
        #[serde(
            alias = "idle_timeout",
            with = "crate::codec::wkt::duration",
            skip_serializing_if = "Option::is_none"
        )]
        pub idle_timeout: Option<::prost_types::Duration>,
        /// Whether HTTP/1.1 connections should be upgraded to HTTP/2.
        #[prost(enumeration = "http_settings::H2UpgradePolicy", tag = "6")]
        #[serde(
            alias = "h2_upgrade_policy",
            skip_serializing_if = "is_default",
            serialize_with = "crate::codec::wkt::enumeration::serialize::<http_settings::H2UpgradePolicy, _>",
            deserialize_with = "crate::codec::wkt::enumeration::deserialize::<http_settings::H2UpgradePolicy, _>"
        )]
        pub h2_upgrade_policy: i32,
        /// Use the client's protocol towards the upstream.
        #[prost(bool, tag = "7")]
        #[serde(alias = "use_client_protocol", skip_serializing_if = "is_default")]
        pub use_client_protocol: bool,
        /// Maximum concurrent streams allowed for a peer on one HTTP/2
        /// connection.
        #[prost(int32, tag = "8")]
        #[serde(
            alias = "max_concurrent_streams",
            deserialize_with = "crate::codec::wkt::number::deserialize",
            skip_serializing_if = "is_default"
        )]
        pub max_concurrent_streams: i32,
    }

    /// Nested enum types in `HTTPSettings`.
    pub mod http_settings {
        use super::proto_enum;

        /// Policy for upgrading HTTP/1.1 connections to HTTP/2.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum H2UpgradePolicy {
            /// Use the global default.
            Default = 0,
            /// Do not upgrade the connection to HTTP/2.
            DoNotUpgrade = 1,
            /// Upgrade the connection to HTTP/2.
            Upgrade = 2,
        }

        proto_enum!(H2UpgradePolicy {
            Default => "DEFAULT",
            DoNotUpgrade => "DO_NOT_UPGRADE",
            Upgrade => "UPGRADE",
        });
    }
}

/// Circuit breaker that tracks the status of each individual host in the
/// upstream service and ejects hosts that keep failing.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutlierDetection {
    /// Deprecated. Use `consecutive_gateway_errors` or
    /// `consecutive_5xx_errors` instead.
    #[prost(int32, tag = "1")]
    #[serde(
        alias = "consecutive_errors",
        deserialize_with = "crate::codec::wkt::number::deserialize",
        skip_serializing_if = "is_default"
    )]
    pub consecutive_errors: i32,
    /// Time interval between ejection sweep analysis.
    #[prost(message, optional, tag = "2")]
    #[serde(with = "crate::codec::wkt::duration", skip_serializing_if = "Option::is_none")]
    pub interval: Option<::prost_types::Duration>,
    /// Minimum ejection duration.
    #[prost(message, optional, tag = "3")]
    #[serde(
        alias = "base_ejection_time",
        with = "crate::codec::wkt::duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_ejection_time: Option<::prost_types::Duration>,
    /// Maximum % of hosts in the load balancing pool that can be ejected.
    #[prost(int32, tag = "4")]
    #[serde(
        alias = "max_ejection_percent",
        deserialize_with = "crate::codec::wkt::number::deserialize",
        skip_serializing_if = "is_default"
    )]
    pub max_ejection_percent: i32,
    /// Outlier detection is enabled while at least this % of hosts are healthy.
    #[prost(int32, tag = "5")]
    #[serde(
        alias = "min_health_percent",
        deserialize_with = "crate::codec::wkt::number::deserialize",
        skip_serializing_if = "is_default"
    )]
    pub min_health_percent: i32,
    /// Number of gateway errors before a host is ejected.
    #[prost(message, optional, tag = "6")]
    #[serde(
        alias = "consecutive_gateway_errors",
        deserialize_with = "crate::codec::wkt::number::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub consecutive_gateway_errors: Option<u32>,
    /// Number of 5xx errors before a host is ejected.
    #[prost(message, optional, tag = "7")]
    #[serde(
        alias = "consecutive_5xx_errors",
        deserialize_with = "crate::codec::wkt::number::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub consecutive_5xx_errors: Option<u32>,
    /// Distinguish local origin failures from external errors.
    #[prost(bool, tag = "8")]
    #[serde(alias = "split_external_local_origin_errors", skip_serializing_if = "is_default")]
    pub split_external_local_origin_errors: bool,
    /// Number of consecutive locally originated failures before ejection.
    #[prost(message, optional, tag = "9")]
    #[serde(
        alias = "consecutive_local_origin_failures",
        deserialize_with = "crate::codec::wkt::number::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub consecutive_local_origin_failures: Option<u32>,
}

/// SSL/TLS related settings for upstream connections.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientTlsSettings {
    /// Whether connections to this port should be secured using TLS.
    #[prost(enumeration = "client_tls_settings::TlsMode", tag = "1")]
    #[serde(
        skip_serializing_if = "is_default",
        serialize_with = "crate::codec::wkt::enumeration::serialize::<TlsMode, _>",
        deserialize_with = "crate::codec::wkt::enumeration::deserialize::<TlsMode, _>"
    )]
    pub mode: i32,
    /// Path to the file holding the client-side TLS certificate.
    #[prost(string, tag = "2")]
    #[serde(alias = "client_certificate", skip_serializing_if = "is_default")]
    pub client_certificate: String,
    /// Path to the file holding the client's private key.
    #[prost(string, tag = "3")]
    #[serde(alias = "private_key", skip_serializing_if = "is_default")]
    pub private_key: String,
    /// Path to the file containing certificate authority certificates for
    /// verifying the presented server certificate.
    #[prost(string, tag = "4")]
    #[serde(alias = "ca_certificates", skip_serializing_if = "is_default")]
    pub ca_certificates: String,
    /// Alternate names to verify the subject identity in the certificate.
    #[prost(string, repeated, tag = "5")]
    #[serde(alias = "subject_alt_names", skip_serializing_if = "is_default")]
    pub subject_alt_names: Vec<String>,
    /// SNI string to present to the server during TLS handshake.
    #[prost(string, tag = "6")]
    #[serde(skip_serializing_if = "is_default")]
    pub sni: String,
    /// Name of the secret holding the TLS certs for the client.
    #[prost(string, tag = "7")]
    #[serde(alias = "credential_name", skip_serializing_if = "is_default")]
    pub credential_name: String,
    /// Skip verifying the server's CA certificate and SAN.
    #[prost(message, optional, tag = "8")]
    #[serde(alias = "insecure_skip_verify", skip_serializing_if = "Option::is_none")]
    pub insecure_skip_verify: Option<bool>,
    /// Path to the file containing the certificate revocation list.
    #[prost(string, tag = "9")]
    #[serde(alias = "ca_crl", skip_serializing_if = "is_default")]
    pub ca_crl: String,
}

/// Nested enum types in `ClientTLSSettings`.
pub mod client_tls_settings {
    use crate::codec::wkt::proto_enum;

    /// TLS connection mode
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum TlsMode {
        /// Do not set up a TLS connection to the upstream endpoint.
        Disable = 0,
        /// Originate a TLS connection to the upstream endpoint.
        Simple = 1,
        /// Secure connections using mutual TLS with client certificates.
        Mutual = 2,
        /// Mutual TLS using mesh-issued certificates.
        IstioMutual = 3,
    }

    proto_enum!(TlsMode {
        Disable => "DISABLE",
        Simple => "SIMPLE",
        Mutual => "MUTUAL",
        IstioMutual => "ISTIO_MUTUAL",
    });
}

/// Locality-weighted load balancing and failover settings.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalityLoadBalancerSetting {
    /// How traffic is distributed across a set of localities.
    #[prost(message, repeated, tag = "1")]
    #[serde(skip_serializing_if = "is_default")]
    pub distribute: Vec<locality_load_balancer_setting::Distribute>,
    /// Where traffic spills over when endpoints in a locality are unhealthy.
    #[prost(message, repeated, tag = "2")]
    #[serde(skip_serializing_if = "is_default")]
    pub failover: Vec<locality_load_balancer_setting::Failover>,
    /// Enable locality load balancing; overrides the mesh-wide setting.
    #[prost(message, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Ordered list of labels used to sort endpoints for priority based
    /// load balancing.
    #[prost(string, repeated, tag = "4")]
    #[serde(alias = "failover_priority", skip_serializing_if = "is_default")]
    pub failover_priority: Vec<String>,
}

/// Nested message types in `LocalityLoadBalancerSetting`.
pub mod locality_load_balancer_setting {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};

    use crate::codec::wkt::is_default;

    /// Traffic distribution weights from one origin locality.
    #[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Distribute {
        /// Originating locality, `/` separated, e.g. `region/zone/sub_zone`.
        #[prost(string, tag = "1")]
        #[serde(skip_serializing_if = "is_default")]
        pub from: String,
        /// Map of upstream localities to traffic distribution weights.
        #[prost(btree_map = "string, uint32", tag = "2")]
        #[serde(skip_serializing_if = "is_default")]
        pub to: BTreeMap<String, u32>,
    }

    /// Failover from one region to another.
    #[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Failover {
        /// Originating region.
        #[prost(string, tag = "1")]
        #[serde(skip_serializing_if = "is_default")]
        pub from: String,
        /// Destination region the traffic fails over to.
        #[prost(string, tag = "2")]
        #[serde(skip_serializing_if = "is_default")]
        pub to: String,
    }
}

impl LocalityLoadBalancerSetting {
    /// Locality load balancing is on unless explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

proto_name!(PACKAGE;
    DestinationRule => "DestinationRule",
    TrafficPolicy => "TrafficPolicy",
    traffic_policy::PortTrafficPolicy => "TrafficPolicy.PortTrafficPolicy",
    traffic_policy::TunnelSettings => "TrafficPolicy.TunnelSettings",
    Subset => "Subset",
    LoadBalancerSettings => "LoadBalancerSettings",
    load_balancer_settings::ConsistentHashLb => "LoadBalancerSettings.ConsistentHashLB",
    load_balancer_settings::consistent_hash_lb::RingHash => "LoadBalancerSettings.ConsistentHashLB.RingHash",
    load_balancer_settings::consistent_hash_lb::MagLev => "LoadBalancerSettings.ConsistentHashLB.MagLev",
    load_balancer_settings::consistent_hash_lb::HttpCookie => "LoadBalancerSettings.ConsistentHashLB.HTTPCookie",
    load_balancer_settings::PersistentSession => "LoadBalancerSettings.PersistentSession",
    ConnectionPoolSettings => "ConnectionPoolSettings",
    connection_pool_settings::TcpSettings => "ConnectionPoolSettings.TCPSettings",
    connection_pool_settings::tcp_settings::TcpKeepalive => "ConnectionPoolSettings.TCPSettings.TcpKeepalive",
    connection_pool_settings::HttpSettings => "ConnectionPoolSettings.HTTPSettings",
    OutlierDetection => "OutlierDetection",
    ClientTlsSettings => "ClientTLSSettings",
    PersistentCookie => "PersistentCookie",
    LocalityLoadBalancerSetting => "LocalityLoadBalancerSetting",
    locality_load_balancer_setting::Distribute => "LocalityLoadBalancerSetting.Distribute",
    locality_load_balancer_setting::Failover => "LocalityLoadBalancerSetting.Failover",
);

json_shim!(DESTINATION_RULE_MARSHALER, DESTINATION_RULE_UNMARSHALER;
    DestinationRule,
    TrafficPolicy,
    traffic_policy::PortTrafficPolicy,
    traffic_policy::TunnelSettings,
    Subset,
    LoadBalancerSettings,
    load_balancer_settings::ConsistentHashLb,
    load_balancer_settings::consistent_hash_lb::RingHash,
    load_balancer_settings::consistent_hash_lb::MagLev,
    load_balancer_settings::consistent_hash_lb::HttpCookie,
    load_balancer_settings::PersistentSession,
    ConnectionPoolSettings,
    connection_pool_settings::TcpSettings,
    connection_pool_settings::tcp_settings::TcpKeepalive,
    connection_pool_settings::HttpSettings,
    OutlierDetection,
    ClientTlsSettings,
    PersistentCookie,
    LocalityLoadBalancerSetting,
    locality_load_balancer_setting::Distribute,
    locality_load_balancer_setting::Failover,
);
