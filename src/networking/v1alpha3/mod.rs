//! `istio.networking.v1alpha3` records.
//!
//! - [`DestinationRule`] and the traffic-policy family it is built from
//! - [`WorkloadEntry`], the network identity of a workload running outside the
//!   cluster
//!
//! Every record has a binary wire form (`prost`) and a protobuf-JSON text form
//! (`serde`), the latter reachable through [`JsonShim`](crate::codec::JsonShim).

pub mod destination_rule;
pub mod workload_entry;

use serde::{Deserialize, Serialize};

use crate::codec::proto_name;
use crate::codec::wkt::is_default;

/// Protobuf package of every record in this module.
pub const PACKAGE: &str = "istio.networking.v1alpha3";

pub use destination_rule::{
    connection_pool_settings, load_balancer_settings, locality_load_balancer_setting,
    traffic_policy, ClientTlsSettings, ConnectionPoolSettings, DestinationRule,
    LoadBalancerSettings, LocalityLoadBalancerSetting, OutlierDetection, PersistentCookie, Subset,
    TrafficPolicy, DESTINATION_RULE_MARSHALER, DESTINATION_RULE_UNMARSHALER,
};
pub use workload_entry::{WorkloadEntry, WORKLOAD_ENTRY_MARSHALER, WORKLOAD_ENTRY_UNMARSHALER};

/// Selects a port on a service by number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortSelector {
    /// Valid port number
    #[prost(uint32, tag = "1")]
    #[serde(
        deserialize_with = "crate::codec::wkt::number::deserialize",
        skip_serializing_if = "is_default"
    )]
    pub number: u32,
}

proto_name!(PACKAGE; PortSelector => "PortSelector");

impl From<u32> for PortSelector {
    fn from(number: u32) -> Self {
        Self { number }
    }
}
