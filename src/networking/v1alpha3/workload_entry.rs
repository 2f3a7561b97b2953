//! Workload entries describe the properties of a single non-Kubernetes
//! workload, such as a VM or a bare-metal server, as it is onboarded into the
//! mesh.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PACKAGE;
use crate::codec::wkt::is_default;
use crate::codec::{json_shim, proto_name, JsonMarshaler, JsonUnmarshaler};

pub static WORKLOAD_ENTRY_MARSHALER: JsonMarshaler = JsonMarshaler::new();

pub static WORKLOAD_ENTRY_UNMARSHALER: JsonUnmarshaler = JsonUnmarshaler::new();

/// Network identity of a workload running outside the cluster.
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkloadEntry {
    /// Address associated with the network endpoint without the port. Domain
    /// names are accepted; Unix domain sockets use the `unix://` prefix.
    #[prost(string, tag = "1")]
    #[serde(skip_serializing_if = "is_default")]
    pub address: String,
    /// Set of ports associated with the endpoint, keyed by service port name.
    #[prost(btree_map = "string, uint32", tag = "2")]
    #[serde(skip_serializing_if = "is_default")]
    pub ports: BTreeMap<String, u32>,
    /// One or more labels associated with the endpoint.
    #[prost(btree_map = "string, string", tag = "3")]
    #[serde(skip_serializing_if = "is_default")]
    pub labels: BTreeMap<String, String>,
    /// Network the endpoint belongs to; endpoints on other networks are
    /// reached through a gateway.
    #[prost(string, tag = "4")]
    #[serde(skip_serializing_if = "is_default")]
    pub network: String,
    /// Locality in `region/zone/sub_zone` form.
    #[prost(string, tag = "5")]
    #[serde(skip_serializing_if = "is_default")]
    pub locality: String,
    /// Load balancing weight; endpoints with higher weights receive
    /// proportionally more traffic.
    #[prost(uint32, tag = "6")]
    #[serde(
        deserialize_with = "crate::codec::wkt::number::deserialize",
        skip_serializing_if = "is_default"
    )]
    pub weight: u32,
    /// Service account associated with the workload if a sidecar is present.
    #[prost(string, tag = "7")]
    #[serde(alias = "service_account", skip_serializing_if = "is_default")]
    pub service_account: String,
}

proto_name!(PACKAGE; WorkloadEntry => "WorkloadEntry");

json_shim!(WORKLOAD_ENTRY_MARSHALER, WORKLOAD_ENTRY_UNMARSHALER; WorkloadEntry);

impl WorkloadEntry {
    /// Port number mapped to a named service port.
    pub fn port(&self, name: &str) -> Option<u32> {
        self.ports.get(name).copied()
    }
}
