//! Stable `istio.networking.v1` names.
//!
//! The stable version shares its wire layout and JSON form with `v1alpha3`,
//! so every record here is an alias of its `v1alpha3` definition.

pub use super::v1alpha3::{
    connection_pool_settings, load_balancer_settings, locality_load_balancer_setting,
    traffic_policy, ClientTlsSettings, ConnectionPoolSettings, LoadBalancerSettings,
    LocalityLoadBalancerSetting, OutlierDetection, PersistentCookie, PortSelector, Subset,
    TrafficPolicy,
};

pub type WorkloadEntry = super::v1alpha3::WorkloadEntry;

pub type DestinationRule = super::v1alpha3::DestinationRule;
