//! Shared `istio.type` records referenced by the networking APIs.

pub mod v1beta1 {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};

    use crate::codec::proto_name;
    use crate::codec::wkt::is_default;

    pub const PACKAGE: &str = "istio.type.v1beta1";

    /// Label selector for the workloads a configuration applies to.
    #[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct WorkloadSelector {
        /// One or more labels that indicate the workloads the config applies to.
        #[prost(btree_map = "string, string", tag = "1")]
        #[serde(alias = "match_labels", skip_serializing_if = "is_default")]
        pub match_labels: BTreeMap<String, String>,
    }

    proto_name!(PACKAGE; WorkloadSelector => "WorkloadSelector");

    impl WorkloadSelector {
        /// Whether every selector label is present on `labels` with the same value.
        pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
            self.match_labels.iter().all(|(key, value)| labels.get(key) == Some(value))
        }
    }

}
