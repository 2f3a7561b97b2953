//! Typed filter configs and their `google.protobuf.Any` envelope.
//!
//! Envoy receives filter configs packed in an `Any`: a type URL naming the
//! message plus its encoded bytes. [`any_from_message`] and [`unpack`] move
//! records in and out of that envelope; [`TypedConfig`] is the same envelope in
//! protobuf-JSON form (`{"typeUrl": ..., "value": "<base64>"}`) for JSON and
//! YAML documents.
//!
//! Network filters:
//!
//! - [`network::TcpClusterRewrite`]
//!   (`envoy.filters.network.tcp_cluster_rewrite`)

pub mod network;

use envoy_types::pb::google::protobuf::Any;
use prost::{Message, Name};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// JSON form of a packed `Any`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypedConfig {
    /// `type.googleapis.com/<package>.<Message>`
    #[serde(alias = "type_url")]
    pub type_url: String,
    /// Encoded message, base64 in JSON.
    #[serde(with = "crate::codec::wkt::base64_bytes")]
    pub value: Vec<u8>,
}

impl TypedConfig {
    pub fn from_message<M: Name>(msg: &M) -> Self {
        any_from_message(msg).into()
    }

    /// Unpack into `M`; fails unless the type URL names `M`.
    pub fn to_message<M: Name + Default>(&self) -> Result<M> {
        unpack(&self.to_any())
    }

    pub fn to_any(&self) -> Any {
        Any { type_url: self.type_url.clone(), value: self.value.clone() }
    }
}

impl From<Any> for TypedConfig {
    fn from(any: Any) -> Self {
        Self { type_url: any.type_url, value: any.value }
    }
}

/// Pack a named record into an Envoy `Any`.
pub fn any_from_message<M: Name>(msg: &M) -> Any {
    Any { type_url: M::type_url(), value: msg.encode_to_vec() }
}

/// Unpack an Envoy `Any`, rejecting payloads that carry another message type.
pub fn unpack<M: Name + Default>(any: &Any) -> Result<M> {
    let expected = M::type_url();
    if any.type_url != expected {
        return Err(Error::decode(format!(
            "Expected packed {} but found '{}'",
            expected, any.type_url
        )));
    }
    crate::codec::decode_message(&any.value)
}
