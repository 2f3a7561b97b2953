//! Protobuf-JSON text codec and binary wire helpers.
//!
//! Record types in this crate carry serde derives that follow the protobuf-JSON
//! mapping (see [`wkt`]). The codec types here are thin, stateless front-ends
//! over `serde_json` and `prost`; each schema file exposes one
//! [`JsonMarshaler`] / [`JsonUnmarshaler`] pair as a `static`, and the
//! [`JsonShim`] trait forwards a record's `marshal_json` / `unmarshal_json` to
//! that pair.
//!
//! Unknown JSON keys are ignored on input so that payloads produced by newer
//! schema revisions still decode. A `null` value leaves its field unset.

pub mod wkt;

use prost::{Message, Name};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::{Error, Result};

/// Crate-wide marshaler for records without a schema-specific pair.
pub static MARSHALER: JsonMarshaler = JsonMarshaler::new();

/// Crate-wide unmarshaler for records without a schema-specific pair.
pub static UNMARSHALER: JsonUnmarshaler = JsonUnmarshaler::new();

/// Writes records as protobuf-JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonMarshaler {
    indent: bool,
}

impl JsonMarshaler {
    /// Compact output, one line per record.
    pub const fn new() -> Self {
        Self { indent: false }
    }

    /// Indented, human-oriented output.
    pub const fn pretty() -> Self {
        Self { indent: true }
    }

    pub fn is_pretty(&self) -> bool {
        self.indent
    }

    pub fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        self.marshal_to_string(value).map(String::into_bytes)
    }

    pub fn marshal_to_string<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let encoded = if self.indent {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.map_err(|e| {
            debug!(error = %e, "failed to marshal record to JSON");
            Error::encode(format!("Failed to marshal record to JSON: {}", e))
        })
    }
}

/// Reads protobuf-JSON text into records, ignoring unrecognised keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonUnmarshaler {
    _private: (),
}

impl JsonUnmarshaler {
    pub const fn new() -> Self {
        Self { _private: () }
    }

    pub fn unmarshal<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        let value = serde_json::from_slice(bytes).map_err(|e| {
            debug!(error = %e, "malformed JSON text");
            Error::json("Invalid JSON record", e)
        })?;
        self.unmarshal_value(value)
    }

    pub fn unmarshal_str<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        self.unmarshal(text.as_bytes())
    }

    pub fn unmarshal_value<T: DeserializeOwned>(&self, mut value: Value) -> Result<T> {
        drop_nulls(&mut value);
        serde_json::from_value(value).map_err(|e| {
            debug!(error = %e, "failed to unmarshal JSON record");
            Error::json("Invalid JSON record", e)
        })
    }
}

/// Remove `null` object members at every depth.
fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, member| !member.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

/// Forwarding JSON encode/decode for a record type.
///
/// Implementations only choose which codec pair to forward to; see
/// [`json_shim!`](crate::codec::json_shim).
pub trait JsonShim: Serialize + DeserializeOwned {
    fn marshaler() -> &'static JsonMarshaler;

    fn unmarshaler() -> &'static JsonUnmarshaler;

    fn marshal_json(&self) -> Result<Vec<u8>> {
        Self::marshaler().marshal(self)
    }

    fn marshal_json_string(&self) -> Result<String> {
        Self::marshaler().marshal_to_string(self)
    }

    fn unmarshal_json(bytes: &[u8]) -> Result<Self> {
        Self::unmarshaler().unmarshal(bytes)
    }
}

/// Implement [`JsonShim`] for a list of record types sharing one codec pair.
macro_rules! json_shim {
    ($marshaler:path, $unmarshaler:path; $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::codec::JsonShim for $ty {
                fn marshaler() -> &'static $crate::codec::JsonMarshaler {
                    &$marshaler
                }

                fn unmarshaler() -> &'static $crate::codec::JsonUnmarshaler {
                    &$unmarshaler
                }
            }
        )+
    };
}
pub(crate) use json_shim;

/// Implement [`prost::Name`] for records of one protobuf package, with the
/// `type.googleapis.com/` type URL prefix used by `google.protobuf.Any`.
macro_rules! proto_name {
    ($package:expr; $($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl ::prost::Name for $ty {
                const NAME: &'static str = $name;
                const PACKAGE: &'static str = $package;

                fn type_url() -> String {
                    $crate::codec::type_url_for(&<Self as ::prost::Name>::full_name())
                }
            }
        )+
    };
}
pub(crate) use proto_name;

/// Prefix shared by every packed `google.protobuf.Any` payload.
pub const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

pub fn type_url_for(full_name: &str) -> String {
    format!("{}{}", TYPE_URL_PREFIX, full_name)
}

/// Encode a record to the binary wire format.
pub fn encode_message<M: Message>(message: &M) -> Vec<u8> {
    message.encode_to_vec()
}

/// Decode a record from the binary wire format.
///
/// Truncated input, bad wire types and invalid UTF-8 in string fields are all
/// reported as [`Error::Decode`]; nothing is returned half-populated.
pub fn decode_message<M: Message + Name + Default>(bytes: &[u8]) -> Result<M> {
    M::decode(bytes).map_err(|e| {
        debug!(message = %M::full_name(), error = %e, "failed to decode protobuf payload");
        Error::decode_with_source(format!("Invalid {} payload", M::full_name()), e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: String,
    }

    #[test]
    fn marshaler_writes_compact_and_pretty_json() {
        let value = Sample { name: "a".into() };
        assert_eq!(MARSHALER.marshal_to_string(&value).unwrap(), r#"{"name":"a"}"#);

        let pretty = JsonMarshaler::pretty().marshal_to_string(&value).unwrap();
        assert!(pretty.contains('\n'));
        assert!(JsonMarshaler::pretty().is_pretty());
    }

    #[test]
    fn unmarshaler_ignores_unknown_keys() {
        let value: Sample = UNMARSHALER.unmarshal_str(r#"{"name":"a","other":[1,2]}"#).unwrap();
        assert_eq!(value, Sample { name: "a".into() });
    }

    #[test]
    fn unmarshaler_rejects_malformed_text() {
        let err = UNMARSHALER.unmarshal_str::<Sample>(r#"{"name":"#).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn unmarshaler_treats_null_as_unset() {
        let value: Sample = UNMARSHALER.unmarshal_str(r#"{"name":null}"#).unwrap();
        assert_eq!(value, Sample { name: String::new() });
    }

    #[test]
    fn marshal_failures_are_encode_errors() {
        struct Unwritable;

        impl Serialize for Unwritable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("not representable"))
            }
        }

        let err = MARSHALER.marshal(&Unwritable).unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
        assert!(!err.is_decode());
    }

    #[test]
    fn type_urls_use_the_any_prefix() {
        assert_eq!(type_url_for("pkg.Msg"), "type.googleapis.com/pkg.Msg");
    }
}
