//! Record conversion between JSON, YAML and the binary wire format.

use std::fmt;

use clap::ValueEnum;
use prost::{Message, Name};
use serde::Serialize;
use tracing::{debug, info};

use crate::codec::{self, JsonMarshaler, JsonShim};
use crate::errors::{Error, Result};
use crate::networking::v1alpha3::{DestinationRule, WorkloadEntry};
use crate::xds::filters::network::TcpClusterRewrite;

/// Record types the tool knows how to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    TcpClusterRewrite,
    DestinationRule,
    WorkloadEntry,
}

impl RecordKind {
    pub fn full_name(&self) -> String {
        match self {
            RecordKind::TcpClusterRewrite => TcpClusterRewrite::full_name(),
            RecordKind::DestinationRule => DestinationRule::full_name(),
            RecordKind::WorkloadEntry => WorkloadEntry::full_name(),
        }
    }

    pub fn type_url(&self) -> String {
        match self {
            RecordKind::TcpClusterRewrite => TcpClusterRewrite::type_url(),
            RecordKind::DestinationRule => DestinationRule::type_url(),
            RecordKind::WorkloadEntry => WorkloadEntry::type_url(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::TcpClusterRewrite => "tcp-cluster-rewrite",
            RecordKind::DestinationRule => "destination-rule",
            RecordKind::WorkloadEntry => "workload-entry",
        };
        f.write_str(name)
    }
}

/// Encodings a record can be read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
    Binary,
}

impl Format {
    pub fn is_text(&self) -> bool {
        !matches!(self, Format::Binary)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Binary => "binary",
        };
        f.write_str(name)
    }
}

/// Anything that has both a wire form and a JSON shim.
pub trait Record: Message + Name + Default + JsonShim {}

impl<T: Message + Name + Default + JsonShim> Record for T {}

/// Decode `input` as `from`, then encode it as `to`.
pub fn convert(
    kind: RecordKind,
    from: Format,
    to: Format,
    input: &[u8],
    pretty: bool,
) -> Result<Vec<u8>> {
    let span = crate::codec_span!(kind, from, to, input_bytes = input.len());
    let _enter = span.enter();

    let output = match kind {
        RecordKind::TcpClusterRewrite => convert_record::<TcpClusterRewrite>(from, to, input, pretty),
        RecordKind::DestinationRule => convert_record::<DestinationRule>(from, to, input, pretty),
        RecordKind::WorkloadEntry => convert_record::<WorkloadEntry>(from, to, input, pretty),
    }?;

    info!(output_bytes = output.len(), "Converted record");
    Ok(output)
}

pub fn convert_record<R: Record>(
    from: Format,
    to: Format,
    input: &[u8],
    pretty: bool,
) -> Result<Vec<u8>> {
    let record: R = decode(from, input)?;
    debug!(record = R::NAME, "Decoded record");
    encode(&record, to, pretty)
}

pub fn decode<R: Record>(format: Format, input: &[u8]) -> Result<R> {
    match format {
        Format::Json => R::unmarshal_json(input),
        Format::Yaml => {
            let value: serde_json::Value = serde_yaml::from_slice(input)
                .map_err(|e| Error::yaml(format!("Invalid YAML {} record", R::NAME), e))?;
            R::unmarshaler().unmarshal_value(value)
        }
        Format::Binary => codec::decode_message(input),
    }
}

pub fn encode<R: Record>(record: &R, format: Format, pretty: bool) -> Result<Vec<u8>> {
    match format {
        Format::Json if pretty => JsonMarshaler::pretty().marshal(record),
        Format::Json => record.marshal_json(),
        Format::Yaml => serde_yaml::to_string(record)
            .map(String::into_bytes)
            .map_err(|e| Error::encode(format!("Failed to write {} as YAML: {}", R::NAME, e))),
        Format::Binary => Ok(codec::encode_message(record)),
    }
}
