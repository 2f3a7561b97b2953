//! serde helpers for the protobuf-JSON mapping of scalars and well-known types.
//!
//! These are wired onto record fields with `#[serde(with = ...)]`,
//! `serialize_with` and `skip_serializing_if` so that the derived
//! `Serialize`/`Deserialize` impls emit the same text a protobuf-JSON marshaler
//! would:
//!
//! - enums are written by name and read by name or number,
//! - `google.protobuf.Duration` is written as `"<seconds>[.<fraction>]s"`,
//! - 64-bit integers are written as decimal strings and read from strings or
//!   numbers,
//! - `bytes` are written as standard base64 and read from standard or URL-safe
//!   base64,
//! - 32-bit integers are written as numbers and read from numbers or strings,
//! - fields holding their zero value are omitted.
//!
//! Oneof members are written flattened into the parent object. On input each
//! member is read as its own optional field and folded with [`oneof`], so a bad
//! member value is an error rather than an unset oneof.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use prost_types::Duration;
use serde::de::{self, Deserializer, Visitor};
use serde::{ser, Deserialize, Serializer};

/// Largest magnitude accepted for `Duration.seconds` (10,000 years).
const MAX_DURATION_SECONDS: i64 = 315_576_000_000;
const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Symbolic names of a protobuf enumeration.
///
/// Implemented by every `prost::Enumeration` in the crate so that the JSON form
/// can carry the schema's value names instead of raw numbers.
pub trait ProtoEnum: Copy + TryFrom<i32> + Into<i32> {
    /// Name of the value as declared in the schema.
    fn as_str_name(&self) -> &'static str;

    /// Parse a value from its schema name.
    fn from_str_name(value: &str) -> Option<Self>;
}

/// Implement [`ProtoEnum`] from a variant/name table.
macro_rules! proto_enum {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $crate::codec::wkt::ProtoEnum for $ty {
            fn as_str_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            fn from_str_name(value: &str) -> Option<Self> {
                match value {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}
pub(crate) use proto_enum;

/// `skip_serializing_if` predicate for fields left at their zero value.
pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Fold the members of a oneof read as separate fields into its single value.
///
/// At most one member may be set; `name` is the oneof's name for the error.
pub fn oneof<T>(name: &str, members: impl IntoIterator<Item = Option<T>>) -> Result<Option<T>, String> {
    let mut set = members.into_iter().flatten();
    let first = set.next();
    if set.next().is_some() {
        return Err(format!("more than one member of oneof `{}` is set", name));
    }
    Ok(first)
}

/// Enum fields stored as `i32` by prost.
pub mod enumeration {
    use super::*;

    pub fn serialize<E, S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
    where
        E: ProtoEnum,
        S: Serializer,
    {
        match E::try_from(*value) {
            Ok(known) => serializer.serialize_str(known.as_str_name()),
            Err(_) => serializer.serialize_i32(*value),
        }
    }

    pub fn deserialize<'de, E, D>(deserializer: D) -> Result<i32, D::Error>
    where
        E: ProtoEnum,
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EnumVisitor::<E>(PhantomData))
    }

    struct EnumVisitor<E>(PhantomData<E>);

    impl<'de, E: ProtoEnum> Visitor<'de> for EnumVisitor<E> {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an enum value name or number")
        }

        fn visit_str<DeErr: de::Error>(self, value: &str) -> Result<i32, DeErr> {
            E::from_str_name(value)
                .map(Into::into)
                .ok_or_else(|| DeErr::custom(format!("unknown enum value `{}`", value)))
        }

        fn visit_i64<DeErr: de::Error>(self, value: i64) -> Result<i32, DeErr> {
            i32::try_from(value).map_err(|_| DeErr::custom(format!("enum number {} out of range", value)))
        }

        fn visit_u64<DeErr: de::Error>(self, value: u64) -> Result<i32, DeErr> {
            i32::try_from(value).map_err(|_| DeErr::custom(format!("enum number {} out of range", value)))
        }

        fn visit_unit<DeErr: de::Error>(self) -> Result<i32, DeErr> {
            Ok(0)
        }
    }

    /// Enum oneof members: `null` leaves the member unset.
    pub fn deserialize_option<'de, E, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        E: ProtoEnum,
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionalEnumVisitor::<E>(PhantomData))
    }

    struct OptionalEnumVisitor<E>(PhantomData<E>);

    impl<'de, E: ProtoEnum> Visitor<'de> for OptionalEnumVisitor<E> {
        type Value = Option<i32>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an enum value name, number or null")
        }

        fn visit_none<DeErr: de::Error>(self) -> Result<Option<i32>, DeErr> {
            Ok(None)
        }

        fn visit_unit<DeErr: de::Error>(self) -> Result<Option<i32>, DeErr> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Option<i32>, D::Error> {
            deserialize::<E, D>(deserializer).map(Some)
        }
    }
}

/// `Option<google.protobuf.Duration>` fields.
pub mod duration {
    use super::*;

    /// Fails on durations protobuf-JSON cannot represent, so that written text
    /// always parses back to the same value.
    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => {
                check_duration(duration).map_err(<S::Error as ser::Error>::custom)?;
                serializer.serialize_str(&format_duration(duration))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|text| parse_duration(&text).map_err(de::Error::custom)).transpose()
    }
}

/// `uint64` fields, written as decimal strings.
pub mod u64_string {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(U64Visitor)
    }

    struct U64Visitor;

    impl<'de> Visitor<'de> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned 64-bit integer or its decimal string")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
            u64::try_from(value).map_err(|_| E::custom(format!("{} is negative", value)))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
            value.trim().parse().map_err(|_| E::custom(format!("`{}` is not a uint64", value)))
        }

        fn visit_unit<E: de::Error>(self) -> Result<u64, E> {
            Ok(0)
        }
    }
}

/// 32-bit integer fields and wrappers, read from a JSON number or a decimal
/// string. Written with the field type's own `Serialize`.
pub mod number {
    use super::*;

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Integer,
        D: Deserializer<'de>,
    {
        optional(deserializer).map(Option::unwrap_or_default)
    }

    /// Wrapper fields such as `google.protobuf.UInt32Value`.
    pub fn optional<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Integer,
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumberVisitor::<T>(PhantomData))
    }

    /// Integer types a [`number`](self) field can hold.
    pub trait Integer: Default + FromStr + TryFrom<i64> + TryFrom<u64> {}

    impl Integer for i32 {}
    impl Integer for u32 {}

    struct NumberVisitor<T>(PhantomData<T>);

    impl<T: Integer> NumberVisitor<T> {
        fn convert<N, E>(value: N) -> Result<Option<T>, E>
        where
            N: fmt::Display + Copy,
            T: TryFrom<N>,
            E: de::Error,
        {
            <T as TryFrom<N>>::try_from(value)
                .map(Some)
                .map_err(|_| E::custom(format!("{} is out of range", value)))
        }
    }

    impl<'de, T: Integer> Visitor<'de> for NumberVisitor<T> {
        type Value = Option<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or its decimal string")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Option<T>, E> {
            Self::convert(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Option<T>, E> {
            Self::convert(value)
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Option<T>, E> {
            if value.fract() != 0.0 || !(i64::MIN as f64..=i64::MAX as f64).contains(&value) {
                return Err(E::custom(format!("{} is not an integer", value)));
            }
            Self::convert(value as i64)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Option<T>, E> {
            value
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("`{}` is not an integer", value)))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Option<T>, E> {
            Ok(None)
        }
    }
}

/// `bytes` fields, written as standard padded base64.
pub mod base64_bytes {
    use base64::engine::general_purpose::{STANDARD, URL_SAFE};
    use base64::Engine;

    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text: Option<String> = Option::deserialize(deserializer)?;
        let Some(text) = text else { return Ok(Vec::new()) };
        STANDARD
            .decode(text.as_bytes())
            .or_else(|_| URL_SAFE.decode(text.as_bytes()))
            .map_err(|e| de::Error::custom(format!("invalid base64 bytes: {}", e)))
    }
}

/// Reject durations outside the protobuf range: nanos must stay below one
/// second, share the sign of seconds, and seconds must fit 10,000 years.
pub fn check_duration(duration: &Duration) -> Result<(), String> {
    let Duration { seconds, nanos } = *duration;
    if nanos.unsigned_abs() >= NANOS_PER_SECOND.unsigned_abs() {
        return Err(format!("duration nanos {} out of range", nanos));
    }
    if (seconds < 0 && nanos > 0) || (seconds > 0 && nanos < 0) {
        return Err(format!("duration {}s {}ns mixes signs", seconds, nanos));
    }
    if seconds.unsigned_abs() > MAX_DURATION_SECONDS.unsigned_abs() {
        return Err(format!("duration seconds {} out of range", seconds));
    }
    Ok(())
}

/// Render a duration the way protobuf-JSON does: 0, 3, 6 or 9 fractional digits.
///
/// The value must pass [`check_duration`]; out-of-range values render as text
/// that does not parse back.
pub fn format_duration(duration: &Duration) -> String {
    let negative = duration.seconds < 0 || duration.nanos < 0;
    let seconds = duration.seconds.unsigned_abs();
    let nanos = duration.nanos.unsigned_abs();
    let sign = if negative { "-" } else { "" };

    if nanos == 0 {
        format!("{}{}s", sign, seconds)
    } else if nanos % 1_000_000 == 0 {
        format!("{}{}.{:03}s", sign, seconds, nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        format!("{}{}.{:06}s", sign, seconds, nanos / 1_000)
    } else {
        format!("{}{}.{:09}s", sign, seconds, nanos)
    }
}

/// Parse a protobuf-JSON duration such as `"1.5s"` or `"-0.000001s"`.
pub fn parse_duration(text: &str) -> Result<Duration, String> {
    let body = text
        .strip_suffix('s')
        .ok_or_else(|| format!("duration `{}` must end with `s`", text))?;
    let (negative, body) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let (whole, fraction) = match body.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (body, ""),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) || fraction.len() > 9 {
        return Err(format!("invalid duration `{}`", text));
    }

    let seconds: i64 = whole.parse().map_err(|_| format!("invalid duration `{}`", text))?;
    if seconds > MAX_DURATION_SECONDS {
        return Err(format!("duration `{}` is out of range", text));
    }
    let nanos: i32 = if fraction.is_empty() {
        0
    } else {
        let scale = 10_i32.pow(9 - fraction.len() as u32);
        fraction.parse::<i32>().map_err(|_| format!("invalid duration `{}`", text))? * scale
    };
    debug_assert!(nanos < NANOS_PER_SECOND);

    if negative {
        Ok(Duration { seconds: -seconds, nanos: -nanos })
    } else {
        Ok(Duration { seconds, nanos })
    }
}
