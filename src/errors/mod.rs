//! # Error Handling
//!
//! Error types for meshapi, defined with `thiserror`. Every failure is local to
//! a single codec call and is returned to the caller; nothing here retries.

/// Custom result type for meshapi operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for meshapi
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Malformed binary input, or a packed payload of the wrong type
    #[error("Decode error: {context}")]
    Decode {
        context: String,
        #[source]
        source: Option<prost::DecodeError>,
    },

    /// Malformed JSON input or a value the JSON codec cannot represent
    #[error("JSON error: {context}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed YAML input or a value the YAML codec cannot represent
    #[error("YAML error: {context}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// An in-memory value has no valid text form, such as an out-of-range
    /// duration
    #[error("Encode error: {0}")]
    Encode(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a decode error without an underlying protobuf error
    pub fn decode<S: Into<String>>(context: S) -> Self {
        Self::Decode { context: context.into(), source: None }
    }

    /// Create a decode error wrapping a protobuf decode failure
    pub fn decode_with_source<S: Into<String>>(context: S, source: prost::DecodeError) -> Self {
        Self::Decode { context: context.into(), source: Some(source) }
    }

    /// Create a JSON error with context
    pub fn json<S: Into<String>>(context: S, source: serde_json::Error) -> Self {
        Self::Json { context: context.into(), source }
    }

    /// Create a YAML error with context
    pub fn yaml<S: Into<String>>(context: S, source: serde_yaml::Error) -> Self {
        Self::Yaml { context: context.into(), source }
    }

    /// Create a new encode error
    pub fn encode<S: Into<String>>(message: S) -> Self {
        Self::Encode(message.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error was caused by malformed input rather than by the value
    /// being written.
    pub fn is_decode(&self) -> bool {
        match self {
            Error::Decode { .. } => true,
            Error::Json { source, .. } => matches!(
                source.classify(),
                serde_json::error::Category::Syntax
                    | serde_json::error::Category::Data
                    | serde_json::error::Category::Eof
            ),
            Error::Yaml { .. } => true,
            _ => false,
        }
    }
}

impl From<prost::DecodeError> for Error {
    fn from(error: prost::DecodeError) -> Self {
        Self::decode_with_source("protobuf decode failed", error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::json("JSON serialization failed", error)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Self::yaml("YAML serialization failed", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_error_creation() {
        let error = Error::config("Test configuration error");
        assert!(matches!(error, Error::Config(_)));
        assert_eq!(error.to_string(), "Configuration error: Test configuration error");
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let source = prost_types::Duration::decode(&[0x08][..]).unwrap_err();
        let error = Error::decode_with_source("bad duration", source);
        assert_eq!(error.to_string(), "Decode error: bad duration");
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.is_decode());
    }

    #[test]
    fn test_error_conversions() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json { .. }));
        assert!(error.is_decode());

        let error = Error::encode("duration out of range");
        assert_eq!(error.to_string(), "Encode error: duration out of range");
        assert!(!error.is_decode());

        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
        assert!(!error.is_decode());
    }
}
