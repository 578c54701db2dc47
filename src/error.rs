//! Defines [`GeoWireError`], representing all errors returned by this crate.

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoWireError {
    /// The encoder or a model conversion was handed a geometry kind that
    /// has no mapping onto the wire.
    #[error("unsupported geometry kind: {0}")]
    UnsupportedKind(&'static str),

    /// A point with no coordinate data.
    #[error("no coordinate data available")]
    EmptyGeometry,

    /// A geometry with fewer coordinates than its kind requires.
    #[error("{kind} requires at least {min} coordinates, got {actual}")]
    InsufficientCoordinates {
        /// The offending kind.
        kind: &'static str,
        /// The minimum the kind requires.
        min: usize,
        /// How many coordinates were actually present.
        actual: usize,
    },

    /// A polygon ring whose first and last coordinates differ.
    #[error("polygon ring is not closed")]
    UnclosedRing,

    /// The decoder encountered a structurally invalid wire node.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The decoder encountered a type tag outside the known enumeration.
    /// Carries the raw tag value.
    #[error("unknown geometry type tag: {0}")]
    UnknownTag(i32),

    /// The factory was asked for a codec it does not provide.
    #[error("unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// [apache_avro::Error]
    #[error(transparent)]
    Avro(#[from] apache_avro::Error),

    /// [prost::DecodeError]
    #[error(transparent)]
    ProtobufDecode(#[from] prost::DecodeError),

    /// [std::io::Error]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GeoWireError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }
}

/// Crate-specific result type.
pub type GeoWireResult<T> = std::result::Result<T, GeoWireError>;
