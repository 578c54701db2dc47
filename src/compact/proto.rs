//! Hand-written prost messages for the compact format.
//!
//! The wire contract is two small messages, so the structs are written out
//! here rather than generated. `type` stays a raw int32 so that values
//! outside the enumeration surface as typed errors instead of being
//! defaulted away.

/// One geometry message: a type tag, repeated coordinates, repeated
/// nested geometries.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeometryProto {
    #[prost(int32, tag = "1")]
    pub r#type: i32,
    #[prost(message, repeated, tag = "2")]
    pub coordinates: Vec<CoordinateProto>,
    #[prost(message, repeated, tag = "3")]
    pub geometries: Vec<GeometryProto>,
}

/// One position: x, y, and a z that is NaN when absent.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CoordinateProto {
    #[prost(double, tag = "1")]
    pub x: f64,
    #[prost(double, tag = "2")]
    pub y: f64,
    #[prost(double, tag = "3")]
    pub z: f64,
}
