//! Wire codecs for tree-shaped vector geometries.
//!
//! One geometry model, two independent encodings: a self-describing record
//! stream ([`records`]) whose schema travels at the head of the stream and
//! which appends many records to one stream, and a compact tag/length
//! message format ([`compact`]) with an optional length-delimited streaming
//! mode. Same-format round trips reproduce a geometry exactly — kind,
//! coordinate order, ring closure, and hole order included. The two
//! formats deliberately differ in how polygon rings nest and are not
//! interchangeable on the wire.
//!
//! ```
//! use geowire::geometry::{Coord, Geometry, LinearRing, Point, Polygon};
//! use geowire::records::{RecordReader, RecordWriter};
//!
//! # fn main() -> geowire::GeoWireResult<()> {
//! let ring = LinearRing(vec![
//!     Coord::new(0., 0.),
//!     Coord::new(4., 0.),
//!     Coord::new(4., 4.),
//!     Coord::new(0., 0.),
//! ]);
//!
//! let mut writer = RecordWriter::new(Vec::new());
//! writer.write(&Geometry::Point(Point::new(Coord::new(1., 2.))))?;
//! writer.write(&Geometry::Polygon(Polygon::new(ring, vec![])))?;
//! let bytes = writer.finish()?;
//!
//! let mut reader = RecordReader::new(bytes.as_slice())?;
//! assert!(matches!(reader.read_next()?, Some(Geometry::Point(_))));
//! assert!(matches!(reader.read_next()?, Some(Geometry::Polygon(_))));
//! assert!(reader.read_next()?.is_none());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod compact;
pub mod convert;
mod decode;
mod encode;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod records;
#[cfg(test)]
pub(crate) mod test;
pub mod wire;

pub use error::{GeoWireError, GeoWireResult};
pub use factory::{
    open_reader, open_writer, GeoModel, GeometryReader, GeometryWriter, ModelBinding,
    ModelVariant, TreeModel, WireFormat,
};
pub use geometry::{Coord, Geometry};
pub use wire::GeometryTag;
