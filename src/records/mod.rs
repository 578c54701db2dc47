//! The record-format adapter: geometries as records in a self-describing
//! stream.
//!
//! The schema travels at the head of the stream; any number of records may
//! be appended by one writer and later read back, one at a time, without
//! re-supplying the schema. On the wire every node carries both a
//! coordinate list and a child list, and a polygon keeps its exterior
//! coordinates on the node itself with interior rings as LINEARRING
//! children.

mod schema;

use std::io::{Chain, Cursor, Read, Write};

use apache_avro::types::Value;
use apache_avro::{Reader as AvroReader, Writer as AvroWriter};
use tracing::debug;

use crate::decode::decode_geometry;
use crate::encode::encode_geometry;
use crate::error::{GeoWireError, GeoWireResult};
use crate::geometry::{Coord, Geometry};
use crate::wire::{FlatRings, GeometryTag, WireNode};

use schema::geometry_schema;

fn node_to_value(node: &WireNode) -> Value {
    let tag_index: i32 = node.tag.into();
    Value::Record(vec![
        (
            "type".to_owned(),
            Value::Enum(tag_index as u32, node.tag.symbol().to_owned()),
        ),
        (
            "coordinates".to_owned(),
            Value::Array(node.coords.iter().map(coord_to_value).collect()),
        ),
        (
            "geometries".to_owned(),
            Value::Array(node.children.iter().map(node_to_value).collect()),
        ),
    ])
}

fn coord_to_value(coord: &Coord) -> Value {
    Value::Record(vec![
        ("x".to_owned(), Value::Double(coord.x)),
        ("y".to_owned(), Value::Double(coord.y)),
        ("z".to_owned(), Value::Double(coord.wire_z())),
    ])
}

fn value_to_node(value: Value) -> GeoWireResult<WireNode> {
    let Value::Record(fields) = value else {
        return Err(GeoWireError::malformed("geometry record is not a record"));
    };
    let mut tag = None;
    let mut coords = Vec::new();
    let mut children = Vec::new();
    for (name, field) in fields {
        match name.as_str() {
            "type" => tag = Some(tag_from_value(field)?),
            "coordinates" => coords = coords_from_value(field)?,
            "geometries" => children = children_from_value(field)?,
            _ => {}
        }
    }
    let tag = tag.ok_or_else(|| GeoWireError::malformed("geometry record has no type field"))?;
    Ok(WireNode {
        tag,
        coords,
        children,
    })
}

fn tag_from_value(value: Value) -> GeoWireResult<GeometryTag> {
    match value {
        Value::Enum(index, _) => GeometryTag::from_raw(index as i32),
        other => Err(GeoWireError::malformed(format!(
            "type field is not an enum: {other:?}"
        ))),
    }
}

fn coords_from_value(value: Value) -> GeoWireResult<Vec<Coord>> {
    let Value::Array(items) = value else {
        return Err(GeoWireError::malformed("coordinates field is not an array"));
    };
    items.into_iter().map(coord_from_value).collect()
}

fn coord_from_value(value: Value) -> GeoWireResult<Coord> {
    let Value::Record(fields) = value else {
        return Err(GeoWireError::malformed("coordinate is not a record"));
    };
    let (mut x, mut y, mut z) = (f64::NAN, f64::NAN, f64::NAN);
    for (name, field) in fields {
        let Value::Double(v) = field else {
            return Err(GeoWireError::malformed(format!(
                "coordinate field {name} is not a double"
            )));
        };
        match name.as_str() {
            "x" => x = v,
            "y" => y = v,
            "z" => z = v,
            _ => {}
        }
    }
    Ok(Coord::from_wire(x, y, z))
}

fn children_from_value(value: Value) -> GeoWireResult<Vec<WireNode>> {
    let Value::Array(items) = value else {
        return Err(GeoWireError::malformed("geometries field is not an array"));
    };
    items.into_iter().map(value_to_node).collect()
}

/// Appends geometry records to one output stream.
///
/// One writer owns one stream and one schema instance. Records become
/// visible to readers once flushed; [`RecordWriter::finish`] flushes and
/// hands the stream back. Dropping a writer releases the stream without
/// flushing the buffered tail, like any buffered writer.
pub struct RecordWriter<W: Write> {
    inner: AvroWriter<'static, W>,
    records: u64,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            inner: AvroWriter::new(geometry_schema(), out),
            records: 0,
        }
    }

    /// Encode one geometry and append it as a record.
    pub fn write(&mut self, geometry: &Geometry) -> GeoWireResult<()> {
        let node = encode_geometry::<FlatRings>(geometry)?;
        self.inner.append(node_to_value(&node))?;
        self.records += 1;
        Ok(())
    }

    /// Flush buffered records to the underlying stream.
    pub fn flush(&mut self) -> GeoWireResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and release the underlying stream.
    pub fn finish(self) -> GeoWireResult<W> {
        debug!(records = self.records, "closing record stream");
        Ok(self.inner.into_inner()?)
    }
}

type ChainedInput<R> = Chain<Cursor<[u8; 1]>, R>;

enum ReaderState<R: Read> {
    /// The input held no bytes at all; there is nothing to read.
    Empty,
    Open(Box<AvroReader<'static, ChainedInput<R>>>),
}

/// Pulls geometry records off one input stream until end of stream.
///
/// Also an [`Iterator`] over `GeoWireResult<Geometry>`. The stream is
/// released when the reader drops.
pub struct RecordReader<R: Read> {
    state: ReaderState<R>,
    peeked: Option<GeoWireResult<Geometry>>,
}

impl<R: Read> RecordReader<R> {
    /// Open a reader over a record stream. A zero-byte input reads as an
    /// empty stream rather than a header error.
    pub fn new(mut input: R) -> GeoWireResult<Self> {
        let mut first = [0u8; 1];
        let state = if input.read(&mut first)? == 0 {
            ReaderState::Empty
        } else {
            let chained = Cursor::new(first).chain(input);
            ReaderState::Open(Box::new(AvroReader::new(chained)?))
        };
        Ok(Self {
            state,
            peeked: None,
        })
    }

    /// Pull the next record, or `None` at end of stream.
    pub fn read_next(&mut self) -> GeoWireResult<Option<Geometry>> {
        if let Some(peeked) = self.peeked.take() {
            return peeked.map(Some);
        }
        match self.pull() {
            Some(result) => result.map(Some),
            None => Ok(None),
        }
    }

    /// Whether another record (or a pending error) is waiting on the
    /// stream.
    pub fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            self.peeked = self.pull();
        }
        self.peeked.is_some()
    }

    fn pull(&mut self) -> Option<GeoWireResult<Geometry>> {
        let ReaderState::Open(reader) = &mut self.state else {
            return None;
        };
        let value = reader.next()?;
        Some(
            value
                .map_err(GeoWireError::from)
                .and_then(value_to_node)
                .and_then(decode_geometry::<FlatRings>),
        )
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = GeoWireResult<Geometry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{GeometryCollection, LinearRing, MultiPolygon, Polygon};
    use crate::test::collection::gc0;
    use crate::test::polygon::{exterior, hole, poly2};
    use crate::test::{one_of_each, point};

    fn round_trip(geometry: &Geometry) -> Geometry {
        let mut writer = RecordWriter::new(Vec::new());
        writer.write(geometry).unwrap();
        let bytes = writer.finish().unwrap();
        let mut reader = RecordReader::new(bytes.as_slice()).unwrap();
        let decoded = reader.read_next().unwrap().unwrap();
        assert!(reader.read_next().unwrap().is_none());
        decoded
    }

    #[test]
    fn every_kind_round_trips() {
        for geometry in one_of_each() {
            assert_eq!(round_trip(&geometry), geometry, "{}", geometry.kind());
        }
    }

    #[test]
    fn many_records_one_stream() {
        let geometries = one_of_each();
        let mut writer = RecordWriter::new(Vec::new());
        for geometry in &geometries {
            writer.write(geometry).unwrap();
        }
        let bytes = writer.finish().unwrap();

        let reader = RecordReader::new(bytes.as_slice()).unwrap();
        let decoded: Vec<_> = reader.collect::<GeoWireResult<_>>().unwrap();
        assert_eq!(decoded, geometries);
    }

    #[test]
    fn collection_record_stream() {
        let collection = gc0();
        let mut writer = RecordWriter::new(Vec::new());
        writer
            .write(&Geometry::GeometryCollection(collection.clone()))
            .unwrap();
        let bytes = writer.finish().unwrap();

        let mut reader = RecordReader::new(bytes.as_slice()).unwrap();
        assert!(reader.has_next());
        let Some(Geometry::GeometryCollection(decoded)) = reader.read_next().unwrap() else {
            panic!("expected a geometry collection record");
        };
        assert_eq!(decoded.0.len(), 2);
        assert!(matches!(decoded.0[0], Geometry::Point(_)));
        assert!(matches!(decoded.0[1], Geometry::Polygon(_)));
        assert_eq!(decoded, collection);
        assert!(!reader.has_next());
    }

    #[test]
    fn hole_order_is_preserved() {
        let polygon = poly2();
        let Geometry::Polygon(decoded) = round_trip(&Geometry::Polygon(polygon.clone())) else {
            panic!("expected a polygon");
        };
        assert_eq!(decoded.interiors(), polygon.interiors());
        assert_eq!(decoded.interiors()[0], hole());
    }

    #[test]
    fn closed_ring_stays_closed() {
        let ring = exterior();
        let Geometry::Polygon(decoded) =
            round_trip(&Geometry::Polygon(Polygon::new(ring, vec![])))
        else {
            panic!("expected a polygon");
        };
        let coords = &decoded.exterior().0;
        assert_eq!(coords.first(), coords.last());
    }

    #[test]
    fn empty_collections_round_trip() {
        let empty_collection = Geometry::GeometryCollection(GeometryCollection(vec![]));
        assert_eq!(round_trip(&empty_collection), empty_collection);

        let empty_multi = Geometry::MultiPolygon(MultiPolygon(vec![]));
        assert_eq!(round_trip(&empty_multi), empty_multi);
    }

    #[test]
    fn zero_byte_stream_is_empty() {
        let mut reader = RecordReader::new([].as_slice()).unwrap();
        assert!(!reader.has_next());
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn header_only_stream_is_empty() {
        let writer = RecordWriter::new(Vec::new());
        let bytes = writer.finish().unwrap();
        assert!(!bytes.is_empty());

        let mut reader = RecordReader::new(bytes.as_slice()).unwrap();
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn encode_failure_keeps_the_stream_usable() {
        let mut writer = RecordWriter::new(Vec::new());
        let err = writer
            .write(&Geometry::Point(crate::geometry::Point::empty()))
            .unwrap_err();
        assert!(matches!(err, GeoWireError::EmptyGeometry));

        writer.write(&point::p0().into()).unwrap();
        let bytes = writer.finish().unwrap();
        let mut reader = RecordReader::new(bytes.as_slice()).unwrap();
        assert_eq!(
            reader.read_next().unwrap(),
            Some(Geometry::Point(point::p0()))
        );
    }

    #[test]
    fn unknown_enum_index_is_rejected() {
        let record = Value::Record(vec![
            ("type".to_owned(), Value::Enum(99, "RHOMBUS".to_owned())),
            ("coordinates".to_owned(), Value::Array(vec![])),
            ("geometries".to_owned(), Value::Array(vec![])),
        ]);
        let err = value_to_node(record).unwrap_err();
        assert!(matches!(err, GeoWireError::UnknownTag(99)));
    }

    #[test]
    fn ring_with_mismatched_endpoints_is_rejected_before_the_stream() {
        let open = LinearRing(vec![
            Coord::new(0., 0.),
            Coord::new(1., 0.),
            Coord::new(1., 1.),
            Coord::new(0., 1.),
        ]);
        let mut writer = RecordWriter::new(Vec::new());
        let err = writer
            .write(&Geometry::Polygon(Polygon::new(open, vec![])))
            .unwrap_err();
        assert!(matches!(err, GeoWireError::UnclosedRing));
    }
}
