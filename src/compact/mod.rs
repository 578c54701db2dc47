//! The compact-format adapter: one schema-less tag/length message per
//! geometry.
//!
//! [`encode_to`] and [`decode_from`] move exactly one message each. The
//! length-delimited session types pack several consecutive messages into
//! one stream, each prefixed by its varint byte length. On the wire a
//! polygon nests its rings one level deeper than the record format does:
//! the node's first child wraps the exterior ring, and a second child —
//! present only when there are holes — wraps one node per interior ring.

pub(crate) mod proto;

use std::io::{Read, Write};

use prost::Message;
use tracing::debug;

use crate::decode::decode_geometry;
use crate::encode::encode_geometry;
use crate::error::{GeoWireError, GeoWireResult};
use crate::geometry::{Coord, Geometry};
use crate::wire::{GeometryTag, NestedRings, WireNode};

use proto::{CoordinateProto, GeometryProto};

fn node_to_proto(node: &WireNode) -> GeometryProto {
    GeometryProto {
        r#type: node.tag.into(),
        coordinates: node.coords.iter().map(coord_to_proto).collect(),
        geometries: node.children.iter().map(node_to_proto).collect(),
    }
}

fn coord_to_proto(coord: &Coord) -> CoordinateProto {
    CoordinateProto {
        x: coord.x,
        y: coord.y,
        z: coord.wire_z(),
    }
}

fn proto_to_node(proto: GeometryProto) -> GeoWireResult<WireNode> {
    Ok(WireNode {
        tag: GeometryTag::from_raw(proto.r#type)?,
        coords: proto
            .coordinates
            .iter()
            .map(|c| Coord::from_wire(c.x, c.y, c.z))
            .collect(),
        children: proto
            .geometries
            .into_iter()
            .map(proto_to_node)
            .collect::<GeoWireResult<_>>()?,
    })
}

/// Write exactly one un-delimited message to `out`.
pub fn encode_to<W: Write>(mut out: W, geometry: &Geometry) -> GeoWireResult<()> {
    let node = encode_geometry::<NestedRings>(geometry)?;
    out.write_all(&node_to_proto(&node).encode_to_vec())?;
    Ok(())
}

/// Read `input` to its end and decode exactly one message.
pub fn decode_from<R: Read>(mut input: R) -> GeoWireResult<Geometry> {
    let mut buf = Vec::new();
    input.read_to_end(&mut buf)?;
    let proto = GeometryProto::decode(buf.as_slice())?;
    decode_geometry::<NestedRings>(proto_to_node(proto)?)
}

/// Appends length-delimited messages to one output stream.
pub struct DelimitedWriter<W: Write> {
    out: W,
    messages: u64,
}

impl<W: Write> DelimitedWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, messages: 0 }
    }

    /// Encode one geometry and append it, prefixed by its byte length.
    pub fn write(&mut self, geometry: &Geometry) -> GeoWireResult<()> {
        let node = encode_geometry::<NestedRings>(geometry)?;
        self.out
            .write_all(&node_to_proto(&node).encode_length_delimited_to_vec())?;
        self.messages += 1;
        Ok(())
    }

    /// Flush and release the underlying stream.
    pub fn finish(mut self) -> GeoWireResult<W> {
        self.out.flush()?;
        debug!(messages = self.messages, "closing delimited message stream");
        Ok(self.out)
    }
}

/// Pulls length-delimited messages off one input stream.
///
/// Each call consumes precisely one message's bytes, leaving the stream
/// positioned at the next length prefix. Also an [`Iterator`] over
/// `GeoWireResult<Geometry>`.
pub struct DelimitedReader<R: Read> {
    input: R,
}

impl<R: Read> DelimitedReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Pull the next message, or `None` on a clean end of stream at a
    /// message boundary.
    pub fn read_next(&mut self) -> GeoWireResult<Option<Geometry>> {
        let Some(len) = read_length_prefix(&mut self.input)? else {
            return Ok(None);
        };
        let mut buf = vec![0u8; len];
        self.input.read_exact(&mut buf)?;
        let proto = GeometryProto::decode(buf.as_slice())?;
        decode_geometry::<NestedRings>(proto_to_node(proto)?).map(Some)
    }
}

impl<R: Read> Iterator for DelimitedReader<R> {
    type Item = GeoWireResult<Geometry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

/// Base-128 varint length prefix. `None` on end of stream before the
/// first byte of a prefix.
fn read_length_prefix<R: Read>(input: &mut R) -> GeoWireResult<Option<usize>> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    let mut byte = [0u8; 1];
    loop {
        if input.read(&mut byte)? == 0 {
            if shift == 0 {
                return Ok(None);
            }
            return Err(GeoWireError::malformed(
                "length prefix cut short by end of stream",
            ));
        }
        value |= u64::from(byte[0] & 0x7f) << shift;
        if byte[0] & 0x80 == 0 {
            break;
        }
        shift += 7;
        if shift >= 64 {
            return Err(GeoWireError::malformed("length prefix does not terminate"));
        }
    }
    usize::try_from(value)
        .map(Some)
        .map_err(|_| GeoWireError::malformed("length prefix overflows this platform"))
}
