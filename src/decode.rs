//! The tree decoder: rebuilds the geometry model from the
//! format-independent wire tree, the inverse of [`crate::encode`].

use crate::error::{GeoWireError, GeoWireResult};
use crate::geometry::{
    Coord, Geometry, GeometryCollection, Line, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, Triangle,
};
use crate::wire::{GeometryTag, RingLayout, WireNode};

/// Decode one wire node, with polygon rings unwrapped per `L`.
///
/// Coordinate and child order is significant and preserved exactly;
/// nothing is re-sorted or deduplicated. A failed decode returns no
/// partially built geometry.
pub(crate) fn decode_geometry<L: RingLayout>(node: WireNode) -> GeoWireResult<Geometry> {
    match node.tag {
        GeometryTag::Point => decode_point(node).map(Geometry::Point),
        GeometryTag::Line => {
            let mut coords = take_coords(node, 2, "LINE")?;
            let end = coords.pop().expect("arity checked");
            let start = coords.pop().expect("arity checked");
            Ok(Geometry::Line(Line::new(start, end)))
        }
        GeometryTag::LineString => decode_line_string(node).map(Geometry::LineString),
        GeometryTag::LinearRing => {
            let node = checked_coords(node, 2, "LINEARRING")?;
            Ok(Geometry::LinearRing(LinearRing(node.coords)))
        }
        GeometryTag::Triangle => {
            let mut coords = take_coords(node, 3, "TRIANGLE")?;
            let c2 = coords.pop().expect("arity checked");
            let c1 = coords.pop().expect("arity checked");
            let c0 = coords.pop().expect("arity checked");
            Ok(Geometry::Triangle(Triangle(c0, c1, c2)))
        }
        GeometryTag::Polygon => decode_polygon::<L>(node).map(Geometry::Polygon),
        GeometryTag::MultiPoint => {
            let points = decode_children(node, GeometryTag::Point, decode_point)?;
            Ok(Geometry::MultiPoint(MultiPoint(points)))
        }
        GeometryTag::MultiLineString => {
            let strings = decode_children(node, GeometryTag::LineString, decode_line_string)?;
            Ok(Geometry::MultiLineString(MultiLineString(strings)))
        }
        GeometryTag::MultiPolygon => {
            let polygons = decode_children(node, GeometryTag::Polygon, decode_polygon::<L>)?;
            Ok(Geometry::MultiPolygon(MultiPolygon(polygons)))
        }
        GeometryTag::GeometryCollection => {
            let members = node
                .children
                .into_iter()
                .map(decode_geometry::<L>)
                .collect::<GeoWireResult<_>>()?;
            Ok(Geometry::GeometryCollection(GeometryCollection(members)))
        }
    }
}

fn decode_point(node: WireNode) -> GeoWireResult<Point> {
    let coord = node
        .coords
        .into_iter()
        .next()
        .ok_or_else(|| GeoWireError::malformed("POINT record carries no coordinates"))?;
    Ok(Point::new(coord))
}

fn decode_line_string(node: WireNode) -> GeoWireResult<LineString> {
    let node = checked_coords(node, 2, "LINESTRING")?;
    Ok(LineString(node.coords))
}

fn decode_polygon<L: RingLayout>(node: WireNode) -> GeoWireResult<Polygon> {
    let (exterior, interiors) = L::polygon_rings(node)?;
    let exterior = decode_ring(exterior)?;
    let interiors = interiors
        .into_iter()
        .map(decode_ring)
        .collect::<GeoWireResult<_>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn decode_ring(coords: Vec<Coord>) -> GeoWireResult<LinearRing> {
    if coords.len() < 4 {
        return Err(GeoWireError::malformed(format!(
            "polygon ring needs at least 4 coordinates, got {}",
            coords.len()
        )));
    }
    let ring = LinearRing(coords);
    if !ring.is_closed() {
        return Err(GeoWireError::malformed("polygon ring is not closed"));
    }
    Ok(ring)
}

/// Decode a homogeneous collection's children, insisting on the child tag.
fn decode_children<T>(
    node: WireNode,
    expected: GeometryTag,
    decode: impl Fn(WireNode) -> GeoWireResult<T>,
) -> GeoWireResult<Vec<T>> {
    let parent = node.tag;
    node.children
        .into_iter()
        .map(|child| {
            if child.tag != expected {
                return Err(GeoWireError::malformed(format!(
                    "{parent} child must be {expected}, got {}",
                    child.tag
                )));
            }
            decode(child)
        })
        .collect()
}

fn take_coords(node: WireNode, count: usize, kind: &'static str) -> GeoWireResult<Vec<Coord>> {
    let node = checked_coords(node, count, kind)?;
    let mut coords = node.coords;
    coords.truncate(count);
    Ok(coords)
}

fn checked_coords(node: WireNode, min: usize, kind: &'static str) -> GeoWireResult<WireNode> {
    if node.coords.len() < min {
        return Err(GeoWireError::malformed(format!(
            "{kind} record needs at least {min} coordinates, got {}",
            node.coords.len()
        )));
    }
    Ok(node)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::encode::encode_geometry;
    use crate::test::collection::gc0;
    use crate::wire::{FlatRings, NestedRings};

    #[test]
    fn point_without_coordinates_is_malformed() {
        let node = WireNode::parent(GeometryTag::Point, Vec::new());
        let err = decode_geometry::<FlatRings>(node).unwrap_err();
        assert!(matches!(err, GeoWireError::MalformedRecord(_)));
    }

    #[test]
    fn multi_polygon_child_of_the_wrong_kind_is_malformed() {
        let child = WireNode::leaf(GeometryTag::Point, vec![Coord::new(1., 2.)]);
        let node = WireNode::parent(GeometryTag::MultiPolygon, vec![child]);
        let err = decode_geometry::<NestedRings>(node).unwrap_err();
        match err {
            GeoWireError::MalformedRecord(msg) => {
                assert!(msg.contains("MULTIPOLYGON"), "{msg}");
                assert!(msg.contains("POLYGON"), "{msg}");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn unclosed_wire_ring_is_malformed() {
        let node = WireNode {
            tag: GeometryTag::Polygon,
            coords: vec![
                Coord::new(0., 0.),
                Coord::new(1., 0.),
                Coord::new(1., 1.),
                Coord::new(0., 1.),
            ],
            children: Vec::new(),
        };
        let err = decode_geometry::<FlatRings>(node).unwrap_err();
        assert!(matches!(err, GeoWireError::MalformedRecord(_)));
    }

    #[test]
    fn collection_round_trips_at_node_level() {
        let geometry = Geometry::GeometryCollection(gc0());
        let node = encode_geometry::<NestedRings>(&geometry).unwrap();
        assert_eq!(decode_geometry::<NestedRings>(node).unwrap(), geometry);
    }
}
