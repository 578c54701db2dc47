//! The tree encoder: maps the geometry model onto the format-independent
//! wire tree.

use crate::error::{GeoWireError, GeoWireResult};
use crate::geometry::{Coord, Geometry, LineString, LinearRing, Point, Polygon};
use crate::wire::{GeometryTag, RingLayout, WireNode};

/// Encode one geometry as a wire node, with polygon rings laid out by `L`.
///
/// Pure: a function of the geometry alone. Arity is validated as the tree
/// is walked, and nothing reaches the output stream until the adapter
/// writes the finished node, so a failed encode leaves no partial node
/// behind.
pub(crate) fn encode_geometry<L: RingLayout>(geometry: &Geometry) -> GeoWireResult<WireNode> {
    match geometry {
        Geometry::Point(point) => encode_point(point),
        Geometry::Line(line) => Ok(WireNode::leaf(
            GeometryTag::Line,
            vec![line.start, line.end],
        )),
        Geometry::LineString(line_string) => encode_line_string(line_string),
        Geometry::LinearRing(ring) => {
            check_arity("LinearRing", 2, &ring.0)?;
            Ok(WireNode::leaf(GeometryTag::LinearRing, ring.0.clone()))
        }
        Geometry::Triangle(triangle) => Ok(WireNode::leaf(
            GeometryTag::Triangle,
            vec![triangle.0, triangle.1, triangle.2],
        )),
        Geometry::Polygon(polygon) => encode_polygon::<L>(polygon),
        Geometry::MultiPoint(multi) => {
            let children = multi
                .0
                .iter()
                .map(encode_point)
                .collect::<GeoWireResult<_>>()?;
            Ok(WireNode::parent(GeometryTag::MultiPoint, children))
        }
        Geometry::MultiLineString(multi) => {
            let children = multi
                .0
                .iter()
                .map(encode_line_string)
                .collect::<GeoWireResult<_>>()?;
            Ok(WireNode::parent(GeometryTag::MultiLineString, children))
        }
        Geometry::MultiPolygon(multi) => {
            let children = multi
                .0
                .iter()
                .map(encode_polygon::<L>)
                .collect::<GeoWireResult<_>>()?;
            Ok(WireNode::parent(GeometryTag::MultiPolygon, children))
        }
        Geometry::GeometryCollection(collection) => {
            let children = collection
                .0
                .iter()
                .map(encode_geometry::<L>)
                .collect::<GeoWireResult<_>>()?;
            Ok(WireNode::parent(GeometryTag::GeometryCollection, children))
        }
    }
}

fn encode_point(point: &Point) -> GeoWireResult<WireNode> {
    let coord = point.coord().ok_or(GeoWireError::EmptyGeometry)?;
    Ok(WireNode::leaf(GeometryTag::Point, vec![*coord]))
}

fn encode_line_string(line_string: &LineString) -> GeoWireResult<WireNode> {
    check_arity("LineString", 2, &line_string.0)?;
    Ok(WireNode::leaf(
        GeometryTag::LineString,
        line_string.0.clone(),
    ))
}

fn encode_polygon<L: RingLayout>(polygon: &Polygon) -> GeoWireResult<WireNode> {
    check_ring(polygon.exterior())?;
    for ring in polygon.interiors() {
        check_ring(ring)?;
    }
    Ok(L::polygon_node(polygon.exterior(), polygon.interiors()))
}

/// A ring used as a polygon boundary needs four coordinates and matching
/// endpoints.
fn check_ring(ring: &LinearRing) -> GeoWireResult<()> {
    check_arity("polygon ring", 4, &ring.0)?;
    if !ring.is_closed() {
        return Err(GeoWireError::UnclosedRing);
    }
    Ok(())
}

fn check_arity(kind: &'static str, min: usize, coords: &[Coord]) -> GeoWireResult<()> {
    if coords.len() < min {
        return Err(GeoWireError::InsufficientCoordinates {
            kind,
            min,
            actual: coords.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::GeometryCollection;
    use crate::test::polygon::{poly0, poly1};
    use crate::wire::{FlatRings, NestedRings};

    #[test]
    fn empty_point_is_rejected() {
        let err = encode_geometry::<FlatRings>(&Geometry::Point(Point::empty())).unwrap_err();
        assert!(matches!(err, GeoWireError::EmptyGeometry));
    }

    #[test]
    fn one_coordinate_line_string_is_rejected() {
        let geometry = Geometry::LineString(LineString(vec![Coord::new(1., 2.)]));
        let err = encode_geometry::<FlatRings>(&geometry).unwrap_err();
        assert!(matches!(
            err,
            GeoWireError::InsufficientCoordinates {
                kind: "LineString",
                min: 2,
                actual: 1,
            }
        ));
    }

    #[test]
    fn short_polygon_ring_is_rejected() {
        let ring = LinearRing(vec![Coord::new(0., 0.), Coord::new(1., 1.), Coord::new(0., 0.)]);
        let geometry = Geometry::Polygon(Polygon::new(ring, vec![]));
        let err = encode_geometry::<NestedRings>(&geometry).unwrap_err();
        assert!(matches!(
            err,
            GeoWireError::InsufficientCoordinates {
                kind: "polygon ring",
                ..
            }
        ));
    }

    #[test]
    fn open_polygon_ring_is_rejected() {
        let ring = LinearRing(vec![
            Coord::new(0., 0.),
            Coord::new(1., 0.),
            Coord::new(1., 1.),
            Coord::new(0., 1.),
        ]);
        let geometry = Geometry::Polygon(Polygon::new(ring, vec![]));
        let err = encode_geometry::<FlatRings>(&geometry).unwrap_err();
        assert!(matches!(err, GeoWireError::UnclosedRing));
    }

    #[test]
    fn flat_polygon_layout() {
        let polygon = poly1();
        let node = encode_geometry::<FlatRings>(&Geometry::Polygon(polygon.clone())).unwrap();
        assert_eq!(node.tag, GeometryTag::Polygon);
        assert_eq!(node.coords, polygon.exterior().0);
        assert_eq!(node.children.len(), polygon.interiors().len());
        for child in &node.children {
            assert_eq!(child.tag, GeometryTag::LinearRing);
        }
    }

    #[test]
    fn nested_polygon_layout() {
        let polygon = poly1();
        let node = encode_geometry::<NestedRings>(&Geometry::Polygon(polygon.clone())).unwrap();
        assert_eq!(node.tag, GeometryTag::Polygon);
        assert!(node.coords.is_empty());
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].coords, polygon.exterior().0);
        assert_eq!(node.children[1].children.len(), polygon.interiors().len());

        // a polygon without holes drops the second container entirely
        let node = encode_geometry::<NestedRings>(&Geometry::Polygon(poly0())).unwrap();
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn collections_nest() {
        let inner = GeometryCollection(vec![Geometry::Polygon(poly1())]);
        let outer = GeometryCollection(vec![
            Geometry::GeometryCollection(inner),
            Geometry::Point(Point::new(Coord::new(1., 2.))),
        ]);
        let node = encode_geometry::<FlatRings>(&Geometry::GeometryCollection(outer)).unwrap();
        assert_eq!(node.tag, GeometryTag::GeometryCollection);
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].tag, GeometryTag::GeometryCollection);
        assert_eq!(node.children[1].tag, GeometryTag::Point);
    }
}
