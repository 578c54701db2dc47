//! Shared wire vocabulary: the type-tag enumeration both formats dispatch
//! on, and the format-independent node tree the adapters translate to and
//! from their concrete representations.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{GeoWireError, GeoWireResult};
use crate::geometry::{Coord, LinearRing};

/// The geometry type tags shared by both wire formats.
///
/// The record format declares its enum symbols in this same order, so an
/// enum index there and a compact-format tag always agree. The values are
/// the compatibility surface between readers and writers and must never be
/// renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
pub enum GeometryTag {
    Point = 0,
    LineString = 1,
    LinearRing = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
    Triangle = 8,
    Line = 9,
}

impl GeometryTag {
    /// The record format's enum symbol for this tag.
    pub fn symbol(&self) -> &'static str {
        match self {
            GeometryTag::Point => "POINT",
            GeometryTag::LineString => "LINESTRING",
            GeometryTag::LinearRing => "LINEARRING",
            GeometryTag::Polygon => "POLYGON",
            GeometryTag::MultiPoint => "MULTIPOINT",
            GeometryTag::MultiLineString => "MULTILINESTRING",
            GeometryTag::MultiPolygon => "MULTIPOLYGON",
            GeometryTag::GeometryCollection => "GEOMETRYCOLLECTION",
            GeometryTag::Triangle => "TRIANGLE",
            GeometryTag::Line => "LINE",
        }
    }

    /// Map a raw wire value into the enumeration, never defaulting.
    pub(crate) fn from_raw(raw: i32) -> GeoWireResult<Self> {
        Self::try_from(raw).map_err(|_| GeoWireError::UnknownTag(raw))
    }
}

impl fmt::Display for GeometryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One serialized geometry node: a tag plus a coordinate list and a child
/// list, either possibly empty.
#[derive(Clone, Debug, PartialEq)]
pub struct WireNode {
    pub tag: GeometryTag,
    pub coords: Vec<Coord>,
    pub children: Vec<WireNode>,
}

impl WireNode {
    pub(crate) fn leaf(tag: GeometryTag, coords: Vec<Coord>) -> Self {
        Self {
            tag,
            coords,
            children: Vec::new(),
        }
    }

    pub(crate) fn parent(tag: GeometryTag, children: Vec<WireNode>) -> Self {
        Self {
            tag,
            coords: Vec::new(),
            children,
        }
    }

    /// A bare ring container. Carries the wire's default tag (0); ring
    /// containers are read positionally and their tag is ignored.
    pub(crate) fn ring(coords: Vec<Coord>) -> Self {
        Self::leaf(GeometryTag::Point, coords)
    }
}

/// How a format nests a polygon's rings. This is the one structural point
/// where the two formats diverge; everything else in the tree walk is
/// shared.
pub(crate) trait RingLayout {
    /// Lay out an already validated exterior ring and interior rings as a
    /// POLYGON node.
    fn polygon_node(exterior: &LinearRing, interiors: &[LinearRing]) -> WireNode;

    /// Pull the exterior coordinates and the interior rings' coordinates
    /// back out of a POLYGON node.
    fn polygon_rings(node: WireNode) -> GeoWireResult<(Vec<Coord>, Vec<Vec<Coord>>)>;
}

/// Record-format layout: exterior coordinates live on the polygon node
/// itself; each interior ring is a LINEARRING-tagged child.
pub(crate) struct FlatRings;

impl RingLayout for FlatRings {
    fn polygon_node(exterior: &LinearRing, interiors: &[LinearRing]) -> WireNode {
        let children = interiors
            .iter()
            .map(|ring| WireNode::leaf(GeometryTag::LinearRing, ring.0.clone()))
            .collect();
        WireNode {
            tag: GeometryTag::Polygon,
            coords: exterior.0.clone(),
            children,
        }
    }

    fn polygon_rings(node: WireNode) -> GeoWireResult<(Vec<Coord>, Vec<Vec<Coord>>)> {
        let interiors = node.children.into_iter().map(|child| child.coords).collect();
        Ok((node.coords, interiors))
    }
}

/// Compact-format layout: the polygon node has no coordinates of its own.
/// Its first child wraps the exterior coordinates; a second child exists
/// only when there are interior rings and wraps one node per ring.
pub(crate) struct NestedRings;

impl RingLayout for NestedRings {
    fn polygon_node(exterior: &LinearRing, interiors: &[LinearRing]) -> WireNode {
        let mut children = vec![WireNode::ring(exterior.0.clone())];
        if !interiors.is_empty() {
            let holes = interiors
                .iter()
                .map(|ring| WireNode::ring(ring.0.clone()))
                .collect();
            children.push(WireNode {
                tag: GeometryTag::Point,
                coords: Vec::new(),
                children: holes,
            });
        }
        WireNode::parent(GeometryTag::Polygon, children)
    }

    fn polygon_rings(node: WireNode) -> GeoWireResult<(Vec<Coord>, Vec<Vec<Coord>>)> {
        let mut children = node.children.into_iter();
        let exterior = children
            .next()
            .ok_or_else(|| GeoWireError::malformed("POLYGON node carries no ring data"))?
            .coords;
        let interiors = match children.next() {
            Some(wrapper) => wrapper.children.into_iter().map(|child| child.coords).collect(),
            None => Vec::new(),
        };
        if children.next().is_some() {
            return Err(GeoWireError::malformed(
                "POLYGON node carries more than two ring containers",
            ));
        }
        Ok((exterior, interiors))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tag_values_are_stable() {
        let expected: [(GeometryTag, i32); 10] = [
            (GeometryTag::Point, 0),
            (GeometryTag::LineString, 1),
            (GeometryTag::LinearRing, 2),
            (GeometryTag::Polygon, 3),
            (GeometryTag::MultiPoint, 4),
            (GeometryTag::MultiLineString, 5),
            (GeometryTag::MultiPolygon, 6),
            (GeometryTag::GeometryCollection, 7),
            (GeometryTag::Triangle, 8),
            (GeometryTag::Line, 9),
        ];
        for (tag, value) in expected {
            assert_eq!(i32::from(tag), value);
            assert_eq!(GeometryTag::from_raw(value).unwrap(), tag);
        }
    }

    #[test]
    fn raw_tag_outside_the_enumeration() {
        let err = GeometryTag::from_raw(99).unwrap_err();
        assert!(matches!(err, GeoWireError::UnknownTag(99)));
    }

    #[test]
    fn nested_layout_omits_the_hole_container_without_holes() {
        let exterior = LinearRing(vec![
            Coord::new(0., 0.),
            Coord::new(1., 0.),
            Coord::new(1., 1.),
            Coord::new(0., 0.),
        ]);
        let node = NestedRings::polygon_node(&exterior, &[]);
        assert_eq!(node.children.len(), 1);
        assert!(node.coords.is_empty());

        let (decoded_exterior, interiors) = NestedRings::polygon_rings(node).unwrap();
        assert_eq!(decoded_exterior, exterior.0);
        assert!(interiors.is_empty());
    }

    #[test]
    fn childless_polygon_node_is_rejected_by_nested_layout() {
        let node = WireNode::parent(GeometryTag::Polygon, Vec::new());
        assert!(matches!(
            NestedRings::polygon_rings(node),
            Err(GeoWireError::MalformedRecord(_))
        ));
    }
}
