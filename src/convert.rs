//! Conversions binding [`geo_types`] geometries to the wire model.
//!
//! z values do not survive the trip into `geo-types` (its coordinates are
//! 2-D), and a stand-alone LINEARRING comes back as a closed
//! [`geo_types::LineString`] since geo has no top-level ring type.
//! [`geo_types::Rect`] has no wire mapping; convert it to a polygon before
//! it travels.

use crate::error::{GeoWireError, GeoWireResult};
use crate::geometry::{
    Coord, Geometry, GeometryCollection, Line, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, Triangle,
};

/// Rebuild a `geo-types` geometry from the wire model.
pub fn geometry_to_geo(geometry: &Geometry) -> GeoWireResult<geo_types::Geometry<f64>> {
    Ok(match geometry {
        Geometry::Point(point) => geo_types::Geometry::Point(point_to_geo(point)?),
        Geometry::Line(line) => geo_types::Geometry::Line(geo_types::Line::new(
            coord_to_geo(&line.start),
            coord_to_geo(&line.end),
        )),
        Geometry::LineString(line_string) => {
            geo_types::Geometry::LineString(line_string_to_geo(line_string))
        }
        Geometry::LinearRing(ring) => geo_types::Geometry::LineString(geo_types::LineString(
            ring.0.iter().map(coord_to_geo).collect(),
        )),
        Geometry::Triangle(triangle) => geo_types::Geometry::Triangle(geo_types::Triangle(
            coord_to_geo(&triangle.0),
            coord_to_geo(&triangle.1),
            coord_to_geo(&triangle.2),
        )),
        Geometry::Polygon(polygon) => geo_types::Geometry::Polygon(polygon_to_geo(polygon)),
        Geometry::MultiPoint(multi) => geo_types::Geometry::MultiPoint(geo_types::MultiPoint(
            multi
                .0
                .iter()
                .map(point_to_geo)
                .collect::<GeoWireResult<_>>()?,
        )),
        Geometry::MultiLineString(multi) => geo_types::Geometry::MultiLineString(
            geo_types::MultiLineString(multi.0.iter().map(line_string_to_geo).collect()),
        ),
        Geometry::MultiPolygon(multi) => geo_types::Geometry::MultiPolygon(
            geo_types::MultiPolygon(multi.0.iter().map(polygon_to_geo).collect()),
        ),
        Geometry::GeometryCollection(collection) => geo_types::Geometry::GeometryCollection(
            geo_types::GeometryCollection(
                collection
                    .0
                    .iter()
                    .map(geometry_to_geo)
                    .collect::<GeoWireResult<_>>()?,
            ),
        ),
    })
}

/// Build the wire model from a `geo-types` geometry.
pub fn geo_to_geometry(geometry: &geo_types::Geometry<f64>) -> GeoWireResult<Geometry> {
    Ok(match geometry {
        geo_types::Geometry::Point(point) => {
            Geometry::Point(Point::new(geo_coord(&point.0)))
        }
        geo_types::Geometry::Line(line) => Geometry::Line(Line::new(
            geo_coord(&line.start),
            geo_coord(&line.end),
        )),
        geo_types::Geometry::LineString(line_string) => {
            Geometry::LineString(geo_line_string(line_string))
        }
        geo_types::Geometry::Polygon(polygon) => Geometry::Polygon(geo_polygon(polygon)),
        geo_types::Geometry::MultiPoint(multi) => Geometry::MultiPoint(MultiPoint(
            multi.0.iter().map(|point| Point::new(geo_coord(&point.0))).collect(),
        )),
        geo_types::Geometry::MultiLineString(multi) => Geometry::MultiLineString(
            MultiLineString(multi.0.iter().map(geo_line_string).collect()),
        ),
        geo_types::Geometry::MultiPolygon(multi) => {
            Geometry::MultiPolygon(MultiPolygon(multi.0.iter().map(geo_polygon).collect()))
        }
        geo_types::Geometry::GeometryCollection(collection) => Geometry::GeometryCollection(
            GeometryCollection(
                collection
                    .0
                    .iter()
                    .map(geo_to_geometry)
                    .collect::<GeoWireResult<_>>()?,
            ),
        ),
        geo_types::Geometry::Triangle(triangle) => Geometry::Triangle(Triangle(
            geo_coord(&triangle.0),
            geo_coord(&triangle.1),
            geo_coord(&triangle.2),
        )),
        geo_types::Geometry::Rect(_) => return Err(GeoWireError::UnsupportedKind("Rect")),
    })
}

fn point_to_geo(point: &Point) -> GeoWireResult<geo_types::Point<f64>> {
    let coord = point.coord().ok_or(GeoWireError::EmptyGeometry)?;
    Ok(geo_types::Point(coord_to_geo(coord)))
}

fn line_string_to_geo(line_string: &LineString) -> geo_types::LineString<f64> {
    geo_types::LineString(line_string.0.iter().map(coord_to_geo).collect())
}

fn polygon_to_geo(polygon: &Polygon) -> geo_types::Polygon<f64> {
    geo_types::Polygon::new(
        geo_types::LineString(polygon.exterior().0.iter().map(coord_to_geo).collect()),
        polygon
            .interiors()
            .iter()
            .map(|ring| geo_types::LineString(ring.0.iter().map(coord_to_geo).collect()))
            .collect(),
    )
}

fn coord_to_geo(coord: &Coord) -> geo_types::Coord<f64> {
    geo_types::Coord {
        x: coord.x,
        y: coord.y,
    }
}

fn geo_coord(coord: &geo_types::Coord<f64>) -> Coord {
    Coord::new(coord.x, coord.y)
}

fn geo_line_string(line_string: &geo_types::LineString<f64>) -> LineString {
    LineString(line_string.0.iter().map(geo_coord).collect())
}

fn geo_ring(line_string: &geo_types::LineString<f64>) -> LinearRing {
    LinearRing(line_string.0.iter().map(geo_coord).collect())
}

fn geo_polygon(polygon: &geo_types::Polygon<f64>) -> Polygon {
    Polygon::new(
        geo_ring(polygon.exterior()),
        polygon.interiors().iter().map(geo_ring).collect(),
    )
}
