use crate::geometry::{MultiLineString, MultiPoint, MultiPolygon};
use crate::test::{linestring, point, polygon};

pub(crate) fn mp0() -> MultiPoint {
    MultiPoint(vec![point::p0(), point::p1(), point::p2()])
}

pub(crate) fn mls0() -> MultiLineString {
    MultiLineString(vec![linestring::ls0(), linestring::ls1()])
}

pub(crate) fn mpoly0() -> MultiPolygon {
    MultiPolygon(vec![polygon::poly0(), polygon::poly1()])
}
