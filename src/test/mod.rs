//! Shared geometry fixtures for unit tests.

pub(crate) mod multi;

use crate::geometry::Geometry;

/// One geometry of every encodable kind, for exhaustive round-trip loops.
pub(crate) fn one_of_each() -> Vec<Geometry> {
    vec![
        point::p0().into(),
        linestring::line0().into(),
        linestring::ls0().into(),
        linestring::ring0().into(),
        polygon::tri0().into(),
        polygon::poly0().into(),
        polygon::poly1().into(),
        multi::mp0().into(),
        multi::mls0().into(),
        multi::mpoly0().into(),
        collection::gc0().into(),
        collection::gc_empty().into(),
    ]
}
