//! The embedded schema for the record format.

use std::sync::LazyLock;

use apache_avro::Schema;

/// The `Geometry` record definition: a type tag, an ordered coordinate
/// list, and an ordered list of nested geometry records. Enum symbols are
/// declared in [`crate::wire::GeometryTag`] order so enum indices match
/// the compact format's tag values.
const GEOMETRY_SCHEMA_JSON: &str = r#"
{
  "type": "record",
  "name": "Geometry",
  "fields": [
    {
      "name": "type",
      "type": {
        "type": "enum",
        "name": "Type",
        "symbols": [
          "POINT", "LINESTRING", "LINEARRING", "POLYGON", "MULTIPOINT",
          "MULTILINESTRING", "MULTIPOLYGON", "GEOMETRYCOLLECTION",
          "TRIANGLE", "LINE"
        ]
      }
    },
    {
      "name": "coordinates",
      "type": {
        "type": "array",
        "items": {
          "type": "record",
          "name": "Coordinate",
          "fields": [
            { "name": "x", "type": "double" },
            { "name": "y", "type": "double" },
            { "name": "z", "type": "double" }
          ]
        }
      }
    },
    {
      "name": "geometries",
      "type": { "type": "array", "items": "Geometry" }
    }
  ]
}
"#;

/// The schema instance every writer binds to.
pub(crate) fn geometry_schema() -> &'static Schema {
    static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
        Schema::parse_str(GEOMETRY_SCHEMA_JSON).expect("embedded geometry schema is valid")
    });
    &SCHEMA
}
