/// A single 2.5-D position.
///
/// A missing `z` travels on the wire as NaN, and a NaN `z` read off the
/// wire comes back as `None`, so 2-D coordinates survive a round trip
/// through either format unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coord {
    /// A 2-D coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// A 3-D coordinate.
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Whether this coordinate carries a z value.
    pub fn is_3d(&self) -> bool {
        self.z.is_some()
    }

    /// The value written to a wire z field.
    pub(crate) fn wire_z(&self) -> f64 {
        self.z.unwrap_or(f64::NAN)
    }

    /// Rebuild a coordinate from the three wire fields.
    pub(crate) fn from_wire(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: (!z.is_nan()).then_some(z),
        }
    }
}
