//! Codec selection: binds a wire format and a geometry-library variant to
//! a writer or reader over one stream, so call sites stay decoupled from
//! the concrete adapter types.

use std::borrow::Cow;
use std::fmt;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::str::FromStr;

use crate::compact::{DelimitedReader, DelimitedWriter};
use crate::convert;
use crate::error::{GeoWireError, GeoWireResult};
use crate::geometry::Geometry;
use crate::records::{RecordReader, RecordWriter};

/// The two wire encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireFormat {
    /// Self-describing record stream; the schema travels with the data.
    Records,
    /// Schema-less tag/length messages, length-delimited on a stream.
    Compact,
}

impl FromStr for WireFormat {
    type Err = GeoWireError;

    fn from_str(s: &str) -> GeoWireResult<Self> {
        match s {
            "records" => Ok(Self::Records),
            "compact" => Ok(Self::Compact),
            other => Err(GeoWireError::UnsupportedCodec(other.to_owned())),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WireFormat::Records => "records",
            WireFormat::Compact => "compact",
        })
    }
}

/// The geometry libraries a codec can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelVariant {
    /// This crate's own geometry tree.
    Tree,
    /// `geo-types` geometries.
    Geo,
}

impl FromStr for ModelVariant {
    type Err = GeoWireError;

    fn from_str(s: &str) -> GeoWireResult<Self> {
        match s {
            "tree" => Ok(Self::Tree),
            "geo" => Ok(Self::Geo),
            other => Err(GeoWireError::UnsupportedCodec(other.to_owned())),
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModelVariant::Tree => "tree",
            ModelVariant::Geo => "geo",
        })
    }
}

/// Ties one geometry library's types into the codec.
///
/// The codec itself only ever walks [`Geometry`]; a binding supplies the
/// conversions at the seam, so adding a library means one new impl rather
/// than a parallel adapter set per format.
pub trait ModelBinding {
    /// The library's geometry type.
    type Geometry;

    /// Borrow or build the wire model for one of the library's geometries.
    fn as_tree(geometry: &Self::Geometry) -> GeoWireResult<Cow<'_, Geometry>>;

    /// Rebuild one of the library's geometries from the wire model.
    fn from_tree(geometry: Geometry) -> GeoWireResult<Self::Geometry>;
}

/// Binds this crate's own geometry tree; conversion-free.
pub struct TreeModel;

impl ModelBinding for TreeModel {
    type Geometry = Geometry;

    fn as_tree(geometry: &Geometry) -> GeoWireResult<Cow<'_, Geometry>> {
        Ok(Cow::Borrowed(geometry))
    }

    fn from_tree(geometry: Geometry) -> GeoWireResult<Geometry> {
        Ok(geometry)
    }
}

/// Binds `geo-types` geometries via [`crate::convert`].
pub struct GeoModel;

impl ModelBinding for GeoModel {
    type Geometry = geo_types::Geometry<f64>;

    fn as_tree(geometry: &geo_types::Geometry<f64>) -> GeoWireResult<Cow<'_, Geometry>> {
        convert::geo_to_geometry(geometry).map(Cow::Owned)
    }

    fn from_tree(geometry: Geometry) -> GeoWireResult<geo_types::Geometry<f64>> {
        convert::geometry_to_geo(&geometry)
    }
}

enum WriterKind<W: Write> {
    Records(RecordWriter<W>),
    Compact(DelimitedWriter<W>),
}

/// A format- and variant-bound geometry writer over one stream.
pub struct GeometryWriter<B: ModelBinding, W: Write> {
    inner: WriterKind<W>,
    binding: PhantomData<B>,
}

impl<B: ModelBinding, W: Write> GeometryWriter<B, W> {
    /// Append one geometry.
    pub fn write(&mut self, geometry: &B::Geometry) -> GeoWireResult<()> {
        let tree = B::as_tree(geometry)?;
        match &mut self.inner {
            WriterKind::Records(writer) => writer.write(&tree),
            WriterKind::Compact(writer) => writer.write(&tree),
        }
    }

    /// Flush and release the underlying stream.
    pub fn finish(self) -> GeoWireResult<W> {
        match self.inner {
            WriterKind::Records(writer) => writer.finish(),
            WriterKind::Compact(writer) => writer.finish(),
        }
    }
}

enum ReaderKind<R: Read> {
    Records(RecordReader<R>),
    Compact(DelimitedReader<R>),
}

/// A format- and variant-bound geometry reader over one stream.
///
/// Also an [`Iterator`] over `GeoWireResult` geometries.
pub struct GeometryReader<B: ModelBinding, R: Read> {
    inner: ReaderKind<R>,
    binding: PhantomData<B>,
}

impl<B: ModelBinding, R: Read> GeometryReader<B, R> {
    /// Pull the next geometry, or `None` at end of stream.
    pub fn read_next(&mut self) -> GeoWireResult<Option<B::Geometry>> {
        let tree = match &mut self.inner {
            ReaderKind::Records(reader) => reader.read_next()?,
            ReaderKind::Compact(reader) => reader.read_next()?,
        };
        match tree {
            Some(tree) => B::from_tree(tree).map(Some),
            None => Ok(None),
        }
    }
}

impl<B: ModelBinding, R: Read> Iterator for GeometryReader<B, R> {
    type Item = GeoWireResult<B::Geometry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

/// Bind a writer for `format` over `out`.
pub fn open_writer<B: ModelBinding, W: Write>(
    format: WireFormat,
    out: W,
) -> GeometryWriter<B, W> {
    let inner = match format {
        WireFormat::Records => WriterKind::Records(RecordWriter::new(out)),
        WireFormat::Compact => WriterKind::Compact(DelimitedWriter::new(out)),
    };
    GeometryWriter {
        inner,
        binding: PhantomData,
    }
}

/// Bind a reader for `format` over `input`.
pub fn open_reader<B: ModelBinding, R: Read>(
    format: WireFormat,
    input: R,
) -> GeoWireResult<GeometryReader<B, R>> {
    let inner = match format {
        WireFormat::Records => ReaderKind::Records(RecordReader::new(input)?),
        WireFormat::Compact => ReaderKind::Compact(DelimitedReader::new(input)),
    };
    Ok(GeometryReader {
        inner,
        binding: PhantomData,
    })
}
