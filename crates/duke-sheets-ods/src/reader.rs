//! ODS reader

use std::io::Read;
use std::path::Path;

use crate::error::OdsResult;
use crate::options::OdsReadOptions;
use crate::package::{ContentStream, OdsPackage};
use crate::parser;
use crate::table::Table;

/// ODS file reader
pub struct OdsReader;

impl OdsReader {
    /// Validate the file at `path` and open its `content.xml`
    pub fn open<P: AsRef<Path>>(path: P) -> OdsResult<ContentStream> {
        OdsPackage::open(path)?.content_stream()
    }

    /// Validate an in-memory package and open its `content.xml`
    pub fn open_bytes(data: Vec<u8>) -> OdsResult<ContentStream> {
        OdsPackage::from_bytes(data)?.content_stream()
    }

    /// Read a package from `reader` to the end, validate it and open its `content.xml`
    pub fn open_reader<R: Read>(reader: R) -> OdsResult<ContentStream> {
        OdsPackage::from_reader(reader)?.content_stream()
    }

    /// Decode a `content.xml` stream with default options
    pub fn decode<R: Read>(content: R) -> OdsResult<Table> {
        Self::decode_with_options(content, &OdsReadOptions::default())
    }

    /// Decode a `content.xml` stream
    pub fn decode_with_options<R: Read>(content: R, options: &OdsReadOptions) -> OdsResult<Table> {
        parser::decode(content, options)
    }

    /// Read the table of an ODS file
    pub fn read_file<P: AsRef<Path>>(path: P, options: &OdsReadOptions) -> OdsResult<Table> {
        let content = Self::open(path)?;
        Self::decode_with_options(content, options)
    }

    /// Read the table of an ODS package from a reader
    pub fn read<R: Read>(reader: R, options: &OdsReadOptions) -> OdsResult<Table> {
        let content = Self::open_reader(reader)?;
        Self::decode_with_options(content, options)
    }
}
