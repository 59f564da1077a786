//! ODS package access
//!
//! An ODS file is a ZIP archive. The `mimetype` entry identifies the document
//! type and must match [`MIMETYPE`] exactly; the sheet data lives in
//! `content.xml`. Both entries are checked before any XML is parsed.

use std::fs::File;
use std::io::{self, BufRead, Cursor, Read};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{OdsError, OdsResult};

/// Mimetype of an OpenDocument spreadsheet
pub const MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

const MIMETYPE_ENTRY: &str = "mimetype";
const CONTENT_ENTRY: &str = "content.xml";
const MAX_SIZE_HINT: u64 = 64 << 20;

/// A validated ODS package held in memory.
///
/// ZIP needs random access, so the whole input is read up front.
pub struct OdsPackage {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl OdsPackage {
    /// Open and validate a package from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> OdsResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Read a reader to the end and validate the package
    pub fn from_reader<R: Read>(mut reader: R) -> OdsResult<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Validate a package from raw archive bytes
    pub fn from_bytes(data: Vec<u8>) -> OdsResult<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        let mut package = Self { archive };
        package.validate_mimetype()?;
        log::debug!("opened ODS package with {} entries", package.archive.len());
        Ok(package)
    }

    fn validate_mimetype(&mut self) -> OdsResult<()> {
        let data = self.read_entry(MIMETYPE_ENTRY)?;
        if data != MIMETYPE.as_bytes() {
            return Err(OdsError::UnexpectedMimetype {
                found: String::from_utf8_lossy(&data).into_owned(),
                expected: MIMETYPE,
            });
        }
        Ok(())
    }

    /// Names of all entries in the archive
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.archive.file_names()
    }

    /// Read an entry's decompressed content
    pub fn read_entry(&mut self, name: &str) -> OdsResult<Vec<u8>> {
        let mut entry = self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => OdsError::MissingPart(name.to_string()),
            other => OdsError::Zip(other),
        })?;
        // The declared size comes from the archive, so only trust it as a hint
        let mut data = Vec::with_capacity(entry.size().min(MAX_SIZE_HINT) as usize);
        entry.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Open a stream over the decompressed `content.xml`
    pub fn content_stream(&mut self) -> OdsResult<ContentStream> {
        match self.read_entry(CONTENT_ENTRY) {
            Ok(data) => Ok(ContentStream::new(data)),
            Err(OdsError::MissingPart(_)) => Err(OdsError::MissingPart(format!(
                "{CONTENT_ENTRY} (the file might be corrupted)"
            ))),
            Err(e) => Err(e),
        }
    }
}

/// Decompressed `content.xml` of an ODS package.
///
/// Owns its bytes, so the archive and any file handle are already released
/// when this is returned. Dropping it frees the content.
#[derive(Debug, Clone)]
pub struct ContentStream {
    inner: Cursor<Vec<u8>>,
}

impl ContentStream {
    fn new(data: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Total size of the content in bytes
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Check if the content is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the raw content bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl Read for ContentStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for ContentStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}
