//! # duke-sheets-ods
//!
//! ODS (OpenDocument Spreadsheet) table reader for duke-sheets.
//!
//! Reading happens in two steps. [`OdsReader::open`] checks that the package
//! is a spreadsheet and returns its `content.xml`; [`OdsReader::decode`] turns
//! that content into a [`Table`] of strings. Cell values are plain text: no
//! types, styles or formulas are kept, and all sheets of the document are
//! read into one table.
//!
//! ## Example
//!
//! ```rust,no_run
//! use duke_sheets_ods::OdsReader;
//!
//! let content = OdsReader::open("data.ods")?;
//! let table = OdsReader::decode(content)?;
//! for row in &table {
//!     println!("{}", row.join("\t"));
//! }
//! # Ok::<(), duke_sheets_ods::OdsError>(())
//! ```

mod error;
mod options;
mod package;
mod parser;
mod reader;
mod table;

pub use error::{ErrorKind, OdsError, OdsResult};
pub use options::{EmptyCells, OdsReadOptions, Strictness};
pub use package::{ContentStream, OdsPackage, MIMETYPE};
pub use reader::OdsReader;
pub use table::{Row, Table};
