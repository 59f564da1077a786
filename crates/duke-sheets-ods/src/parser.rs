//! content.xml table parser
//!
//! Walks the XML token stream once and collects the rows of the first
//! `office:spreadsheet` element. Only a narrow subset of ODF is understood:
//! rows, cells, their `number-columns-repeated` attribute, and the text
//! inside cells. Everything else is skipped.

use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{OdsError, OdsResult};
use crate::options::{EmptyCells, OdsReadOptions, Strictness};
use crate::table::{Row, Table};

const SPREADSHEET: &[u8] = b"spreadsheet";
const TABLE_ROW: &[u8] = b"table-row";
const TABLE_CELL: &[u8] = b"table-cell";
const COVERED_TABLE_CELL: &[u8] = b"covered-table-cell";
const ANNOTATION: &[u8] = b"annotation";

const COLUMNS_REPEATED: &str = "number-columns-repeated";

/// Decode the rows of an ODS `content.xml` stream
pub fn decode<R: Read>(reader: R, options: &OdsReadOptions) -> OdsResult<Table> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    // Whitespace inside text runs is part of the cell value
    xml_reader.trim_text(false);

    let mut parser = TableParser::new(options.empty_cells);
    let mut buf = Vec::new();

    loop {
        let result = match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(event) => parser.handle(event),
            Err(e) => Err(OdsError::Xml(e)),
        };

        match result {
            Ok(()) => {}
            Err(OdsError::Xml(e)) if options.strictness == Strictness::Lenient => {
                log::warn!(
                    "stopping at malformed content.xml (byte {}): {e}",
                    xml_reader.buffer_position()
                );
                return Ok(parser.finish_partial());
            }
            Err(e) => return Err(e),
        }
        buf.clear();
    }

    match options.strictness {
        Strictness::Strict => parser.finish(),
        Strictness::Lenient => Ok(parser.finish_partial()),
    }
}

/// Position of the parser within the document
#[derive(Debug)]
enum State {
    /// Before the spreadsheet region
    Outside,
    /// Inside the spreadsheet region, between rows
    InSheet,
    /// Inside a `table-row`
    InRow(RowBuilder),
    /// Inside a `table-cell` of an open row
    InCell(RowBuilder, CellBuilder),
    /// The spreadsheet region has been closed; later regions are ignored
    Done,
}

impl State {
    fn start(self, e: &BytesStart<'_>, empty_cells: EmptyCells) -> OdsResult<State> {
        let local = e.local_name();
        let name = local.as_ref();

        let next = match self {
            State::Outside if name == SPREADSHEET => State::InSheet,
            State::InSheet | State::InRow(_) if name == SPREADSHEET => {
                log::warn!("nested spreadsheet element is not supported; its end closes the region");
                self
            }
            State::InSheet | State::InRow(_) if name == TABLE_ROW => {
                if matches!(self, State::InRow(_)) {
                    log::debug!("table-row opened inside an open row; discarding the outer row");
                }
                State::InRow(RowBuilder::default())
            }
            State::InRow(row) if name == TABLE_CELL => {
                State::InCell(row, CellBuilder::new(columns_repeated(e)?))
            }
            // Cells hidden by a merge; their text is not part of the table
            State::InRow(mut row) if name == COVERED_TABLE_CELL => {
                if empty_cells == EmptyCells::Pad {
                    row.push_blank(columns_repeated(e)?);
                }
                State::InRow(row)
            }
            State::InCell(row, mut cell) => {
                cell.open_element(name);
                State::InCell(row, cell)
            }
            State::Done if name == SPREADSHEET => {
                log::warn!("ignoring additional spreadsheet region after the first");
                State::Done
            }
            other => other,
        };
        Ok(next)
    }

    fn end(self, name: &[u8], empty_cells: EmptyCells, rows: &mut Vec<Row>) -> State {
        match self {
            State::InCell(row, mut cell) if cell.in_leaf() => {
                cell.close_element();
                State::InCell(row, cell)
            }
            State::InCell(mut row, cell) if name == TABLE_CELL => {
                cell.finish_into(&mut row, empty_cells);
                State::InRow(row)
            }
            State::InSheet | State::InRow(_) | State::InCell(..) if name == SPREADSHEET => {
                State::Done
            }
            State::InRow(row) if name == TABLE_ROW => {
                if !row.cells.is_empty() {
                    rows.push(row.cells);
                }
                State::InSheet
            }
            other => other,
        }
    }

    fn describe(&self) -> Option<&'static str> {
        match self {
            State::Outside | State::Done => None,
            State::InSheet => Some("the spreadsheet region"),
            State::InRow(_) => Some("a table row"),
            State::InCell(..) => Some("a table cell"),
        }
    }
}

/// Read `number-columns-repeated`, defaulting to 1
fn columns_repeated(e: &BytesStart<'_>) -> OdsResult<usize> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == COLUMNS_REPEATED.as_bytes() {
            let value = attr.unescape_value()?;
            return parse_repeat(&value);
        }
    }
    Ok(1)
}

fn parse_repeat(value: &str) -> OdsResult<usize> {
    let invalid = || OdsError::InvalidRepeat {
        attribute: COLUMNS_REPEATED,
        value: value.to_string(),
    };
    let count = value.parse::<i64>().map_err(|_| invalid())?;
    // Zero or negative counts still stand for the element itself
    if count < 1 {
        return Ok(1);
    }
    usize::try_from(count).map_err(|_| invalid())
}

/// Cells of the row being decoded
#[derive(Debug, Default)]
struct RowBuilder {
    cells: Vec<String>,
    /// Blank cells not yet written; dropped if no value follows them
    pending_blanks: usize,
}

impl RowBuilder {
    fn push_value(&mut self, value: String, repeat: usize) {
        if self.pending_blanks > 0 {
            self.cells
                .extend(std::iter::repeat(String::new()).take(self.pending_blanks));
            self.pending_blanks = 0;
        }
        self.cells.extend(std::iter::repeat(value).take(repeat));
    }

    fn push_blank(&mut self, repeat: usize) {
        self.pending_blanks = self.pending_blanks.saturating_add(repeat);
    }
}

/// Text collected for the cell being decoded
#[derive(Debug)]
struct CellBuilder {
    fragments: Vec<String>,
    repeat: usize,
    leaf: Option<Leaf>,
}

/// A child element of a cell whose text forms one fragment
#[derive(Debug)]
struct Leaf {
    depth: usize,
    text: String,
    ignored: bool,
}

impl CellBuilder {
    fn new(repeat: usize) -> Self {
        Self {
            fragments: Vec::new(),
            repeat,
            leaf: None,
        }
    }

    fn in_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    fn open_element(&mut self, name: &[u8]) {
        match &mut self.leaf {
            Some(leaf) => leaf.depth += 1,
            None => {
                self.leaf = Some(Leaf {
                    depth: 1,
                    text: String::new(),
                    // Cell comments are not part of the value
                    ignored: name == ANNOTATION,
                });
            }
        }
    }

    fn close_element(&mut self) {
        let Some(leaf) = &mut self.leaf else {
            return;
        };
        leaf.depth -= 1;
        if leaf.depth == 0 {
            if let Some(leaf) = self.leaf.take() {
                if !leaf.ignored && !leaf.text.is_empty() {
                    self.fragments.push(leaf.text);
                }
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(leaf) = &mut self.leaf {
            if !leaf.ignored {
                leaf.text.push_str(text);
            }
        }
    }

    /// Expand the self-closing inline elements ODF uses for whitespace
    fn push_inline(&mut self, e: &BytesStart<'_>) {
        let local = e.local_name();
        match local.as_ref() {
            b"s" => {
                let count = e
                    .attributes()
                    .flatten()
                    .find(|attr| attr.key.local_name().as_ref() == b"c")
                    .and_then(|attr| std::str::from_utf8(&attr.value).ok()?.parse::<usize>().ok())
                    .unwrap_or(1);
                self.push_text(&" ".repeat(count));
            }
            b"tab" => self.push_text("\t"),
            b"line-break" => self.push_text("\n"),
            _ => {}
        }
    }

    fn finish_into(self, row: &mut RowBuilder, empty_cells: EmptyCells) {
        if !self.fragments.is_empty() {
            row.push_value(self.fragments.join(" "), self.repeat);
        } else if empty_cells == EmptyCells::Pad {
            row.push_blank(self.repeat);
        }
    }
}

/// Token-driven table builder; one instance per decode
struct TableParser {
    state: State,
    rows: Vec<Row>,
    empty_cells: EmptyCells,
}

impl TableParser {
    fn new(empty_cells: EmptyCells) -> Self {
        Self {
            state: State::Outside,
            rows: Vec::new(),
            empty_cells,
        }
    }

    fn handle(&mut self, event: Event<'_>) -> OdsResult<()> {
        match event {
            Event::Start(e) => self.start(&e),
            Event::Empty(e) => {
                if let State::InCell(_, cell) = &mut self.state {
                    if cell.in_leaf() {
                        cell.push_inline(&e);
                        return Ok(());
                    }
                }
                self.start(&e)?;
                self.end(e.local_name().as_ref());
                Ok(())
            }
            Event::End(e) => {
                self.end(e.local_name().as_ref());
                Ok(())
            }
            Event::Text(e) => {
                if let State::InCell(_, cell) = &mut self.state {
                    if cell.in_leaf() {
                        cell.push_text(&e.unescape()?);
                    }
                }
                Ok(())
            }
            Event::CData(e) => {
                if let State::InCell(_, cell) = &mut self.state {
                    if cell.in_leaf() {
                        cell.push_text(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn start(&mut self, e: &BytesStart<'_>) -> OdsResult<()> {
        let state = std::mem::replace(&mut self.state, State::Outside);
        self.state = state.start(e, self.empty_cells)?;
        Ok(())
    }

    fn end(&mut self, name: &[u8]) {
        let state = std::mem::replace(&mut self.state, State::Outside);
        self.state = state.end(name, self.empty_cells, &mut self.rows);
    }

    /// Finish a complete document; an unclosed region is an error
    fn finish(self) -> OdsResult<Table> {
        if let Some(location) = self.state.describe() {
            return Err(OdsError::Truncated(location));
        }
        Ok(self.finish_partial())
    }

    /// Finish with whatever rows were completed
    fn finish_partial(self) -> Table {
        if let Some(location) = self.state.describe() {
            log::warn!("content.xml ended inside {location}; keeping {} complete rows", self.rows.len());
        }
        if matches!(self.state, State::Outside) {
            log::debug!("no spreadsheet element found in content.xml");
        }

        let mut rows = self.rows;
        if self.empty_cells == EmptyCells::Pad {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            for row in &mut rows {
                row.resize(width, String::new());
            }
        }
        log::debug!("decoded {} rows from content.xml", rows.len());
        Table::from_rows(rows)
    }
}
