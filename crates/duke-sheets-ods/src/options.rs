//! ODS read options

/// Options for decoding ODS content
#[derive(Debug, Clone, Default)]
pub struct OdsReadOptions {
    /// How malformed or truncated content.xml is handled (default: strict)
    pub strictness: Strictness,
    /// How cells without text are represented (default: skip)
    pub empty_cells: EmptyCells,
}

impl OdsReadOptions {
    /// Options that reproduce the tolerant behaviour of older readers
    pub fn lenient() -> Self {
        Self {
            strictness: Strictness::Lenient,
            ..Default::default()
        }
    }

    /// Set the strictness
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Set the empty cell handling
    pub fn with_empty_cells(mut self, empty_cells: EmptyCells) -> Self {
        self.empty_cells = empty_cells;
        self
    }
}

/// Handling of XML errors and early end of content.xml
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Tokenizer errors and an unclosed spreadsheet region fail the decode
    #[default]
    Strict,
    /// Stop at the first tokenizer error and return the rows decoded so far
    Lenient,
}

/// Representation of cells that contain no text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyCells {
    /// Empty cells are dropped, so rows may differ in width
    #[default]
    Skip,
    /// Empty cells become `""` and rows are padded to a common width.
    ///
    /// Trailing empty cells of a row are discarded before padding.
    Pad,
}
