//! Notebook data model
//!
//! A subset of nbformat v4 needed for Markdown conversion.
//! Reference: https://nbformat.readthedocs.io/en/latest/format_description.html

use serde_json::{Map, Value};

/// Language assumed when the notebook metadata does not declare one
pub const DEFAULT_LANGUAGE: &str = "python";

/// A notebook document
#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    /// Source language from `metadata.language_info.name`
    pub language: String,
    /// nbformat major version
    pub format_version: u64,
    /// nbformat minor version
    pub format_minor: u64,
    /// Document-level metadata, kept as read
    pub metadata: Map<String, Value>,
}

/// A notebook cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Markdown(MarkdownCell),
    Code(CodeCell),
    /// `raw` cells and any cell type this crate does not know about
    Raw(RawCell),
}

/// Markdown (prose) cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkdownCell {
    pub source: String,
    pub metadata: Map<String, Value>,
}

/// Code cell
///
/// The language is a property of the notebook, not of the cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeCell {
    pub source: String,
    pub metadata: Map<String, Value>,
    pub execution_count: Option<u64>,
    pub outputs: Vec<Value>,
}

/// Cell of any other type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawCell {
    pub cell_type: String,
    pub source: String,
    pub metadata: Map<String, Value>,
}

// Convenience constructors
impl Cell {
    pub fn markdown(source: impl Into<String>) -> Self {
        Cell::Markdown(MarkdownCell {
            source: source.into(),
            metadata: Map::new(),
        })
    }

    pub fn code(source: impl Into<String>) -> Self {
        Cell::Code(CodeCell {
            source: source.into(),
            ..Default::default()
        })
    }

    pub fn raw(cell_type: impl Into<String>, source: impl Into<String>) -> Self {
        Cell::Raw(RawCell {
            cell_type: cell_type.into(),
            source: source.into(),
            metadata: Map::new(),
        })
    }

    /// nbformat `cell_type` of this cell
    pub fn cell_type(&self) -> &str {
        match self {
            Cell::Markdown(_) => "markdown",
            Cell::Code(_) => "code",
            Cell::Raw(r) => &r.cell_type,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Cell::Markdown(c) => &c.source,
            Cell::Code(c) => &c.source,
            Cell::Raw(c) => &c.source,
        }
    }
}

impl Notebook {
    /// Create an nbformat 4 notebook in the default language
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            language: DEFAULT_LANGUAGE.to_string(),
            format_version: crate::writer::DEFAULT_NBFORMAT,
            format_minor: crate::writer::DEFAULT_NBFORMAT_MINOR,
            metadata: Map::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}
