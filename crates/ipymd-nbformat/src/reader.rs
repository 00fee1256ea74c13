//! nbformat JSON reader
//!
//! Document-level structure is checked strictly (valid JSON, an `nbformat`
//! field, version >= 4). Cell content is read best-effort: missing fields
//! fall back to empty values.

use crate::error::{Error, Result};
use crate::notebook::{Cell, CodeCell, DEFAULT_LANGUAGE, MarkdownCell, Notebook, RawCell};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::path::Path;

/// Just enough of the document to decide whether it can be read
#[derive(Deserialize)]
struct Header {
    nbformat: u64,
}

#[derive(Deserialize)]
struct NotebookJson {
    #[serde(default)]
    nbformat_minor: u64,
    #[serde(default)]
    metadata: Map<String, Value>,
    #[serde(default)]
    cells: Vec<CellJson>,
}

#[derive(Deserialize)]
struct CellJson {
    #[serde(default, deserialize_with = "null_as_default")]
    cell_type: String,
    #[serde(default)]
    source: Option<MultilineString>,
    #[serde(default, deserialize_with = "null_as_default")]
    metadata: Map<String, Value>,
    #[serde(default)]
    execution_count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    outputs: Vec<Value>,
}

/// Read an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// nbformat allows `source` as one string or as a list of lines
#[derive(Deserialize)]
#[serde(untagged)]
enum MultilineString {
    Text(String),
    Lines(Vec<String>),
}

impl MultilineString {
    fn into_string(self) -> String {
        match self {
            MultilineString::Text(s) => s,
            MultilineString::Lines(lines) => lines.concat(),
        }
    }
}

impl From<CellJson> for Cell {
    fn from(cell: CellJson) -> Self {
        let source = cell
            .source
            .map(MultilineString::into_string)
            .unwrap_or_default();
        match cell.cell_type.as_str() {
            "markdown" => Cell::Markdown(MarkdownCell {
                source,
                metadata: cell.metadata,
            }),
            "code" => Cell::Code(CodeCell {
                source,
                metadata: cell.metadata,
                execution_count: cell.execution_count,
                outputs: cell.outputs,
            }),
            _ => Cell::Raw(RawCell {
                cell_type: cell.cell_type,
                source,
                metadata: cell.metadata,
            }),
        }
    }
}

impl Notebook {
    /// Parse a notebook from its JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    /// Build a notebook from an already parsed JSON document
    pub fn from_json_value(value: Value) -> Result<Self> {
        let header = Header::deserialize(&value)?;
        Error::check_format(header.nbformat)?;

        let doc: NotebookJson = serde_json::from_value(value)?;
        let language = language_of(&doc.metadata);
        let cells: Vec<Cell> = doc.cells.into_iter().map(Cell::from).collect();

        tracing::debug!(
            nbformat = header.nbformat,
            nbformat_minor = doc.nbformat_minor,
            cells = cells.len(),
            language = %language,
            "read notebook"
        );

        Ok(Notebook {
            cells,
            language,
            format_version: header.nbformat,
            format_minor: doc.nbformat_minor,
            metadata: doc.metadata,
        })
    }
}

/// Read a notebook file
pub fn read_notebook(path: impl AsRef<Path>) -> Result<Notebook> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Notebook::from_json_str(&text)
}

/// `metadata.language_info.name`, or [`DEFAULT_LANGUAGE`]
fn language_of(metadata: &Map<String, Value>) -> String {
    metadata
        .get("language_info")
        .and_then(|info| info.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}
