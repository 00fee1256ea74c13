//! Notebook writer
//!
//! Accumulates cells and serializes them to nbformat v4 JSON, laid out the
//! way Jupyter writes notebooks (one-space indent, sorted keys, `source`
//! split into lines).

use crate::error::{Error, Result};
use crate::notebook::{Cell, Notebook};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::path::Path;

/// nbformat major version written by default
pub const DEFAULT_NBFORMAT: u64 = 4;

/// nbformat minor version written by default (4.5 would require cell ids)
pub const DEFAULT_NBFORMAT_MINOR: u64 = 4;

/// Settings for a new notebook document
#[derive(Debug, Clone, PartialEq)]
pub struct NotebookConfig {
    pub nbformat: u64,
    pub nbformat_minor: u64,
    /// Recorded as `metadata.language_info.name` when set
    pub language: Option<String>,
    /// Extra document-level metadata
    pub metadata: Map<String, Value>,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            nbformat: DEFAULT_NBFORMAT,
            nbformat_minor: DEFAULT_NBFORMAT_MINOR,
            language: None,
            metadata: Map::new(),
        }
    }
}

/// In-progress notebook document
///
/// Cells are only ever appended. [`NotebookWriter::persist`] consumes the
/// writer; a new document needs a new writer.
#[derive(Debug, Clone)]
pub struct NotebookWriter {
    config: NotebookConfig,
    cells: Vec<Cell>,
}

impl NotebookWriter {
    pub fn new(config: NotebookConfig) -> Result<Self> {
        Error::check_format(config.nbformat)?;
        Ok(Self {
            config,
            cells: Vec::new(),
        })
    }

    pub fn config(&self) -> &NotebookConfig {
        &self.config
    }

    pub fn append(&mut self, cell: Cell) {
        tracing::trace!(cell_type = cell.cell_type(), "append cell");
        self.cells.push(cell);
    }

    pub fn append_markdown(&mut self, source: impl Into<String>) {
        self.append(Cell::markdown(source));
    }

    pub fn append_code(&mut self, source: impl Into<String>) {
        self.append(Cell::code(source));
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Finish the document as an in-memory notebook
    pub fn into_notebook(self) -> Notebook {
        let metadata = self.document_metadata();
        let language = self
            .config
            .language
            .unwrap_or_else(|| crate::notebook::DEFAULT_LANGUAGE.to_string());
        Notebook {
            cells: self.cells,
            language,
            format_version: self.config.nbformat,
            format_minor: self.config.nbformat_minor,
            metadata,
        }
    }

    /// Serialize the document to nbformat JSON text
    pub fn to_json_string(&self) -> Result<String> {
        let cells: Vec<Value> = self.cells.iter().map(cell_to_json).collect();
        let doc = json!({
            "cells": cells,
            "metadata": self.document_metadata(),
            "nbformat": self.config.nbformat,
            "nbformat_minor": self.config.nbformat_minor,
        });

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        doc.serialize(&mut ser)?;
        buf.push(b'\n');

        String::from_utf8(buf).map_err(|e| {
            Error::Parse(serde_json::Error::io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e,
            )))
        })
    }

    /// Write the document to `path`, ending this writer
    pub fn persist(self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_json_string()?;
        std::fs::write(path, text).map_err(|e| Error::io(path, e))?;
        tracing::debug!(path = %path.display(), cells = self.cells.len(), "wrote notebook");
        Ok(())
    }

    fn document_metadata(&self) -> Map<String, Value> {
        let mut metadata = self.config.metadata.clone();
        if let Some(language) = &self.config.language {
            metadata.insert("language_info".to_string(), json!({ "name": language }));
        }
        metadata
    }
}

fn cell_to_json(cell: &Cell) -> Value {
    match cell {
        Cell::Markdown(c) => json!({
            "cell_type": "markdown",
            "metadata": c.metadata,
            "source": split_lines(&c.source),
        }),
        Cell::Code(c) => json!({
            "cell_type": "code",
            "execution_count": c.execution_count,
            "metadata": c.metadata,
            "outputs": c.outputs,
            "source": split_lines(&c.source),
        }),
        Cell::Raw(c) => json!({
            "cell_type": c.cell_type,
            "metadata": c.metadata,
            "source": split_lines(&c.source),
        }),
    }
}

/// Split text into lines, each keeping its trailing newline
fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}
