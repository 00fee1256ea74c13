//! Notebook to Markdown serializer
//!
//! Each cell becomes one Markdown fragment; fragments are joined so that
//! consecutive cells are separated by a blank line. The output depends on
//! nothing but the notebook.

use ipymd_nbformat::{Cell, Error, Notebook, Result};

/// Options for notebook to Markdown serialization
#[derive(Debug, Clone, Default)]
pub struct SerializerOptions {
    /// Merge each run of successive code cells into a single fence
    pub merge_code_cells: bool,
}

/// Serialize a notebook to Markdown
pub fn notebook_to_markdown(notebook: &Notebook, options: &SerializerOptions) -> Result<String> {
    Error::check_format(notebook.format_version)?;

    let merged;
    let cells = if options.merge_code_cells {
        merged = merge_successive_code_cells(&notebook.cells);
        &merged
    } else {
        &notebook.cells
    };

    let fragments: Vec<String> = cells
        .iter()
        .filter_map(|cell| cell_to_markdown(cell, &notebook.language))
        .collect();

    tracing::debug!(
        cells = notebook.cells.len(),
        fragments = fragments.len(),
        merge_code_cells = options.merge_code_cells,
        "serialized notebook"
    );

    Ok(fragments.join("\n"))
}

/// Markdown fragment for one cell
///
/// Cells other than markdown and code cells have no fragment.
pub fn cell_to_markdown(cell: &Cell, language: &str) -> Option<String> {
    match cell {
        Cell::Markdown(md) => Some(format!("{}\n", md.source)),
        Cell::Code(code) => Some(format!("```{}\n{}\n```\n", language, code.source)),
        Cell::Raw(raw) => {
            tracing::trace!(cell_type = %raw.cell_type, "skipping cell");
            None
        }
    }
}

/// Merge each run of successive code cells into its first cell
///
/// Sources are joined by a blank line; only the first cell's metadata,
/// execution count and outputs are kept.
pub fn merge_successive_code_cells(cells: &[Cell]) -> Vec<Cell> {
    let mut merged: Vec<Cell> = Vec::with_capacity(cells.len());
    for cell in cells {
        if let (Cell::Code(next), Some(Cell::Code(last))) = (cell, merged.last_mut()) {
            last.source.push_str("\n\n");
            last.source.push_str(&next.source);
            continue;
        }
        merged.push(cell.clone());
    }
    merged
}
