//! ipymd-nbformat: Jupyter notebook model, reader and writer for ipymd
//!
//! This crate provides:
//! - Notebook and cell types (a subset of nbformat v4)
//! - Reading `.ipynb` JSON (nbformat >= 4 only)
//! - A writer that accumulates cells and persists them as `.ipynb` JSON
//!
//! ## Example
//!
//! ```rust
//! use ipymd_nbformat::{Notebook, NotebookConfig, NotebookWriter};
//!
//! let mut writer = NotebookWriter::new(NotebookConfig::default()).unwrap();
//! writer.append_markdown("# Hello");
//! writer.append_code("print('world')");
//!
//! let json = writer.to_json_string().unwrap();
//! let nb = Notebook::from_json_str(&json).unwrap();
//! assert_eq!(nb.cells.len(), 2);
//! ```

pub mod error;
pub mod notebook;
pub mod reader;
pub mod writer;

pub use error::{Error, MIN_NBFORMAT, Result};
pub use notebook::{Cell, CodeCell, DEFAULT_LANGUAGE, MarkdownCell, Notebook, RawCell};
pub use reader::read_notebook;
pub use writer::{DEFAULT_NBFORMAT, DEFAULT_NBFORMAT_MINOR, NotebookConfig, NotebookWriter};
