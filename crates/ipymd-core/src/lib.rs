//! ipymd-core: Core library for converting between Jupyter notebooks and Markdown
//!
//! This crate provides:
//! - Notebook to Markdown serialization (code cells become fenced blocks)
//! - Markdown parsing into a construct tree
//! - Construct tree to notebook cells rendering
//!
//! ## Example
//!
//! ```rust
//! use ipymd_core::{MarkdownOptions, SerializerOptions, markdown_to_notebook, notebook_to_markdown};
//!
//! let writer = markdown_to_notebook("# Hello\n\n```python\nx = 1\n```\n", &MarkdownOptions::default()).unwrap();
//! assert_eq!(writer.len(), 2);
//!
//! let md = notebook_to_markdown(&writer.into_notebook(), &SerializerOptions::default()).unwrap();
//! assert_eq!(md, "# Hello\n\n```python\nx = 1\n```\n");
//! ```

pub mod convert;
pub mod mdast;
pub mod parser;
pub mod renderer;
pub mod serializer;

pub use convert::{
    MarkdownOptions, convert_markdown_file, convert_notebook_file, markdown_to_notebook,
};
pub use ipymd_nbformat::{
    Cell, Error, Notebook, NotebookConfig, NotebookWriter, Result, read_notebook,
};
pub use mdast::{Block, Inline, Root};
pub use parser::parse_markdown;
pub use renderer::{BlockVisitor, NotebookRenderer, RendererOptions, render_block, render_inline};
pub use serializer::{SerializerOptions, merge_successive_code_cells, notebook_to_markdown};
