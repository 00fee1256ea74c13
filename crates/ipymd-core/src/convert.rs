//! Conversion entry points
//!
//! Document-level checks (JSON, nbformat version) run before anything is
//! written, so a failed conversion leaves no output file behind.

use crate::parser::parse_markdown;
use crate::renderer::{NotebookRenderer, RendererOptions};
use crate::serializer::{SerializerOptions, notebook_to_markdown};
use ipymd_nbformat::{
    DEFAULT_LANGUAGE, Error, NotebookConfig, NotebookWriter, Result, read_notebook,
};
use std::fs;
use std::path::Path;

/// Options for Markdown to notebook conversion
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Fence language whose blocks become code cells
    pub code_language: String,
    /// Settings for the generated notebook
    pub notebook: NotebookConfig,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            code_language: DEFAULT_LANGUAGE.to_string(),
            notebook: NotebookConfig::default(),
        }
    }
}

/// Convert Markdown text to a notebook
///
/// The notebook records `code_language` as its language unless the
/// notebook settings already name one.
pub fn markdown_to_notebook(markdown: &str, options: &MarkdownOptions) -> Result<NotebookWriter> {
    let mut config = options.notebook.clone();
    if config.language.is_none() {
        config.language = Some(options.code_language.clone());
    }
    let writer = NotebookWriter::new(config)?;

    let root = parse_markdown(markdown);
    let mut renderer = NotebookRenderer::new(
        RendererOptions {
            code_language: options.code_language.clone(),
        },
        writer,
    );
    renderer.render(&root);
    let writer = renderer.finish();

    tracing::debug!(
        blocks = root.children.len(),
        cells = writer.len(),
        code_language = %options.code_language,
        "converted markdown"
    );

    Ok(writer)
}

/// Convert a notebook file to Markdown
///
/// Writes to `output` when given; the Markdown is returned either way.
pub fn convert_notebook_file(
    input: &Path,
    output: Option<&Path>,
    options: &SerializerOptions,
) -> Result<String> {
    let notebook = read_notebook(input)?;
    let markdown = notebook_to_markdown(&notebook, options)?;

    if let Some(output) = output {
        fs::write(output, &markdown).map_err(|e| Error::io(output, e))?;
        tracing::debug!(input = %input.display(), output = %output.display(), "wrote markdown");
    }

    Ok(markdown)
}

/// Convert a Markdown file to a notebook
///
/// Persists the notebook to `output` when given; the notebook JSON is
/// returned either way.
pub fn convert_markdown_file(
    input: &Path,
    output: Option<&Path>,
    options: &MarkdownOptions,
) -> Result<String> {
    let markdown = fs::read_to_string(input).map_err(|e| Error::io(input, e))?;
    let writer = markdown_to_notebook(&markdown, options)?;
    let json = writer.to_json_string()?;

    if let Some(output) = output {
        writer.persist(output)?;
    }

    Ok(json)
}
