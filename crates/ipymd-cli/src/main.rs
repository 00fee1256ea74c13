//! ipymd: CLI tool to convert between Jupyter notebooks and Markdown

mod config;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use config::{CONFIG_FILE_NAME, Config};
use ipymd_core::{
    MarkdownOptions, NotebookConfig, SerializerOptions, convert_markdown_file,
    convert_notebook_file,
};

#[derive(Parser, Debug)]
#[command(name = "ipymd")]
#[command(about = "Convert between Jupyter notebooks and Markdown")]
#[command(version)]
#[command(after_help = "Examples:
  ipymd analysis.ipynb                # Convert to analysis.md
  ipymd notes.md                      # Convert to notes.ipynb
  ipymd notes.md -o out.ipynb         # Convert to specific output file
  ipymd analysis.ipynb --stdout       # Print Markdown instead of writing a file
  ipymd notes.md -l r                 # Only ```r fences become code cells")]
struct Cli {
    /// Input .ipynb or .md file
    #[arg(required_unless_present_any = ["init", "schema"])]
    input: Option<PathBuf>,

    /// Output file (defaults to the input path with the target extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target format (inferred from the input extension when omitted)
    #[arg(short, long, value_enum)]
    to: Option<Target>,

    /// Print the result to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Merge successive code cells into one fence (notebook to Markdown)
    #[arg(long)]
    merge_code_cells: bool,

    /// Fence language whose blocks become code cells (Markdown to notebook)
    #[arg(short, long)]
    language: Option<String>,

    /// Configuration file (defaults to ./_ipymd.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a sample _ipymd.toml to the current directory and exit
    #[arg(long)]
    init: bool,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    schema: bool,

    /// Verbose output (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// Markdown
    Md,
    /// Jupyter notebook
    Ipynb,
}

impl Target {
    fn extension(self) -> &'static str {
        match self {
            Target::Md => "md",
            Target::Ipynb => "ipynb",
        }
    }

    /// Target for an input file, from its extension
    fn infer(input: &Path) -> Option<Self> {
        let ext = input.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ipynb" => Some(Target::Md),
            "md" | "markdown" => Some(Target::Ipynb),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    if cli.schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    if cli.init {
        return write_sample_config(Path::new(CONFIG_FILE_NAME), cli.quiet);
    }

    let Some(input) = cli.input.as_deref() else {
        anyhow::bail!("No input file given");
    };
    if !input.is_file() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let config = load_config(cli.config.as_deref())?;
    let target = match cli.to.or_else(|| Target::infer(input)) {
        Some(target) => target,
        None => anyhow::bail!(
            "Cannot infer the target format from {}; use --to md or --to ipynb",
            input.display()
        ),
    };

    let output_path = if cli.stdout {
        None
    } else {
        Some(
            cli.output
                .clone()
                .unwrap_or_else(|| input.with_extension(target.extension())),
        )
    };

    if let Some(path) = &output_path {
        ensure_not_input(input, path)?;
    }

    match &output_path {
        Some(path) => tracing::info!("Converting: {} -> {}", input.display(), path.display()),
        None => tracing::info!("Converting: {} -> <stdout>", input.display()),
    }

    let result = match target {
        Target::Md => {
            let options = serializer_options(&cli, &config);
            convert_notebook_file(input, output_path.as_deref(), &options)
        }
        Target::Ipynb => {
            let options = markdown_options(&cli, &config);
            convert_markdown_file(input, output_path.as_deref(), &options)
        }
    }
    .with_context(|| format!("Failed to convert: {}", input.display()))?;

    match output_path {
        None => print!("{}", result),
        Some(path) if !cli.quiet => println!("{}", path.display()),
        Some(_) => {}
    }

    Ok(())
}

/// Initialize tracing based on CLI flags
///
/// `RUST_LOG` takes precedence over `-v`/`-q`.
fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if cli.quiet {
        "ipymd=error"
    } else {
        match cli.verbose {
            0 => "ipymd=warn",
            1 => "ipymd=info",
            2 => "ipymd=debug",
            _ => "ipymd=trace",
        }
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Explicit `--config` path, else `_ipymd.toml` in the current directory
fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_from_dir(Path::new("."))?.unwrap_or_default(),
    };
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn serializer_options(cli: &Cli, config: &Config) -> SerializerOptions {
    SerializerOptions {
        merge_code_cells: cli.merge_code_cells
            || config.notebook.merge_code_cells.unwrap_or(false),
    }
}

fn markdown_options(cli: &Cli, config: &Config) -> MarkdownOptions {
    let defaults = MarkdownOptions::default();
    let mut notebook = NotebookConfig::default();
    if let Some(minor) = config.notebook.nbformat_minor {
        notebook.nbformat_minor = minor;
    }

    MarkdownOptions {
        code_language: cli
            .language
            .clone()
            .or_else(|| config.markdown.code_language.clone())
            .unwrap_or(defaults.code_language),
        notebook,
    }
}

/// Refuse to write the result over the file being converted
fn ensure_not_input(input: &Path, output: &Path) -> Result<()> {
    let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(input), Ok(output)) => input == output,
        // The output does not exist yet
        _ => false,
    };
    if same {
        anyhow::bail!(
            "Output would overwrite the input file: {}",
            output.display()
        );
    }
    Ok(())
}

fn write_sample_config(path: &Path, quiet: bool) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config file already exists: {}", path.display());
    }

    let content = Config::sample().to_toml_string()?;
    fs::write(path, content).with_context(|| format!("Failed to write: {}", path.display()))?;

    if !quiet {
        println!("{}", path.display());
    }

    Ok(())
}
