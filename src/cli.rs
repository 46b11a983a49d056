//! Command line interface.

mod report;

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use anyhow::{
    Context as _,
    Result,
};
use clap::{
    Args,
    Parser,
    Subcommand,
};

use crate::catalog::Catalog;
use crate::config::{
    CatalogSettings,
    ConfigManager,
};
use crate::indexer::{
    LoadFailure,
    WorkspaceIndexer,
};
use crate::input::{
    LoadedCatalog,
    load_catalog_file,
};
use crate::lookup::Translator;
use crate::markers::substitute;
use crate::merge::{
    MergeOptions,
    merge,
};
use crate::qa::check_workspace;

#[derive(Debug, Parser)]
#[command(name = "tr-catalog")]
#[command(version)]
#[command(about = "Check, inspect and update UI translation catalogs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug messages to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run quality checks on catalogs
    Check {
        #[command(flatten)]
        catalogs: CatalogArgs,

        /// Override `minimumCompletion` from the configuration
        #[arg(long, value_name = "PERCENT")]
        minimum_completion: Option<u8>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show completion statistics
    Stats {
        #[command(flatten)]
        catalogs: CatalogArgs,

        /// Also list every context
        #[arg(long)]
        contexts: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Translate one source text with a catalog
    Lookup {
        /// Catalog file
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Context the source text belongs to
        context: String,

        /// Source text to translate
        source: String,

        /// Disambiguation comment
        #[arg(short, long)]
        comment: Option<String>,

        /// Count for numerus messages
        #[arg(short = 'n', long = "count", allow_negative_numbers = true)]
        count: Option<i64>,

        /// Arguments for %1, %2, ... (repeatable)
        #[arg(short, long = "arg", value_name = "ARG")]
        args: Vec<String>,
    },

    /// Rewrite catalogs in canonical form
    Fmt {
        /// Catalog files
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Only report files that are not formatted
        #[arg(long)]
        check: bool,
    },

    /// Update a catalog from a template
    Merge {
        /// Translated catalog
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Catalog listing the current source texts
        #[arg(short, long)]
        template: PathBuf,

        /// Drop messages missing from the template instead of marking them obsolete
        #[arg(long)]
        drop_obsolete: bool,

        /// Write the result here instead of overwriting CATALOG
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Which catalogs a command works on.
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Catalog files; all catalogs of the workspace when omitted
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Workspace root holding `.tr-catalog.json`
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub workspace: PathBuf,
}

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable lines
    Text,
    /// One pretty-printed JSON document
    Json,
}

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing to report
    Success,
    /// Checks failed or files need attention.
    Failure,
    /// Some catalogs could not be read or parsed.
    LoadError,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => Self::SUCCESS,
            Status::Failure => Self::FAILURE,
            Status::LoadError => Self::from(2_u8),
        }
    }
}

/// Runs a parsed command, writing its output to `out`.
///
/// # Errors
/// Returns error if an input cannot be read, parsed or written.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<Status> {
    match cli.command {
        Commands::Check { catalogs, minimum_completion, format } => {
            let (settings, loaded, failures) = load_catalogs(&catalogs, minimum_completion).await?;
            let diagnostics = check_workspace(&loaded, &settings);
            report::write_diagnostics(out, &diagnostics, &failures, format)?;

            Ok(if !failures.is_empty() {
                Status::LoadError
            } else if diagnostics.iter().any(|d| d.is_error()) {
                Status::Failure
            } else {
                Status::Success
            })
        }

        Commands::Stats { catalogs, contexts, format } => {
            let (_, loaded, failures) = load_catalogs(&catalogs, None).await?;
            report::write_stats(out, &loaded, &failures, contexts, format)?;
            Ok(if failures.is_empty() { Status::Success } else { Status::LoadError })
        }

        Commands::Lookup { catalog, context, source, comment, count, args } => {
            let loaded = load_catalog_file(&catalog)
                .with_context(|| format!("Failed to load {}", catalog.display()))?;
            let translator = Translator::from_loaded(&loaded);

            let text = match count {
                Some(n) => translator.tr_plural(&context, &source, comment.as_deref(), n),
                None => translator.tr(&context, &source, comment.as_deref()).to_string(),
            };
            writeln!(out, "{}", substitute(&text, &args))?;
            Ok(Status::Success)
        }

        Commands::Fmt { files, check } => format_files(out, &files, check),

        Commands::Merge { catalog, template, drop_obsolete, output } => {
            let existing = read_catalog(&catalog)?;
            let template_catalog = read_catalog(&template)?;

            let outcome = merge(&existing, &template_catalog, &MergeOptions { drop_obsolete });

            let target = output.as_deref().unwrap_or(&catalog);
            std::fs::write(target, outcome.catalog.to_json_string()?)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            writeln!(out, "{}: {}", target.display(), outcome.report)?;
            Ok(Status::Success)
        }
    }
}

/// Loads the workspace settings and the catalogs named by `args`.
///
/// `minimum_completion` replaces the configured threshold when given.
async fn load_catalogs(
    args: &CatalogArgs,
    minimum_completion: Option<u8>,
) -> Result<(CatalogSettings, Vec<LoadedCatalog>, Vec<LoadFailure>)> {
    let mut config_manager = ConfigManager::new();
    config_manager
        .load_settings(Some(args.workspace.clone()))
        .with_context(|| format!("Invalid configuration in {}", args.workspace.display()))?;

    if let Some(minimum) = minimum_completion {
        let settings =
            CatalogSettings { minimum_completion: Some(minimum), ..config_manager.get_settings().clone() };
        config_manager.update_settings(settings).context("Invalid --minimum-completion")?;
    }

    if args.files.is_empty() {
        let index = WorkspaceIndexer::new().index_workspace(&args.workspace, &config_manager).await?;
        return Ok((config_manager.get_settings().clone(), index.catalogs, index.failures));
    }

    let mut loaded = Vec::with_capacity(args.files.len());
    let mut failures = Vec::new();
    for path in &args.files {
        match load_catalog_file(path) {
            Ok(catalog) => loaded.push(catalog),
            Err(e) => failures.push(LoadFailure { path: path.clone(), message: e.to_string() }),
        }
    }
    Ok((config_manager.get_settings().clone(), loaded, failures))
}

/// Reads a catalog for `merge`.
fn read_catalog(path: &Path) -> Result<Catalog> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Catalog::from_json_str(&text).with_context(|| format!("Invalid catalog {}", path.display()))
}

/// Rewrites `files` in canonical form, or only lists them with `check`.
fn format_files(out: &mut impl Write, files: &[PathBuf], check: bool) -> Result<Status> {
    let mut unformatted = 0_usize;

    for path in files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let formatted = Catalog::from_json_str(&text)
            .and_then(|catalog| catalog.to_json_string())
            .with_context(|| format!("Invalid catalog {}", path.display()))?;

        if formatted == text {
            continue;
        }
        unformatted += 1;
        if check {
            writeln!(out, "{} is not formatted", path.display())?;
        } else {
            std::fs::write(path, formatted)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(out, "Formatted {}", path.display())?;
        }
    }

    if check && unformatted > 0 {
        return Ok(Status::Failure);
    }
    Ok(Status::Success)
}

/// Parses `args` like the binary does; for tests.
///
/// # Errors
/// Returns the clap error for invalid arguments.
pub fn parse_from<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Ok(Cli::try_parse_from(args)?)
}
