use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use eof_validator::{CheckConfig, FsSourceConfig, Settings, check_fs, output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Check that files end with the configured line separator.
#[derive(Debug, Parser)]
#[command(name = "eof-validator", version, about)]
pub struct Cli {
    /// Files or directories to check
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Accepted line separator: LF, CR, CRLF or `LF_CR_CRLF`
    #[arg(short = 's', long)]
    pub line_separator: Option<String>,

    /// Settings file (.json, .yaml or .yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only check files with these extensions (repeatable or comma-separated)
    #[arg(long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Exclude glob patterns
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Follow symbolic links while walking directories
    #[arg(long)]
    pub follow_links: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve settings file and flags into the run configuration.
    ///
    /// Flags override values from the settings file. Nothing is scanned here,
    /// so a bad line separator stops the run before any file is opened.
    pub fn resolve(&self) -> anyhow::Result<(FsSourceConfig, CheckConfig)> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(sep) = &self.line_separator {
            settings.line_separator = Some(sep.clone());
        }
        if !self.extensions.is_empty() {
            settings.file_extensions.clone_from(&self.extensions);
        }

        let check_config = settings
            .check_config()
            .context("Invalid configuration")?;

        let mut fs_config = FsSourceConfig::default();
        fs_config.paths.clone_from(&self.paths);
        fs_config.exclude = settings.exclude;
        fs_config.exclude.extend(self.exclude.iter().cloned());
        fs_config.follow_links = self.follow_links;

        Ok((fs_config, check_config))
    }
}

/// Run the check and print the report. Returns whether the run was clean.
pub fn run(
    fs_config: &FsSourceConfig,
    check_config: &CheckConfig,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let report = check_fs(fs_config, check_config)?;

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Human => output::write_human(&report, &mut stdout)?,
        OutputFormat::Json => output::write_json(&report, &mut stdout)?,
    }
    Ok(report.ok)
}
