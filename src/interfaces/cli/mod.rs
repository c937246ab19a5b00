//! Command-line surface
//!
//! Flags map onto `CleaningSettings` overrides; anything left unset falls
//! back to the config file and `REINBOX_*` environment variables.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::domain::contacts::{CleaningSettings, EmailRule, Mode};
use crate::infrastructure::storage::default_output_path;

/// Clean DealMachine contact exports into one row per email
#[derive(Parser, Debug)]
#[command(name = "reinbox-cleaner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// DealMachine CSV export to clean
    pub input: PathBuf,

    /// Output CSV path ("-" for stdout) [default: <input>_cleaned.csv]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Campaign mode: clone (remove renters) or owner-only (remove likely owners)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<Mode>,

    /// Keep only the first row per email, case-insensitive (true or false)
    #[arg(long, value_name = "BOOL")]
    pub dedupe: Option<bool>,

    /// Drop rows whose email does not look like an address
    #[arg(long)]
    pub filter_invalid_emails: bool,

    /// Email check used by --filter-invalid-emails: basic or strict
    #[arg(long, value_name = "RULE")]
    pub email_rule: Option<EmailRule>,

    /// Trim surrounding spaces in every data cell
    #[arg(long)]
    pub trim_fields: bool,

    /// TOML settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the first N cleaned rows to stderr
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,

    /// Print the run summary as JSON
    #[arg(long)]
    pub summary_json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Where cleaned rows go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl Cli {
    /// Settings given on the command line. Switches that were not passed
    /// stay unset so they do not mask the config file.
    pub fn overrides(&self) -> CleaningSettings {
        CleaningSettings {
            mode: self.mode,
            dedupe_by_email: self.dedupe,
            filter_invalid_emails: self.filter_invalid_emails.then_some(true),
            email_rule: self.email_rule,
            trim_fields: self.trim_fields.then_some(true),
        }
    }

    pub fn output_target(&self) -> OutputTarget {
        match &self.output {
            Some(path) if path == Path::new("-") => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path.clone()),
            None => OutputTarget::File(default_output_path(&self.input)),
        }
    }
}
