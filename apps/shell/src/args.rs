//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use summit_logger::LevelFilter;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "summit")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Submit Summit registrations from the command line")]
pub struct Cli {
    /// Minimum level of diagnostics written to stderr
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Post a registration the way the landing page form does
    Submit(SubmitArgs),
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Site the form is served from; relative endpoints resolve against it
    #[arg(long, default_value = "http://localhost:8888/")]
    pub site: String,

    /// Registration function URL (defaults to the site's `/.netlify/functions/register`)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Legacy form-collection URL to relay the submission to
    #[arg(long)]
    pub relay: Option<String>,

    /// Relay entry name for a form field, as `field=entry` (repeatable)
    #[arg(long = "entry", value_name = "FIELD=ENTRY", value_parser = parse_pair)]
    pub entries: Vec<(String, String)>,

    /// Milliseconds to wait for the relay before reporting
    #[arg(long, value_name = "MS")]
    pub settle_ms: Option<u64>,

    /// Request timeout in seconds (none by default)
    #[arg(long, value_name = "SECS", value_parser = parse_secs)]
    pub timeout: Option<Duration>,

    /// Print every form state change to stderr
    #[arg(long)]
    pub watch: bool,

    /// Form fields, as `field=value`
    #[arg(value_name = "FIELD=VALUE", value_parser = parse_pair)]
    pub fields: Vec<(String, String)>,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected `key=value`, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

fn parse_secs(raw: &str) -> Result<Duration, String> {
    raw.parse::<u64>().map(Duration::from_secs).map_err(|e| format!("`{raw}`: {e}"))
}
