//! CLI argument definitions for marketsift.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Fetch a quote batch for explicit symbols |
//! | `screen` | Run a screening strategy over the default universe |
//! | `strategies` | List the built-in strategy catalog |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Fail when any provider attempt errored |
//! | `--offline` | `false` | Skip real sources, serve synthetic data |
//! | `--timeout-ms` | per provider | Override every provider timeout |
//!
//! # Examples
//!
//! ```bash
//! # Fetch quotes
//! marketsift quote 600519 000001
//!
//! # Screen for momentum names
//! marketsift screen momentum_breakout --count 5 --pretty
//!
//! # Deterministic offline run
//! marketsift screen oversold_rebound --offline
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Resilient A-share quote acquisition and screening.
///
/// Consults Sina, Tencent, and Eastmoney in order, caches answers, and
/// falls back to deterministic synthetic data when every source is down.
#[derive(Debug, Parser)]
#[command(
    name = "marketsift",
    author,
    version,
    about = "A-share quote acquisition and screening CLI"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Fail (exit code 5) when any provider attempt errored.
    ///
    /// Useful for pipelines that must not silently run on synthetic data.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Skip real sources entirely and serve deterministic synthetic data.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Override every provider timeout, in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Overall wall-clock budget for one acquisition pass, in milliseconds.
    #[arg(long, global = true)]
    pub deadline_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a quote batch for one or more symbols.
    ///
    /// Accepts bare six-digit codes, suffixed codes, or wire codes:
    /// `600519`, `600519.SH`, `sh600519`.
    ///
    /// # Examples
    ///
    ///   marketsift quote 600519
    ///   marketsift quote 600519 000001 --pretty
    Quote(QuoteArgs),

    /// Run a screening strategy over the default universe.
    ///
    /// Entry strategies additionally attach a 0-100 entry score and the
    /// satisfied signal phrases to each record.
    ///
    /// # Examples
    ///
    ///   marketsift screen momentum_breakout
    ///   marketsift screen oversold_bounce_entry --count 3
    Screen(ScreenArgs),

    /// List the built-in strategy catalog.
    Strategies(StrategiesArgs),
}

/// Arguments for the `quote` command.
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// One or more A-share symbols (e.g. 600519, 000001.SZ, sh600036).
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

/// Arguments for the `screen` command.
#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// Strategy key, e.g. momentum_breakout. See `marketsift strategies`.
    pub strategy: String,

    /// Maximum number of records to return.
    #[arg(long, default_value_t = 10)]
    pub count: usize,
}

/// Arguments for the `strategies` command.
#[derive(Debug, Args)]
pub struct StrategiesArgs {
    /// Include filter and rubric details.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}
