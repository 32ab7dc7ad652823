//! Command-line parsing for the listings dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the data/series/view code.

use clap::{Parser, Subcommand};

use crate::domain::{SmaPeriod, Window};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ldash", version, about = "Housing inventory & price dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI dashboard.
    ///
    /// Uses the same load pipeline as the one-shot commands, but renders the
    /// chart and statistics in a terminal UI using Ratatui.
    Tui(ViewArgs),
    /// Load once and print the market summary to stdout.
    Stats(ViewArgs),
    /// Load once and print the composed chart view as JSON (for scripting).
    Dump(ViewArgs),
}

/// Common options for selecting what to display.
#[derive(Debug, Parser, Clone)]
pub struct ViewArgs {
    /// Display window: last N points, or "all".
    #[arg(short = 'w', long, value_enum, default_value_t = Window::W90)]
    pub window: Window,

    /// SMA overlay period on the price series ("0" disables the overlay).
    #[arg(short = 's', long = "sma", value_enum, default_value_t = SmaPeriod::Off)]
    pub sma: SmaPeriod,

    /// Days of history generated by the synthetic fallback.
    #[arg(long, default_value_t = crate::data::sample::DEFAULT_DAYS_BACK)]
    pub fallback_days: u32,

    /// Feed endpoint override (defaults to $LISTING_DASH_URL, also read
    /// from .env).
    #[arg(long)]
    pub endpoint: Option<String>,
}
