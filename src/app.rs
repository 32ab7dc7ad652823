//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the load pipeline (remote fetch with synthetic fallback)
//! - dispatches to the TUI or the one-shot reporting commands

use clap::Parser;

use crate::cli::{Command, ViewArgs};
use crate::data::ListingsClient;
use crate::error::AppError;
use crate::{report, view};

pub mod pipeline;

use pipeline::DashboardContext;

/// Entry point for the `ldash` binary.
pub fn run() -> Result<(), AppError> {
    // Diagnostics go to stderr and default to silent; recoverable load
    // failures are recorded here even when the TUI owns the screen.
    env_logger::init();

    // We want `ldash` and `ldash -w 30` to behave like `ldash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => crate::tui::run(args),
        Command::Stats(args) => handle_stats(args),
        Command::Dump(args) => handle_dump(args),
    }
}

fn handle_stats(args: ViewArgs) -> Result<(), AppError> {
    let client = ListingsClient::new(args.endpoint.clone());
    let mut ctx = DashboardContext::new();
    let feed = pipeline::load_dataset(&mut ctx, &client, args.fallback_days);

    // The fallback guarantees a non-empty dataset, so stats always derive.
    let Some(stats) = report::derive_stats(ctx.current()) else {
        return Err(AppError::new(4, "No data available after load."));
    };
    let filtered = crate::series::window::filter(ctx.current(), args.window);
    let summary = report::summarize(filtered);

    print!(
        "{}",
        report::format::format_market_report(&stats, summary.as_ref(), args.window, feed.origin())
    );
    Ok(())
}

fn handle_dump(args: ViewArgs) -> Result<(), AppError> {
    let client = ListingsClient::new(args.endpoint.clone());
    let mut ctx = DashboardContext::new();
    pipeline::load_dataset(&mut ctx, &client, args.fallback_days);

    let chart = view::compose(ctx.current(), args.window, args.sma);
    let json = serde_json::to_string_pretty(&chart)
        .map_err(|e| AppError::new(4, format!("Failed to serialize chart view: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Rewrite argv so `ldash` defaults to `ldash tui`.
///
/// Rules:
/// - `ldash`                    -> `ldash tui`
/// - `ldash -w 30 ...`          -> `ldash tui -w 30 ...`
/// - `ldash --help/--version`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "stats" | "dump");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["ldash"])), args(&["ldash", "tui"]));
        assert_eq!(
            rewrite_args(args(&["ldash", "-w", "30"])),
            args(&["ldash", "tui", "-w", "30"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["ldash", "stats"])),
            args(&["ldash", "stats"])
        );
        assert_eq!(
            rewrite_args(args(&["ldash", "--help"])),
            args(&["ldash", "--help"])
        );
    }
}
