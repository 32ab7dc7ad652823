//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while deriving chart views
//! - exported to JSON (the `dump` subcommand)
//! - selected directly from CLI flags (`ValueEnum` on the control enums)

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One observation of the tracked market: a listing count and a derived
/// price metric for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Calendar date of the observation; unique within a dataset.
    pub date: NaiveDate,
    /// Number of active listings on that date.
    pub active_count: u32,
    /// Average price per square foot (two decimals downstream).
    pub price_metric: f64,
    /// Where the observation came from.
    pub origin: DataOrigin,
}

/// Provenance label for a data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    /// Backfilled from a historical research export.
    Historical,
    /// Captured from a live listings snapshot.
    Scraped,
    /// Generated by the local fallback when the remote source is unreachable.
    Synthetic,
}

impl DataOrigin {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            DataOrigin::Historical => "historical",
            DataOrigin::Scraped => "scraped",
            DataOrigin::Synthetic => "synthetic",
        }
    }
}

/// Display window: how many of the most recent points to show.
///
/// Counts points, not calendar days — the dataset is one point per day in
/// normal operation, so the two coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    #[value(name = "7")]
    #[serde(rename = "7")]
    W7,
    #[value(name = "30")]
    #[serde(rename = "30")]
    W30,
    #[value(name = "90")]
    #[serde(rename = "90")]
    W90,
    #[value(name = "180")]
    #[serde(rename = "180")]
    W180,
    #[value(name = "365")]
    #[serde(rename = "365")]
    W365,
    All,
}

impl Window {
    pub const ALL: [Window; 6] = [
        Window::W7,
        Window::W30,
        Window::W90,
        Window::W180,
        Window::W365,
        Window::All,
    ];

    /// Suffix length in points, or `None` for the full dataset.
    pub fn points(self) -> Option<usize> {
        match self {
            Window::W7 => Some(7),
            Window::W30 => Some(30),
            Window::W90 => Some(90),
            Window::W180 => Some(180),
            Window::W365 => Some(365),
            Window::All => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Window::W7 => "7 points",
            Window::W30 => "30 points",
            Window::W90 => "90 points",
            Window::W180 => "180 points",
            Window::W365 => "365 points",
            Window::All => "all",
        }
    }

    pub fn next(self) -> Window {
        let i = Window::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Window::ALL[(i + 1) % Window::ALL.len()]
    }

    pub fn prev(self) -> Window {
        let i = Window::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Window::ALL[(i + Window::ALL.len() - 1) % Window::ALL.len()]
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Must match the clap value names so `default_value_t` round-trips.
        let name = match self {
            Window::W7 => "7",
            Window::W30 => "30",
            Window::W90 => "90",
            Window::W180 => "180",
            Window::W365 => "365",
            Window::All => "all",
        };
        f.write_str(name)
    }
}

/// Moving-average overlay period. `Off` means no overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SmaPeriod {
    #[value(name = "0")]
    #[serde(rename = "0")]
    Off,
    #[value(name = "7")]
    #[serde(rename = "7")]
    P7,
    #[value(name = "30")]
    #[serde(rename = "30")]
    P30,
    #[value(name = "90")]
    #[serde(rename = "90")]
    P90,
}

impl SmaPeriod {
    pub const ALL: [SmaPeriod; 4] = [
        SmaPeriod::Off,
        SmaPeriod::P7,
        SmaPeriod::P30,
        SmaPeriod::P90,
    ];

    /// The averaging period, or `None` when the overlay is off.
    pub fn period(self) -> Option<usize> {
        match self {
            SmaPeriod::Off => None,
            SmaPeriod::P7 => Some(7),
            SmaPeriod::P30 => Some(30),
            SmaPeriod::P90 => Some(90),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SmaPeriod::Off => "off",
            SmaPeriod::P7 => "7",
            SmaPeriod::P30 => "30",
            SmaPeriod::P90 => "90",
        }
    }

    pub fn next(self) -> SmaPeriod {
        let i = SmaPeriod::ALL.iter().position(|p| *p == self).unwrap_or(0);
        SmaPeriod::ALL[(i + 1) % SmaPeriod::ALL.len()]
    }

    pub fn prev(self) -> SmaPeriod {
        let i = SmaPeriod::ALL.iter().position(|p| *p == self).unwrap_or(0);
        SmaPeriod::ALL[(i + SmaPeriod::ALL.len() - 1) % SmaPeriod::ALL.len()]
    }
}

impl std::fmt::Display for SmaPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SmaPeriod::Off => "0",
            SmaPeriod::P7 => "7",
            SmaPeriod::P30 => "30",
            SmaPeriod::P90 => "90",
        };
        f.write_str(name)
    }
}

/// Headline statistics derived from the full cached dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketStats {
    pub latest_count: u32,
    pub latest_price: f64,
    pub latest_date: NaiveDate,
    /// Percent change vs the point 30 back (clamped to the first point for
    /// short datasets). `None` when the reference price is zero.
    pub percent_change_30: Option<f64>,
}

/// Aggregates over the currently displayed window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub n_points: usize,
    pub avg_count: f64,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Start-to-end percent change across the window; `None` when the first
    /// price is zero.
    pub change_percent: Option<f64>,
}

/// The renderable chart model handed to the presentation layer.
///
/// All sequences share the same length; `overlay` is present only when an SMA
/// is both requested and renderable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    /// Display-only short date labels (never used for sorting or equality).
    pub labels: Vec<String>,
    /// Active listing counts.
    pub primary: Vec<f64>,
    /// Price metric.
    pub secondary: Vec<f64>,
    pub overlay: Option<OverlaySeries>,
}

/// A derived series layered onto the chart, governed by presence/absence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySeries {
    pub label: String,
    /// Same length as the base series; `None` marks the warm-up prefix.
    pub values: Vec<Option<f64>>,
}
