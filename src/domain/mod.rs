//! Domain types shared across the data, series, report, and view layers.

pub mod types;

pub use types::{
    ChartView, DataOrigin, DataPoint, MarketStats, OverlaySeries, SmaPeriod, Window,
    WindowSummary,
};
