//! Display formatting for prices, changes, dates, and the one-shot summary.

use chrono::NaiveDate;

use crate::domain::{DataOrigin, MarketStats, Window, WindowSummary};

/// Currency formatting for the price metric: `$X.XX`.
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

/// Percent change at one decimal, with an explicit `+` for non-negative
/// values. `None` (no reference available) renders as `n/a`.
pub fn format_percent_change(change: Option<f64>) -> String {
    match change {
        Some(p) if p >= 0.0 => format!("+{p:.1}%"),
        Some(p) => format!("{p:.1}%"),
        None => "n/a".to_string(),
    }
}

/// Short month/day label. Display only — never used for sorting or equality.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Text block for the `stats` subcommand.
pub fn format_market_report(
    stats: &MarketStats,
    summary: Option<&WindowSummary>,
    window: Window,
    feed: DataOrigin,
) -> String {
    let mut out = String::new();

    out.push_str("=== ldash — listing market summary ===\n");
    out.push_str(&format!("As of : {}\n", format_short_date(stats.latest_date)));
    out.push_str(&format!("Feed  : {}\n", feed.display_name()));
    out.push_str(&format!("Latest: {} listings | {} per sqft\n",
        stats.latest_count,
        format_price(stats.latest_price),
    ));
    out.push_str(&format!(
        "Change (30 back): {}\n",
        format_percent_change(stats.percent_change_30)
    ));

    if let Some(summary) = summary {
        out.push_str(&format!("\nWindow: {} (n={})\n", window.display_name(), summary.n_points));
        out.push_str(&format!("- listings avg : {:.1}\n", summary.avg_count));
        out.push_str(&format!(
            "- price avg    : {} | range [{}, {}]\n",
            format_price(summary.avg_price),
            format_price(summary.min_price),
            format_price(summary.max_price),
        ));
        out.push_str(&format!(
            "- start to end : {}\n",
            format_percent_change(summary.change_percent)
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_formats_as_currency() {
        assert_eq!(format_price(450.0), "$450.00");
        assert_eq!(format_price(449.955), "$449.96");
    }

    #[test]
    fn percent_change_carries_an_explicit_sign() {
        assert_eq!(format_percent_change(Some(27.52)), "+27.5%");
        assert_eq!(format_percent_change(Some(0.0)), "+0.0%");
        assert_eq!(format_percent_change(Some(-3.21)), "-3.2%");
        assert_eq!(format_percent_change(None), "n/a");
    }

    #[test]
    fn short_date_is_month_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_short_date(date), "Mar 05");
    }

    #[test]
    fn market_report_mentions_the_headline_numbers() {
        let stats = MarketStats {
            latest_count: 47,
            latest_price: 482.5,
            latest_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            percent_change_30: Some(4.26),
        };
        let text = format_market_report(&stats, None, Window::W90, DataOrigin::Synthetic);

        assert!(text.contains("$482.50"), "{text}");
        assert!(text.contains("+4.3%"), "{text}");
        assert!(text.contains("synthetic"), "{text}");
        assert!(text.contains("47 listings"), "{text}");
    }
}
