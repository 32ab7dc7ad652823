//! Plotters-powered dashboard chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - a secondary y-axis, so counts and prices keep their own scales
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::OverlaySeries;

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are
/// computed outside the render call. This keeps `render()` focused on
/// drawing and makes the data prep testable on its own.
pub struct DashboardChart<'a> {
    /// Short date labels, one per point; indexed by the x coordinate.
    pub labels: &'a [String],
    /// Price metric, drawn on the primary (left) axis.
    pub price: &'a [f64],
    /// Listing counts, drawn on the secondary (right) axis.
    pub count: &'a [f64],
    /// Optional SMA overlay on the price axis; `None` entries (the warm-up
    /// prefix) are skipped, not drawn as zero.
    pub overlay: Option<&'a OverlaySeries>,
    /// Price axis bounds.
    pub price_bounds: [f64; 2],
    /// Count axis bounds.
    pub count_bounds: [f64; 2],
}

impl Widget for DashboardChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.price.len();
        if n < 2 || self.count.len() != n {
            return;
        }

        let [p0, p1] = self.price_bounds;
        let [c0, c1] = self.count_bounds;
        if !(p0.is_finite() && p1.is_finite() && c0.is_finite() && c1.is_finite())
            || p1 <= p0
            || c1 <= c0
        {
            return;
        }

        let x0 = 0.0_f64;
        let x1 = (n - 1) as f64;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Right, 5)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, p0..p1)?
                .set_secondary_coord(x0..x1, c0..c1);

            // Axes + tick labels.
            //
            // We disable the mesh lines to reduce visual clutter in
            // low-resolution terminal rendering; axes + labels are enough.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc("$/sqft")
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| label_at(self.labels, *v))
                .y_label_formatter(&|v| format!("${v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            chart
                .configure_secondary_axes()
                .y_desc("listings")
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .draw()?;

            // Series styling: keep the palette high-contrast for terminals.
            let price_color = RGBColor(0, 255, 255); // cyan
            let overlay_color = RGBColor(255, 255, 0); // yellow
            let count_color = RGBColor(0, 255, 0); // green

            // 1) Price line on the primary axis.
            chart.draw_series(LineSeries::new(
                self.price.iter().enumerate().map(|(i, &y)| (i as f64, y)),
                &price_color,
            ))?;

            // 2) SMA overlay, when present. Only the defined suffix is drawn.
            if let Some(overlay) = self.overlay {
                chart.draw_series(LineSeries::new(
                    overlay
                        .values
                        .iter()
                        .enumerate()
                        .filter_map(|(i, v)| v.map(|y| (i as f64, y))),
                    &overlay_color,
                ))?;
            }

            // 3) Listing counts on the secondary axis.
            chart.draw_secondary_series(LineSeries::new(
                self.count.iter().enumerate().map(|(i, &y)| (i as f64, y)),
                &count_color,
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Tick label for an x position: the nearest point's date label.
fn label_at(labels: &[String], x: f64) -> String {
    let idx = x.round().max(0.0) as usize;
    labels.get(idx).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_at_snaps_to_the_nearest_index() {
        let labels = vec!["Jan 01".to_string(), "Jan 02".to_string()];
        assert_eq!(label_at(&labels, 0.2), "Jan 01");
        assert_eq!(label_at(&labels, 0.9), "Jan 02");
        assert_eq!(label_at(&labels, 5.0), "");
        assert_eq!(label_at(&labels, -1.0), "Jan 01");
    }
}
