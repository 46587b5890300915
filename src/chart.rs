// chart.rs - line chart of one series over the configured canvas
use crate::scale::{self, Range, Series};
use crate::settings::{ChartStyle, LABEL_GAP, TICK_LENGTH};
use crate::surface::DrawSurface;
use eframe::egui::{pos2, Align2, Rect};

/// Draws gridlines, axes, labels and the polyline of `series` scaled to `range`.
pub fn render(surface: &mut impl DrawSurface, series: &Series, range: Range, style: &ChartStyle) {
    let plot = style.plot_rect();
    let grid = ChartStyle::color(style.grid);
    let axis = ChartStyle::color(style.axis);
    let text = ChartStyle::color(style.text);

    surface.fill_rect(
        Rect::from_min_size(pos2(0.0, 0.0), style.canvas_size()),
        ChartStyle::color(style.panel),
    );
    surface.fill_rect(plot, ChartStyle::color(style.background));
    if series.is_empty() {
        return;
    }

    for tick in scale::y_ticks(range, plot) {
        surface.line(pos2(plot.left(), tick.pos), pos2(plot.right(), tick.pos), grid);
        surface.line(pos2(plot.left(), tick.pos), pos2(plot.left() + TICK_LENGTH, tick.pos), axis);
        surface.text(
            pos2(plot.left() - LABEL_GAP, tick.pos),
            Align2::RIGHT_CENTER,
            &tick.label,
            style.font_size,
            text,
        );
    }
    surface.line(plot.left_bottom(), plot.right_bottom(), axis);

    for tick in scale::x_ticks(series, plot) {
        surface.line(pos2(tick.pos, plot.top()), pos2(tick.pos, plot.bottom()), grid);
        surface.line(
            pos2(tick.pos, plot.bottom() - TICK_LENGTH),
            pos2(tick.pos, plot.bottom()),
            axis,
        );
        surface.text(
            pos2(tick.pos, plot.bottom() + LABEL_GAP),
            Align2::CENTER_TOP,
            &tick.label,
            style.font_size,
            text,
        );
    }
    surface.line(plot.left_top(), plot.left_bottom(), axis);

    let points = scale::project_points(series, range, plot);
    let line = ChartStyle::color(style.line);
    for pair in points.windows(2) {
        surface.line(pair[0], pair[1], line);
    }
    for (point, value) in points.iter().zip(series.texts()) {
        surface.text(
            pos2(point.x, point.y - LABEL_GAP),
            Align2::CENTER_BOTTOM,
            value,
            style.font_size,
            text,
        );
    }
}

/// A single centered message in place of the chart.
pub fn render_placeholder(surface: &mut impl DrawSurface, message: &str, style: &ChartStyle) {
    let canvas = Rect::from_min_size(pos2(0.0, 0.0), style.canvas_size());
    surface.fill_rect(canvas, ChartStyle::color(style.panel));
    surface.text(
        canvas.center(),
        Align2::CENTER_CENTER,
        message,
        style.font_size * 2.0,
        ChartStyle::color(style.text),
    );
}
