// scale.rs - value range, point projection and axis ticks for the line chart
use crate::settings::{RANGE_PADDING, Y_INTERVALS};
use eframe::egui::{pos2, Pos2, Rect};

/// One displayed quantity: (date label, value) pairs, newest first. Each
/// point also keeps the text shown next to it on the chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
struct Point {
    label: String,
    value: f64,
    text: String,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.push_with_text(label, value, value.to_string());
    }

    /// Like [`Series::push`] but with the value text as it was received.
    pub fn push_with_text(
        &mut self,
        label: impl Into<String>,
        value: f64,
        text: impl Into<String>,
    ) {
        self.points.push(Point {
            label: label.into(),
            value,
            text: text.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.points.iter().map(|p| (p.label.as_str(), p.value))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.points.iter().map(|p| p.text.as_str())
    }

    /// Raw min and max in a single pass.
    pub fn extrema(&self) -> Option<(f64, f64)> {
        self.values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut series = Series::new();
        for (label, value) in iter {
            series.push(label, value);
        }
        series
    }
}

/// Padded vertical bounds of a chart. `bottom <= top`, `bottom >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub bottom: f64,
    pub top: f64,
}

impl Range {
    pub fn from_extrema(min: f64, max: f64) -> Self {
        let span = max - min;
        let bottom = (min - RANGE_PADDING * span).max(0.0);
        let top = (max + RANGE_PADDING * span).max(bottom);
        Self { bottom, top }
    }

    pub fn from_series(series: &Series) -> Option<Self> {
        series.extrema().map(|(min, max)| Self::from_extrema(min, max))
    }

    /// One range over several series sharing an axis: each series' extrema
    /// are folded into a running global min/max before padding.
    pub fn union<'a>(series: impl IntoIterator<Item = &'a Series>) -> Option<Self> {
        series
            .into_iter()
            .filter_map(Series::extrema)
            .reduce(|(min, max), (s_min, s_max)| (min.min(s_min), max.max(s_max)))
            .map(|(min, max)| Self::from_extrema(min, max))
    }

    pub fn span(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn is_flat(&self) -> bool {
        self.span() <= 0.0
    }

    /// Pixel y of `value` inside `plot`; the vertical center when the range is flat.
    pub fn project_y(&self, value: f64, plot: Rect) -> f32 {
        if self.is_flat() {
            return plot.top() + plot.height() / 2.0;
        }
        plot.top() + plot.height() * ((self.top - value) / self.span()) as f32
    }
}

/// Pixel x of ordinal `index` out of `count`; index 0 sits on the right edge.
pub fn project_x(index: usize, count: usize, plot: Rect) -> f32 {
    if count <= 1 {
        return plot.left() + plot.width();
    }
    let t = index as f32 / (count - 1) as f32;
    plot.left() + plot.width() * (1.0 - t)
}

pub fn project_points(series: &Series, range: Range, plot: Rect) -> Vec<Pos2> {
    let count = series.len();
    series
        .values()
        .enumerate()
        .map(|(i, value)| pos2(project_x(i, count, plot), range.project_y(value, plot)))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub pos: f32,
    pub label: String,
}

/// Value at horizontal gridline `k` (0 = bottom edge). The last line is `top` exactly.
pub fn tick_value(range: Range, k: usize) -> f64 {
    if k >= Y_INTERVALS {
        return range.top;
    }
    range.bottom + range.span() * (k as f64 / Y_INTERVALS as f64)
}

/// Drops everything past the second decimal, e.g. 12.3499 -> 12.34.
pub fn truncate_2dp(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

/// Always shows a fractional part: 12 -> "12.0", 12.5 -> "12.5". Large values
/// stay positional, 40750000 -> "40750000.0", never exponent notation.
pub fn format_tick(value: f64) -> String {
    let text = value.to_string();
    if text.contains(['.', 'e', 'i', 'N']) {
        text
    } else {
        format!("{text}.0")
    }
}

pub fn y_ticks(range: Range, plot: Rect) -> Vec<Tick> {
    (0..=Y_INTERVALS)
        .map(|k| {
            let from_top = (Y_INTERVALS - k) as f32 / Y_INTERVALS as f32;
            Tick {
                pos: plot.top() + plot.height() * from_top,
                label: format_tick(truncate_2dp(tick_value(range, k))),
            }
        })
        .collect()
}

/// One tick per data point, at its projected x, labeled with its date.
pub fn x_ticks(series: &Series, plot: Rect) -> Vec<Tick> {
    let count = series.len();
    series
        .iter()
        .enumerate()
        .map(|(i, (label, _))| Tick {
            pos: project_x(i, count, plot),
            label: label.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;
    use proptest::prelude::*;

    fn plot() -> Rect {
        Rect::from_min_size(pos2(50.0, 50.0), vec2(1180.0, 620.0))
    }

    fn sample() -> Series {
        [("1/1/2019", 10.0), ("1/2/2019", 20.0), ("1/3/2019", 15.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn sample_range_is_padded_by_five_percent() {
        let range = Range::from_series(&sample()).unwrap();
        assert_eq!(range.top, 20.5);
        assert_eq!(range.bottom, 9.5);
    }

    #[test]
    fn sample_points_follow_linear_interpolation() {
        let series = sample();
        let range = Range::from_series(&series).unwrap();
        let points = project_points(&series, range, plot());

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].x, 1230.0);
        assert_eq!(points[1].x, 640.0);
        assert_eq!(points[2].x, 50.0);

        let expected = |v: f64| 50.0 + 620.0 * ((20.5 - v) / 11.0) as f32;
        assert_eq!(points[0].y, expected(10.0));
        assert_eq!(points[1].y, expected(20.0));
        assert_eq!(points[2].y, expected(15.0));
        // the highest value sits just under the top edge, inside the padding
        assert!(points[1].y > 50.0 && points[1].y < 50.0 + 620.0 * 0.05);
        assert!(points[0].y < 670.0);
    }

    #[test]
    fn bottom_is_clamped_at_zero() {
        let series: Series = [("a", 1.0), ("b", 100.0)].into_iter().collect();
        let range = Range::from_series(&series).unwrap();
        assert_eq!(range.bottom, 0.0);
        assert!((range.top - 104.95).abs() < 1e-9);
    }

    #[test]
    fn flat_series_projects_to_vertical_center() {
        let series: Series = [("a", 7.0), ("b", 7.0), ("c", 7.0)].into_iter().collect();
        let range = Range::from_series(&series).unwrap();
        assert_eq!(range, Range { bottom: 7.0, top: 7.0 });
        for p in project_points(&series, range, plot()) {
            assert_eq!(p.y, 360.0);
        }
    }

    #[test]
    fn single_point_sits_on_right_edge() {
        let series: Series = [("1/1/2019", 3.0)].into_iter().collect();
        let range = Range::from_series(&series).unwrap();
        let points = project_points(&series, range, plot());
        assert_eq!(points, vec![pos2(1230.0, 360.0)]);
    }

    #[test]
    fn empty_series_has_no_range() {
        assert_eq!(Range::from_series(&Series::new()), None);
        assert_eq!(Range::union([&Series::new()]), None);
    }

    #[test]
    fn union_covers_every_series() {
        let close: Series = [("a", 10.0), ("b", 12.0)].into_iter().collect();
        let high: Series = [("a", 11.0), ("b", 30.0)].into_iter().collect();
        let low: Series = [("a", 2.0), ("b", 11.0)].into_iter().collect();
        let range = Range::union([&close, &high, &low]).unwrap();
        assert_eq!(range, Range::from_extrema(2.0, 30.0));
        assert!((range.top - 31.4).abs() < 1e-9);
        assert!((range.bottom - 0.6).abs() < 1e-9);
    }

    #[test]
    fn y_ticks_span_the_plot_and_end_on_range_bounds() {
        let range = Range { bottom: 9.5, top: 20.5 };
        let ticks = y_ticks(range, plot());
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0].pos, 670.0);
        assert_eq!(ticks[10].pos, 50.0);
        assert_eq!(ticks[0].label, "9.5");
        assert_eq!(ticks[10].label, "20.5");
        assert_eq!(ticks[5].label, "15.0");
    }

    #[test]
    fn tick_labels_truncate_instead_of_rounding() {
        assert_eq!(truncate_2dp(12.349), 12.34);
        assert_eq!(truncate_2dp(12.999), 12.99);
        let range = Range { bottom: 0.0, top: 1.0 / 3.0 };
        let ticks = y_ticks(range, plot());
        assert_eq!(ticks[0].label, "0.0");
        assert_eq!(ticks[10].label, "0.33");
        assert_eq!(ticks[2].label, "0.06");
    }

    #[test]
    fn volume_sized_ticks_stay_positional() {
        let labels: Vec<_> = y_ticks(Range::from_extrema(25e6, 40e6), plot())
            .into_iter()
            .map(|t| t.label)
            .collect();
        assert_eq!(labels[0], "24250000.0");
        assert_eq!(labels[10], "40750000.0");
        assert!(labels.iter().all(|l| !l.contains('e') && !l.contains('E')));
    }

    #[test]
    fn pushed_values_keep_their_text() {
        let mut series = Series::new();
        series.push_with_text("1/2/2019", 143.1, "143.10");
        series.push("1/3/2019", 2.5);
        assert_eq!(series.texts().collect::<Vec<_>>(), ["143.10", "2.5"]);
        assert_eq!(series.values().collect::<Vec<_>>(), [143.1, 2.5]);
    }

    #[test]
    fn x_ticks_carry_dates_at_point_positions() {
        let series = sample();
        let ticks = x_ticks(&series, plot());
        let labels: Vec<_> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["1/1/2019", "1/2/2019", "1/3/2019"]);
        assert_eq!(ticks[0].pos, 1230.0);
        assert_eq!(ticks[2].pos, 50.0);
    }

    #[test]
    fn format_tick_keeps_one_fraction_digit() {
        assert_eq!(format_tick(12.0), "12.0");
        assert_eq!(format_tick(12.5), "12.5");
        assert_eq!(format_tick(1234567.0), "1234567.0");
        assert_eq!(format_tick(40750000.0), "40750000.0");
    }

    proptest! {
        #[test]
        fn range_is_ordered_and_non_negative(values in prop::collection::vec(0.0f64..1e9, 1..200)) {
            let series: Series = values.iter().map(|v| ("d", *v)).collect();
            let range = Range::from_series(&series).unwrap();
            prop_assert!(range.bottom <= range.top);
            prop_assert!(range.bottom >= 0.0);
            for v in &values {
                prop_assert!(range.bottom <= *v && *v <= range.top);
            }
        }

        #[test]
        fn projected_x_is_non_increasing(values in prop::collection::vec(0.0f64..1e6, 2..200)) {
            let series: Series = values.iter().map(|v| ("d", *v)).collect();
            let range = Range::from_series(&series).unwrap();
            let points = project_points(&series, range, plot());
            prop_assert_eq!(points[0].x, 1230.0);
            prop_assert_eq!(points[points.len() - 1].x, 50.0);
            for pair in points.windows(2) {
                prop_assert!(pair[0].x >= pair[1].x);
            }
        }

        #[test]
        fn projection_is_deterministic(values in prop::collection::vec(0.0f64..1e6, 1..50)) {
            let series: Series = values.iter().map(|v| ("d", *v)).collect();
            let range = Range::from_series(&series).unwrap();
            let first = project_points(&series, range, plot());
            let second = project_points(&series, range, plot());
            prop_assert_eq!(
                first.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect::<Vec<_>>(),
                second.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect::<Vec<_>>()
            );
        }
    }
}
