// Inline SVG charts: grouped hourly bars and percentage gauges.

use std::f64::consts::PI;
use std::fmt::Write;

use super::escape;
use crate::models::HourlyBucket;

const IN_COLOR: &str = "#0d6efd";
const OUT_COLOR: &str = "#fd7e14";

const CHART_HEIGHT: f64 = 260.0;
const PLOT_TOP: f64 = 20.0;
const PLOT_BOTTOM: f64 = 220.0;
const PLOT_LEFT: f64 = 50.0;
const BAR_WIDTH: f64 = 8.0;
const GROUP_GAP: f64 = 6.0;
/// At most this many hour labels on the x axis.
const MAX_X_LABELS: usize = 12;

/// Grouped bar chart: one in bar and one out bar per hour bucket.
pub(super) fn hourly_bar_chart(buckets: &[HourlyBucket]) -> String {
    let group_width = 2.0 * BAR_WIDTH + GROUP_GAP;
    let width = PLOT_LEFT + group_width * buckets.len().max(1) as f64 + 10.0;
    let max = buckets
        .iter()
        .map(|b| b.sum_in.max(b.sum_out))
        .max()
        .unwrap_or(0)
        .max(1);
    let plot_height = PLOT_BOTTOM - PLOT_TOP;
    let scale = |v: u64| v as f64 / max as f64 * plot_height;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="production-chart" viewBox="0 0 {w:.0} {h:.0}" width="100%" height="{h:.0}" preserveAspectRatio="none" role="img">"#,
        w = width,
        h = CHART_HEIGHT
    );
    let _ = write!(
        svg,
        r##"<line x1="{l}" y1="{b}" x2="{r:.0}" y2="{b}" stroke="#999"/><line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="#999"/>"##,
        l = PLOT_LEFT,
        t = PLOT_TOP,
        b = PLOT_BOTTOM,
        r = width - 10.0
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" font-size="11" text-anchor="end">{max}</text><text x="{x}" y="{b}" font-size="11" text-anchor="end">0</text>"#,
        x = PLOT_LEFT - 4.0,
        y = PLOT_TOP + 4.0,
        b = PLOT_BOTTOM,
    );

    let label_every = buckets.len().div_ceil(MAX_X_LABELS).max(1);
    for (i, bucket) in buckets.iter().enumerate() {
        let x = PLOT_LEFT + GROUP_GAP / 2.0 + i as f64 * group_width;
        let hour = bucket.hour.format("%m-%d %H:00").to_string();
        for (offset, value, color, label) in [
            (0.0, bucket.sum_in, IN_COLOR, "in"),
            (BAR_WIDTH, bucket.sum_out, OUT_COLOR, "out"),
        ] {
            let h = scale(value);
            let _ = write!(
                svg,
                r#"<rect x="{:.1}" y="{:.1}" width="{}" height="{:.1}" fill="{}"><title>{} {}: {}</title></rect>"#,
                x + offset,
                PLOT_BOTTOM - h,
                BAR_WIDTH,
                h,
                color,
                escape(&hour),
                label,
                value
            );
        }
        if i % label_every == 0 {
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{}" font-size="10" text-anchor="middle">{}</text>"#,
                x + BAR_WIDTH,
                PLOT_BOTTOM + 16.0,
                escape(&hour)
            );
        }
    }
    svg.push_str("</svg>");
    let _ = write!(
        svg,
        r#"<div class="small"><span style="color:{}">&#9632;</span> in_count <span style="color:{}">&#9632;</span> out_count</div>"#,
        IN_COLOR, OUT_COLOR
    );
    svg
}

const GAUGE_CX: f64 = 100.0;
const GAUGE_CY: f64 = 100.0;
const GAUGE_R: f64 = 80.0;
/// Colour bands as (from %, to %, colour).
const GAUGE_BANDS: [(f64, f64, &str); 3] = [
    (0.0, 50.0, "lightgreen"),
    (50.0, 80.0, "yellow"),
    (80.0, 100.0, "red"),
];

fn gauge_point(percent: f64, r: f64) -> (f64, f64) {
    let angle = PI * (1.0 - percent / 100.0);
    (GAUGE_CX + r * angle.cos(), GAUGE_CY - r * angle.sin())
}

fn gauge_arc(from: f64, to: f64, r: f64) -> String {
    let (x1, y1) = gauge_point(from, r);
    let (x2, y2) = gauge_point(to, r);
    format!("M {x1:.2} {y1:.2} A {r} {r} 0 0 1 {x2:.2} {y2:.2}")
}

/// Half-circle gauge from 0 to 100 with the value drawn over the bands.
pub(super) fn gauge(title: &str, percent: f64) -> String {
    let value = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let mut svg = String::from(r#"<svg class="gauge" viewBox="0 0 200 130" width="100%" height="200" role="img">"#);
    for (from, to, color) in GAUGE_BANDS {
        let _ = write!(
            svg,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="18"/>"#,
            gauge_arc(from, to, GAUGE_R),
            color
        );
    }
    if value > 0.0 {
        let _ = write!(
            svg,
            r#"<path d="{}" fill="none" stroke="dodgerblue" stroke-width="8"/>"#,
            gauge_arc(0.0, value, GAUGE_R)
        );
    }
    let _ = write!(
        svg,
        r#"<text x="{cx}" y="{vy}" font-size="26" text-anchor="middle">{value:.1}</text><text x="{cx}" y="125" font-size="13" text-anchor="middle">{title}</text></svg>"#,
        cx = GAUGE_CX,
        vy = GAUGE_CY - 5.0,
        title = escape(title)
    );
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bucket(hour: u32, sum_in: u64, sum_out: u64) -> HourlyBucket {
        HourlyBucket {
            hour: NaiveDate::from_ymd_opt(2025, 3, 7)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            sum_in,
            sum_out,
        }
    }

    #[test]
    fn chart_has_two_bars_per_bucket() {
        let svg = hourly_bar_chart(&[bucket(1, 3, 4), bucket(2, 0, 9)]);
        assert_eq!(svg.matches("<rect").count(), 4);
        assert!(svg.contains("03-07 01:00 in: 3"));
        assert!(svg.contains("03-07 02:00 out: 9"));
    }

    #[test]
    fn gauge_endpoints_are_on_the_horizontal_axis() {
        let (x0, y0) = gauge_point(0.0, GAUGE_R);
        let (x1, y1) = gauge_point(100.0, GAUGE_R);
        assert!((x0 - 20.0).abs() < 1e-9 && (y0 - GAUGE_CY).abs() < 1e-9);
        assert!((x1 - 180.0).abs() < 1e-9 && (y1 - GAUGE_CY).abs() < 1e-9);
    }

    #[test]
    fn gauge_clamps_value() {
        assert!(gauge("CPU %", 250.0).contains(">100.0<"));
        assert!(gauge("CPU %", f64::NAN).contains(">0.0<"));
    }
}
