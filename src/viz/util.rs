//! Utility functions for visualization: colors, axis scaling, label gutters.

use crate::palette::Rgb8;
use plotters::prelude::*;

use super::text::estimate_text_width_px;

#[inline]
pub fn rgb_color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Pick a single Y-axis scale and its human label based on the overall magnitude.
/// Returns (scale, label), e.g. (1e6, "millions").
pub fn choose_axis_scale(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e12 {
        (1.0e12, "trillions")
    } else if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e3 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
/// - `ymin_scaled..ymax_scaled`: the **scaled** Y range you pass to Plotters
/// - `ticks`: how many Y labels you plan to show (e.g., 10)
/// - `font_px`: font size used for axis labels (e.g., 12)
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(
    ymin_scaled: f64,
    ymax_scaled: f64,
    ticks: usize,
    font_px: u32,
) -> u32 {
    // Must match the y formatter in draw_bars()
    let y_label_fmt = |v: f64| {
        let a = v.abs();
        let prec = if a >= 100.0 {
            0
        } else if a >= 10.0 {
            1
        } else {
            2
        };
        format!("{:.*}", prec, v)
    };

    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin_scaled + (ymax_scaled - ymin_scaled) * t;
        let s = y_label_fmt(v);
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }

    // Tick marks plus the rotated axis title.
    let with_padding = max_px.saturating_add(18);
    with_padding.clamp(48, 140)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_scale_words() {
        assert_eq!(choose_axis_scale(556_263_527.0), (1.0e6, "millions"));
        assert_eq!(choose_axis_scale(49_357.19), (1.0e3, "thousands"));
        assert_eq!(choose_axis_scale(82.6), (1.0, ""));
    }

    #[test]
    fn left_gutter_is_clamped() {
        assert_eq!(compute_left_label_area_px(0.0, 1.0, 10, 12), 48);
        assert!(compute_left_label_area_px(0.0, 1.0e30, 10, 12) <= 140);
    }
}
