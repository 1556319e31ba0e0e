//! Static rendering of bar chart specs to **SVG** or **PNG** with plotters.
//!
//! - One bar per entry, in chart order, filled with the bar color
//! - Value label above each bar, country name below
//! - Large magnitudes scaled on the Y axis (`pop (millions)`)
//! - An empty spec renders as an empty, captioned frame
//!
//! Choropleth and table specs need a browser renderer; see [`crate::plotly`].

pub mod text;
pub mod util;

use crate::chart::{BarChart, ChartSpec};
use anyhow::{Result, anyhow, bail};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use text::truncate_to_width;
use util::{choose_axis_scale, compute_left_label_area_px, rgb_color};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        // from `src/viz/mod.rs` → project root → `assets/DejaVuSans.ttf`
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Render any chart spec. Only bar charts have a static renderer.
pub fn render_chart<P: AsRef<Path>>(spec: &ChartSpec, out_path: P, width: u32) -> Result<()> {
    match spec {
        ChartSpec::Bar(chart) => plot_bars(chart, out_path, width, chart.layout.height),
        other => bail!(
            "{} charts cannot be rendered to an image; export HTML instead",
            other.kind()
        ),
    }
}

/// Draw a bar chart to `out_path`; the extension picks SVG (`.svg`) or PNG.
pub fn plot_bars<P: AsRef<Path>>(
    chart: &BarChart,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_bars(root, chart)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_bars(root, chart)?;
    }
    log::debug!(
        "rendered {} bars to {}",
        chart.bars.len(),
        out_path.display()
    );
    Ok(())
}

fn draw_bars<DB>(root: DrawingArea<DB, Shift>, chart: &BarChart) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: i32 = 16;
    const TICK_FONT_PX: u32 = 12;
    let y_label_count = 10usize;

    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let n = chart.bars.len().max(1) as i32;
    let max_val = chart
        .bars
        .iter()
        .map(|b| b.value)
        .fold(0.0f64, f64::max);
    let (yscale, scale_word) = choose_axis_scale(max_val);
    // headroom for the value labels
    let y_top = if max_val > 0.0 {
        max_val / yscale * 1.12
    } else {
        1.0
    };
    let y_axis_title = if scale_word.is_empty() {
        chart.y_title.clone()
    } else {
        format!("{} ({scale_word})", chart.y_title)
    };

    let left_label_width_px = compute_left_label_area_px(0.0, y_top, y_label_count, TICK_FONT_PX);
    let (root_w, _root_h) = root.dim_in_pixel();
    let plot_w = root_w as i32 - 2 * MARGIN - left_label_width_px as i32;
    let slot_px = (plot_w / n).max(8) as u32;

    let names: Vec<String> = chart
        .bars
        .iter()
        .map(|b| truncate_to_width(&b.category, TICK_FONT_PX, slot_px.saturating_sub(4)))
        .collect();

    let caption = chart.layout.title.clone().unwrap_or_default();
    let mut cc = ChartBuilder::on(&root)
        .margin(MARGIN as u32)
        .caption(caption, (FontFamily::SansSerif, 22))
        .set_label_area_size(LabelAreaPosition::Left, left_label_width_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d((0..n).into_segmented(), 0.0f64..y_top)
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_label_fmt = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    let y_label_fmt = |v: &f64| {
        let a = v.abs();
        let prec = if a >= 100.0 {
            0
        } else if a >= 10.0 {
            1
        } else {
            2
        };
        format!("{:.*}", prec, *v)
    };

    cc.configure_mesh()
        .disable_x_mesh()
        .x_desc(chart.x_title.as_str())
        .y_desc(y_axis_title)
        .x_labels(n as usize)
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, TICK_FONT_PX))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    cc.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        let i = i as i32;
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), bar.value / yscale),
            ],
            rgb_color(bar.color).filled(),
        );
        rect.set_margin(0, 0, 3, 3);
        rect
    }))
    .map_err(|e| anyhow!("{:?}", e))?;

    let label_style = TextStyle::from((FontFamily::SansSerif, 11u32))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    cc.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        Text::new(
            bar.label.clone(),
            (SegmentValue::CenterOf(i as i32), bar.value / yscale),
            label_style.clone(),
        )
    }))
    .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
