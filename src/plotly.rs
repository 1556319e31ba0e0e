//! Export of [`ChartSpec`]s as Plotly figures and standalone HTML pages.
//!
//! The figure JSON follows the plotly.js schema (`{"data": [...], "layout": {...}}`),
//! so the output can be fed to `Plotly.newPlot` directly.

use crate::chart::{Align, BarChart, ChartSpec, ChoroplethMap, Layout, TableView};
use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;

/// Pinned plotly.js bundle loaded by generated pages.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Convert a chart into a plotly.js figure.
pub fn figure(spec: &ChartSpec) -> Value {
    match spec {
        ChartSpec::Bar(c) => bar_figure(c),
        ChartSpec::Choropleth(c) => choropleth_figure(c),
        ChartSpec::Table(c) => table_figure(c),
    }
}

fn layout_json(layout: &Layout) -> Map<String, Value> {
    let mut out = Map::new();
    if let Some(title) = &layout.title {
        out.insert("title".into(), json!({ "text": title }));
    }
    out.insert("height".into(), json!(layout.height));
    if let Some(m) = layout.margin {
        out.insert("margin".into(), json!({ "t": m.t, "l": m.l, "r": m.r, "b": m.b }));
    }
    // plotly.js has no named templates; approximate plotly_white
    if layout.template == "plotly_white" {
        out.insert("plot_bgcolor".into(), json!("#FFFFFF"));
    }
    if let Some(bg) = layout.paper_bgcolor {
        out.insert("paper_bgcolor".into(), json!(bg.hex()));
    }
    out
}

fn bar_figure(c: &BarChart) -> Value {
    // one trace per country, like a color-by-category bar chart
    let data: Vec<Value> = c
        .bars
        .iter()
        .map(|b| {
            json!({
                "type": "bar",
                "name": b.category,
                "x": [b.category],
                "y": [b.value],
                "text": [b.label],
                "textposition": "auto",
                "marker": { "color": b.color.hex() },
            })
        })
        .collect();
    let mut layout = layout_json(&c.layout);
    layout.insert("xaxis".into(), json!({ "title": { "text": c.x_title } }));
    layout.insert("yaxis".into(), json!({ "title": { "text": c.y_title } }));
    layout.insert("barmode".into(), json!("relative"));
    json!({ "data": data, "layout": Value::Object(layout) })
}

fn choropleth_figure(c: &ChoroplethMap) -> Value {
    let colorscale: Vec<Value> = c
        .color_scale
        .stops
        .iter()
        .map(|(pos, color)| json!([pos, color.hex()]))
        .collect();
    let mut trace = json!({
        "type": "choropleth",
        "locationmode": c.location_mode,
        "locations": c.regions.iter().map(|r| r.location.as_str()).collect::<Vec<_>>(),
        "z": c.regions.iter().map(|r| r.value).collect::<Vec<_>>(),
        "text": c.regions.iter().map(|r| r.hover.replace('\n', "<br>")).collect::<Vec<_>>(),
        "hovertemplate": "%{text}<extra></extra>",
        "colorscale": colorscale,
        "colorbar": { "title": { "text": c.metric.column() } },
    });
    if let (Some((lo, hi)), Some(obj)) = (c.range, trace.as_object_mut()) {
        obj.insert("zmin".into(), json!(lo));
        obj.insert("zmax".into(), json!(hi));
    }
    let mut layout = layout_json(&c.layout);
    layout.insert(
        "geo".into(),
        json!({ "showframe": false, "projection": { "type": "natural earth" } }),
    );
    json!({ "data": [trace], "layout": Value::Object(layout) })
}

fn table_figure(c: &TableView) -> Value {
    let align = match c.align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    };
    // plotly tables are column-major
    let columns: Vec<Vec<&str>> = (0..c.columns.len())
        .map(|i| c.rows.iter().map(|row| row[i].as_str()).collect())
        .collect();
    json!({
        "data": [{
            "type": "table",
            "header": { "values": c.columns, "align": align },
            "cells": { "values": columns, "align": align },
        }],
        "layout": Value::Object(layout_json(&c.layout)),
    })
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a page with one section per `(heading, chart)` pair.
pub fn dashboard_html(page_title: &str, sections: &[(&str, &ChartSpec)]) -> Result<String> {
    let mut body = String::new();
    let mut scripts = String::new();
    for (i, (heading, spec)) in sections.iter().enumerate() {
        let fig = serde_json::to_string(&figure(spec)).context("serialize figure")?;
        // keep `</script>` inside string literals from closing the tag
        let fig = fig.replace("</", "<\\/");
        body.push_str(&format!(
            "<section>\n<h2>{}</h2>\n<div id=\"chart-{i}\"></div>\n</section>\n",
            escape_html(heading)
        ));
        scripts.push_str(&format!(
            "(function () {{ const fig = {fig}; Plotly.newPlot(\"chart-{i}\", fig.data, fig.layout, {{responsive: true}}); }})();\n"
        ));
    }
    Ok(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
<script src=\"{PLOTLY_CDN}\"></script>\n\
<style>body {{ background-color: #f8f9fa; padding: 20px; font-family: sans-serif; }} \
h1 {{ text-align: center; }} section {{ background: #ffffff; border-radius: 10px; padding: 16px; margin-bottom: 24px; }}</style>\n\
</head>\n<body>\n<h1>{title}</h1>\n{body}<script>\n{scripts}</script>\n</body>\n</html>\n",
        title = escape_html(page_title),
    ))
}

pub fn write_figure_json<P: AsRef<Path>>(spec: &ChartSpec, path: P) -> Result<()> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(&figure(spec))?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn write_html<P: AsRef<Path>>(
    path: P,
    page_title: &str,
    sections: &[(&str, &ChartSpec)],
) -> Result<()> {
    let path = path.as_ref();
    let html = dashboard_html(page_title, sections)?;
    fs::write(path, html).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
