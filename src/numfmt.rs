//! Locale-aware value formatting for bar labels, hover text and CLI tables.

use crate::models::Metric;
use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Decimal places shown for each metric.
pub fn precision(metric: Metric) -> usize {
    match metric {
        Metric::Population => 0,
        Metric::GdpPerCapita => 2,
        Metric::LifeExpectancy => 3,
    }
}

/// Format `value` with grouping separators and the metric's precision.
pub fn format_value(metric: Metric, value: f64, locale_tag: &str) -> String {
    if !value.is_finite() {
        return "NA".to_string();
    }
    let (locale, dec_sep) = map_locale(locale_tag);
    let prec = precision(metric);
    let fixed = format!("{:.*}", prec, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let grouped = int_part
        .parse::<u64>()
        .map(|n| n.to_formatted_string(locale))
        .unwrap_or_else(|_| int_part.to_string());
    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}{dec_sep}{f}"),
        None => format!("{sign}{grouped}"),
    }
}
