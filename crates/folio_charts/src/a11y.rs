//! Accessible names and descriptions, resolved through the string catalogs.

use folio_i18n::{Catalogs, Message};

use crate::data::{DataPoint, Label};
use crate::normalize::ValueRange;
use crate::options::ChartOptions;

/// The `aria_label` option, or the localized default title.
pub fn chart_title(options: &ChartOptions, catalogs: &Catalogs) -> String {
    match options.aria_label.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => catalogs.text(options.locale(), "chart.default_title"),
    }
}

pub fn no_data_text(options: &ChartOptions, catalogs: &Catalogs) -> String {
    catalogs.text(options.locale(), "chart.no_data")
}

/// `"<label>: <formatted value>"` for a single marker.
pub fn point_text(options: &ChartOptions, catalogs: &Catalogs, label: &Label, value: f32) -> String {
    let msg = Message::new("chart.point")
        .arg("label", label.to_string())
        .arg("value", options.formatters.format_value(value));
    catalogs.format(options.locale(), &msg)
}

/// Point count, first/last label and the value range of one series.
pub fn series_summary(
    options: &ChartOptions,
    catalogs: &Catalogs,
    points: &[DataPoint],
    range: &ValueRange,
) -> Option<String> {
    let (first, last) = (points.first()?, points.last()?);
    let f = &options.formatters;
    let msg = Message::new("chart.summary")
        .arg("count", points.len())
        .arg("first", first.label.to_string())
        .arg("last", last.label.to_string())
        .arg("min", f.format_value(range.min))
        .arg("max", f.format_value(range.max));
    Some(catalogs.format(options.locale(), &msg))
}

/// Summary for several series sharing one range.
pub fn multi_series_summary(
    options: &ChartOptions,
    catalogs: &Catalogs,
    series_count: usize,
    slot_count: usize,
    range: &ValueRange,
) -> Option<String> {
    if series_count == 0 || slot_count == 0 {
        return None;
    }
    let f = &options.formatters;
    let msg = Message::new("chart.summary_series")
        .arg("series", series_count)
        .arg("count", slot_count)
        .arg("min", f.format_value(range.min))
        .arg("max", f.format_value(range.max));
    Some(catalogs.format(options.locale(), &msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_falls_back_to_localized_default() {
        let catalogs = Catalogs::builtin();
        let de = ChartOptions::new("c").with_locale("de");
        assert_eq!(chart_title(&de, &catalogs), "Diagramm");
        let blank = ChartOptions::new("c").with_aria_label("  ");
        assert_eq!(chart_title(&blank, &catalogs), "Chart");
        let named = ChartOptions::new("c").with_aria_label("Umsatz");
        assert_eq!(chart_title(&named, &catalogs), "Umsatz");
    }

    #[test]
    fn point_text_uses_locale_number_format() {
        let catalogs = Catalogs::builtin();
        let de = ChartOptions::new("c").with_locale("de");
        assert_eq!(point_text(&de, &catalogs, &Label::from(2027), 1200.0), "2027: 1.200");
    }

    #[test]
    fn summary_describes_the_series() {
        let catalogs = Catalogs::builtin();
        let opts = ChartOptions::new("c");
        let pts = vec![DataPoint::new(2025, 480.0), DataPoint::new(2027, 1200.0)];
        let text = series_summary(&opts, &catalogs, &pts, &ValueRange::new(480.0, 1200.0));
        assert_eq!(
            text.as_deref(),
            Some("2 data points from 2025 to 2027, values between 480 and 1,200")
        );
        assert!(series_summary(&opts, &catalogs, &[], &ValueRange::default()).is_none());
    }
}
