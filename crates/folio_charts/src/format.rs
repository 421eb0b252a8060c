use std::fmt;
use std::sync::Arc;

use folio_i18n::NumberFormat;

use crate::data::Label;

/// Formats a value for tick labels, tooltips and accessible text.
pub type ValueFormatter = Arc<dyn Fn(f32) -> String + Send + Sync>;

/// Produces the full tooltip text for a `(label, value)` pair.
pub type TooltipFormatter = Arc<dyn Fn(&Label, f32) -> String + Send + Sync>;

/// Value and tooltip formatting for one chart, bound to an explicit locale.
#[derive(Clone)]
pub struct Formatters {
    locale: String,
    number: NumberFormat,
    value: Option<ValueFormatter>,
    tooltip: Option<TooltipFormatter>,
    compact_ticks: bool,
}

impl Formatters {
    pub fn new(locale: impl Into<String>) -> Self {
        let locale = locale.into();
        Self {
            number: NumberFormat::for_locale(&locale),
            locale,
            value: None,
            tooltip: None,
            compact_ticks: false,
        }
    }

    /// Switch locale, keeping any custom formatters.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self.number = NumberFormat::for_locale(&self.locale);
        self
    }

    pub fn with_value_formatter(mut self, f: impl Fn(f32) -> String + Send + Sync + 'static) -> Self {
        self.value = Some(Arc::new(f));
        self
    }

    pub fn with_tooltip_formatter(
        mut self,
        f: impl Fn(&Label, f32) -> String + Send + Sync + 'static,
    ) -> Self {
        self.tooltip = Some(Arc::new(f));
        self
    }

    /// Abbreviate tick labels (`12,4 Tsd.`) unless a value formatter is set.
    pub fn with_compact_ticks(mut self, compact: bool) -> Self {
        self.compact_ticks = compact;
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn number_format(&self) -> NumberFormat {
        self.number
    }

    pub fn format_value(&self, value: f32) -> String {
        match &self.value {
            Some(f) => f(value),
            None => self.number.format(value as f64),
        }
    }

    pub fn format_tick(&self, value: f32) -> String {
        if self.compact_ticks && self.value.is_none() {
            return format_compact(value, &self.number);
        }
        self.format_value(value)
    }

    pub fn has_tooltip_formatter(&self) -> bool {
        self.tooltip.is_some()
    }

    /// `tooltip_formatter(label, value)` verbatim, or `"<label> • <value>"`.
    pub fn tooltip_text(&self, label: &Label, value: f32) -> String {
        match &self.tooltip {
            Some(f) => f(label, value),
            None => format!("{label} • {}", self.format_value(value)),
        }
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Self::new(folio_i18n::DEFAULT_LOCALE)
    }
}

impl fmt::Debug for Formatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatters")
            .field("locale", &self.locale)
            .field("value", &self.value.is_some())
            .field("tooltip", &self.tooltip.is_some())
            .field("compact_ticks", &self.compact_ticks)
            .finish()
    }
}

/// Abbreviated number with a locale-appropriate magnitude suffix.
pub fn format_compact(value: f32, number: &NumberFormat) -> String {
    if !value.is_finite() {
        return number.format(value as f64);
    }
    let german = number.decimal_separator == ',';
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1_000_000_000.0 {
        (value / 1_000_000_000.0, if german { " Mrd." } else { "B" })
    } else if abs >= 1_000_000.0 {
        (value / 1_000_000.0, if german { " Mio." } else { "M" })
    } else if abs >= 1_000.0 {
        (value / 1_000.0, if german { " Tsd." } else { "K" })
    } else {
        return number.format(value as f64);
    };
    let short = number.with_max_fraction_digits(1);
    format!("{}{suffix}", short.format(scaled as f64))
}
