use crate::locale::locale_fallback_chain;

/// Locale-aware decimal formatting with thousands grouping.
///
/// Supports the document locales (`de`, `en`); anything else resolves through
/// the fallback chain to English conventions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    pub group_separator: char,
    pub decimal_separator: char,
    pub max_fraction_digits: usize,
}

impl NumberFormat {
    pub const EN: NumberFormat = NumberFormat {
        group_separator: ',',
        decimal_separator: '.',
        max_fraction_digits: 2,
    };

    pub const DE: NumberFormat = NumberFormat {
        group_separator: '.',
        decimal_separator: ',',
        max_fraction_digits: 2,
    };

    pub fn for_locale(locale: &str) -> Self {
        for candidate in locale_fallback_chain(locale) {
            match candidate.split('-').next() {
                Some("de") => return Self::DE,
                Some("en") => return Self::EN,
                _ => {}
            }
        }
        Self::EN
    }

    pub fn with_max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// Format `value`, trimming trailing fraction zeroes.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return if value.is_nan() {
                "NaN".to_string()
            } else if value.is_sign_positive() {
                "∞".to_string()
            } else {
                "-∞".to_string()
            };
        }

        let digits = self.max_fraction_digits;
        let fixed = format!("{:.digits$}", value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, f.trim_end_matches('0')),
            None => (fixed.as_str(), ""),
        };

        let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
        let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        let len = int_part.len();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(c);
        }
        if !frac_part.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::EN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_per_locale() {
        assert_eq!(NumberFormat::EN.format(1_234.5), "1,234.5");
        assert_eq!(NumberFormat::DE.format(1_234.5), "1.234,5");
        assert_eq!(NumberFormat::DE.format(1_200_000.0), "1.200.000");
    }

    #[test]
    fn small_and_negative_values() {
        assert_eq!(NumberFormat::EN.format(0.0), "0");
        assert_eq!(NumberFormat::EN.format(-42.126), "-42.13");
        assert_eq!(NumberFormat::EN.format(-0.001), "0");
        assert_eq!(NumberFormat::EN.format(999.0), "999");
    }

    #[test]
    fn locale_resolution_uses_fallback_chain() {
        assert_eq!(NumberFormat::for_locale("de_CH"), NumberFormat::DE);
        assert_eq!(NumberFormat::for_locale("en-GB"), NumberFormat::EN);
        assert_eq!(NumberFormat::for_locale("fr"), NumberFormat::EN);
    }
}
