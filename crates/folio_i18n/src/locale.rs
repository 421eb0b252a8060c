/// Locale used when nothing more specific matches.
pub const DEFAULT_LOCALE: &str = "en";

/// Normalize locale identifiers to a canonical-ish form for lookup.
///
/// - Converts `_` to `-` (`de_DE` -> `de-DE`).
/// - Trims whitespace.
/// - Lowercases the language subtag and uppercases a two-letter region.
pub fn normalize_locale(s: &str) -> String {
    let s = s.trim().replace('_', "-");
    let mut parts = s.split('-').filter(|p| !p.is_empty());
    let Some(lang) = parts.next() else {
        return String::new();
    };
    let mut out = lang.to_ascii_lowercase();
    for part in parts {
        out.push('-');
        if part.len() == 2 {
            out.push_str(&part.to_ascii_uppercase());
        } else {
            out.push_str(part);
        }
    }
    out
}

/// Create a fallback chain for translation lookup.
///
/// Example:
/// - `de-AT` -> `["de-AT", "de", "en"]`
/// - `en` -> `["en"]`
pub fn locale_fallback_chain(locale: &str) -> Vec<String> {
    let l = normalize_locale(locale);
    let mut chain = Vec::new();

    if !l.is_empty() {
        chain.push(l.clone());
        if let Some(lang) = l.split('-').next() {
            chain.push(lang.to_string());
        }
    }
    chain.push(DEFAULT_LOCALE.to_string());

    // Dedup, preserve order.
    let mut out: Vec<String> = Vec::with_capacity(chain.len());
    for x in chain {
        if !out.contains(&x) {
            out.push(x);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_case() {
        assert_eq!(normalize_locale(" de_de "), "de-DE");
        assert_eq!(normalize_locale("EN"), "en");
        assert_eq!(normalize_locale(""), "");
    }

    #[test]
    fn fallback_chain_ends_in_default_without_duplicates() {
        assert_eq!(locale_fallback_chain("de-AT"), vec!["de-AT", "de", "en"]);
        assert_eq!(locale_fallback_chain("en"), vec!["en"]);
        assert_eq!(locale_fallback_chain(""), vec!["en"]);
    }
}
