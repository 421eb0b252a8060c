use folio_i18n::{Catalogs, I18nError, Message, NumberFormat};
use pretty_assertions::assert_eq;

#[test]
fn builtin_catalogs_cover_both_document_locales() {
    let cats = Catalogs::builtin();
    assert!(cats.has_locale("en"));
    assert!(cats.has_locale("de"));
    assert_eq!(cats.text("de", "chart.no_data"), "Keine Daten verfügbar");
    assert_eq!(cats.text("en-US", "chart.no_data"), "No data available");
}

#[test]
fn unknown_locale_falls_back_to_english() {
    let cats = Catalogs::builtin();
    assert_eq!(cats.text("fr-FR", "chart.total"), "Total");
}

#[test]
fn unknown_key_resolves_to_itself() {
    let cats = Catalogs::builtin();
    assert_eq!(cats.text("de", "chart.unknown"), "chart.unknown");
}

#[test]
fn point_alternative_uses_arguments() {
    let cats = Catalogs::builtin();
    let value = NumberFormat::for_locale("de").format(1_200.0);
    let msg = Message::new("chart.point")
        .arg("label", "2027")
        .arg("value", value);
    assert_eq!(cats.format("de", &msg), "2027: 1.200");
}

#[test]
fn loaded_yaml_overrides_builtin_entries() {
    let mut cats = Catalogs::builtin();
    cats.load_yaml("de", "chart.no_data: \"Noch keine Zahlen\"")
        .unwrap();
    assert_eq!(cats.text("de", "chart.no_data"), "Noch keine Zahlen");
    // Untouched keys survive the merge.
    assert_eq!(cats.text("de", "chart.total"), "Gesamt");
}

#[test]
fn load_rejects_empty_locale() {
    let mut cats = Catalogs::new();
    assert!(matches!(
        cats.load_yaml("  ", "a: b"),
        Err(I18nError::InvalidLocale(_))
    ));
}
