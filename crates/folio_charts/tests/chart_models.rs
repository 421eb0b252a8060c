use std::fs;

use folio_animation::FrameScheduler;
use folio_charts::prelude::*;
use folio_charts::{waterfall_bars, ChartDocument, ChartKind};
use folio_i18n::Catalogs;
use folio_paint::PaintCommand;
use pretty_assertions::assert_eq;

fn texts(commands: &[PaintCommand]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            PaintCommand::DrawText { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn quarters() -> Vec<DataPoint> {
    vec![
        DataPoint::new("Q1", 1000.0),
        DataPoint::new("Q2", 1750.0),
        DataPoint::new("Q3", 1375.0),
        DataPoint::new("Q4", 2500.0),
    ]
}

#[test]
fn tick_labels_follow_locale() {
    let de = LineChartModel::new(quarters(), ChartOptions::new("de").with_locale("de"));
    let en = LineChartModel::new(quarters(), ChartOptions::new("en").with_locale("en"));
    let labels = |m: &LineChartModel| -> Vec<String> { m.inspect().ticks.into_iter().map(|t| t.label).collect() };
    assert_eq!(labels(&de), vec!["2.500", "2.125", "1.750", "1.375", "1.000"]);
    assert_eq!(labels(&en), vec!["2,500", "2,125", "1,750", "1,375", "1,000"]);
}

#[test]
fn german_chart_texts_are_localized() {
    let model = LineChartModel::new(Vec::new(), ChartOptions::new("leer").with_locale("de"));
    let out = model.render(&Catalogs::builtin());
    assert_eq!(texts(&out.commands), vec!["Keine Daten verfügbar"]);
}

#[test]
fn tooltip_flips_near_right_edge() {
    let options = ChartOptions::new("flip").with_animation(false);
    let mut model = LineChartModel::new(quarters(), options);
    model.on_pointer_move(10_000.0);
    assert_eq!(model.interaction().selected(), Some(3));

    let out = model.render(&Catalogs::builtin());
    let tooltip = out
        .commands
        .iter()
        .find_map(|c| match c {
            PaintCommand::FillRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .expect("tooltip box");
    assert!(tooltip.x + tooltip.width <= 536.0);
    assert!(texts(&out.commands).contains(&"Q4 • 2,500"));
}

#[test]
fn pointer_leave_clears_hover_but_not_keyboard_focus() {
    let mut model = LineChartModel::new(quarters(), ChartOptions::new("c"));
    model.on_pointer_move(60.0);
    model.on_pointer_leave();
    assert_eq!(model.interaction().state(), HoverState::Idle);

    model.on_key(ChartKey::End);
    model.on_pointer_leave();
    assert_eq!(model.interaction().selected(), Some(3));
    model.on_key(ChartKey::Escape);
    assert_eq!(model.interaction().state(), HoverState::Idle);
}

#[test]
fn multi_line_tooltip_lists_every_series() {
    let series = vec![
        Series::new("Plan", vec![DataPoint::new(2025, 100.0), DataPoint::new(2026, 140.0)]),
        Series::new("Ist", vec![DataPoint::new(2025, 90.0)]),
    ];
    let options = ChartOptions::new("plan").with_animation(false);
    let mut model = MultiLineChartModel::new(series, options);
    model.on_key(ChartKey::Home);
    let out = model.render(&Catalogs::builtin());
    let all = texts(&out.commands);
    for expected in ["Plan", "Ist", "2025", "Plan: 100", "Ist: 90"] {
        assert!(all.contains(&expected), "missing {expected:?} in {all:?}");
    }

    // The shorter series has no point in the second slot.
    model.on_key(ChartKey::ArrowRight);
    let out = model.render(&Catalogs::builtin());
    assert!(!texts(&out.commands).contains(&"Ist: 90"));
}

#[test]
fn bar_hit_test_uses_bands() {
    let mut model = BarChartModel::new(quarters(), ChartOptions::new("bars"));
    let centers: Vec<f32> = model.inspect().series[0].iter().map(|p| p.x).collect();
    assert_eq!(centers.len(), 4);
    for (i, x) in centers.iter().enumerate() {
        model.on_pointer_move(*x);
        assert_eq!(model.interaction().selected(), Some(i));
    }
}

#[test]
fn waterfall_total_matches_sum_of_steps() {
    let steps = vec![
        DataPoint::new("Start", 500.0),
        DataPoint::new("Marketing", -120.0),
        DataPoint::new("Broken", f32::NAN),
        DataPoint::new("Förderung", 80.0),
    ];
    let bars = waterfall_bars(&steps, Some(Label::from("Total")));
    assert_eq!(bars.len(), 4);
    assert_eq!(bars.last().map(|b| b.end), Some(460.0));

    let model = WaterfallModel::new(steps, ChartOptions::new("w").with_animation(false));
    let out = model.render(&Catalogs::builtin());
    assert!(out.commands.iter().any(
        |c| matches!(c, PaintCommand::BeginGroup { title: Some(t), .. } if t == "Total: 460")
    ));
}

#[test]
fn document_renders_every_chart() {
    let dir = std::env::temp_dir().join(format!("folio-charts-doc-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("team.json"),
        r#"[{"name":"Dev","points":[{"label":"2025","value":3},{"label":"2026","value":"5"}]},
            {"name":"Ops","points":[{"label":"2025","value":1},{"label":"2026","value":null}]}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("folio.toml"),
        r#"
locale = "de"

[[chart]]
id = "team"
kind = "multi_line"
title = "Teamgröße"
data = "team.json"

[[chart]]
id = "trend"
kind = "sparkline"
points = [ { label = "Jan", value = 1 }, { label = "Feb", value = 3 } ]
"#,
    )
    .unwrap();

    let doc = ChartDocument::load(&dir.join("folio.toml")).unwrap();
    assert_eq!(doc.chart[0].kind, ChartKind::MultiLine);
    let catalogs = Catalogs::builtin();
    for spec in &doc.chart {
        let handle = spec.build(&dir, &doc.locale).unwrap();
        let svg = handle
            .with(|m| {
                m.animation_mut().finish();
                m.render(&catalogs).to_svg()
            })
            .unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(&format!("id=\"{}-title\"", spec.id)));
    }
    let team = doc.chart[0].build(&dir, &doc.locale).unwrap();
    let lens = team
        .with(|m| m.inspect().series.iter().map(Vec::len).collect::<Vec<_>>())
        .unwrap();
    assert_eq!(lens, vec![2, 1]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_data_file_is_reported() {
    let doc = ChartDocument::from_toml_str("[[chart]]\nid = \"x\"\ndata = \"nope.json\"\n").unwrap();
    let err = doc.chart[0]
        .build(std::path::Path::new("/nonexistent"), "en")
        .unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn disposed_mount_stops_animating() {
    let registry = ObserverRegistry::new();
    let mut scheduler = FrameScheduler::new();
    let handle = line_chart(quarters(), ChartOptions::new("m"));
    let mut mount = ChartMount::mount(handle.clone(), &registry, &mut scheduler);

    registry.notify(ObserverEvent::Visibility(true));
    mount.schedule_next_frame(&mut scheduler);
    scheduler.run_frame(0.0);
    mount.schedule_next_frame(&mut scheduler);
    mount.dispose(&mut scheduler);

    assert_eq!(scheduler.run_frame(5_000.0), 0);
    assert_eq!(handle.with(|m| m.animation().is_finished()), Some(false));
    assert_eq!(
        registry.notify(ObserverEvent::Resize {
            width: 10.0,
            height: 10.0
        }),
        0
    );
}
