//! Tests for the Gantt parser, layout engine and renderer.

use chrono::NaiveDate;

use super::ast::{DEFAULT_SECTION, Task, format_iso, format_label};
use super::layout::{days_between, group_by_section, is_weekend, timeline_bounds};
use super::parse::parse_date;
use super::render::MIN_BAR_WIDTH;
use super::{LayoutError, LayoutOptions, layout, parse, render_to_objects};
use crate::style::{DisplayOptions, StylePreset};

const DEMO: &str = r"
gantt
title Demo
dateFormat YYYY-MM-DD
section Design
    Wireframes :wf_0, 2024-01-01, 2024-01-05
section Build
    API :api_1, 2024-01-06, 2024-01-20
";

fn no_markers() -> LayoutOptions {
    LayoutOptions { date_markers: false, weekends: true }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// =============================================================================
// PARSER TESTS
// =============================================================================

#[test]
fn parse_demo_diagram() {
    let tasks = parse(DEMO);
    assert_eq!(tasks.len(), 2);

    assert_eq!(tasks[0].id, "wf_0");
    assert_eq!(tasks[0].name, "Wireframes");
    assert_eq!(tasks[0].section, "Design");
    assert_eq!(tasks[0].start_date, ymd(2024, 1, 1));
    assert_eq!(tasks[0].end_date, ymd(2024, 1, 5));

    assert_eq!(tasks[1].id, "api_1");
    assert_eq!(tasks[1].section, "Build");
}

#[test]
fn parse_tasks_before_any_section_use_default() {
    let tasks = parse("Kickoff : k1, 2024-03-01, 2024-03-02");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].section, DEFAULT_SECTION);
}

#[test]
fn parse_synthesizes_ids_per_missing_id_only() {
    let input = r"
        section Work
        First : 2024-01-01, 2024-01-02
        Second : explicit, 2024-01-03, 2024-01-04
        Third : 2024-01-05, 2024-01-06
        Fourth : , 2024-01-07, 2024-01-08
    ";
    let ids: Vec<String> = parse(input).into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["task_0", "explicit", "task_1", "task_2"]);
}

#[test]
fn parse_is_idempotent() {
    let input = "A : 2024-01-01, 2024-01-02\nB : 2024-01-03, 2024-01-04";
    assert_eq!(parse(input), parse(input));
    assert_eq!(parse(input)[0].id, "task_0");
}

#[test]
fn parse_drops_line_with_malformed_date() {
    let input = r"
        section Plan
        Good : g1, 2024-01-01, 2024-01-03
        Bad : b1, 2024-01-04, not-a-date
    ";
    let tasks = parse(input);
    assert_eq!(tasks.len(), 1);
    assert!(tasks.iter().all(|t| t.id != "b1"));

    let laid_out = layout(&tasks, no_markers()).unwrap();
    assert!(
        laid_out
            .sections
            .iter()
            .flat_map(|s| &s.tasks)
            .all(|t| t.name != "Bad")
    );
}

#[test]
fn parse_counts_synthetic_id_even_when_line_is_dropped() {
    let input = "Bad : 2024-01-01, nope\nGood : 2024-01-02, 2024-01-03";
    let tasks = parse(input);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, "task_1");
}

#[test]
fn parse_directives_and_sections_only_yield_nothing() {
    let input = r"
        gantt
        title Nothing here
        dateFormat YYYY-MM-DD
        axisFormat %Y-%m-%d
        section Empty
        section Also empty
    ";
    let tasks = parse(input);
    assert!(tasks.is_empty());
    assert_eq!(layout(&tasks, LayoutOptions::default()), Err(LayoutError::NoTasks));
}

#[test]
fn parse_empty_input() {
    assert!(parse("").is_empty());
    assert!(parse("   \n\n  ").is_empty());
}

#[test]
fn parse_ignores_unmatched_lines() {
    let input = r"
        todayMarker off
        just some words
        Name without fields :
        Too : many, fields, 2024-01-01, 2024-01-02
        : anonymous, 2024-01-01, 2024-01-02
        Real : r, 2024-01-01, 2024-01-02
    ";
    let tasks = parse(input);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, "r");
}

#[test]
fn parse_section_applies_only_to_following_lines() {
    let input = r"
        Before : 2024-01-01, 2024-01-02
        section Later
        After : 2024-01-03, 2024-01-04
    ";
    let tasks = parse(input);
    assert_eq!(tasks[0].section, DEFAULT_SECTION);
    assert_eq!(tasks[1].section, "Later");
}

#[test]
fn parse_directives_match_by_prefix() {
    let input = r"
        ganttReview : g, 2024-01-01, 2024-01-02
        titleDraft : t, 2024-01-01, 2024-01-02
        dateFormatted : d, 2024-01-01, 2024-01-02
        Run : r, 2024-01-03, 2024-01-04
    ";
    let tasks = parse(input);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, "r");
}

#[test]
fn parse_section_accepts_colon_separator() {
    let input = r"
        section Build
        Compile : c, 2024-01-01, 2024-01-02
        section:Ops
        Run : r, 2024-01-03, 2024-01-04
        section: Review
        Check : k, 2024-01-05, 2024-01-06
    ";
    let tasks = parse(input);
    let sections: Vec<&str> = tasks.iter().map(|t| t.section.as_str()).collect();
    assert_eq!(sections, ["Build", "Ops", "Review"]);
}

#[test]
fn parse_bare_section_keyword_gives_empty_title() {
    let tasks = parse("section\nLoose : l, 2024-01-01, 2024-01-02");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].section, "");
}

#[test]
fn parse_keywords_are_case_sensitive() {
    let tasks = parse("Section : s, 2024-01-01, 2024-01-02");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Section");
}

#[test]
fn parse_trims_names_and_section_titles() {
    let tasks = parse("section    Spaced Out   \n   Padded name    :   p ,  2024-01-01 , 2024-01-02  ");
    assert_eq!(tasks[0].section, "Spaced Out");
    assert_eq!(tasks[0].name, "Padded name");
    assert_eq!(tasks[0].id, "p");
}

#[test]
fn parse_keeps_reversed_dates() {
    let tasks = parse("Backwards : 2024-01-10, 2024-01-01");
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].start_date > tasks[0].end_date);
}

#[test]
fn parse_date_formats() {
    assert_eq!(parse_date("2024-01-05"), Some(ymd(2024, 1, 5)));
    assert_eq!(parse_date(" 2024-01-05 "), Some(ymd(2024, 1, 5)));
    assert_eq!(parse_date("2024-01-05T23:30:00Z"), Some(ymd(2024, 1, 5)));
    assert_eq!(parse_date("2024-01-05T08:00:00"), Some(ymd(2024, 1, 5)));
    assert_eq!(parse_date("2024-02-29"), Some(ymd(2024, 2, 29)));
    assert_eq!(parse_date("2024-02-30"), None);
    assert_eq!(parse_date("not-a-date"), None);
    assert_eq!(parse_date("05.01.2024"), None);
    assert_eq!(parse_date(""), None);
}

// =============================================================================
// LAYOUT TESTS
// =============================================================================

#[test]
fn layout_demo_diagram() {
    let laid_out = layout(&parse(DEMO), no_markers()).unwrap();

    assert_eq!(laid_out.padded_start, ymd(2023, 12, 31));
    assert_eq!(laid_out.padded_end, ymd(2024, 1, 21));
    assert_eq!(laid_out.total_span_days, 21);

    let names: Vec<&str> = laid_out.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Design", "Build"]);

    let api = &laid_out.sections[1].tasks[0];
    assert_eq!(api.name, "API");
    assert!((api.width_fraction - 14.0 / 21.0).abs() < 1e-12);
    assert!((api.offset_fraction - 6.0 / 21.0).abs() < 1e-12);

    let wireframes = &laid_out.sections[0].tasks[0];
    assert!((wireframes.offset_fraction - 1.0 / 21.0).abs() < 1e-12);
    assert!((wireframes.width_fraction - 4.0 / 21.0).abs() < 1e-12);
    assert_eq!(laid_out.task_count(), 2);
    assert!(laid_out.date_markers.is_none());
}

#[test]
fn layout_single_day_task() {
    let tasks = parse("Launch : 2024-01-01, 2024-01-01");
    let laid_out = layout(&tasks, no_markers()).unwrap();

    assert_eq!(laid_out.padded_start, ymd(2023, 12, 31));
    assert_eq!(laid_out.padded_end, ymd(2024, 1, 2));
    assert_eq!(laid_out.total_span_days, 2);

    let task = &laid_out.sections[0].tasks[0];
    assert!((task.offset_fraction - 0.5).abs() < f64::EPSILON);
    assert!(task.width_fraction.abs() < f64::EPSILON);
}

#[test]
fn layout_preserves_first_seen_section_order() {
    let input = r"
        section B
        one : 2024-01-01, 2024-01-02
        section A
        two : 2024-01-03, 2024-01-04
        section B
        three : 2024-01-05, 2024-01-06
    ";
    let laid_out = layout(&parse(input), no_markers()).unwrap();
    let names: Vec<&str> = laid_out.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);

    let b_tasks: Vec<&str> = laid_out.sections[0].tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(b_tasks, vec!["one", "three"]);
}

#[test]
fn layout_fractions_stay_within_unit_interval() {
    let input = r"
        a : 2024-01-01, 2024-02-01
        b : 2024-01-15, 2024-01-15
        c : 2024-01-20, 2024-03-01
    ";
    let laid_out = layout(&parse(input), no_markers()).unwrap();
    for task in laid_out.sections.iter().flat_map(|s| &s.tasks) {
        assert!((0.0..=1.0).contains(&task.offset_fraction));
        assert!((0.0..=1.0).contains(&task.width_fraction));
        assert!(task.offset_fraction + task.width_fraction <= 1.0);
    }
}

#[test]
fn layout_empty_task_list_reports_no_tasks() {
    let err = layout(&[], LayoutOptions::default()).unwrap_err();
    assert_eq!(err, LayoutError::NoTasks);
    assert_eq!(err.to_string(), "no valid tasks found in gantt diagram");
}

#[test]
fn days_between_is_symmetric_and_non_negative() {
    let a = ymd(2024, 1, 1);
    let b = ymd(2024, 3, 1);
    assert_eq!(days_between(a, b), 60);
    assert_eq!(days_between(b, a), 60);
    assert_eq!(days_between(a, a), 0);
}

#[test]
fn reversed_task_still_has_non_negative_width() {
    let laid_out = layout(&parse("Backwards : 2024-01-10, 2024-01-01"), no_markers()).unwrap();
    let task = &laid_out.sections[0].tasks[0];
    assert!(task.width_fraction >= 0.0);
}

#[test]
fn timeline_bounds_track_raw_and_padded_dates() {
    let tasks = parse(DEMO);
    let bounds = timeline_bounds(&tasks).unwrap();
    assert_eq!(bounds.min_start, ymd(2024, 1, 1));
    assert_eq!(bounds.max_end, ymd(2024, 1, 20));
    assert_eq!(bounds.padded_start, ymd(2023, 12, 31));
    assert_eq!(bounds.padded_end, ymd(2024, 1, 21));
    assert!(timeline_bounds(&[]).is_none());
}

#[test]
fn group_by_section_keeps_source_order() {
    let task = |name: &str, section: &str| Task {
        id: name.into(),
        name: name.into(),
        start_date: ymd(2024, 1, 1),
        end_date: ymd(2024, 1, 2),
        section: section.into(),
    };
    let tasks = vec![task("x", "Z"), task("y", "A"), task("z", "Z")];
    let groups = group_by_section(&tasks);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "Z");
    assert_eq!(groups[0].1.len(), 2);
    assert_eq!(groups[1].0, "A");
}

// =============================================================================
// DATE MARKER TESTS
// =============================================================================

#[test]
fn weekend_detection() {
    assert!(is_weekend(ymd(2024, 1, 6))); // Saturday
    assert!(is_weekend(ymd(2024, 1, 7))); // Sunday
    assert!(!is_weekend(ymd(2024, 1, 8))); // Monday
    assert!(!is_weekend(ymd(2024, 1, 5))); // Friday
}

#[test]
fn markers_cover_padded_span_inclusive() {
    let laid_out = layout(&parse(DEMO), LayoutOptions::default()).unwrap();
    let markers = laid_out.date_markers.unwrap();

    // 2023-12-31 ..= 2024-01-21
    assert_eq!(markers.len(), 21 + 1);
    assert_eq!(markers[0].date, ymd(2023, 12, 31));
    assert!(markers[0].offset_fraction.abs() < f64::EPSILON);
    assert_eq!(markers[21].date, ymd(2024, 1, 21));
    assert!((markers[21].offset_fraction - 1.0).abs() < f64::EPSILON);

    // 2023-12-31 is a Sunday.
    assert!(markers[0].is_weekend);
    assert!(!markers[1].is_weekend);
}

#[test]
fn markers_can_exclude_weekends() {
    let options = LayoutOptions { date_markers: true, weekends: false };
    let laid_out = layout(&parse(DEMO), options).unwrap();
    let markers = laid_out.date_markers.unwrap();

    assert!(markers.iter().all(|m| !m.is_weekend));
    // 22 days minus 7 weekend days (Dec 31, Jan 6/7, 13/14, 20/21).
    assert_eq!(markers.len(), 15);
    // Span math still counts weekends.
    assert_eq!(laid_out.total_span_days, 21);
    assert!((markers[0].offset_fraction - 1.0 / 21.0).abs() < 1e-12);
}

// =============================================================================
// SERIALIZATION TESTS
// =============================================================================

#[test]
fn layout_serializes_for_presentation() {
    let laid_out = layout(&parse(DEMO), no_markers()).unwrap();
    let json = serde_json::to_value(&laid_out).unwrap();

    assert_eq!(json["paddedStart"], "2023-12-31");
    assert_eq!(json["paddedEnd"], "2024-01-21");
    assert_eq!(json["totalSpanDays"], 21);
    assert_eq!(json["sections"][0]["name"], "Design");
    assert_eq!(json["sections"][1]["tasks"][0]["startDate"], "2024-01-06");
    assert_eq!(json["sections"][1]["tasks"][0]["section"], "Build");
    assert!(json.get("dateMarkers").is_none());
}

#[test]
fn task_round_trips_through_json() {
    let task = parse(DEMO).remove(0);
    let json = serde_json::to_string(&task).unwrap();
    assert!(json.contains("\"startDate\":\"2024-01-01\""));
    let back: Task = serde_json::from_str(&json).unwrap();
    assert_eq!(back, task);
}

#[test]
fn date_formatting_helpers() {
    assert_eq!(format_iso(ymd(2024, 3, 7)), "2024-03-07");
    assert_eq!(format_label(ymd(2024, 3, 7)), "07.03.2024");
}

// =============================================================================
// RENDER TESTS
// =============================================================================

#[test]
fn render_enforces_minimum_bar_width() {
    let laid_out = layout(&parse("Launch : l1, 2024-01-01, 2024-01-01"), no_markers()).unwrap();
    let objects = render_to_objects(&laid_out, &DisplayOptions::default(), 800.0);

    let bar = objects
        .iter()
        .find(|o| o.props.get("id").and_then(|v| v.as_str()) == Some("l1"))
        .unwrap();
    assert!((bar.width - MIN_BAR_WIDTH).abs() < f64::EPSILON);
}

#[test]
fn render_places_bars_proportionally() {
    let options = DisplayOptions { compact_view: true, ..DisplayOptions::default() };
    let laid_out = layout(&parse(DEMO), no_markers()).unwrap();
    let objects = render_to_objects(&laid_out, &options, 2100.0);

    let api = objects
        .iter()
        .find(|o| o.props.get("id").and_then(|v| v.as_str()) == Some("api_1"))
        .unwrap();
    assert!((api.x - 600.0).abs() < 1e-9);
    assert!((api.width - 1400.0).abs() < 1e-9);
    assert!((api.height - 40.0).abs() < f64::EPSILON);
    assert_eq!(api.props["text"], "API");
}

#[test]
fn render_span_label_comes_first() {
    let laid_out = layout(&parse(DEMO), no_markers()).unwrap();
    let objects = render_to_objects(&laid_out, &DisplayOptions::default(), 800.0);
    assert_eq!(objects[0].kind, "text");
    assert_eq!(objects[0].props["text"], "31.12.2023 - 21.01.2024 (21 days)");
}

#[test]
fn render_compact_view_drops_section_backgrounds() {
    let laid_out = layout(&parse(DEMO), no_markers()).unwrap();

    let count_backgrounds = |options: &DisplayOptions| {
        render_to_objects(&laid_out, options, 800.0)
            .iter()
            .filter(|o| o.props.get("cornerRadius").is_some())
            .count()
    };

    assert_eq!(count_backgrounds(&DisplayOptions::default()), 2);
    let compact = DisplayOptions { compact_view: true, ..DisplayOptions::default() };
    assert_eq!(count_backgrounds(&compact), 0);
}

#[test]
fn render_emits_marker_lines_with_weekend_stroke() {
    let laid_out = layout(&parse(DEMO), LayoutOptions::default()).unwrap();
    let objects = render_to_objects(&laid_out, &DisplayOptions::default(), 800.0);

    let lines: Vec<_> = objects.iter().filter(|o| o.kind == "line").collect();
    assert_eq!(lines.len(), 22);
    let weekend = lines
        .iter()
        .filter(|l| l.props["weekend"] == true)
        .count();
    assert_eq!(weekend, 7);
    assert!(
        lines
            .iter()
            .filter(|l| l.props["weekend"] == true)
            .all(|l| l.props["stroke"] == "rgba(239, 68, 68, 0.2)")
    );
}

#[test]
fn layout_wide_range_without_markers_allocates_none() {
    let tasks = parse("Forever : 0001-01-01, 9999-12-31");
    let laid_out = layout(&tasks, no_markers()).unwrap();
    assert_eq!(laid_out.total_span_days, 3_652_060);
    assert!(laid_out.date_markers.is_none());
}

#[test]
fn render_skips_markers_when_display_disables_them() {
    let laid_out = layout(&parse(DEMO), LayoutOptions::default()).unwrap();
    let options = DisplayOptions { show_date_markers: false, ..DisplayOptions::default() };
    let objects = render_to_objects(&laid_out, &options, 800.0);
    assert!(objects.iter().all(|o| o.kind != "line"));
}

#[test]
fn render_colorful_bars_vary_by_section() {
    let laid_out = layout(&parse(DEMO), no_markers()).unwrap();
    let options = DisplayOptions { style: StylePreset::Colorful, ..DisplayOptions::default() };
    let objects = render_to_objects(&laid_out, &options, 800.0);

    let fill_of = |id: &str| {
        objects
            .iter()
            .find(|o| o.props.get("id").and_then(|v| v.as_str()) == Some(id))
            .map(|o| o.props["fill"].clone())
            .unwrap()
    };
    assert_eq!(fill_of("wf_0"), StylePreset::Colorful.bar_color("Design"));
    assert_eq!(fill_of("api_1"), StylePreset::Colorful.bar_color("Build"));
}
