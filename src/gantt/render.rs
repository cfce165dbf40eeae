//! Chart renderer: converts a timeline layout into positioned drawing
//! descriptors (rectangles, text, lines) for a given chart width.

use serde::Serialize;

use super::ast::format_label;
use super::layout::{DateMarker, GanttLayout, SectionLayout, TaskLayout};
use crate::style::{DisplayOptions, Palette};

// Layout constants (in logical pixels).
pub const DEFAULT_CHART_WIDTH: f64 = 800.0;
pub const MIN_BAR_WIDTH: f64 = 50.0;
const SPAN_LABEL_HEIGHT: f64 = 24.0;
const MARKER_LABEL_HEIGHT: f64 = 32.0;
const SECTION_PADDING: f64 = 16.0;
const SECTION_TITLE_HEIGHT: f64 = 28.0;
const SECTION_GAP: f64 = 24.0;
const DATE_LABEL_HEIGHT: f64 = 20.0;
const ROW_GAP: f64 = 8.0;
const DATE_LABEL_WIDTH: f64 = 80.0;
const FONT_SIZE: f64 = 14.0;
const SMALL_FONT_SIZE: f64 = 12.0;
const ROW_BACKGROUND: &str = "rgba(241, 245, 249, 0.5)";
const WEEKDAY_STROKE: &str = "rgba(203, 213, 225, 0.5)";
const WEEKEND_STROKE: &str = "rgba(239, 68, 68, 0.2)";

/// A descriptor for one drawable object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectDescriptor {
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub props: serde_json::Value,
}

/// Render a layout into drawing descriptors, `width` pixels wide.
///
/// Bars are never narrower than [`MIN_BAR_WIDTH`], so single-day tasks stay
/// visible even though their width fraction is tiny or zero.
#[must_use]
pub fn render_to_objects(layout: &GanttLayout, options: &DisplayOptions, width: f64) -> Vec<ObjectDescriptor> {
    let palette = options.style.palette();
    let mut objects = Vec::new();

    objects.push(make_text(
        0.0,
        0.0,
        width,
        FONT_SIZE,
        &format!(
            "{} - {} ({} days)",
            format_label(layout.padded_start),
            format_label(layout.padded_end),
            layout.total_span_days
        ),
        palette.section_title,
    ));

    let markers = layout
        .date_markers
        .as_deref()
        .filter(|_| options.show_date_markers);
    let body_top = SPAN_LABEL_HEIGHT + if markers.is_some() { MARKER_LABEL_HEIGHT } else { 0.0 };

    let mut y = body_top;
    for section in &layout.sections {
        y = render_section(section, options, &palette, width, y, &mut objects);
    }
    let body_bottom = y;

    if let Some(markers) = markers {
        let padding = section_padding(options);
        for marker in markers {
            let x = padding + marker.offset_fraction * (width - 2.0 * padding);
            render_marker(marker, options, &palette, x, body_top, body_bottom, &mut objects);
        }
    }

    objects
}

/// Render one section starting at `top`; returns the y after the section.
fn render_section(
    section: &SectionLayout,
    options: &DisplayOptions,
    palette: &Palette,
    width: f64,
    top: f64,
    objects: &mut Vec<ObjectDescriptor>,
) -> f64 {
    let padding = section_padding(options);
    let row_height = f64::from(options.row_height);
    let row_pitch = row_height + DATE_LABEL_HEIGHT + ROW_GAP;
    #[allow(clippy::cast_precision_loss)]
    let rows_height = section.tasks.len() as f64 * row_pitch;
    let height = 2.0 * padding + SECTION_TITLE_HEIGHT + rows_height;

    if !options.compact_view {
        objects.push(ObjectDescriptor {
            kind: "rectangle".into(),
            x: 0.0,
            y: top,
            width,
            height,
            props: serde_json::json!({
                "fill": palette.section_background,
                "cornerRadius": 8
            }),
        });
    }

    let inner_x = padding;
    let inner_w = width - 2.0 * padding;
    objects.push(make_text(inner_x, top + padding, inner_w, FONT_SIZE, &section.name, palette.section_title));

    let mut row_y = top + padding + SECTION_TITLE_HEIGHT;
    for task in &section.tasks {
        render_task(task, options, palette, inner_x, inner_w, row_y, objects);
        row_y += row_pitch;
    }

    top + height + SECTION_GAP
}

fn render_task(
    task: &TaskLayout,
    options: &DisplayOptions,
    palette: &Palette,
    x: f64,
    width: f64,
    y: f64,
    objects: &mut Vec<ObjectDescriptor>,
) {
    let row_height = f64::from(options.row_height);

    objects.push(ObjectDescriptor {
        kind: "rectangle".into(),
        x,
        y,
        width,
        height: row_height,
        props: serde_json::json!({ "fill": ROW_BACKGROUND }),
    });

    let bar_w = (task.width_fraction * width).max(MIN_BAR_WIDTH);
    objects.push(ObjectDescriptor {
        kind: "rectangle".into(),
        x: x + task.offset_fraction * width,
        y,
        width: bar_w,
        height: row_height,
        props: serde_json::json!({
            "id": task.id,
            "text": task.name,
            "fill": options.style.bar_color(&task.section),
            "textColor": palette.bar_text,
            "fontSize": FONT_SIZE
        }),
    });

    let label_y = y + row_height;
    objects.push(make_text(x, label_y, DATE_LABEL_WIDTH, SMALL_FONT_SIZE, &format_label(task.start_date), palette.date));
    objects.push(make_text(
        x + width - DATE_LABEL_WIDTH,
        label_y,
        DATE_LABEL_WIDTH,
        SMALL_FONT_SIZE,
        &format_label(task.end_date),
        palette.date,
    ));
}

fn render_marker(
    marker: &DateMarker,
    options: &DisplayOptions,
    palette: &Palette,
    x: f64,
    top: f64,
    bottom: f64,
    objects: &mut Vec<ObjectDescriptor>,
) {
    let stroke = if marker.is_weekend && options.show_weekends { WEEKEND_STROKE } else { WEEKDAY_STROKE };

    objects.push(ObjectDescriptor {
        kind: "line".into(),
        x,
        y: top,
        width: 0.0,
        height: bottom - top,
        props: serde_json::json!({
            "a": { "x": x, "y": top },
            "b": { "x": x, "y": bottom },
            "stroke": stroke,
            "strokeWidth": 1,
            "weekend": marker.is_weekend
        }),
    });

    objects.push(make_text(
        x - DATE_LABEL_WIDTH / 2.0,
        top - MARKER_LABEL_HEIGHT + 8.0,
        DATE_LABEL_WIDTH,
        SMALL_FONT_SIZE,
        &format_label(marker.date),
        palette.date,
    ));
}

/// Horizontal inset of section content; bars and markers share it.
fn section_padding(options: &DisplayOptions) -> f64 {
    if options.compact_view { 0.0 } else { SECTION_PADDING }
}

fn make_text(x: f64, y: f64, w: f64, font_size: f64, text: &str, color: &str) -> ObjectDescriptor {
    ObjectDescriptor {
        kind: "text".into(),
        x,
        y,
        width: w,
        height: font_size + 4.0,
        props: serde_json::json!({
            "text": text,
            "fontSize": font_size,
            "textColor": color
        }),
    }
}
