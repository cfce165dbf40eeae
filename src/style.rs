//! Style presets and display options for rendered charts.
//!
//! Presets are plain data; the renderer reads colors from them and never
//! branches on the preset itself except for per-section bar colors.

use std::str::FromStr;

use crate::gantt::LayoutOptions;

pub const DEFAULT_ROW_HEIGHT: u32 = 40;
pub const MIN_ROW_HEIGHT: u32 = 20;
pub const MAX_ROW_HEIGHT: u32 = 80;
pub const ROW_HEIGHT_STEP: u32 = 5;

/// Bar colors cycled by the colorful preset.
const COLORFUL_BARS: [&str; 5] = ["#fb7185", "#60a5fa", "#a78bfa", "#34d399", "#fbbf24"];

// =============================================================================
// PRESETS
// =============================================================================

/// Named color theme for Gantt charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    #[default]
    Classic,
    Modern,
    Dark,
    Colorful,
    Simple,
}

/// Resolved colors of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bar: &'static str,
    pub bar_text: &'static str,
    pub section_title: &'static str,
    pub section_background: &'static str,
    pub timeline: &'static str,
    pub date: &'static str,
}

impl StylePreset {
    pub const ALL: [Self; 5] = [Self::Classic, Self::Modern, Self::Dark, Self::Colorful, Self::Simple];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
            Self::Dark => "dark",
            Self::Colorful => "colorful",
            Self::Simple => "simple",
        }
    }

    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Classic => Palette {
                bar: "#6366f1",
                bar_text: "white",
                section_title: "#6366f1",
                section_background: "#f1f5f9",
                timeline: "#94a3b8",
                date: "#64748b",
            },
            Self::Modern => Palette {
                bar: "linear-gradient(135deg, #3b82f6 0%, #8b5cf6 100%)",
                bar_text: "white",
                section_title: "#3b82f6",
                section_background: "#f8fafc",
                timeline: "#cbd5e1",
                date: "#64748b",
            },
            Self::Dark => Palette {
                bar: "#1e1e2e",
                bar_text: "#cdd6f4",
                section_title: "#cdd6f4",
                section_background: "#313244",
                timeline: "#7f849c",
                date: "#9399b2",
            },
            Self::Colorful => Palette {
                bar: COLORFUL_BARS[0],
                bar_text: "white",
                section_title: "#f43f5e",
                section_background: "#fdf2f8",
                timeline: "#e5e7eb",
                date: "#64748b",
            },
            Self::Simple => Palette {
                bar: "#4b5563",
                bar_text: "white",
                section_title: "#111827",
                section_background: "#f3f4f6",
                timeline: "#9ca3af",
                date: "#6b7280",
            },
        }
    }

    /// Bar color for tasks of `section`. Only the colorful preset varies by
    /// section: the sum of the name's code points picks one of five colors.
    #[must_use]
    pub fn bar_color(self, section: &str) -> &'static str {
        match self {
            Self::Colorful => {
                let hash: u64 = section.chars().map(|c| u64::from(u32::from(c))).sum();
                let index = usize::try_from(hash % COLORFUL_BARS.len() as u64).unwrap_or(0);
                COLORFUL_BARS[index]
            }
            other => other.palette().bar,
        }
    }
}

impl FromStr for StylePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| format!("unknown style preset: {s}"))
    }
}

// =============================================================================
// DISPLAY OPTIONS
// =============================================================================

/// Display toggles consumed by the renderer and the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub style: StylePreset,
    pub row_height: u32,
    pub show_date_markers: bool,
    pub compact_view: bool,
    pub show_weekends: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            style: StylePreset::Classic,
            row_height: DEFAULT_ROW_HEIGHT,
            show_date_markers: true,
            compact_view: false,
            show_weekends: true,
        }
    }
}

impl DisplayOptions {
    /// Set the row height, clamped to the slider range and snapped to its step.
    #[must_use]
    pub fn with_row_height(mut self, height: u32) -> Self {
        let clamped = height.clamp(MIN_ROW_HEIGHT, MAX_ROW_HEIGHT);
        let snapped = MIN_ROW_HEIGHT + (clamped - MIN_ROW_HEIGHT + ROW_HEIGHT_STEP / 2) / ROW_HEIGHT_STEP * ROW_HEIGHT_STEP;
        self.row_height = snapped.min(MAX_ROW_HEIGHT);
        self
    }

    /// Layout toggles implied by these display options.
    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions { date_markers: self.show_date_markers, weekends: self.show_weekends }
    }
}

#[cfg(test)]
#[path = "style_test.rs"]
mod tests;
