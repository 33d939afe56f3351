use crate::config::LayoutConfig;
use crate::text_metrics::{heuristic_text_width, text_width};

use super::types::{TextAnchor, TextRole, VerticalAlign, WrappedText};

const ELLIPSIS: &str = "...";

/// Placement and sizing for one wrapped text field.
#[derive(Debug, Clone, Copy)]
pub struct TextSpec<'a> {
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub max_width: f32,
    pub anchor: TextAnchor,
    pub valign: VerticalAlign,
    pub role: TextRole,
    /// Tighter ceiling than the font-size policy, for compact layouts.
    pub max_lines: Option<usize>,
    pub font_family: &'a str,
}

impl<'a> TextSpec<'a> {
    pub fn new(x: f32, y: f32, font_size: f32, max_width: f32, font_family: &'a str) -> Self {
        Self {
            x,
            y,
            font_size,
            max_width,
            anchor: TextAnchor::Start,
            valign: VerticalAlign::Top,
            role: TextRole::Title,
            max_lines: None,
            font_family,
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn centered_on_y(mut self) -> Self {
        self.valign = VerticalAlign::Middle;
        self
    }

    pub fn description(mut self) -> Self {
        self.role = TextRole::Description;
        self
    }

    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }
}

/// Line ceiling for a font size.
pub fn max_lines_for(font_size: f32, role: TextRole) -> usize {
    if font_size <= 24.0 {
        match role {
            TextRole::Description => 10,
            TextRole::Title if font_size <= 16.0 => 8,
            TextRole::Title => 6,
        }
    } else if font_size <= 32.0 {
        4
    } else {
        2
    }
}

/// Wraps `text` with the heuristic width model and the title line policy.
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let measure = |s: &str| heuristic_text_width(s, font_size);
    let cap = max_lines_for(font_size, TextRole::Title);
    wrap_with(text, font_size, max_width, cap, &measure).0
}

/// Wraps and positions one field. Blank text yields `None`.
pub fn layout_text(text: &str, spec: &TextSpec<'_>, config: &LayoutConfig) -> Option<WrappedText> {
    let font_size = spec.font_size;
    let metrics = config.text_metrics;
    let measure = |s: &str| text_width(s, font_size, spec.font_family, metrics);
    let mut cap = max_lines_for(font_size, spec.role);
    if let Some(limit) = spec.max_lines {
        cap = cap.min(limit.max(1));
    }
    let (lines, truncated) = wrap_with(text, font_size, spec.max_width, cap, &measure);
    if lines.is_empty() {
        return None;
    }

    let line_height = font_size * config.line_height;
    let height = lines.len() as f32 * line_height;
    let start_y = match spec.valign {
        VerticalAlign::Top => spec.y,
        VerticalAlign::Middle => spec.y - height / 2.0,
    };
    Some(WrappedText {
        lines,
        font_size,
        line_height,
        x: spec.x,
        start_y,
        anchor: spec.anchor,
        truncated,
    })
}

/// Greedy word wrap. Returns the lines and whether any were dropped.
pub(crate) fn wrap_with(
    text: &str,
    font_size: f32,
    max_width: f32,
    max_lines: usize,
    measure: &dyn Fn(&str) -> f32,
) -> (Vec<String>, bool) {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current = if measure(word) > max_width {
            break_word(word, max_width, measure, &mut lines)
        } else {
            word.to_string()
        };
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() <= max_lines {
        return (lines, false);
    }
    lines.truncate(max_lines);
    if font_size <= 24.0
        && let Some(last) = lines.last_mut()
    {
        *last = with_ellipsis(last, max_width, measure);
    }
    (lines, true)
}

/// Splits an overlong word into width-sized fragments, pushing all but the
/// tail. A word whose first character already overflows is pushed whole.
fn break_word(
    word: &str,
    max_width: f32,
    measure: &dyn Fn(&str) -> f32,
    lines: &mut Vec<String>,
) -> String {
    let mut rest = word;
    while !rest.is_empty() && measure(rest) > max_width {
        let mut end = 0;
        for (idx, ch) in rest.char_indices() {
            let next = idx + ch.len_utf8();
            if measure(&rest[..next]) > max_width {
                break;
            }
            end = next;
        }
        if end == 0 {
            lines.push(rest.to_string());
            return String::new();
        }
        lines.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    rest.to_string()
}

fn with_ellipsis(line: &str, max_width: f32, measure: &dyn Fn(&str) -> f32) -> String {
    let mut base = line.trim_end().to_string();
    while !base.is_empty() && measure(&format!("{base}{ELLIPSIS}")) > max_width {
        base.pop();
        let trimmed = base.trim_end().len();
        base.truncate(trimmed);
    }
    format!("{base}{ELLIPSIS}")
}
