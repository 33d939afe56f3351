use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// How text width is estimated while wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextMetrics {
    /// Four-bucket per-character estimate. Output does not depend on the host.
    #[default]
    Heuristic,
    /// Glyph advances from installed system fonts, falling back to the
    /// heuristic for families that do not resolve.
    SystemFonts,
}

static FONT_MEASURER: Lazy<Mutex<FontMeasurer>> = Lazy::new(|| Mutex::new(FontMeasurer::new()));

pub fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.3,
        'i' | 'l' | 'I' => 0.4,
        'w' | 'W' | 'm' | 'M' => 0.8,
        _ => 0.6,
    }
}

pub fn heuristic_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

pub fn text_width(text: &str, font_size: f32, font_family: &str, metrics: TextMetrics) -> f32 {
    match metrics {
        TextMetrics::Heuristic => heuristic_text_width(text, font_size),
        TextMetrics::SystemFonts => measure_with_fonts(text, font_size, font_family)
            .unwrap_or_else(|| heuristic_text_width(text, font_size)),
    }
}

fn measure_with_fonts(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = FONT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

/// Advance widths per resolved family, in font units.
struct LoadedFace {
    units_per_em: f32,
    advances: HashMap<char, Option<u16>>,
    data: Vec<u8>,
    index: u32,
}

impl LoadedFace {
    fn advance(&mut self, ch: char) -> Option<u16> {
        if let Some(cached) = self.advances.get(&ch) {
            return *cached;
        }
        let advance = Face::parse(&self.data, self.index).ok().and_then(|face| {
            let glyph = face.glyph_index(ch)?;
            face.glyph_hor_advance(glyph)
        });
        self.advances.insert(ch, advance);
        advance
    }
}

struct FontMeasurer {
    db: Database,
    system_fonts_loaded: bool,
    faces: HashMap<String, Option<LoadedFace>>,
}

impl FontMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            system_fonts_loaded: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = font_family.trim().to_ascii_lowercase();
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            if face.is_none() {
                tracing::debug!(font_family, "no system face resolved, using heuristic widths");
            }
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get_mut(&key)?.as_mut()?;
        let scale = font_size / face.units_per_em;
        let mut width = 0.0f32;
        for ch in text.chars() {
            width += match face.advance(ch) {
                Some(advance) if advance > 0 => advance as f32 * scale,
                _ => char_width_factor(ch) * font_size,
            };
        }
        Some(width)
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        if !self.system_fonts_loaded {
            self.db.load_system_fonts();
            self.system_fonts_loaded = true;
        }
        let names = family_names(font_family);
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "monospace" => Family::Monospace,
                "sans-serif" | "system-ui" => Family::SansSerif,
                _ => Family::Name(name.as_str()),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }
        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| {
                let face = Face::parse(data, index).ok()?;
                Some(LoadedFace {
                    units_per_em: face.units_per_em().max(1) as f32,
                    advances: HashMap::new(),
                    data: data.to_vec(),
                    index,
                })
            })
            .flatten()
    }
}

/// Splits a CSS font stack into bare family names.
fn family_names(font_family: &str) -> Vec<String> {
    font_family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_uses_four_buckets() {
        assert_eq!(char_width_factor(' '), 0.3);
        assert_eq!(char_width_factor('l'), 0.4);
        assert_eq!(char_width_factor('W'), 0.8);
        assert_eq!(char_width_factor('k'), 0.6);
        assert_eq!(char_width_factor('\u{4e2d}'), 0.6);
    }

    #[test]
    fn heuristic_width_sums_characters() {
        // "Mil k" = 0.8 + 0.4 + 0.4 + 0.3 + 0.6
        let width = heuristic_text_width("Mil k", 10.0);
        assert!((width - 25.0).abs() < 1e-4);
    }

    #[test]
    fn unresolved_family_falls_back_to_heuristic() {
        let width = text_width("Kabuli", 20.0, "NoSuchFamilyXyz", TextMetrics::SystemFonts);
        assert_eq!(width, heuristic_text_width("Kabuli", 20.0));
    }

    #[test]
    fn family_names_strip_quotes() {
        assert_eq!(
            family_names("'Playfair Display', Georgia, serif"),
            vec!["Playfair Display", "Georgia", "serif"]
        );
    }
}
