use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HEX6_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").unwrap());
static HEX3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{3})$").unwrap());

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#ffffff";

/// Fill used for badges whose tag has no assigned color.
pub const UNKNOWN_TAG_COLOR: &str = "#6b7280";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub price_color: String,
    pub description_color: String,
    #[serde(alias = "fontFamily")]
    pub font_family_hint: String,
}

pub const THEME_NAMES: [&str; 6] = [
    "classic-dark",
    "warm-rustic",
    "fresh-green",
    "ocean-blue",
    "elegant-white",
    "sunset",
];

impl Theme {
    pub fn classic_dark() -> Self {
        Self::named(
            "classic-dark",
            ["#1a1a1a", "#ffffff", "#d4af37", "#d4af37", "#cccccc"],
            "Inter, Helvetica, Arial, sans-serif",
        )
    }

    pub fn warm_rustic() -> Self {
        Self::named(
            "warm-rustic",
            ["#3e2723", "#fff8e1", "#ff8f00", "#ffb300", "#d7ccc8"],
            "Georgia, 'Times New Roman', serif",
        )
    }

    pub fn fresh_green() -> Self {
        Self::named(
            "fresh-green",
            ["#e8f5e9", "#1b5e20", "#43a047", "#2e7d32", "#33691e"],
            "Inter, Helvetica, Arial, sans-serif",
        )
    }

    pub fn ocean_blue() -> Self {
        Self::named(
            "ocean-blue",
            ["#0d47a1", "#ffffff", "#4fc3f7", "#ffeb3b", "#bbdefb"],
            "Inter, Helvetica, Arial, sans-serif",
        )
    }

    pub fn elegant_white() -> Self {
        Self::named(
            "elegant-white",
            ["#fafafa", "#212121", "#8d6e63", "#6d4c41", "#616161"],
            "'Playfair Display', Georgia, serif",
        )
    }

    pub fn sunset() -> Self {
        Self::named(
            "sunset",
            ["#bf360c", "#fff3e0", "#ffcc80", "#ffe082", "#ffe0b2"],
            "Inter, Helvetica, Arial, sans-serif",
        )
    }

    /// Looks up a palette entry by name, ignoring case and `_`/` ` vs `-`.
    pub fn by_name(name: &str) -> Option<Self> {
        let key = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "classic-dark" | "dark" | "classic" => Some(Self::classic_dark()),
            "warm-rustic" | "rustic" => Some(Self::warm_rustic()),
            "fresh-green" | "green" => Some(Self::fresh_green()),
            "ocean-blue" | "ocean" | "blue" => Some(Self::ocean_blue()),
            "elegant-white" | "white" | "light" => Some(Self::elegant_white()),
            "sunset" => Some(Self::sunset()),
            _ => None,
        }
    }

    /// Copy with every color forced into `#rrggbb` form so that nothing
    /// malformed reaches the markup.
    pub fn sanitized(&self) -> Self {
        Self {
            name: self.name.clone(),
            background_color: normalize_hex(&self.background_color),
            text_color: normalize_hex(&self.text_color),
            accent_color: normalize_hex(&self.accent_color),
            price_color: normalize_hex(&self.price_color),
            description_color: normalize_hex(&self.description_color),
            font_family_hint: self.font_family_hint.clone(),
        }
    }

    fn named(name: &str, colors: [&str; 5], font: &str) -> Self {
        let [background, text, accent, price, description] = colors;
        Self {
            name: name.to_string(),
            background_color: background.to_string(),
            text_color: text.to_string(),
            accent_color: accent.to_string(),
            price_color: price.to_string(),
            description_color: description.to_string(),
            font_family_hint: font.to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic_dark()
    }
}

/// Parses `#rrggbb`, `rrggbb` or the `#rgb` shorthand.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let trimmed = color.trim();
    if let Some(caps) = HEX6_RE.captures(trimmed) {
        let hex = caps.get(1)?.as_str();
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some((r, g, b));
    }
    let caps = HEX3_RE.captures(trimmed)?;
    let hex = caps.get(1)?.as_str();
    let mut channels = hex
        .chars()
        .map(|ch| ch.to_digit(16).map(|v| (v * 17) as u8));
    Some((channels.next()??, channels.next()??, channels.next()??))
}

fn to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

pub fn normalize_hex(color: &str) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => to_hex(r, g, b),
        None => {
            tracing::debug!(color, "malformed color, using black");
            BLACK.to_string()
        }
    }
}

/// Perceived brightness on a 0-255 scale. Unparseable input counts as black.
pub fn brightness(color: &str) -> f32 {
    let (r, g, b) = parse_hex(color).unwrap_or((0, 0, 0));
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

pub fn contrast_color(background: &str) -> &'static str {
    if brightness(background) > 128.0 {
        BLACK
    } else {
        WHITE
    }
}

/// Keeps `preferred` unless it would be illegible on `background`.
pub fn readable_text_color(preferred: &str, background: &str) -> String {
    let bg = brightness(background);
    if bg > 200.0 {
        return BLACK.to_string();
    }
    if bg < 50.0 {
        return WHITE.to_string();
    }
    if (brightness(preferred) - bg).abs() < 150.0 {
        return contrast_color(background).to_string();
    }
    normalize_hex(preferred)
}

/// Shifts every channel by `delta`, clamping to `[0, 255]`.
pub fn adjust_color(color: &str, delta: i32) -> String {
    if color.trim().is_empty() {
        return BLACK.to_string();
    }
    let (r, g, b) = parse_hex(color).unwrap_or((0, 0, 0));
    let shift = |channel: u8| (channel as i32 + delta).clamp(0, 255) as u8;
    to_hex(shift(r), shift(g), shift(b))
}

/// Fixed badge fill for a dietary/category tag.
pub fn tag_color(tag: &str) -> &'static str {
    let key = tag.trim().to_ascii_lowercase().replace([' ', '_'], "-");
    match key.as_str() {
        "vegetarian" => "#22c55e",
        "vegan" => "#15803d",
        "spicy" => "#f97316",
        "gluten-free" | "glutenfree" => "#a855f7",
        "halal" => "#06b6d4",
        "kosher" => "#3b82f6",
        _ => UNKNOWN_TAG_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contrast_picks_opposite_extreme() {
        assert_eq!(contrast_color("#000000"), WHITE);
        assert_eq!(contrast_color("#ffffff"), BLACK);
        let mid = contrast_color("#808080");
        assert!(mid == BLACK || mid == WHITE);
        assert_eq!(mid, contrast_color("#808080"));
    }

    #[test]
    fn adjust_color_clamps() {
        assert_eq!(adjust_color("#ffffff", 50), "#ffffff");
        assert_eq!(adjust_color("#000000", -50), "#000000");
        assert_eq!(adjust_color("#102030", -0x15), "#000b1b");
        assert_eq!(adjust_color("", 10), "#000000");
    }

    #[test]
    fn adjust_color_keeps_leading_zeros() {
        assert_eq!(adjust_color("#000000", 5), "#050505");
    }

    #[test]
    fn malformed_colors_fall_back_to_black() {
        assert_eq!(brightness("not-a-color"), 0.0);
        assert_eq!(normalize_hex("#12345"), BLACK);
        assert_eq!(normalize_hex("#FFF"), "#ffffff");
        assert_eq!(normalize_hex("A0B1C2"), "#a0b1c2");
    }

    #[test]
    fn readable_text_color_respects_preference_when_legible() {
        assert_eq!(readable_text_color("#ffffff", "#fefefe"), BLACK);
        assert_eq!(readable_text_color("#000000", "#0a0a0a"), WHITE);
        // mid-gray background with a close gray text gets flipped
        assert_eq!(readable_text_color("#b0b0b0", "#a0a0a0"), BLACK);
        // strong separation keeps the caller's color
        assert_eq!(readable_text_color("#FFFF00", "#1e3a8a"), "#ffff00");
    }

    #[test]
    fn palette_names_resolve() {
        for name in THEME_NAMES {
            let theme = Theme::by_name(name).expect("palette entry");
            assert_eq!(theme.name, name);
        }
        assert!(Theme::by_name("Ocean_Blue").is_some());
        assert!(Theme::by_name("nope").is_none());
    }

    #[test]
    fn tag_colors_are_fixed() {
        assert_eq!(tag_color("Halal"), "#06b6d4");
        assert_eq!(tag_color("gluten free"), "#a855f7");
        assert_eq!(tag_color("Keto"), UNKNOWN_TAG_COLOR);
    }
}
