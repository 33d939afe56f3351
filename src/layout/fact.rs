use crate::config::LayoutConfig;
use crate::ir::SlideContent;
use crate::theme::{Theme, adjust_color, readable_text_color};

use super::{
    CANVAS_HEIGHT, CANVAS_WIDTH, CircleElement, Def, Element, FontWeight, Ink, LineElement,
    PathElement, RectElement, Scene, Stroke, TextAnchor, TextElement, TextSpec, WrappedText,
    gradient_background, layout_text, single_line,
};

pub const FACT_HEADER: &str = "Did you know?";
pub const DEFAULT_FACT_EMOJI: &str = "\u{1F4A1}";

const PATTERN_ID: &str = "fact-pattern";
const FACT_FONT_SIZES: [f32; 4] = [48.0, 40.0, 32.0, 24.0];
const FACT_MAX_WIDTH: f32 = 1300.0;
const FACT_CENTER_Y: f32 = 640.0;

/// Emoji that survive fact-text sanitizing.
const ALLOWED_EMOJI: &[char] = &[
    '\u{1F30D}', // globe
    '\u{1F372}', // pot of food
    '\u{1F35B}', // curry rice
    '\u{1F958}', // paella pan
    '\u{1F35A}', // rice
    '\u{1FAD3}', // flatbread
    '\u{1F95F}', // dumpling
    '\u{1F9C6}', // falafel
    '\u{1F959}', // stuffed flatbread
    '\u{1F336}', // hot pepper
    '\u{1F347}', // grapes
    '\u{1F349}', // watermelon
    '\u{1F96D}', // mango
    '\u{1F33E}', // sheaf of rice
    '\u{2615}',  // hot beverage
    '\u{1F375}', // tea
    '\u{1F3D4}', // mountain
    '\u{1F54C}', // mosque
    '\u{1F4DC}', // scroll
    '\u{1F389}', // party popper
    '\u{2728}',  // sparkles
    '\u{1F4A1}', // light bulb
    '\u{1F3B6}', // notes
    '\u{1F319}', // crescent moon
    '\u{2B50}',  // star
    '\u{1F525}', // fire
    '\u{2764}',  // heart
    '\u{1F9FF}', // nazar amulet
];

/// Variation selector and zero-width joiner, kept so multi-codepoint emoji
/// stay intact.
fn is_emoji_modifier(ch: char) -> bool {
    matches!(ch, '\u{FE0F}' | '\u{200D}')
}

fn is_allowed_emoji(ch: char) -> bool {
    ALLOWED_EMOJI.contains(&ch) || is_emoji_modifier(ch)
}

/// Background texture of a fact card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactPattern {
    Dots,
    Diagonal,
    Grid,
    Rings,
    Waves,
}

impl FactPattern {
    const ALL: [FactPattern; 5] = [Self::Dots, Self::Diagonal, Self::Grid, Self::Rings, Self::Waves];

    /// Picks a pattern from a BLAKE3 hash of the fact text, so the same
    /// fact always gets the same background.
    pub fn for_text(text: &str) -> Self {
        let hash = blake3::hash(text.as_bytes());
        Self::ALL[hash.as_bytes()[0] as usize % Self::ALL.len()]
    }

    fn def(self, color: &str) -> Def {
        let stroke = |width: f32| {
            Some(Stroke {
                color: color.to_string(),
                width,
                dasharray: None,
            })
        };
        let (width, height, shapes) = match self {
            Self::Dots => (
                40.0,
                40.0,
                vec![Element::Circle(CircleElement {
                    cx: 20.0,
                    cy: 20.0,
                    r: 3.0,
                    fill: color.to_string(),
                    opacity: None,
                    stroke: None,
                })],
            ),
            Self::Diagonal => (40.0, 40.0, vec![Element::Line(LineElement::new(0.0, 40.0, 40.0, 0.0, color, 2.0))]),
            Self::Grid => (
                50.0,
                50.0,
                vec![
                    Element::Line(LineElement::new(0.0, 0.0, 50.0, 0.0, color, 1.0)),
                    Element::Line(LineElement::new(0.0, 0.0, 0.0, 50.0, color, 1.0)),
                ],
            ),
            Self::Rings => (
                80.0,
                80.0,
                vec![Element::Circle(CircleElement {
                    cx: 40.0,
                    cy: 40.0,
                    r: 24.0,
                    fill: "none".to_string(),
                    opacity: None,
                    stroke: stroke(2.0),
                })],
            ),
            Self::Waves => (
                120.0,
                40.0,
                vec![Element::Path(PathElement {
                    d: "M0 20 Q30 0 60 20 T120 20".to_string(),
                    fill: "none".to_string(),
                    stroke: stroke(2.0),
                    opacity: None,
                })],
            ),
        };
        Def::Pattern {
            id: PATTERN_ID.to_string(),
            width,
            height,
            shapes,
        }
    }
}

/// Keeps printable ASCII and allow-listed emoji; every other character
/// becomes a single space.
pub fn sanitize_fact_text(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if (ch.is_ascii() && !ch.is_ascii_control()) || is_allowed_emoji(ch) {
                ch
            } else {
                ' '
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// The supplied emoji when it is made only of allow-listed characters,
/// otherwise the light bulb.
pub fn fact_emoji(emoji: Option<&str>) -> &str {
    match emoji.map(str::trim) {
        Some(emoji)
            if !emoji.is_empty()
                && emoji.chars().any(|ch| ALLOWED_EMOJI.contains(&ch))
                && emoji.chars().all(is_allowed_emoji) =>
        {
            emoji
        }
        _ => DEFAULT_FACT_EMOJI,
    }
}

/// Wraps the fact at the largest size that needs no truncation; the
/// smallest size is used (with ellipsis) when none fits.
fn fit_fact_text(text: &str, family: &str, config: &LayoutConfig) -> Option<WrappedText> {
    let mut fallback = None;
    for size in FACT_FONT_SIZES {
        let spec = TextSpec::new(CANVAS_WIDTH / 2.0, FACT_CENTER_Y, size, FACT_MAX_WIDTH, family)
            .anchor(TextAnchor::Middle)
            .centered_on_y()
            .description();
        let block = layout_text(text, &spec, config)?;
        if !block.truncated {
            return Some(block);
        }
        fallback = Some(block);
    }
    fallback
}

pub(super) fn compute_fact_card_layout(content: &SlideContent, theme: &Theme, config: &LayoutConfig) -> Scene {
    let mut scene = Scene::new(theme.font_family_hint.clone());
    let family = theme.font_family_hint.as_str();
    gradient_background(&mut scene, theme, -40);

    let text = sanitize_fact_text(&content.title);
    let pattern = FactPattern::for_text(&text);
    scene.defs.push(pattern.def(&theme.accent_color));
    scene.push(RectElement::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, format!("url(#{PATTERN_ID})")).opacity(0.1));

    let surface = adjust_color(&theme.background_color, 20);
    scene.push(
        RectElement::new(210.0, 150.0, 1500.0, 780.0, surface.clone())
            .rounded(40.0)
            .opacity(0.92),
    );
    let ink = Ink::over(theme, &surface);
    let center = CANVAS_WIDTH / 2.0;

    scene.push(TextElement {
        block: single_line(FACT_HEADER, center, 250.0, 44.0, TextAnchor::Middle, config),
        fill: readable_text_color(&theme.accent_color, &surface),
        font_family: family.to_string(),
        weight: FontWeight::Bold,
        letter_spacing: Some(2.0),
    });
    scene.push(TextElement {
        block: single_line(fact_emoji(content.emoji.as_deref()), center, 400.0, 110.0, TextAnchor::Middle, config),
        fill: ink.text.clone(),
        font_family: family.to_string(),
        weight: FontWeight::Normal,
        letter_spacing: None,
    });

    if let Some(block) = fit_fact_text(&text, family, config) {
        tracing::debug!(font_size = block.font_size, lines = block.lines.len(), ?pattern, "fact text fitted");
        scene.push(TextElement {
            block,
            fill: ink.text.clone(),
            font_family: family.to_string(),
            weight: FontWeight::Semibold,
            letter_spacing: None,
        });
    }

    scene.push(LineElement::new(center - 100.0, 880.0, center + 100.0, 880.0, theme.accent_color.clone(), 4.0));
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact_block(scene: &Scene) -> Option<&WrappedText> {
        scene.elements.iter().find_map(|element| match element {
            Element::Text(text) if text.weight == FontWeight::Semibold => Some(&text.block),
            _ => None,
        })
    }

    #[test]
    fn sanitizing_keeps_ascii_and_allowed_emoji() {
        assert_eq!(sanitize_fact_text("Caf\u{e9} \u{2615} time"), "Caf  \u{2615} time");
        assert_eq!(sanitize_fact_text("\u{4e2d}\u{6587}ok"), "ok");
        assert_eq!(sanitize_fact_text("tab\there"), "tab here");
    }

    #[test]
    fn unknown_emoji_falls_back_to_light_bulb() {
        assert_eq!(fact_emoji(Some("\u{1F35B}")), "\u{1F35B}");
        assert_eq!(fact_emoji(Some("\u{2764}\u{FE0F}")), "\u{2764}\u{FE0F}");
        assert_eq!(fact_emoji(Some("\u{1F984}")), DEFAULT_FACT_EMOJI);
        assert_eq!(fact_emoji(Some("\u{FE0F}")), DEFAULT_FACT_EMOJI);
        assert_eq!(fact_emoji(Some("  ")), DEFAULT_FACT_EMOJI);
        assert_eq!(fact_emoji(None), DEFAULT_FACT_EMOJI);
    }

    #[test]
    fn pattern_choice_is_stable_per_text() {
        let text = "Saffron is the most expensive spice by weight.";
        assert_eq!(FactPattern::for_text(text), FactPattern::for_text(text));
        let distinct: std::collections::HashSet<u8> = (0..64)
            .map(|i| FactPattern::for_text(&format!("fact {i}")) as u8)
            .collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn short_facts_use_the_largest_size() {
        let content = SlideContent::new("Tea came to Afghanistan along the Silk Road.");
        let scene = compute_fact_card_layout(&content, &Theme::default(), &LayoutConfig::default());
        assert_eq!(fact_block(&scene).unwrap().font_size, 48.0);
    }

    #[test]
    fn long_facts_shrink_until_they_fit() {
        let long = "Afghan cuisine draws on Persian, Indian and Central Asian traditions, \
            and a single family meal can combine rice dishes scented with cardamom, \
            dumplings topped with yogurt and lentils, grilled kebabs, fresh flatbread \
            baked against the wall of a clay oven, and green tea served with sugared almonds.";
        let scene = compute_fact_card_layout(&SlideContent::new(long), &Theme::default(), &LayoutConfig::default());
        let block = fact_block(&scene).unwrap();
        assert!(block.font_size < 48.0);
        assert!(!block.truncated);
    }

    #[test]
    fn blank_fact_still_draws_header() {
        let scene = compute_fact_card_layout(&SlideContent::new(" "), &Theme::default(), &LayoutConfig::default());
        assert!(fact_block(&scene).is_none());
        assert!(scene.elements.iter().any(|element| matches!(
            element,
            Element::Text(text) if text.block.lines[0] == FACT_HEADER
        )));
    }
}
