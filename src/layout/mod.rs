mod card;
mod centered;
mod elegant;
mod fact;
mod grid;
mod left_aligned;
mod menu_style;
mod minimal;
pub mod text;
pub(crate) mod types;
pub use text::{TextSpec, layout_text, max_lines_for, wrap_text};
pub use types::*;
use card::*;
use centered::*;
use elegant::*;
use fact::*;
use grid::*;
use left_aligned::*;
use menu_style::*;
use minimal::*;

use crate::config::LayoutConfig;
use crate::ir::{LayoutSpec, MultiLayout, SlideContent, SlideLayout};
use crate::text_metrics::heuristic_text_width;
use crate::theme::{Theme, adjust_color, contrast_color, readable_text_color, tag_color};

pub(crate) const BACKGROUND_GRADIENT_ID: &str = "bg-gradient";
pub(crate) const FEATURED_CLASS: &str = "featured-badge";
pub(crate) const TAG_CLASS: &str = "tag-badge";
pub(crate) const CELL_CLASS: &str = "menu-cell";

/// Resolves a single-item layout id. Unknown ids render as `centered`.
pub fn resolve_layout(token: &str) -> LayoutSpec {
    LayoutSpec::from_token(token).unwrap_or_else(|| {
        tracing::debug!(layout = token, "unknown layout id, falling back to centered");
        LayoutSpec::Single(SlideLayout::Centered)
    })
}

/// Resolves a multi-item layout id. Anything else renders as `multi-grid`.
pub fn resolve_multi_layout(token: &str) -> MultiLayout {
    match LayoutSpec::from_token(token) {
        Some(LayoutSpec::Multi(layout)) => layout,
        _ => {
            tracing::debug!(layout = token, "not a multi-item layout, falling back to multi-grid");
            MultiLayout::MultiGrid
        }
    }
}

pub fn compute_slide_layout(
    spec: LayoutSpec,
    content: &SlideContent,
    theme: &Theme,
    config: &LayoutConfig,
) -> Scene {
    let theme = theme.sanitized();
    let layout = match spec {
        LayoutSpec::Single(layout) => layout,
        LayoutSpec::Multi(layout) => {
            return compute_multi_layout(layout, std::slice::from_ref(content), &theme, config);
        }
    };
    match layout {
        SlideLayout::Centered => compute_centered_layout(content, &theme, config),
        SlideLayout::LeftAligned => compute_left_aligned_layout(content, &theme, config),
        SlideLayout::Card => compute_card_layout(content, &theme, config),
        SlideLayout::Minimal => compute_minimal_layout(content, &theme, config),
        SlideLayout::Elegant => compute_elegant_layout(content, &theme, config, false),
        SlideLayout::ModernGrid => compute_elegant_layout(content, &theme, config, true),
    }
}

/// Lays out up to `layout.capacity()` items; the rest are ignored.
pub fn compute_multi_layout(
    layout: MultiLayout,
    contents: &[SlideContent],
    theme: &Theme,
    config: &LayoutConfig,
) -> Scene {
    let theme = theme.sanitized();
    let capacity = layout.capacity();
    if contents.len() > capacity {
        tracing::debug!(
            ?layout,
            capacity,
            dropped = contents.len() - capacity,
            "more items than the layout holds"
        );
    }
    let items = &contents[..contents.len().min(capacity)];
    let title = config
        .page_title
        .as_deref()
        .unwrap_or(layout.default_page_title());
    match layout {
        MultiLayout::MenuStyle => compute_menu_style_layout(items, title, &theme, config),
        _ => compute_grid_layout(layout, items, title, &theme, config),
    }
}

pub fn compute_fact_layout(content: &SlideContent, theme: &Theme, config: &LayoutConfig) -> Scene {
    compute_fact_card_layout(content, &theme.sanitized(), config)
}

/// Text colors for one surface.
pub(crate) struct Ink {
    pub text: String,
    pub description: String,
    pub price: String,
}

impl Ink {
    /// Theme colors, each flipped only where illegible on `surface`.
    pub(crate) fn over(theme: &Theme, surface: &str) -> Self {
        Self {
            text: readable_text_color(&theme.text_color, surface),
            description: readable_text_color(&theme.description_color, surface),
            price: readable_text_color(&theme.price_color, surface),
        }
    }

    /// Dark text for white cards regardless of the theme.
    pub(crate) fn on_white(theme: &Theme) -> Self {
        Self {
            text: "#1f2937".to_string(),
            description: "#4b5563".to_string(),
            price: readable_text_color(&theme.price_color, "#ffffff"),
        }
    }
}

/// Horizontal placement and type scale for a title/description/price stack.
pub(crate) struct TextColumn {
    pub x: f32,
    pub anchor: TextAnchor,
    pub max_width: f32,
    pub title_size: f32,
    pub description_size: f32,
    pub description_lines: Option<usize>,
    /// Drawn as part of the stack when set; layouts that pin the price
    /// elsewhere leave it `None`.
    pub price_size: Option<f32>,
    /// Short accent rule under the title.
    pub title_rule: Option<String>,
}

pub(crate) fn gradient_background(scene: &mut Scene, theme: &Theme, delta: i32) {
    scene.defs.push(Def::LinearGradient {
        id: BACKGROUND_GRADIENT_ID.to_string(),
        from: theme.background_color.clone(),
        to: adjust_color(&theme.background_color, delta),
    });
    scene.push(RectElement::new(
        0.0,
        0.0,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        format!("url(#{BACKGROUND_GRADIENT_ID})"),
    ));
}

pub(crate) fn image_box(scene: &mut Scene, href: &str, x: f32, y: f32, width: f32, height: f32, radius: f32) {
    let clip_id = scene.clip_rect(x, y, width, height, radius);
    scene.push(ImageElement {
        x,
        y,
        width,
        height,
        href: href.to_string(),
        clip_id: Some(clip_id),
    });
}

/// Wraps `text` per `spec` and draws it. Returns the block, or `None` when
/// the text is blank and nothing was drawn.
pub(crate) fn draw_text(
    scene: &mut Scene,
    text: &str,
    spec: &TextSpec<'_>,
    config: &LayoutConfig,
    fill: &str,
    weight: FontWeight,
) -> Option<WrappedText> {
    let block = layout_text(text, spec, config)?;
    scene.push(TextElement {
        block: block.clone(),
        fill: fill.to_string(),
        font_family: spec.font_family.to_string(),
        weight,
        letter_spacing: None,
    });
    Some(block)
}

pub(crate) fn single_line(text: &str, x: f32, baseline: f32, font_size: f32, anchor: TextAnchor, config: &LayoutConfig) -> WrappedText {
    WrappedText {
        lines: vec![text.to_string()],
        font_size,
        line_height: font_size * config.line_height,
        x,
        start_y: baseline,
        anchor,
        truncated: false,
    }
}

/// Draws title, description and (optionally) price top-down from the
/// title baseline `top`. Returns the lowest y drawn, or `top` if nothing was.
pub(crate) fn draw_text_column(
    scene: &mut Scene,
    content: &SlideContent,
    column: &TextColumn,
    top: f32,
    ink: &Ink,
    theme: &Theme,
    config: &LayoutConfig,
) -> f32 {
    let family = theme.font_family_hint.as_str();
    let mut bottom = top;
    let mut next_baseline = top;

    let title_spec = TextSpec::new(column.x, next_baseline, column.title_size, column.max_width, family)
        .anchor(column.anchor);
    if let Some(title) = draw_text(scene, &content.title, &title_spec, config, &ink.text, FontWeight::Bold) {
        bottom = title.bottom();
        if let Some(rule) = &column.title_rule {
            let rule_y = bottom + 18.0;
            let (x1, x2) = match column.anchor {
                TextAnchor::Start => (column.x, column.x + 160.0),
                TextAnchor::Middle => (column.x - 80.0, column.x + 80.0),
                TextAnchor::End => (column.x - 160.0, column.x),
            };
            scene.push(LineElement::new(x1, rule_y, x2, rule_y, rule.clone(), 3.0));
            bottom = rule_y;
        }
        next_baseline = bottom + column.description_size * 0.8 + column.description_size;
    }

    if let Some(description) = content.description.as_deref() {
        let mut spec = TextSpec::new(column.x, next_baseline, column.description_size, column.max_width, family)
            .anchor(column.anchor)
            .description();
        if let Some(lines) = column.description_lines {
            spec = spec.max_lines(lines);
        }
        if let Some(block) = draw_text(scene, description, &spec, config, &ink.description, FontWeight::Normal) {
            bottom = block.bottom();
        }
    }

    if let Some(price_size) = column.price_size
        && let Some(label) = config.format_price(content.price)
    {
        let baseline = bottom + price_size * 0.5 + price_size;
        draw_price(scene, &label, column.x, baseline, price_size, column.anchor, &ink.price, family, config);
        bottom = baseline + price_size * 0.3;
    }
    bottom
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_price(
    scene: &mut Scene,
    label: &str,
    x: f32,
    baseline: f32,
    font_size: f32,
    anchor: TextAnchor,
    fill: &str,
    family: &str,
    config: &LayoutConfig,
) {
    scene.push(TextElement {
        block: single_line(label, x, baseline, font_size, anchor, config),
        fill: fill.to_string(),
        font_family: family.to_string(),
        weight: FontWeight::Bold,
        letter_spacing: None,
    });
}

/// Pill badge. `y` is the top edge; returns the badge width.
#[allow(clippy::too_many_arguments)]
fn pill(
    scene: &mut Scene,
    class: &str,
    label: &str,
    x: f32,
    y: f32,
    anchor: TextAnchor,
    font_size: f32,
    fill: &str,
    family: &str,
    config: &LayoutConfig,
) -> f32 {
    let pad_x = font_size * 0.8;
    let height = font_size * 1.8;
    let width = heuristic_text_width(label, font_size) + pad_x * 2.0;
    let left = match anchor {
        TextAnchor::Start => x,
        TextAnchor::Middle => x - width / 2.0,
        TextAnchor::End => x - width,
    };
    let start = scene.elements.len();
    scene.push(RectElement::new(left, y, width, height, fill).rounded(height / 2.0));
    scene.push(TextElement {
        block: single_line(
            label,
            left + width / 2.0,
            y + height / 2.0 + font_size * 0.35,
            font_size,
            TextAnchor::Middle,
            config,
        ),
        fill: contrast_color(fill).to_string(),
        font_family: family.to_string(),
        weight: FontWeight::Bold,
        letter_spacing: Some(font_size * 0.08),
    });
    let children = scene.elements.split_off(start);
    scene.push(GroupElement {
        class: Some(class.to_string()),
        children,
    });
    width
}

/// "POPULAR" badge for featured items. `y` is the top edge.
#[allow(clippy::too_many_arguments)]
pub(crate) fn featured_badge(
    scene: &mut Scene,
    content: &SlideContent,
    x: f32,
    y: f32,
    anchor: TextAnchor,
    font_size: f32,
    theme: &Theme,
    config: &LayoutConfig,
) {
    if !content.is_featured {
        return;
    }
    pill(
        scene,
        FEATURED_CLASS,
        &config.featured_label,
        x,
        y,
        anchor,
        font_size,
        &theme.accent_color,
        &theme.font_family_hint,
        config,
    );
}

/// Row of tag badges, at most `max` of them. `y` is the top edge; returns
/// the row height, or zero when nothing was drawn.
#[allow(clippy::too_many_arguments)]
pub(crate) fn tag_row(
    scene: &mut Scene,
    tags: &[String],
    x: f32,
    y: f32,
    anchor: TextAnchor,
    font_size: f32,
    max: usize,
    theme: &Theme,
    config: &LayoutConfig,
) -> f32 {
    let tags: Vec<&str> = tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .take(max)
        .collect();
    if tags.is_empty() {
        return 0.0;
    }
    let gap = font_size * 0.6;
    let widths: Vec<f32> = tags
        .iter()
        .map(|tag| heuristic_text_width(tag, font_size) + font_size * 1.6)
        .collect();
    let total = widths.iter().sum::<f32>() + gap * (widths.len() - 1) as f32;
    let mut left = match anchor {
        TextAnchor::Start => x,
        TextAnchor::Middle => x - total / 2.0,
        TextAnchor::End => x - total,
    };
    for (tag, width) in tags.iter().zip(&widths) {
        pill(
            scene,
            TAG_CLASS,
            tag,
            left,
            y,
            TextAnchor::Start,
            font_size,
            tag_color(tag),
            &theme.font_family_hint,
            config,
        );
        left += width + gap;
    }
    font_size * 1.8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::brightness;

    fn kabuli() -> SlideContent {
        SlideContent::new("Kabuli Pulao")
            .with_description("Traditional Afghan rice dish with lamb, carrots, and raisins")
            .with_price(15.99)
            .with_tags(["Halal"])
            .featured()
    }

    const SINGLE: [SlideLayout; 6] = [
        SlideLayout::Centered,
        SlideLayout::LeftAligned,
        SlideLayout::Card,
        SlideLayout::Minimal,
        SlideLayout::Elegant,
        SlideLayout::ModernGrid,
    ];

    #[test]
    fn unknown_layout_falls_back_to_centered() {
        assert_eq!(resolve_layout("spiral"), LayoutSpec::Single(SlideLayout::Centered));
        assert_eq!(resolve_multi_layout("card"), MultiLayout::MultiGrid);
        assert_eq!(resolve_multi_layout("menu-style"), MultiLayout::MenuStyle);
    }

    #[test]
    fn every_single_layout_draws_one_badge_per_kind() {
        let config = LayoutConfig::default();
        for layout in SINGLE {
            let scene = compute_slide_layout(LayoutSpec::Single(layout), &kabuli(), &Theme::default(), &config);
            assert_eq!(scene.count_class(FEATURED_CLASS), 1, "{layout:?}");
            assert_eq!(scene.count_class(TAG_CLASS), 1, "{layout:?}");
        }
    }

    #[test]
    fn blank_fields_are_omitted() {
        let config = LayoutConfig::default();
        let content = SlideContent::new("  ").with_description("");
        for layout in SINGLE {
            let scene = compute_slide_layout(LayoutSpec::Single(layout), &content, &Theme::default(), &config);
            let texts = scene
                .elements
                .iter()
                .filter(|element| matches!(element, Element::Text(_)))
                .count();
            assert_eq!(texts, 0, "{layout:?}");
        }
    }

    #[test]
    fn missing_image_frees_space_for_text() {
        let config = LayoutConfig::default();
        let with_image = kabuli().with_image("https://example.com/pulao.jpg");
        let spec = LayoutSpec::Single(SlideLayout::LeftAligned);
        let wide = compute_slide_layout(spec, &kabuli(), &Theme::default(), &config);
        let narrow = compute_slide_layout(spec, &with_image, &Theme::default(), &config);
        let title_x = |scene: &Scene| {
            scene.elements.iter().find_map(|element| match element {
                Element::Text(text) if text.block.lines[0] == "Kabuli Pulao" => Some(text.block.x),
                _ => None,
            })
        };
        assert!(title_x(&wide).unwrap() < title_x(&narrow).unwrap());
        assert!(narrow.elements.iter().any(|e| matches!(e, Element::Image(_))));
        assert!(!wide.elements.iter().any(|e| matches!(e, Element::Image(_))));
    }

    #[test]
    fn multi_layout_caps_items() {
        let config = LayoutConfig::default();
        let items: Vec<SlideContent> = (0..10).map(|i| SlideContent::new(format!("Dish {i}"))).collect();
        for layout in [
            MultiLayout::Grid2x2,
            MultiLayout::Grid3x2,
            MultiLayout::MenuStyle,
            MultiLayout::MultiGrid,
        ] {
            let scene = compute_multi_layout(layout, &items, &Theme::default(), &config);
            assert_eq!(scene.count_class(CELL_CLASS), layout.capacity(), "{layout:?}");
        }
    }

    #[test]
    fn multi_id_through_single_entry_renders_one_cell() {
        let config = LayoutConfig::default();
        let scene = compute_slide_layout(
            LayoutSpec::Multi(MultiLayout::Grid2x2),
            &kabuli(),
            &Theme::default(),
            &config,
        );
        assert_eq!(scene.count_class(CELL_CLASS), 1);
    }

    fn text_fill<'a>(elements: &'a [Element], line: &str) -> Option<&'a str> {
        elements.iter().find_map(|element| match element {
            Element::Text(text) if text.block.lines.first().is_some_and(|first| first == line) => {
                Some(text.fill.as_str())
            }
            Element::Group(group) => text_fill(&group.children, line),
            _ => None,
        })
    }

    #[test]
    fn white_card_layouts_ignore_light_theme_text() {
        let config = LayoutConfig::default();
        let theme = Theme::classic_dark();
        assert_eq!(theme.text_color, "#ffffff");
        for layout in [SlideLayout::Card, SlideLayout::Elegant, SlideLayout::ModernGrid] {
            let scene = compute_slide_layout(LayoutSpec::Single(layout), &kabuli(), &theme, &config);
            assert_eq!(text_fill(&scene.elements, "Kabuli Pulao"), Some("#1f2937"), "{layout:?}");
            let price = text_fill(&scene.elements, "$15.99").unwrap();
            assert!(brightness(price) < 100.0, "{layout:?} price {price}");
        }
    }

    #[test]
    fn tag_row_skips_blank_tags_and_respects_max() {
        let config = LayoutConfig::default();
        let mut scene = Scene::new("sans-serif");
        let tags = vec![
            "Vegan".to_string(),
            " ".to_string(),
            "Spicy".to_string(),
            "Kosher".to_string(),
        ];
        let height = tag_row(&mut scene, &tags, 0.0, 0.0, TextAnchor::Start, 20.0, 2, &Theme::default(), &config);
        assert!(height > 0.0);
        assert_eq!(scene.count_class(TAG_CLASS), 2);
    }
}
