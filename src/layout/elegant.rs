use crate::config::LayoutConfig;
use crate::ir::SlideContent;
use crate::theme::{Theme, WHITE};

use super::{
    CANVAS_HEIGHT, CANVAS_WIDTH, CircleElement, Def, Element, Ink, LineElement, RectElement,
    Scene, TextAnchor, TextColumn, draw_text_column, featured_badge, gradient_background,
    image_box, tag_row,
};

const GRID_PATTERN_ID: &str = "grid-pattern";
const GRID_CELL: f32 = 60.0;

const CARD_X: f32 = 260.0;
const CARD_Y: f32 = 120.0;
const CARD_WIDTH: f32 = 1400.0;
const CARD_HEIGHT: f32 = 840.0;

/// Centered white card over decorative circles and rules. `grid` adds the
/// graph-paper texture used by the modern-grid variant.
pub(super) fn compute_elegant_layout(
    content: &SlideContent,
    theme: &Theme,
    config: &LayoutConfig,
    grid: bool,
) -> Scene {
    let mut scene = Scene::new(theme.font_family_hint.clone());
    gradient_background(&mut scene, theme, -35);
    let accent = theme.accent_color.as_str();

    if grid {
        scene.defs.push(Def::Pattern {
            id: GRID_PATTERN_ID.to_string(),
            width: GRID_CELL,
            height: GRID_CELL,
            shapes: vec![
                Element::Line(LineElement::new(0.0, 0.0, GRID_CELL, 0.0, accent, 1.0)),
                Element::Line(LineElement::new(0.0, 0.0, 0.0, GRID_CELL, accent, 1.0)),
            ],
        });
        scene.push(
            RectElement::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, format!("url(#{GRID_PATTERN_ID})"))
                .opacity(0.12),
        );
    }

    for (cx, cy, r, opacity) in [(1720.0, 140.0, 320.0, 0.08), (180.0, 960.0, 260.0, 0.06)] {
        scene.push(CircleElement {
            cx,
            cy,
            r,
            fill: accent.to_string(),
            opacity: Some(opacity),
            stroke: None,
        });
    }
    for y in [60.0, CANVAS_HEIGHT - 60.0] {
        scene.push(LineElement::new(560.0, y, CANVAS_WIDTH - 560.0, y, accent, 2.0).opacity(0.4));
    }

    scene.push(
        RectElement::new(CARD_X, CARD_Y, CARD_WIDTH, CARD_HEIGHT, WHITE)
            .rounded(32.0)
            .opacity(0.97)
            .stroke(accent, 1.5),
    );

    let (x, max_width) = match content.image() {
        Some(uri) => {
            let image_x = CARD_X + 60.0;
            let image_width = 560.0;
            image_box(&mut scene, uri, image_x, CARD_Y + 60.0, image_width, CARD_HEIGHT - 120.0, 20.0);
            let text_left = image_x + image_width + 40.0;
            let text_right = CARD_X + CARD_WIDTH - 60.0;
            ((text_left + text_right) / 2.0, text_right - text_left)
        }
        None => (CANVAS_WIDTH / 2.0, 1200.0),
    };

    let column = TextColumn {
        x,
        anchor: TextAnchor::Middle,
        max_width,
        title_size: 60.0,
        description_size: 28.0,
        description_lines: None,
        price_size: Some(56.0),
        title_rule: Some(theme.accent_color.clone()),
    };
    let ink = Ink::on_white(theme);
    let bottom = draw_text_column(&mut scene, content, &column, CARD_Y + 290.0, &ink, theme, config);
    tag_row(
        &mut scene,
        &content.tags,
        x,
        bottom + 28.0,
        TextAnchor::Middle,
        22.0,
        config.max_tags,
        theme,
        config,
    );
    featured_badge(
        &mut scene,
        content,
        CARD_X + CARD_WIDTH - 40.0,
        CARD_Y + 36.0,
        TextAnchor::End,
        22.0,
        theme,
        config,
    );
    scene
}
