use crate::config::LayoutConfig;
use crate::ir::SlideContent;
use crate::theme::{Theme, WHITE};

use super::{
    CANVAS_WIDTH, Ink, RectElement, Scene, TextAnchor, TextColumn, draw_text_column,
    featured_badge, gradient_background, image_box, tag_row,
};

const CARD_X: f32 = 100.0;
const CARD_Y: f32 = 60.0;
const CARD_WIDTH: f32 = 1720.0;
const CARD_HEIGHT: f32 = 960.0;
const BORDER_GAP: f32 = 16.0;
const TAG_SIZE: f32 = 22.0;

/// White card with a double accent border. Text is always dark on white.
pub(super) fn compute_card_layout(content: &SlideContent, theme: &Theme, config: &LayoutConfig) -> Scene {
    let mut scene = Scene::new(theme.font_family_hint.clone());
    gradient_background(&mut scene, theme, -25);

    scene.push(
        RectElement::new(CARD_X, CARD_Y, CARD_WIDTH, CARD_HEIGHT, WHITE)
            .rounded(40.0)
            .stroke(theme.accent_color.clone(), 6.0),
    );
    scene.push(
        RectElement::new(
            CARD_X + BORDER_GAP,
            CARD_Y + BORDER_GAP,
            CARD_WIDTH - BORDER_GAP * 2.0,
            CARD_HEIGHT - BORDER_GAP * 2.0,
            "none",
        )
        .rounded(40.0 - BORDER_GAP / 2.0)
        .stroke(theme.accent_color.clone(), 2.0)
        .opacity(0.6),
    );

    let center_x = CANVAS_WIDTH / 2.0;
    let (top, title_size, description_lines) = match content.image() {
        Some(uri) => {
            let (x, y) = (CARD_X + 60.0, CARD_Y + 60.0);
            image_box(&mut scene, uri, x, y, CARD_WIDTH - 120.0, 440.0, 24.0);
            (y + 440.0 + 100.0, 64.0, Some(2))
        }
        None => (400.0, 80.0, None),
    };

    let column = TextColumn {
        x: center_x,
        anchor: TextAnchor::Middle,
        max_width: 1500.0,
        title_size,
        description_size: 28.0,
        description_lines,
        price_size: Some(60.0),
        title_rule: None,
    };
    let ink = Ink::on_white(theme);
    let bottom = draw_text_column(&mut scene, content, &column, top, &ink, theme, config);
    // Tag pills stay above the inner border.
    let tag_limit = CARD_Y + CARD_HEIGHT - BORDER_GAP - TAG_SIZE * 1.8 - 8.0;
    tag_row(
        &mut scene,
        &content.tags,
        center_x,
        (bottom + 24.0).min(tag_limit),
        TextAnchor::Middle,
        TAG_SIZE,
        config.max_tags,
        theme,
        config,
    );
    featured_badge(
        &mut scene,
        content,
        CARD_X + CARD_WIDTH - 50.0,
        CARD_Y + 40.0,
        TextAnchor::End,
        24.0,
        theme,
        config,
    );
    scene
}
