use crate::config::LayoutConfig;
use crate::ir::SlideContent;
use crate::theme::{Theme, adjust_color};

use super::{
    Ink, RectElement, Scene, TextAnchor, TextColumn, draw_price, draw_text_column,
    featured_badge, gradient_background, image_box, tag_row,
};

const CARD_X: f32 = 60.0;
const CARD_Y: f32 = 60.0;
const CARD_WIDTH: f32 = 1800.0;
const CARD_HEIGHT: f32 = 960.0;
const INSET: f32 = 60.0;

pub(super) fn compute_left_aligned_layout(
    content: &SlideContent,
    theme: &Theme,
    config: &LayoutConfig,
) -> Scene {
    let mut scene = Scene::new(theme.font_family_hint.clone());
    gradient_background(&mut scene, theme, -20);

    let surface = adjust_color(&theme.background_color, 18);
    scene.push(
        RectElement::new(CARD_X, CARD_Y, CARD_WIDTH, CARD_HEIGHT, surface.clone())
            .rounded(32.0)
            .opacity(0.95),
    );

    let card_right = CARD_X + CARD_WIDTH - INSET;
    let text_x = match content.image() {
        Some(uri) => {
            let image_x = CARD_X + INSET;
            let image_width = 760.0;
            image_box(
                &mut scene,
                uri,
                image_x,
                CARD_Y + INSET,
                image_width,
                CARD_HEIGHT - INSET * 2.0,
                24.0,
            );
            image_x + image_width + 80.0
        }
        None => CARD_X + INSET + 20.0,
    };

    let column = TextColumn {
        x: text_x,
        anchor: TextAnchor::Start,
        max_width: card_right - text_x,
        title_size: 64.0,
        description_size: 30.0,
        description_lines: None,
        price_size: None,
        title_rule: None,
    };
    let ink = Ink::over(theme, &surface);
    let bottom = draw_text_column(&mut scene, content, &column, CARD_Y + 200.0, &ink, theme, config);
    tag_row(
        &mut scene,
        &content.tags,
        text_x,
        bottom + 36.0,
        TextAnchor::Start,
        24.0,
        config.max_tags,
        theme,
        config,
    );

    if let Some(label) = config.format_price(content.price) {
        draw_price(
            &mut scene,
            &label,
            card_right,
            CARD_Y + CARD_HEIGHT - INSET,
            72.0,
            TextAnchor::End,
            &ink.price,
            &theme.font_family_hint,
            config,
        );
    }
    featured_badge(&mut scene, content, card_right, CARD_Y + 40.0, TextAnchor::End, 26.0, theme, config);
    scene
}
