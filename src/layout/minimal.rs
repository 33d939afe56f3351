use crate::config::LayoutConfig;
use crate::ir::SlideContent;
use crate::theme::Theme;

use super::{
    CANVAS_WIDTH, Ink, RectElement, Scene, TextAnchor, TextColumn, draw_text_column,
    featured_badge, gradient_background, image_box, tag_row,
};

const MARGIN: f32 = 120.0;
const ACCENT_BAR_HEIGHT: f32 = 12.0;

pub(super) fn compute_minimal_layout(content: &SlideContent, theme: &Theme, config: &LayoutConfig) -> Scene {
    let mut scene = Scene::new(theme.font_family_hint.clone());
    gradient_background(&mut scene, theme, -15);
    scene.push(RectElement::new(
        0.0,
        0.0,
        CANVAS_WIDTH,
        ACCENT_BAR_HEIGHT,
        theme.accent_color.clone(),
    ));

    let max_width = match content.image() {
        Some(uri) => {
            let width = 640.0;
            let x = CANVAS_WIDTH - MARGIN - width;
            image_box(&mut scene, uri, x, 180.0, width, 720.0, 16.0);
            x - MARGIN - 80.0
        }
        None => CANVAS_WIDTH - MARGIN * 2.0,
    };

    featured_badge(&mut scene, content, MARGIN, 200.0, TextAnchor::Start, 22.0, theme, config);
    let column = TextColumn {
        x: MARGIN,
        anchor: TextAnchor::Start,
        max_width,
        title_size: 56.0,
        description_size: 24.0,
        description_lines: Some(4),
        price_size: Some(48.0),
        title_rule: None,
    };
    let ink = Ink::over(theme, &theme.background_color);
    let bottom = draw_text_column(&mut scene, content, &column, 320.0, &ink, theme, config);
    tag_row(
        &mut scene,
        &content.tags,
        MARGIN,
        bottom + 28.0,
        TextAnchor::Start,
        20.0,
        config.max_tags.min(3),
        theme,
        config,
    );
    scene
}
