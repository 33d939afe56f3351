use crate::config::LayoutConfig;
use crate::ir::SlideContent;
use crate::theme::Theme;

use super::{
    CANVAS_WIDTH, Ink, Scene, TextAnchor, TextColumn, draw_text_column, featured_badge,
    gradient_background, image_box, tag_row,
};

const IMAGE_WIDTH: f32 = 600.0;
const IMAGE_HEIGHT: f32 = 420.0;
const IMAGE_TOP: f32 = 80.0;

pub(super) fn compute_centered_layout(
    content: &SlideContent,
    theme: &Theme,
    config: &LayoutConfig,
) -> Scene {
    let mut scene = Scene::new(theme.font_family_hint.clone());
    gradient_background(&mut scene, theme, -30);
    let center_x = CANVAS_WIDTH / 2.0;

    // Without an image the text block moves up into the freed space.
    let (top, title_size) = match content.image() {
        Some(uri) => {
            image_box(
                &mut scene,
                uri,
                center_x - IMAGE_WIDTH / 2.0,
                IMAGE_TOP,
                IMAGE_WIDTH,
                IMAGE_HEIGHT,
                24.0,
            );
            (IMAGE_TOP + IMAGE_HEIGHT + 110.0, 80.0)
        }
        None => (380.0, 96.0),
    };

    let column = TextColumn {
        x: center_x,
        anchor: TextAnchor::Middle,
        max_width: 1600.0,
        title_size,
        description_size: 32.0,
        description_lines: None,
        price_size: Some(64.0),
        title_rule: None,
    };
    let ink = Ink::over(theme, &theme.background_color);
    let bottom = draw_text_column(&mut scene, content, &column, top, &ink, theme, config);
    tag_row(
        &mut scene,
        &content.tags,
        center_x,
        bottom + 30.0,
        TextAnchor::Middle,
        24.0,
        config.max_tags,
        theme,
        config,
    );
    featured_badge(&mut scene, content, CANVAS_WIDTH - 80.0, 60.0, TextAnchor::End, 28.0, theme, config);
    scene
}
