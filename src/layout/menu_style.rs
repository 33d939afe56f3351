use crate::config::LayoutConfig;
use crate::ir::SlideContent;
use crate::text_metrics::text_width;
use crate::theme::Theme;

use super::{
    CANVAS_WIDTH, CELL_CLASS, FontWeight, GroupElement, Ink, LineElement, Scene, TextAnchor,
    TextSpec, draw_price, draw_text, featured_badge, gradient_background, image_box, tag_row,
};

const COLUMN_X: [f32; 2] = [100.0, 1000.0];
const COLUMN_WIDTH: f32 = 820.0;
const ROW_TOP: f32 = 220.0;
const ROW_HEIGHT: f32 = 200.0;
const THUMB: f32 = 120.0;
const TITLE_SIZE: f32 = 34.0;

/// Printed-menu page: two columns of rows with dotted leaders between
/// each dish name and its price.
pub(super) fn compute_menu_style_layout(
    items: &[SlideContent],
    title: &str,
    theme: &Theme,
    config: &LayoutConfig,
) -> Scene {
    let mut scene = Scene::new(theme.font_family_hint.clone());
    gradient_background(&mut scene, theme, -20);
    let ink = Ink::over(theme, &theme.background_color);
    menu_heading(&mut scene, title, &ink, theme, config);

    for (index, item) in items.iter().enumerate() {
        let x = COLUMN_X[index % 2];
        let y = ROW_TOP + (index / 2) as f32 * ROW_HEIGHT;
        draw_row(&mut scene, item, x, y, &ink, theme, config);
    }
    scene
}

fn menu_heading(scene: &mut Scene, title: &str, ink: &Ink, theme: &Theme, config: &LayoutConfig) {
    let center = CANVAS_WIDTH / 2.0;
    let family = theme.font_family_hint.as_str();
    let spec = TextSpec::new(center, 140.0, 80.0, 1400.0, family)
        .anchor(TextAnchor::Middle)
        .max_lines(1);
    let Some(block) = draw_text(scene, title, &spec, config, &ink.text, FontWeight::Bold) else {
        return;
    };
    let half = text_width(&block.lines[0], 80.0, family, config.text_metrics).min(1400.0) / 2.0;
    let y = 140.0 - 80.0 * 0.35;
    for (from, to) in [(center - half - 140.0, center - half - 40.0), (center + half + 40.0, center + half + 140.0)] {
        scene.push(LineElement::new(from, y, to, y, theme.accent_color.clone(), 3.0));
    }
}

fn draw_row(
    scene: &mut Scene,
    item: &SlideContent,
    x: f32,
    y: f32,
    ink: &Ink,
    theme: &Theme,
    config: &LayoutConfig,
) {
    let start = scene.elements.len();
    let family = theme.font_family_hint.as_str();
    let right = x + COLUMN_WIDTH;
    let baseline = y + 50.0;

    let text_x = match item.image() {
        Some(uri) => {
            image_box(scene, uri, x, y + 10.0, THUMB, THUMB, THUMB / 2.0);
            x + THUMB + 30.0
        }
        None => x,
    };

    let price_label = config.format_price(item.price);
    let price_width = price_label
        .as_deref()
        .map(|label| text_width(label, TITLE_SIZE, family, config.text_metrics))
        .unwrap_or(0.0);
    if let Some(label) = price_label.as_deref() {
        draw_price(scene, label, right, baseline, TITLE_SIZE, TextAnchor::End, &ink.price, family, config);
    }

    let title_room = right - text_x - price_width - 40.0;
    let spec = TextSpec::new(text_x, baseline, TITLE_SIZE, title_room.max(TITLE_SIZE), family).max_lines(1);
    if let Some(block) = draw_text(scene, &item.title, &spec, config, &ink.text, FontWeight::Bold)
        && price_label.is_some()
    {
        let leader_from = text_x + text_width(&block.lines[0], TITLE_SIZE, family, config.text_metrics) + 16.0;
        let leader_to = right - price_width - 16.0;
        if leader_to - leader_from > 20.0 {
            scene.push(
                LineElement::new(leader_from, baseline - 4.0, leader_to, baseline - 4.0, ink.description.clone(), 2.0)
                    .dashed("2 10")
                    .opacity(0.5),
            );
        }
    }

    if let Some(description) = item.description.as_deref() {
        let spec = TextSpec::new(text_x, y + 88.0, 20.0, right - text_x, family)
            .description()
            .max_lines(2);
        draw_text(scene, description, &spec, config, &ink.description, FontWeight::Normal);
    }

    tag_row(scene, &item.tags, text_x, y + 140.0, TextAnchor::Start, 16.0, 2, theme, config);
    featured_badge(scene, item, right, y + 140.0, TextAnchor::End, 16.0, theme, config);

    let children = scene.elements.split_off(start);
    scene.push(GroupElement {
        class: Some(CELL_CLASS.to_string()),
        children,
    });
}
