use crate::config::LayoutConfig;
use crate::ir::{MultiLayout, SlideContent};
use crate::text_metrics::heuristic_text_width;
use crate::theme::{Theme, adjust_color};

use super::{
    CANVAS_WIDTH, CELL_CLASS, FontWeight, GroupElement, Ink, LineElement, RectElement, Scene,
    TextAnchor, TextSpec, draw_price, draw_text, featured_badge, gradient_background, image_box,
    tag_row,
};

const AREA_LEFT: f32 = 80.0;
const AREA_RIGHT: f32 = 1840.0;
const AREA_TOP: f32 = 190.0;
const AREA_BOTTOM: f32 = 1040.0;
const GAP: f32 = 40.0;
const PAD: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImagePlacement {
    Left,
    Top,
}

/// Type scale and image placement shared by every cell of one page.
#[derive(Debug, Clone, Copy)]
struct CellStyle {
    placement: ImagePlacement,
    title: f32,
    description: f32,
    description_lines: usize,
    price: f32,
    badge: f32,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

fn grid_shape(layout: MultiLayout, count: usize) -> (usize, usize) {
    match layout {
        MultiLayout::Grid2x2 => (2, 2),
        MultiLayout::Grid3x2 => (3, 2),
        _ => match count {
            0 | 1 => (1, 1),
            2 => (2, 1),
            3 => (3, 1),
            4 => (2, 2),
            _ => (3, 2),
        },
    }
}

fn cell_style(layout: MultiLayout, cell_width: f32, cell_height: f32, rows: usize) -> CellStyle {
    match layout {
        MultiLayout::Grid2x2 => CellStyle {
            placement: ImagePlacement::Left,
            title: 40.0,
            description: 22.0,
            description_lines: 3,
            price: 40.0,
            badge: 18.0,
        },
        MultiLayout::Grid3x2 => CellStyle {
            placement: ImagePlacement::Top,
            title: 30.0,
            description: 20.0,
            description_lines: 2,
            price: 32.0,
            badge: 16.0,
        },
        _ => {
            let placement = if cell_width > cell_height * 1.6 {
                ImagePlacement::Left
            } else {
                ImagePlacement::Top
            };
            if rows == 1 {
                CellStyle {
                    placement,
                    title: 44.0,
                    description: 24.0,
                    description_lines: 4,
                    price: 44.0,
                    badge: 20.0,
                }
            } else {
                CellStyle {
                    placement,
                    title: 32.0,
                    description: 20.0,
                    description_lines: 2,
                    price: 34.0,
                    badge: 16.0,
                }
            }
        }
    }
}

/// Regular grid of item cards under one page title. Used for grid-2x2,
/// grid-3x2 and multi-grid; `items` is already capped.
pub(super) fn compute_grid_layout(
    layout: MultiLayout,
    items: &[SlideContent],
    title: &str,
    theme: &Theme,
    config: &LayoutConfig,
) -> Scene {
    let mut scene = Scene::new(theme.font_family_hint.clone());
    gradient_background(&mut scene, theme, -25);
    page_heading(&mut scene, title, theme, config);

    let (columns, rows) = grid_shape(layout, items.len());
    let cell_width = (AREA_RIGHT - AREA_LEFT - GAP * (columns - 1) as f32) / columns as f32;
    let cell_height = (AREA_BOTTOM - AREA_TOP - GAP * (rows - 1) as f32) / rows as f32;
    let style = cell_style(layout, cell_width, cell_height, rows);

    for (index, item) in items.iter().enumerate() {
        let cell = Cell {
            x: AREA_LEFT + (index % columns) as f32 * (cell_width + GAP),
            y: AREA_TOP + (index / columns) as f32 * (cell_height + GAP),
            width: cell_width,
            height: cell_height,
        };
        draw_cell(&mut scene, item, cell, &style, theme, config);
    }
    scene
}

fn page_heading(scene: &mut Scene, title: &str, theme: &Theme, config: &LayoutConfig) {
    let center = CANVAS_WIDTH / 2.0;
    let fill = Ink::over(theme, &theme.background_color).text;
    let spec = TextSpec::new(center, 120.0, 64.0, 1600.0, &theme.font_family_hint)
        .anchor(TextAnchor::Middle)
        .max_lines(1);
    if let Some(block) = draw_text(scene, title, &spec, config, &fill, FontWeight::Bold) {
        let y = block.bottom() + 12.0;
        scene.push(LineElement::new(center - 80.0, y, center + 80.0, y, theme.accent_color.clone(), 4.0));
    }
}

fn draw_cell(
    scene: &mut Scene,
    item: &SlideContent,
    cell: Cell,
    style: &CellStyle,
    theme: &Theme,
    config: &LayoutConfig,
) {
    let start = scene.elements.len();
    let family = theme.font_family_hint.as_str();
    let surface = adjust_color(&theme.background_color, 18);
    scene.push(
        RectElement::new(cell.x, cell.y, cell.width, cell.height, surface.clone())
            .rounded(20.0)
            .opacity(0.9),
    );
    let ink = Ink::over(theme, &surface);
    let right = cell.x + cell.width - PAD;
    let bottom = cell.y + cell.height - PAD;

    let (text_x, mut text_top) = match (item.image(), style.placement) {
        (Some(uri), ImagePlacement::Left) => {
            let size = (cell.width * 0.4).min(cell.height - PAD * 2.0);
            image_box(scene, uri, cell.x + PAD, cell.y + PAD, size, cell.height - PAD * 2.0, 12.0);
            (cell.x + PAD + size + 24.0, cell.y + PAD)
        }
        (Some(uri), ImagePlacement::Top) => {
            let height = cell.height * 0.42;
            image_box(scene, uri, cell.x + PAD, cell.y + PAD, cell.width - PAD * 2.0, height, 12.0);
            (cell.x + PAD + 4.0, cell.y + PAD + height + 12.0)
        }
        (None, _) => (cell.x + PAD + 4.0, cell.y + PAD),
    };
    let text_width = right - text_x;

    // Keep the title clear of the badge when both start at the top edge.
    if item.is_featured && text_top <= cell.y + PAD {
        text_top += style.badge * 1.8 + 8.0;
    }
    featured_badge(scene, item, right, cell.y + PAD, TextAnchor::End, style.badge, theme, config);

    let title_spec = TextSpec::new(text_x, text_top + style.title, style.title, text_width, family);
    let mut cursor = draw_text(scene, &item.title, &title_spec.max_lines(2), config, &ink.text, FontWeight::Bold)
        .map(|block| block.bottom())
        .unwrap_or(text_top);

    let price_label = config.format_price(item.price);
    if let Some(label) = price_label.as_deref() {
        draw_price(scene, label, right, bottom, style.price, TextAnchor::End, &ink.price, family, config);
    }
    let tag_size = style.badge;
    let tag_top = bottom - tag_size * 1.8;
    let tags_drawn = tag_row(scene, &item.tags, text_x, tag_top, TextAnchor::Start, tag_size, 2, theme, config) > 0.0;

    if let Some(description) = item.description.as_deref() {
        let footer = if tags_drawn {
            tag_top
        } else if price_label.is_some() {
            bottom - style.price
        } else {
            bottom
        };
        let line_height = style.description * config.line_height;
        let first_baseline = cursor + style.description * 1.4;
        let available = footer - 8.0 - (first_baseline - style.description);
        let fits = (available / line_height).floor().max(0.0) as usize;
        let lines = fits.min(style.description_lines);
        if lines > 0 {
            let mut description_width = text_width;
            if !tags_drawn && price_label.is_some() {
                let price_width = price_label
                    .as_deref()
                    .map(|label| heuristic_text_width(label, style.price))
                    .unwrap_or(0.0);
                if first_baseline + lines as f32 * line_height > bottom - style.price {
                    description_width -= price_width + 16.0;
                }
            }
            let spec = TextSpec::new(text_x, first_baseline, style.description, description_width, family)
                .description()
                .max_lines(lines);
            if let Some(block) = draw_text(scene, description, &spec, config, &ink.description, FontWeight::Normal) {
                cursor = block.bottom();
            }
        }
    }
    tracing::trace!(title = %item.title, bottom = cursor, "grid cell laid out");

    let children = scene.elements.split_off(start);
    scene.push(GroupElement {
        class: Some(CELL_CLASS.to_string()),
        children,
    });
}
