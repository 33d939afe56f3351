#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod input;
pub mod ir;
pub mod layout;
pub mod render;
pub mod scene_dump;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, PriceFormat, RenderConfig, ThemeVariables, load_config};
pub use input::{InputError, SlideDeck, load_deck, parse_deck};
pub use ir::{FactResponse, LayoutSpec, MultiLayout, SlideContent, SlideLayout};
pub use layout::{Scene, TextSpec, WrappedText, layout_text, wrap_text};
pub use render::{escape_xml, render_svg, to_data_uri};
pub use theme::{
    Theme, adjust_color, brightness, contrast_color, normalize_hex, parse_hex,
    readable_text_color,
};

use layout::{compute_fact_layout, compute_multi_layout, compute_slide_layout, resolve_layout, resolve_multi_layout};

/// Theme and layout settings for one render call.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            layout: LayoutConfig::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            theme: config.theme.clone(),
            layout: config.layout.clone(),
        }
    }
}

/// Renders one item as an SVG document. Unknown layout ids render as
/// `centered`; multi-item ids render that layout with this single item.
pub fn render_slide_svg(layout_id: &str, content: &SlideContent, options: &RenderOptions) -> String {
    let scene = compute_slide_layout(resolve_layout(layout_id), content, &options.theme, &options.layout);
    render_svg(&scene)
}

/// Like [`render_slide_svg`], encoded as a data URI.
pub fn render_slide(layout_id: &str, content: &SlideContent, options: &RenderOptions) -> String {
    to_data_uri(&render_slide_svg(layout_id, content, options))
}

/// Renders up to the layout's capacity of items on one page. Ids that are
/// not multi-item layouts render as `multi-grid`.
pub fn render_menu_svg(layout_id: &str, contents: &[SlideContent], options: &RenderOptions) -> String {
    let scene = compute_multi_layout(resolve_multi_layout(layout_id), contents, &options.theme, &options.layout);
    render_svg(&scene)
}

pub fn render_menu(layout_id: &str, contents: &[SlideContent], options: &RenderOptions) -> String {
    to_data_uri(&render_menu_svg(layout_id, contents, options))
}

/// "Did you know?" card. The fact text is `content.title`.
pub fn render_fact_svg(content: &SlideContent, options: &RenderOptions) -> String {
    render_svg(&compute_fact_layout(content, &options.theme, &options.layout))
}

pub fn render_fact(content: &SlideContent, options: &RenderOptions) -> String {
    to_data_uri(&render_fact_svg(content, options))
}
