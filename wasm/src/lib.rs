use serde::Deserialize;
use signage_slide_renderer::{
    LayoutConfig, PriceFormat, RenderOptions, SlideContent, Theme, ThemeVariables, render_fact,
    render_menu, render_slide,
};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlideRenderOptions {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    currency_symbol: Option<String>,
    fixed_price: Option<bool>,
    page_title: Option<String>,
}

fn build_render_options(options: SlideRenderOptions) -> RenderOptions {
    let mut theme = options
        .theme
        .as_deref()
        .and_then(Theme::by_name)
        .unwrap_or_default();
    if let Some(vars) = options.theme_variables {
        vars.apply(&mut theme);
    }

    let mut layout = LayoutConfig::default();
    if let Some(symbol) = options.currency_symbol {
        layout.currency_symbol = symbol;
    }
    if options.fixed_price == Some(true) {
        layout.price_format = PriceFormat::Fixed2;
    }
    layout.page_title = options.page_title;

    RenderOptions { theme, layout }
}

fn parse_options(options_json: Option<String>) -> Result<RenderOptions, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<SlideRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        SlideRenderOptions::default()
    };
    Ok(build_render_options(options))
}

fn parse_json<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T, JsValue> {
    serde_json::from_str(raw).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn render_slide_data_uri(
    layout_id: &str,
    content_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let content: SlideContent = parse_json(content_json)?;
    Ok(render_slide(layout_id, &content, &parse_options(options_json)?))
}

#[wasm_bindgen]
pub fn render_menu_data_uri(
    layout_id: &str,
    contents_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let contents: Vec<SlideContent> = parse_json(contents_json)?;
    Ok(render_menu(layout_id, &contents, &parse_options(options_json)?))
}

#[wasm_bindgen]
pub fn render_fact_data_uri(fact_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let fact: signage_slide_renderer::FactResponse = parse_json(fact_json)?;
    Ok(render_fact(&fact.into(), &parse_options(options_json)?))
}
