use crate::text_metrics::TextMetrics;
use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceFormat {
    /// Symbol followed by the number as given, e.g. `$15.9`.
    #[default]
    Raw,
    /// Always two decimals, e.g. `$15.90`.
    Fixed2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub text_metrics: TextMetrics,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    pub price_format: PriceFormat,
    pub currency_symbol: String,
    /// Tag badges shown on single-item slides; grid cells show at most two.
    pub max_tags: usize,
    pub featured_label: String,
    /// Replaces the built-in heading of multi-item layouts.
    pub page_title: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            text_metrics: TextMetrics::Heuristic,
            line_height: 1.3,
            price_format: PriceFormat::Raw,
            currency_symbol: "$".to_string(),
            max_tags: 4,
            featured_label: "POPULAR".to_string(),
            page_title: None,
        }
    }
}

impl LayoutConfig {
    /// Price readout, or `None` when there is nothing sensible to show.
    pub fn format_price(&self, price: Option<f64>) -> Option<String> {
        let price = price.filter(|value| value.is_finite())?;
        let amount = match self.price_format {
            PriceFormat::Raw => price.to_string(),
            PriceFormat::Fixed2 => format!("{price:.2}"),
        };
        Some(format!("{}{amount}", self.currency_symbol))
    }
}

/// Raster output size. The slide itself is always laid out on 1920x1080.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

/// Per-field theme overrides, applied on top of a named theme.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeVariables {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub accent_color: Option<String>,
    pub price_color: Option<String>,
    pub description_color: Option<String>,
    #[serde(alias = "fontFamily")]
    pub font_family_hint: Option<String>,
}

impl ThemeVariables {
    pub fn apply(self, theme: &mut Theme) {
        if let Some(v) = self.background_color {
            theme.background_color = v;
        }
        if let Some(v) = self.text_color {
            theme.text_color = v;
        }
        if let Some(v) = self.accent_color {
            theme.accent_color = v;
        }
        if let Some(v) = self.price_color {
            theme.price_color = v;
        }
        if let Some(v) = self.description_color {
            theme.description_color = v;
        }
        if let Some(v) = self.font_family_hint {
            theme.font_family_hint = v;
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfig>,
    render: Option<RenderConfig>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing config {}", path.display()))
}

/// Parses a config document. Strict JSON first, then JSON5.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(contents)?,
    };

    let mut config = Config::default();
    if let Some(name) = parsed.theme.as_deref() {
        match Theme::by_name(name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = name, "unknown theme name, keeping default"),
        }
    }
    if let Some(vars) = parsed.theme_variables {
        vars.apply(&mut config.theme);
    }
    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }
    if let Some(render) = parsed.render {
        config.render = render;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_price_keeps_literal_number() {
        let config = LayoutConfig::default();
        assert_eq!(config.format_price(Some(15.99)).as_deref(), Some("$15.99"));
        assert_eq!(config.format_price(Some(15.9)).as_deref(), Some("$15.9"));
        assert_eq!(config.format_price(Some(12.0)).as_deref(), Some("$12"));
        assert_eq!(config.format_price(Some(f64::NAN)), None);
        assert_eq!(config.format_price(None), None);
    }

    #[test]
    fn fixed_price_rounds_to_cents() {
        let config = LayoutConfig {
            price_format: PriceFormat::Fixed2,
            currency_symbol: "€".to_string(),
            ..LayoutConfig::default()
        };
        assert_eq!(config.format_price(Some(15.9)).as_deref(), Some("€15.90"));
    }

    #[test]
    fn config_applies_named_theme_and_overrides() {
        let config = parse_config(
            r##"{
                "theme": "ocean-blue",
                "themeVariables": { "accentColor": "#ff0000" },
                "layout": { "priceFormat": "fixed2", "maxTags": 2 }
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.name, "ocean-blue");
        assert_eq!(config.theme.accent_color, "#ff0000");
        assert_eq!(config.layout.price_format, PriceFormat::Fixed2);
        assert_eq!(config.layout.max_tags, 2);
        assert_eq!(config.layout.featured_label, "POPULAR");
    }

    #[test]
    fn config_accepts_json5() {
        let config = parse_config("{ theme: 'sunset', render: { width: 960 } }").unwrap();
        assert_eq!(config.theme.name, "sunset");
        assert_eq!(config.render.width, 960.0);
        assert_eq!(config.render.height, 1080.0);
    }
}
