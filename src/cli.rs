use crate::config::{Config, RenderConfig, load_config};
use crate::input::{SlideDeck, load_deck};
use crate::ir::LayoutSpec;
use crate::layout::{Scene, compute_fact_layout, compute_multi_layout, compute_slide_layout, resolve_layout};
use crate::render::{render_svg, to_data_uri, write_output_svg};
use crate::scene_dump::write_scene_dump;
use crate::theme::{THEME_NAMES, Theme};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slidegen", version, about = "Render digital-signage slides to SVG")]
pub struct Args {
    /// Slide deck (JSON or JSON5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file, or a directory when several slides are produced.
    /// Defaults to stdout for a single SVG or data URI.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Layout id (centered, left-aligned, card, minimal, elegant, modern-grid,
    /// grid-2x2, grid-3x2, menu-style, multi-grid)
    #[arg(short = 'l', long = "layout")]
    pub layout: Option<String>,

    /// Named theme
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Config JSON file (theme, themeVariables, layout, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Render every slide as a "Did you know?" fact card
    #[arg(long = "fact")]
    pub fact: bool,

    /// PNG width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// PNG height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Write the computed scenes as JSON
    #[arg(long = "dumpScene")]
    pub dump_scene: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    DataUri,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::DataUri => "txt",
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }

    let deck = load_deck(args.input.as_deref())?;
    config.theme = resolve_theme(args.theme.as_deref(), &deck, &config)?;
    let layout_id = args
        .layout
        .as_deref()
        .or(deck.layout.as_deref())
        .unwrap_or("centered");

    let scenes = build_scenes(layout_id, args.fact || deck.facts, &deck, &config);
    tracing::info!(slides = deck.slides.len(), pages = scenes.len(), layout = layout_id, "rendering deck");

    if let Some(path) = args.dump_scene.as_deref() {
        write_scene_dump(path, &scenes)?;
    }

    let documents: Vec<String> = scenes.iter().map(render_svg).collect();
    if let [document] = documents.as_slice() {
        return write_document(document, args.output.as_deref(), args.output_format, &config.render);
    }

    let outputs = resolve_multi_outputs(args.output.as_deref(), args.output_format, documents.len())?;
    for (document, output) in documents.iter().zip(&outputs) {
        write_document(document, Some(output), args.output_format, &config.render)?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Command line theme beats the deck's, which beats the config file's.
/// Deck theme variables are applied last.
fn resolve_theme(flag: Option<&str>, deck: &SlideDeck, config: &Config) -> Result<Theme> {
    let mut theme = config.theme.clone();
    if let Some(name) = deck.theme.as_deref() {
        match Theme::by_name(name) {
            Some(named) => theme = named,
            None => tracing::warn!(theme = name, "unknown theme in deck, keeping configured theme"),
        }
    }
    if let Some(name) = flag {
        theme = Theme::by_name(name).ok_or_else(|| {
            anyhow::anyhow!("Unknown theme '{name}' (expected one of: {})", THEME_NAMES.join(", "))
        })?;
    }
    if let Some(vars) = deck.theme_variables.clone() {
        vars.apply(&mut theme);
    }
    Ok(theme)
}

/// One scene per slide for single-item layouts and fact cards; multi-item
/// layouts are paginated at their capacity.
fn build_scenes(layout_id: &str, facts: bool, deck: &SlideDeck, config: &Config) -> Vec<Scene> {
    if facts {
        return deck
            .slides
            .iter()
            .map(|slide| compute_fact_layout(slide, &config.theme, &config.layout))
            .collect();
    }
    match resolve_layout(layout_id) {
        spec @ LayoutSpec::Single(_) => deck
            .slides
            .iter()
            .map(|slide| compute_slide_layout(spec, slide, &config.theme, &config.layout))
            .collect(),
        LayoutSpec::Multi(layout) => deck
            .slides
            .chunks(layout.capacity())
            .map(|page| compute_multi_layout(layout, page, &config.theme, &config.layout))
            .collect(),
    }
}

fn write_document(svg: &str, output: Option<&Path>, format: OutputFormat, render: &RenderConfig) -> Result<()> {
    match format {
        OutputFormat::Svg => write_output_svg(svg, output),
        OutputFormat::DataUri => write_output_svg(&to_data_uri(svg), output),
        OutputFormat::Png => {
            let output = ensure_output(output, "png")?;
            write_png(svg, output, render)
        }
    }
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, render: &RenderConfig) -> Result<()> {
    crate::render::write_output_png(svg, output, render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _render: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn ensure_output<'a>(output: Option<&'a Path>, ext: &str) -> Result<&'a Path> {
    output.ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}

fn resolve_multi_outputs(output: Option<&Path>, format: OutputFormat, count: usize) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required when rendering {count} slides"))?;
    if base.is_dir() {
        return Ok((1..=count)
            .map(|idx| base.join(format!("slide-{idx}.{ext}")))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("slide");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok((1..=count)
        .map(|idx| parent.join(format!("{stem}-{idx}.{ext}")))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeVariables;
    use crate::ir::SlideContent;
    use crate::layout::CELL_CLASS;

    fn deck(count: usize) -> SlideDeck {
        SlideDeck {
            slides: (0..count).map(|i| SlideContent::new(format!("Dish {i}"))).collect(),
            ..SlideDeck::default()
        }
    }

    #[test]
    fn multi_layouts_paginate_at_capacity() {
        let config = Config::default();
        let scenes = build_scenes("grid-2x2", false, &deck(10), &config);
        let cells: Vec<usize> = scenes.iter().map(|scene| scene.count_class(CELL_CLASS)).collect();
        assert_eq!(cells, vec![4, 4, 2]);
    }

    #[test]
    fn single_layouts_render_one_scene_per_slide() {
        let config = Config::default();
        assert_eq!(build_scenes("card", false, &deck(3), &config).len(), 3);
        assert_eq!(build_scenes("no-such-layout", false, &deck(2), &config).len(), 2);
    }

    #[test]
    fn flag_theme_wins_and_deck_variables_apply() {
        let config = Config::default();
        let deck = SlideDeck {
            theme: Some("sunset".to_string()),
            theme_variables: Some(ThemeVariables {
                accent_color: Some("#00ff00".to_string()),
                ..ThemeVariables::default()
            }),
            ..deck(1)
        };
        let theme = resolve_theme(Some("ocean-blue"), &deck, &config).unwrap();
        assert_eq!(theme.name, "ocean-blue");
        assert_eq!(theme.accent_color, "#00ff00");

        let theme = resolve_theme(None, &deck, &config).unwrap();
        assert_eq!(theme.name, "sunset");
        assert!(resolve_theme(Some("neon"), &deck, &config).is_err());
    }

    #[test]
    fn multi_outputs_are_numbered() {
        let outputs = resolve_multi_outputs(Some(Path::new("out/menu.svg")), OutputFormat::Svg, 2).unwrap();
        assert_eq!(
            outputs,
            vec![PathBuf::from("out/menu-1.svg"), PathBuf::from("out/menu-2.svg")]
        );
        let dir = std::env::temp_dir();
        let outputs = resolve_multi_outputs(Some(&dir), OutputFormat::DataUri, 1).unwrap();
        assert_eq!(outputs, vec![dir.join("slide-1.txt")]);
        assert!(resolve_multi_outputs(None, OutputFormat::Png, 2).is_err());
    }
}
