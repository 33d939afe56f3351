use crate::layout::{
    CircleElement, Def, Element, GroupElement, ImageElement, LineElement, PathElement,
    RectElement, Scene, Stroke, TextElement,
};
use anyhow::Result;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt::Write as _;
use std::path::Path;

pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

pub fn render_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let (width, height) = (scene.width, scene.height);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" font-family=\"{}\">",
        escape_xml(&scene.font_family)
    ));

    if !scene.defs.is_empty() {
        svg.push_str("<defs>");
        for def in &scene.defs {
            def_svg(&mut svg, def);
        }
        svg.push_str("</defs>");
    }

    for element in &scene.elements {
        element_svg(&mut svg, element);
    }

    svg.push_str("</svg>");
    svg
}

fn def_svg(out: &mut String, def: &Def) {
    match def {
        Def::LinearGradient { id, from, to } => {
            let _ = write!(
                out,
                "<linearGradient id=\"{}\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"100%\"><stop offset=\"0%\" stop-color=\"{}\"/><stop offset=\"100%\" stop-color=\"{}\"/></linearGradient>",
                escape_xml(id),
                escape_xml(from),
                escape_xml(to)
            );
        }
        Def::Pattern {
            id,
            width,
            height,
            shapes,
        } => {
            let _ = write!(
                out,
                "<pattern id=\"{}\" width=\"{width:.2}\" height=\"{height:.2}\" patternUnits=\"userSpaceOnUse\">",
                escape_xml(id)
            );
            for shape in shapes {
                element_svg(out, shape);
            }
            out.push_str("</pattern>");
        }
        Def::ClipRect {
            id,
            x,
            y,
            width,
            height,
            radius,
        } => {
            let _ = write!(
                out,
                "<clipPath id=\"{}\"><rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{radius:.2}\" ry=\"{radius:.2}\"/></clipPath>",
                escape_xml(id)
            );
        }
    }
}

fn element_svg(out: &mut String, element: &Element) {
    match element {
        Element::Rect(rect) => rect_svg(out, rect),
        Element::Circle(circle) => circle_svg(out, circle),
        Element::Line(line) => line_svg(out, line),
        Element::Path(path) => path_svg(out, path),
        Element::Image(image) => image_svg(out, image),
        Element::Text(text) => text_block_svg(out, text),
        Element::Group(group) => group_svg(out, group),
    }
}

fn paint_attrs(stroke: Option<&Stroke>, opacity: Option<f32>) -> String {
    let mut attrs = String::new();
    if let Some(stroke) = stroke {
        let _ = write!(
            attrs,
            " stroke=\"{}\" stroke-width=\"{:.2}\"",
            escape_xml(&stroke.color),
            stroke.width
        );
        if let Some(dash) = &stroke.dasharray {
            let _ = write!(attrs, " stroke-dasharray=\"{}\"", escape_xml(dash));
        }
    }
    if let Some(opacity) = opacity {
        let _ = write!(attrs, " opacity=\"{opacity:.2}\"");
    }
    attrs
}

fn rect_svg(out: &mut String, rect: &RectElement) {
    let _ = write!(
        out,
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"",
        rect.x, rect.y, rect.width, rect.height
    );
    if rect.radius > 0.0 {
        let _ = write!(out, " rx=\"{0:.2}\" ry=\"{0:.2}\"", rect.radius);
    }
    let _ = write!(
        out,
        " fill=\"{}\"{}/>",
        escape_xml(&rect.fill),
        paint_attrs(rect.stroke.as_ref(), rect.opacity)
    );
}

fn circle_svg(out: &mut String, circle: &CircleElement) {
    let _ = write!(
        out,
        "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"{}/>",
        circle.cx,
        circle.cy,
        circle.r,
        escape_xml(&circle.fill),
        paint_attrs(circle.stroke.as_ref(), circle.opacity)
    );
}

fn line_svg(out: &mut String, line: &LineElement) {
    let _ = write!(
        out,
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke-linecap=\"round\"{}/>",
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        paint_attrs(Some(&line.stroke), line.opacity)
    );
}

fn path_svg(out: &mut String, path: &PathElement) {
    let _ = write!(
        out,
        "<path d=\"{}\" fill=\"{}\"{}/>",
        escape_xml(&path.d),
        escape_xml(&path.fill),
        paint_attrs(path.stroke.as_ref(), path.opacity)
    );
}

fn image_svg(out: &mut String, image: &ImageElement) {
    let _ = write!(
        out,
        "<image x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" href=\"{}\" preserveAspectRatio=\"xMidYMid slice\"",
        image.x,
        image.y,
        image.width,
        image.height,
        escape_xml(&image.href)
    );
    if let Some(clip) = &image.clip_id {
        let _ = write!(out, " clip-path=\"url(#{})\"", escape_xml(clip));
    }
    out.push_str("/>");
}

fn text_block_svg(out: &mut String, text: &TextElement) {
    let block = &text.block;
    let x = block.x;
    let _ = write!(
        out,
        "<text x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"{}\" font-family=\"{}\" font-size=\"{:.2}\" font-weight=\"{}\" fill=\"{}\"",
        block.start_y,
        block.anchor.as_svg(),
        escape_xml(&text.font_family),
        block.font_size,
        text.weight.as_svg(),
        escape_xml(&text.fill)
    );
    if let Some(spacing) = text.letter_spacing {
        let _ = write!(out, " letter-spacing=\"{spacing:.2}\"");
    }
    out.push('>');

    for (idx, line) in block.lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { block.line_height };
        let _ = write!(out, "<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}</tspan>", escape_xml(line));
    }

    out.push_str("</text>");
}

fn group_svg(out: &mut String, group: &GroupElement) {
    match &group.class {
        Some(class) => {
            let _ = write!(out, "<g class=\"{}\">", escape_xml(class));
        }
        None => out.push_str("<g>"),
    }
    for child in &group.children {
        element_svg(out, child);
    }
    out.push_str("</g>");
}

/// Escapes the five XML metacharacters and drops characters XML 1.0 cannot
/// carry at all (C0 controls other than tab, newline and carriage return).
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(ch),
            '\u{FFFE}' | '\u{FFFF}' => {}
            ch if (ch as u32) < 0x20 => {}
            ch => escaped.push(ch),
        }
    }
    escaped
}

/// Base64 data URI for embedding the document as an image source.
pub fn to_data_uri(svg: &str) -> String {
    format!("{SVG_DATA_URI_PREFIX}{}", STANDARD.encode(svg.as_bytes()))
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &crate::config::RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let source = tree.size();
    let width = render_cfg.width.max(1.0).round() as u32;
    let height = render_cfg.height.max(1.0).round() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate {width}x{height} pixmap"))?;

    let transform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / source.width(),
        height as f32 / source.height(),
    );
    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, transform, &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FontWeight, TextAnchor, WrappedText};

    fn text(lines: &[&str]) -> Element {
        Element::Text(TextElement {
            block: WrappedText {
                lines: lines.iter().map(|line| line.to_string()).collect(),
                font_size: 20.0,
                line_height: 26.0,
                x: 100.0,
                start_y: 50.0,
                anchor: TextAnchor::Middle,
                truncated: false,
            },
            fill: "#ffffff".to_string(),
            font_family: "'Playfair Display', serif".to_string(),
            weight: FontWeight::Bold,
            letter_spacing: None,
        })
    }

    #[test]
    fn escapes_metacharacters_and_drops_controls() {
        assert_eq!(
            escape_xml("Fish & Chips <\"Tom's\">"),
            "Fish &amp; Chips &lt;&quot;Tom&apos;s&quot;&gt;"
        );
        assert_eq!(escape_xml("a\u{0}b\u{1b}c\td"), "abc\td");
    }

    #[test]
    fn multi_line_text_uses_tspans() {
        let mut scene = Scene::new("sans-serif");
        scene.push(text(&["Kabuli", "Pulao"]));
        let svg = render_svg(&scene);
        assert!(svg.contains("<tspan x=\"100.00\" dy=\"0.00\">Kabuli</tspan>"));
        assert!(svg.contains("<tspan x=\"100.00\" dy=\"26.00\">Pulao</tspan>"));
        assert!(svg.contains("font-family=\"&apos;Playfair Display&apos;, serif\""));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn defs_come_before_elements() {
        let mut scene = Scene::new("sans-serif");
        let clip = scene.clip_rect(0.0, 0.0, 10.0, 10.0, 2.0);
        scene.push(ImageElement {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            href: "https://example.com/a.png?w=1&h=2".to_string(),
            clip_id: Some(clip),
        });
        let svg = render_svg(&scene);
        let defs = svg.find("<defs>").unwrap();
        let image = svg.find("<image").unwrap();
        assert!(defs < image);
        assert!(svg.contains("href=\"https://example.com/a.png?w=1&amp;h=2\""));
        assert!(svg.contains("clip-path=\"url(#clip-0)\""));
    }

    #[test]
    fn groups_carry_their_class() {
        let mut scene = Scene::new("sans-serif");
        scene.push(GroupElement {
            class: Some("menu-cell".to_string()),
            children: vec![Element::Rect(RectElement::new(0.0, 0.0, 1.0, 1.0, "#000000").opacity(0.5))],
        });
        let svg = render_svg(&scene);
        assert!(svg.contains("<g class=\"menu-cell\"><rect"));
        assert!(svg.contains("opacity=\"0.50\""));
    }

    #[test]
    fn data_uri_round_trips_utf8() {
        let svg = "<svg><text>Caf\u{e9} \u{1F35B}</text></svg>";
        let uri = to_data_uri(svg);
        let payload = uri.strip_prefix(SVG_DATA_URI_PREFIX).unwrap();
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), svg);
    }
}
