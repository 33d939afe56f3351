use crate::layout::{CELL_CLASS, Element, FEATURED_CLASS, Scene, TAG_CLASS};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct SceneDump<'a> {
    pub index: usize,
    pub width: f32,
    pub height: f32,
    pub text_lines: Vec<String>,
    pub truncated_blocks: usize,
    pub cells: usize,
    pub featured_badges: usize,
    pub tag_badges: usize,
    pub scene: &'a Scene,
}

impl<'a> SceneDump<'a> {
    pub fn from_scene(index: usize, scene: &'a Scene) -> Self {
        let mut text_lines = Vec::new();
        let mut truncated_blocks = 0;
        collect_text(&scene.elements, &mut text_lines, &mut truncated_blocks);
        SceneDump {
            index,
            width: scene.width,
            height: scene.height,
            text_lines,
            truncated_blocks,
            cells: scene.count_class(CELL_CLASS),
            featured_badges: scene.count_class(FEATURED_CLASS),
            tag_badges: scene.count_class(TAG_CLASS),
            scene,
        }
    }
}

fn collect_text(elements: &[Element], lines: &mut Vec<String>, truncated: &mut usize) {
    for element in elements {
        match element {
            Element::Text(text) => {
                lines.extend(text.block.lines.iter().cloned());
                if text.block.truncated {
                    *truncated += 1;
                }
            }
            Element::Group(group) => collect_text(&group.children, lines, truncated),
            _ => {}
        }
    }
}

pub fn write_scene_dump(path: &Path, scenes: &[Scene]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump: Vec<SceneDump<'_>> = scenes
        .iter()
        .enumerate()
        .map(|(index, scene)| SceneDump::from_scene(index, scene))
        .collect();
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{MultiLayout, SlideContent};
    use crate::layout::compute_multi_layout;
    use crate::theme::Theme;

    #[test]
    fn dump_summarizes_cells_and_text() {
        let items = vec![
            SlideContent::new("Mantu").with_tags(["Halal"]).featured(),
            SlideContent::new("Chai"),
        ];
        let scene = compute_multi_layout(
            MultiLayout::MenuStyle,
            &items,
            &Theme::default(),
            &LayoutConfig::default(),
        );
        let dump = SceneDump::from_scene(0, &scene);
        assert_eq!(dump.cells, 2);
        assert_eq!(dump.featured_badges, 1);
        assert_eq!(dump.tag_badges, 1);
        assert!(dump.text_lines.iter().any(|line| line == "Menu"));
        assert!(dump.text_lines.iter().any(|line| line == "Mantu"));

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["scene"]["width"], 1920.0);
    }
}
