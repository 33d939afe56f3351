use serde::Serialize;

pub const CANVAS_WIDTH: f32 = 1920.0;
pub const CANVAS_HEIGHT: f32 = 1080.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Where the given `y` sits relative to a wrapped block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    /// `y` is the first baseline.
    #[default]
    Top,
    /// The block is centered on `y`.
    Middle,
}

/// Controls the line-count ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    #[default]
    Title,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Semibold,
    Bold,
}

impl FontWeight {
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Semibold => "600",
            Self::Bold => "bold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrappedText {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_height: f32,
    pub x: f32,
    /// Baseline of the first line.
    pub start_y: f32,
    pub anchor: TextAnchor,
    pub truncated: bool,
}

impl WrappedText {
    pub fn last_baseline(&self) -> f32 {
        self.start_y + self.lines.len().saturating_sub(1) as f32 * self.line_height
    }

    /// Lowest point of the block, allowing for descenders.
    pub fn bottom(&self) -> f32 {
        self.last_baseline() + self.font_size * 0.3
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
    pub dasharray: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub fill: String,
    pub opacity: Option<f32>,
    pub stroke: Option<Stroke>,
}

impl RectElement {
    pub fn new(x: f32, y: f32, width: f32, height: f32, fill: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            radius: 0.0,
            fill: fill.into(),
            opacity: None,
            stroke: None,
        }
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn stroke(mut self, color: impl Into<String>, width: f32) -> Self {
        self.stroke = Some(Stroke {
            color: color.into(),
            width,
            dasharray: None,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleElement {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub fill: String,
    pub opacity: Option<f32>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineElement {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: Stroke,
    pub opacity: Option<f32>,
}

impl LineElement {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, color: impl Into<String>, width: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke: Stroke {
                color: color.into(),
                width,
                dasharray: None,
            },
            opacity: None,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn dashed(mut self, dasharray: impl Into<String>) -> Self {
        self.stroke.dasharray = Some(dasharray.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathElement {
    pub d: String,
    pub fill: String,
    pub stroke: Option<Stroke>,
    pub opacity: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub href: String,
    /// Id of the rounded clip rect in `Scene::defs`.
    pub clip_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextElement {
    pub block: WrappedText,
    pub fill: String,
    pub font_family: String,
    pub weight: FontWeight,
    pub letter_spacing: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupElement {
    pub class: Option<String>,
    pub children: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Rect(RectElement),
    Circle(CircleElement),
    Line(LineElement),
    Path(PathElement),
    Image(ImageElement),
    Text(TextElement),
    Group(GroupElement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Def {
    /// Diagonal gradient from the top-left corner.
    LinearGradient { id: String, from: String, to: String },
    /// Tiled pattern made of the given shapes.
    Pattern {
        id: String,
        width: f32,
        height: f32,
        shapes: Vec<Element>,
    },
    ClipRect {
        id: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
    },
}

/// Everything needed to serialize one slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub font_family: String,
    pub defs: Vec<Def>,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            font_family: font_family.into(),
            defs: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    /// Registers a rounded clip rect and returns its id.
    pub fn clip_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32) -> String {
        let id = format!("clip-{}", self.defs.len());
        self.defs.push(Def::ClipRect {
            id: id.clone(),
            x,
            y,
            width,
            height,
            radius,
        });
        id
    }

    /// Number of groups with the given class, searched recursively.
    pub fn count_class(&self, class: &str) -> usize {
        fn count(elements: &[Element], class: &str) -> usize {
            elements
                .iter()
                .map(|element| match element {
                    Element::Group(group) => {
                        usize::from(group.class.as_deref() == Some(class))
                            + count(&group.children, class)
                    }
                    _ => 0,
                })
                .sum()
        }
        count(&self.elements, class)
    }
}

macro_rules! impl_into_element {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Element {
            fn from(value: $ty) -> Self {
                Element::$variant(value)
            }
        })*
    };
}

impl_into_element!(
    RectElement => Rect,
    CircleElement => Circle,
    LineElement => Line,
    PathElement => Path,
    ImageElement => Image,
    TextElement => Text,
    GroupElement => Group,
);
