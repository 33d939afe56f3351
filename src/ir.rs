use serde::{Deserialize, Serialize};

/// One menu item, gallery entry or fact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideContent {
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(alias = "image", alias = "imageUrl")]
    pub image_uri: Option<String>,
    pub is_featured: bool,
    pub tags: Vec<String>,
    pub emoji: Option<String>,
}

impl SlideContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_image(mut self, uri: impl Into<String>) -> Self {
        self.image_uri = Some(uri.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Image URI, if one was supplied and is not blank.
    pub fn image(&self) -> Option<&str> {
        self.image_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
    }
}

/// Payload returned by the fact-generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactResponse {
    pub fact: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

impl From<FactResponse> for SlideContent {
    fn from(response: FactResponse) -> Self {
        Self {
            title: response.fact,
            emoji: response.emoji,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideLayout {
    #[default]
    Centered,
    LeftAligned,
    Card,
    Minimal,
    Elegant,
    ModernGrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultiLayout {
    #[serde(rename = "grid-2x2")]
    Grid2x2,
    #[serde(rename = "grid-3x2")]
    Grid3x2,
    MenuStyle,
    #[default]
    MultiGrid,
}

impl MultiLayout {
    /// Most items a single page of this layout shows.
    pub fn capacity(self) -> usize {
        match self {
            Self::Grid2x2 => 4,
            Self::Grid3x2 | Self::MultiGrid => 6,
            Self::MenuStyle => 8,
        }
    }

    pub fn default_page_title(self) -> &'static str {
        match self {
            Self::Grid2x2 => "Featured Items",
            Self::Grid3x2 | Self::MultiGrid => "Our Menu",
            Self::MenuStyle => "Menu",
        }
    }
}

/// Layout identifier as stored alongside a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSpec {
    Single(SlideLayout),
    Multi(MultiLayout),
}

impl LayoutSpec {
    pub fn from_token(token: &str) -> Option<Self> {
        let key = token.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let spec = match key.as_str() {
            "centered" | "center" => Self::Single(SlideLayout::Centered),
            "left-aligned" | "left" => Self::Single(SlideLayout::LeftAligned),
            "card" => Self::Single(SlideLayout::Card),
            "minimal" => Self::Single(SlideLayout::Minimal),
            "elegant" => Self::Single(SlideLayout::Elegant),
            "modern-grid" => Self::Single(SlideLayout::ModernGrid),
            "grid-2x2" => Self::Multi(MultiLayout::Grid2x2),
            "grid-3x2" => Self::Multi(MultiLayout::Grid3x2),
            "menu-style" | "menu" => Self::Multi(MultiLayout::MenuStyle),
            "multi-grid" => Self::Multi(MultiLayout::MultiGrid),
            _ => return None,
        };
        Some(spec)
    }
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self::Single(SlideLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_case_and_separator_insensitive() {
        assert_eq!(
            LayoutSpec::from_token("Left_Aligned"),
            Some(LayoutSpec::Single(SlideLayout::LeftAligned))
        );
        assert_eq!(
            LayoutSpec::from_token(" grid-3x2 "),
            Some(LayoutSpec::Multi(MultiLayout::Grid3x2))
        );
        assert_eq!(LayoutSpec::from_token("diagonal"), None);
    }

    #[test]
    fn capacities_match_layouts() {
        assert_eq!(MultiLayout::Grid2x2.capacity(), 4);
        assert_eq!(MultiLayout::Grid3x2.capacity(), 6);
        assert_eq!(MultiLayout::MultiGrid.capacity(), 6);
        assert_eq!(MultiLayout::MenuStyle.capacity(), 8);
    }

    #[test]
    fn fact_response_becomes_content() {
        let content: SlideContent = FactResponse {
            fact: "Saffron is the most expensive spice.".to_string(),
            emoji: Some("🌍".to_string()),
        }
        .into();
        assert_eq!(content.title, "Saffron is the most expensive spice.");
        assert_eq!(content.emoji.as_deref(), Some("🌍"));
        assert!(content.image().is_none());
    }

    #[test]
    fn content_deserializes_camel_case() {
        let content: SlideContent = serde_json::from_str(
            r#"{"title":"Mantu","price":12.5,"isFeatured":true,"imageUri":"  ","tags":["Halal"]}"#,
        )
        .unwrap();
        assert!(content.is_featured);
        assert_eq!(content.price, Some(12.5));
        assert!(content.image().is_none());
    }
}
