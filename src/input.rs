use crate::config::ThemeVariables;
use crate::ir::{FactResponse, SlideContent};
use serde::Deserialize;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a slide deck.
#[derive(Error, Debug)]
pub enum InputError {
    /// IO error when reading the deck
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The document is neither a slide, a list of slides nor a deck object
    #[error("invalid slide deck: {0}")]
    Parse(String),

    #[error("slide deck contains no slides")]
    Empty,
}

/// Slides plus the presentation settings stored next to them.
#[derive(Debug, Clone, Default)]
pub struct SlideDeck {
    pub layout: Option<String>,
    pub theme: Option<String>,
    pub theme_variables: Option<ThemeVariables>,
    pub slides: Vec<SlideContent>,
    /// Every entry was a fact-service response.
    pub facts: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeckDocument {
    Deck(DeckFile),
    Many(Vec<SlideEntry>),
    One(SlideEntry),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckFile {
    #[serde(default)]
    layout: Option<String>,
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    theme_variables: Option<ThemeVariables>,
    slides: Vec<SlideEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SlideEntry {
    Fact(FactResponse),
    Slide(SlideContent),
}

/// Parses a deck document, strict JSON first and JSON5 second.
pub fn parse_deck(contents: &str) -> Result<SlideDeck, InputError> {
    let document: DeckDocument = match serde_json::from_str(contents) {
        Ok(document) => document,
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            tracing::debug!(%json5_err, "JSON5 fallback failed");
            InputError::Parse(json_err.to_string())
        })?,
    };

    let (mut deck, entries) = match document {
        DeckDocument::Deck(file) => (
            SlideDeck {
                layout: file.layout,
                theme: file.theme,
                theme_variables: file.theme_variables,
                ..SlideDeck::default()
            },
            file.slides,
        ),
        DeckDocument::Many(entries) => (SlideDeck::default(), entries),
        DeckDocument::One(entry) => (SlideDeck::default(), vec![entry]),
    };
    if entries.is_empty() {
        return Err(InputError::Empty);
    }

    deck.facts = entries.iter().all(|entry| matches!(entry, SlideEntry::Fact(_)));
    deck.slides = entries
        .into_iter()
        .map(|entry| match entry {
            SlideEntry::Fact(fact) => fact.into(),
            SlideEntry::Slide(slide) => slide,
        })
        .collect();
    Ok(deck)
}

/// Reads a deck from `path`, or from stdin when `path` is `None` or `-`.
pub fn load_deck(path: Option<&Path>) -> Result<SlideDeck, InputError> {
    let contents = match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| InputError::Read {
                path: path.display().to_string(),
                source,
            })?
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| InputError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            buf
        }
    };
    parse_deck(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_slide() {
        let deck = parse_deck(r#"{"title": "Mantu", "price": 12.5, "isFeatured": true}"#).unwrap();
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].title, "Mantu");
        assert!(deck.slides[0].is_featured);
        assert!(!deck.facts);
    }

    #[test]
    fn parses_deck_object_with_settings() {
        let deck = parse_deck(
            r##"{
                "layout": "grid-2x2",
                "theme": "sunset",
                "themeVariables": { "accentColor": "#123456" },
                "slides": [
                    { "title": "Bolani", "imageUrl": "https://example.com/b.jpg" },
                    { "title": "Chai", "tags": ["Vegan"] }
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(deck.layout.as_deref(), Some("grid-2x2"));
        assert_eq!(deck.theme.as_deref(), Some("sunset"));
        assert_eq!(
            deck.theme_variables.and_then(|vars| vars.accent_color).as_deref(),
            Some("#123456")
        );
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].image(), Some("https://example.com/b.jpg"));
    }

    #[test]
    fn fact_responses_become_slides() {
        let deck = parse_deck(r#"[{"fact": "Saffron is a crocus stigma.", "emoji": "🌾"}]"#).unwrap();
        assert!(deck.facts);
        assert_eq!(deck.slides[0].title, "Saffron is a crocus stigma.");
        assert_eq!(deck.slides[0].emoji.as_deref(), Some("🌾"));
    }

    #[test]
    fn accepts_json5() {
        let deck = parse_deck("[{ title: 'Qabili', price: 15.99, }]").unwrap();
        assert_eq!(deck.slides[0].price, Some(15.99));
    }

    #[test]
    fn rejects_empty_and_malformed_decks() {
        assert!(matches!(parse_deck("[]"), Err(InputError::Empty)));
        assert!(matches!(parse_deck(r#"{"slides": []}"#), Err(InputError::Empty)));
        assert!(matches!(parse_deck("not json"), Err(InputError::Parse(_))));
    }
}
