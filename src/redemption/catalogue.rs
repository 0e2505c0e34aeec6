//! Catalogue of credit tokens as returned by the indexer.
//!
//! Only `id`/`symbol` matter for redemption; the rest is carried for display.

use serde::{Deserialize, Serialize};

/// Account that created a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
}

/// One credit token in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub symbol: String,
    #[serde(default)]
    pub score: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<serde_json::Value>,
    #[serde(default)]
    pub creation_tx: Option<String>,
    #[serde(default)]
    pub creator: Option<Creator>,
}

/// The set of tokens currently known to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(rename = "tco2Tokens", default)]
    pub tokens: Vec<CatalogueEntry>,
}

impl Catalogue {
    pub fn new(tokens: Vec<CatalogueEntry>) -> Self {
        Self { tokens }
    }

    /// Parse an indexer response, either `{"tco2Tokens": [...]}` (optionally
    /// wrapped in `data`) or a bare array of entries.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Wrapped { data: Catalogue },
            Object(Catalogue),
            List(Vec<CatalogueEntry>),
        }

        Ok(match serde_json::from_str::<Shape>(json)? {
            Shape::Wrapped { data } => data,
            Shape::Object(catalogue) => catalogue,
            Shape::List(tokens) => Catalogue::new(tokens),
        })
    }

    /// Whether `token_id` names a catalogue entry, by id or symbol.
    pub fn contains(&self, token_id: &str) -> bool {
        self.tokens
            .iter()
            .any(|t| t.symbol == token_id || t.id.as_deref() == Some(token_id))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
