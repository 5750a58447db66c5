//! Card lookup requests.
//!
//! A [`CardQuery`] is built once from user input and never changes. Name and
//! id are lowercased and trimmed at construction so every downstream
//! comparison sees the same normalized text.

use serde::Deserialize;
use thiserror::Error;

/// A single lookup request: which card, which print, and how many copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardQuery {
    name: String,
    id: String,
    holo: bool,
    reverse_holo: bool,
    first_edition: bool,
    card_count: String,
    wants_all_variants: bool,
    variant_type: Option<String>,
}

impl CardQuery {
    /// Starts a query for `name` / `id`. Both are normalized on [`CardQueryBuilder::build`].
    #[must_use]
    pub fn builder(name: impl Into<String>, id: impl Into<String>) -> CardQueryBuilder {
        CardQueryBuilder {
            name: name.into(),
            id: id.into(),
            holo: false,
            reverse_holo: false,
            first_edition: false,
            card_count: String::new(),
            wants_all_variants: false,
            variant_type: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Card name with spaces replaced by hyphens, as it appears in product URLs.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name.replace(' ', "-")
    }

    #[must_use]
    pub fn holo(&self) -> bool {
        self.holo
    }

    #[must_use]
    pub fn reverse_holo(&self) -> bool {
        self.reverse_holo
    }

    #[must_use]
    pub fn first_edition(&self) -> bool {
        self.first_edition
    }

    #[must_use]
    pub fn card_count(&self) -> &str {
        &self.card_count
    }

    #[must_use]
    pub fn wants_all_variants(&self) -> bool {
        self.wants_all_variants
    }

    #[must_use]
    pub fn variant_type(&self) -> Option<&str> {
        self.variant_type.as_deref()
    }

    /// Identity fields copied into every output record for this query.
    #[must_use]
    pub fn identity(&self) -> CardIdentity {
        CardIdentity {
            card: self.name.clone(),
            id: self.id.clone(),
            card_count: self.card_count.clone(),
            variant_type: self.variant_type.clone().unwrap_or_default(),
        }
    }
}

/// Builder for [`CardQuery`]; flags default to `false`.
#[derive(Debug, Clone)]
pub struct CardQueryBuilder {
    name: String,
    id: String,
    holo: bool,
    reverse_holo: bool,
    first_edition: bool,
    card_count: String,
    wants_all_variants: bool,
    variant_type: Option<String>,
}

impl CardQueryBuilder {
    #[must_use]
    pub fn holo(mut self, holo: bool) -> Self {
        self.holo = holo;
        self
    }

    #[must_use]
    pub fn reverse_holo(mut self, reverse_holo: bool) -> Self {
        self.reverse_holo = reverse_holo;
        self
    }

    #[must_use]
    pub fn first_edition(mut self, first_edition: bool) -> Self {
        self.first_edition = first_edition;
        self
    }

    #[must_use]
    pub fn card_count(mut self, card_count: impl Into<String>) -> Self {
        self.card_count = card_count.into();
        self
    }

    #[must_use]
    pub fn all_variants(mut self, wants_all_variants: bool) -> Self {
        self.wants_all_variants = wants_all_variants;
        self
    }

    /// Sets the explicit variant label. Blank input clears it.
    #[must_use]
    pub fn variant_type(mut self, variant_type: Option<impl Into<String>>) -> Self {
        self.variant_type = variant_type
            .map(Into::into)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        self
    }

    #[must_use]
    pub fn build(self) -> CardQuery {
        CardQuery {
            name: self.name.trim().to_lowercase(),
            id: self.id.trim().to_lowercase(),
            holo: self.holo,
            reverse_holo: self.reverse_holo,
            first_edition: self.first_edition,
            card_count: self.card_count.trim().to_string(),
            wants_all_variants: self.wants_all_variants,
            variant_type: self.variant_type,
        }
    }
}

/// The query-derived columns of a [`crate::PriceRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardIdentity {
    pub card: String,
    pub id: String,
    pub card_count: String,
    pub variant_type: String,
}

impl CardIdentity {
    /// Same identity with a different variant label (used per enumerated variant).
    #[must_use]
    pub fn with_variant_type(&self, variant_type: impl Into<String>) -> Self {
        Self {
            variant_type: variant_type.into(),
            ..self.clone()
        }
    }
}

/// A field in an input row that could not be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value \"{value}\" for column {column}: expected a boolean")]
pub struct RowError {
    pub column: &'static str,
    pub value: String,
}

/// One raw input row, as read from a tabular store with a header line.
///
/// Every column is text so that spreadsheet exports (`TRUE`, `1`, `yes`, blank)
/// are accepted; [`QueryRow::into_query`] does the interpretation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRow {
    pub card: String,
    pub id: String,
    #[serde(default)]
    pub holo: String,
    #[serde(default)]
    pub reverse_holo: String,
    #[serde(default)]
    pub first_edition: String,
    #[serde(default)]
    pub card_count: String,
    #[serde(default)]
    pub variant: String,
    #[serde(default)]
    pub variant_type: String,
}

impl QueryRow {
    /// Interprets the row's flag columns and builds a normalized [`CardQuery`].
    ///
    /// # Errors
    ///
    /// Returns [`RowError`] naming the first flag column that is not a
    /// recognizable boolean.
    pub fn into_query(self) -> Result<CardQuery, RowError> {
        let holo = parse_flag("holo", &self.holo)?;
        let reverse_holo = parse_flag("reverse_holo", &self.reverse_holo)?;
        let first_edition = parse_flag("first_edition", &self.first_edition)?;
        let wants_all_variants = parse_flag("variant", &self.variant)?;

        Ok(CardQuery::builder(self.card, self.id)
            .holo(holo)
            .reverse_holo(reverse_holo)
            .first_edition(first_edition)
            .card_count(self.card_count)
            .all_variants(wants_all_variants)
            .variant_type(Some(self.variant_type))
            .build())
    }
}

fn parse_flag(column: &'static str, raw: &str) -> Result<bool, RowError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "f" | "0" | "no" | "n" => Ok(false),
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        _ => Err(RowError {
            column,
            value: raw.to_string(),
        }),
    }
}
