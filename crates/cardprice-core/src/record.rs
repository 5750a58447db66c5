//! The fixed-schema price record emitted for every resolved (or unresolved) query.
//!
//! Every record carries the same 23 columns in the same order, see
//! [`PRICE_COLUMNS`]. Missing values are one of two sentinels that mark which
//! stage failed:
//!
//! - [`PriceValue::NotApplicable`] (`"N/A"`): no product link was found.
//! - [`PriceValue::NotAvailable`] (`"not_available"`): a link was found but the
//!   page, its price table, or its image could not be read.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::query::CardIdentity;

/// Column names of a [`PriceRecord`], in output order.
pub const PRICE_COLUMNS: [&str; 23] = [
    "card",
    "id",
    "Ungraded",
    "variant_type",
    "Grade 1",
    "Grade 2",
    "Grade 3",
    "Grade 4",
    "Grade 5",
    "Grade 6",
    "Grade 7",
    "Grade 8",
    "Grade 9",
    "Grade 9.5",
    "SGC 10",
    "CGC 10",
    "PSA 10",
    "BGS 10",
    "BGS 10 Black",
    "CGC 10 Pristine",
    "final_link",
    "card_count",
    "img_link",
];

/// A value cell: either text copied from the page, or a failure sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceValue {
    Value(String),
    NotAvailable,
    NotApplicable,
}

impl PriceValue {
    pub const NOT_AVAILABLE: &'static str = "not_available";
    pub const NOT_APPLICABLE: &'static str = "N/A";

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Value(v) => v,
            Self::NotAvailable => Self::NOT_AVAILABLE,
            Self::NotApplicable => Self::NOT_APPLICABLE,
        }
    }
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PriceValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Price-table rows that map onto a [`PriceRecord`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeTier {
    Ungraded,
    Grade1,
    Grade2,
    Grade3,
    Grade4,
    Grade5,
    Grade6,
    Grade7,
    Grade8,
    Grade9,
    Grade9_5,
    Sgc10,
    Cgc10,
    Psa10,
    Bgs10,
    Bgs10Black,
    Cgc10Pristine,
}

impl GradeTier {
    pub const ALL: [GradeTier; 17] = [
        Self::Ungraded,
        Self::Grade1,
        Self::Grade2,
        Self::Grade3,
        Self::Grade4,
        Self::Grade5,
        Self::Grade6,
        Self::Grade7,
        Self::Grade8,
        Self::Grade9,
        Self::Grade9_5,
        Self::Sgc10,
        Self::Cgc10,
        Self::Psa10,
        Self::Bgs10,
        Self::Bgs10Black,
        Self::Cgc10Pristine,
    ];

    /// Row label exactly as printed in the site's price table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ungraded => "Ungraded",
            Self::Grade1 => "Grade 1",
            Self::Grade2 => "Grade 2",
            Self::Grade3 => "Grade 3",
            Self::Grade4 => "Grade 4",
            Self::Grade5 => "Grade 5",
            Self::Grade6 => "Grade 6",
            Self::Grade7 => "Grade 7",
            Self::Grade8 => "Grade 8",
            Self::Grade9 => "Grade 9",
            Self::Grade9_5 => "Grade 9.5",
            Self::Sgc10 => "SGC 10",
            Self::Cgc10 => "CGC 10",
            Self::Psa10 => "PSA 10",
            Self::Bgs10 => "BGS 10",
            Self::Bgs10Black => "BGS 10 Black",
            Self::Cgc10Pristine => "CGC 10 Pristine",
        }
    }

    /// Exact, case-sensitive lookup. Unknown labels return `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.label() == label)
    }
}

/// One output row. Field order matches [`PRICE_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRecord {
    pub card: String,
    pub id: String,
    #[serde(rename = "Ungraded")]
    pub ungraded: PriceValue,
    pub variant_type: String,
    #[serde(rename = "Grade 1")]
    pub grade_1: PriceValue,
    #[serde(rename = "Grade 2")]
    pub grade_2: PriceValue,
    #[serde(rename = "Grade 3")]
    pub grade_3: PriceValue,
    #[serde(rename = "Grade 4")]
    pub grade_4: PriceValue,
    #[serde(rename = "Grade 5")]
    pub grade_5: PriceValue,
    #[serde(rename = "Grade 6")]
    pub grade_6: PriceValue,
    #[serde(rename = "Grade 7")]
    pub grade_7: PriceValue,
    #[serde(rename = "Grade 8")]
    pub grade_8: PriceValue,
    #[serde(rename = "Grade 9")]
    pub grade_9: PriceValue,
    #[serde(rename = "Grade 9.5")]
    pub grade_9_5: PriceValue,
    #[serde(rename = "SGC 10")]
    pub sgc_10: PriceValue,
    #[serde(rename = "CGC 10")]
    pub cgc_10: PriceValue,
    #[serde(rename = "PSA 10")]
    pub psa_10: PriceValue,
    #[serde(rename = "BGS 10")]
    pub bgs_10: PriceValue,
    #[serde(rename = "BGS 10 Black")]
    pub bgs_10_black: PriceValue,
    #[serde(rename = "CGC 10 Pristine")]
    pub cgc_10_pristine: PriceValue,
    pub final_link: PriceValue,
    pub card_count: String,
    pub img_link: PriceValue,
}

impl PriceRecord {
    fn filled(identity: CardIdentity, fill: &PriceValue) -> Self {
        Self {
            card: identity.card,
            id: identity.id,
            ungraded: fill.clone(),
            variant_type: identity.variant_type,
            grade_1: fill.clone(),
            grade_2: fill.clone(),
            grade_3: fill.clone(),
            grade_4: fill.clone(),
            grade_5: fill.clone(),
            grade_6: fill.clone(),
            grade_7: fill.clone(),
            grade_8: fill.clone(),
            grade_9: fill.clone(),
            grade_9_5: fill.clone(),
            sgc_10: fill.clone(),
            cgc_10: fill.clone(),
            psa_10: fill.clone(),
            bgs_10: fill.clone(),
            bgs_10_black: fill.clone(),
            cgc_10_pristine: fill.clone(),
            final_link: fill.clone(),
            card_count: identity.card_count,
            img_link: fill.clone(),
        }
    }

    /// Record for a query whose product link could not be found.
    #[must_use]
    pub fn unresolved(identity: CardIdentity) -> Self {
        Self::filled(identity, &PriceValue::NotApplicable)
    }

    /// Record for a resolved link whose page could not be read.
    ///
    /// Identity and `final_link` are kept so the row can be traced back to
    /// the query and the page that failed.
    #[must_use]
    pub fn extraction_failed(identity: CardIdentity, final_link: Option<&str>) -> Self {
        let mut record = Self::filled(identity, &PriceValue::NotAvailable);
        if let Some(link) = final_link {
            record.final_link = PriceValue::Value(link.to_string());
        }
        record
    }

    /// Builds a record from a product page's `(label, value)` rows.
    ///
    /// Rows whose label is not a [`GradeTier`] are ignored. Later rows with
    /// the same label overwrite earlier ones. Identity and links always come
    /// from the arguments, never from the table.
    #[must_use]
    pub fn from_price_rows<I, L, V>(
        identity: CardIdentity,
        final_link: &str,
        rows: I,
        img_link: &str,
    ) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self::filled(identity, &PriceValue::NotAvailable);
        for (label, value) in rows {
            if let Some(tier) = GradeTier::from_label(label.as_ref()) {
                *record.price_mut(tier) = PriceValue::Value(value.into());
            }
        }
        record.final_link = PriceValue::Value(final_link.to_string());
        record.img_link = PriceValue::Value(img_link.to_string());
        record
    }

    #[must_use]
    pub fn price(&self, tier: GradeTier) -> &PriceValue {
        match tier {
            GradeTier::Ungraded => &self.ungraded,
            GradeTier::Grade1 => &self.grade_1,
            GradeTier::Grade2 => &self.grade_2,
            GradeTier::Grade3 => &self.grade_3,
            GradeTier::Grade4 => &self.grade_4,
            GradeTier::Grade5 => &self.grade_5,
            GradeTier::Grade6 => &self.grade_6,
            GradeTier::Grade7 => &self.grade_7,
            GradeTier::Grade8 => &self.grade_8,
            GradeTier::Grade9 => &self.grade_9,
            GradeTier::Grade9_5 => &self.grade_9_5,
            GradeTier::Sgc10 => &self.sgc_10,
            GradeTier::Cgc10 => &self.cgc_10,
            GradeTier::Psa10 => &self.psa_10,
            GradeTier::Bgs10 => &self.bgs_10,
            GradeTier::Bgs10Black => &self.bgs_10_black,
            GradeTier::Cgc10Pristine => &self.cgc_10_pristine,
        }
    }

    fn price_mut(&mut self, tier: GradeTier) -> &mut PriceValue {
        match tier {
            GradeTier::Ungraded => &mut self.ungraded,
            GradeTier::Grade1 => &mut self.grade_1,
            GradeTier::Grade2 => &mut self.grade_2,
            GradeTier::Grade3 => &mut self.grade_3,
            GradeTier::Grade4 => &mut self.grade_4,
            GradeTier::Grade5 => &mut self.grade_5,
            GradeTier::Grade6 => &mut self.grade_6,
            GradeTier::Grade7 => &mut self.grade_7,
            GradeTier::Grade8 => &mut self.grade_8,
            GradeTier::Grade9 => &mut self.grade_9,
            GradeTier::Grade9_5 => &mut self.grade_9_5,
            GradeTier::Sgc10 => &mut self.sgc_10,
            GradeTier::Cgc10 => &mut self.cgc_10,
            GradeTier::Psa10 => &mut self.psa_10,
            GradeTier::Bgs10 => &mut self.bgs_10,
            GradeTier::Bgs10Black => &mut self.bgs_10_black,
            GradeTier::Cgc10Pristine => &mut self.cgc_10_pristine,
        }
    }

    /// Cell text for `column` (one of [`PRICE_COLUMNS`]), or `None` for unknown names.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            "card" => Some(&self.card),
            "id" => Some(&self.id),
            "variant_type" => Some(&self.variant_type),
            "final_link" => Some(self.final_link.as_str()),
            "card_count" => Some(&self.card_count),
            "img_link" => Some(self.img_link.as_str()),
            other => GradeTier::from_label(other).map(|tier| self.price(tier).as_str()),
        }
    }

    /// All cells in [`PRICE_COLUMNS`] order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        PRICE_COLUMNS
            .iter()
            .map(|column| self.get(column).unwrap_or_default())
            .collect()
    }

    /// True when no product link was found for the query.
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.final_link == PriceValue::NotApplicable
    }

    /// True when a link was found but nothing could be read from its page.
    #[must_use]
    pub fn is_extraction_failure(&self) -> bool {
        self.img_link == PriceValue::NotAvailable
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
