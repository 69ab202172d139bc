//! Ranking model: field weights, phrase weights, the clique-size
//! boost, and the deterministic sort chain.
//!
//! The absolute weights are tunable through `[ranking]` in the config file.
//! What is fixed is their relative order, enforced by
//! [`RankingProfile::validate`]:
//!
//! - exact-ish match beats tokenized match on the same name kind,
//! - preferred name beats synonym for the same match kind,
//! - a phrase weight is never below the token weight of the same field.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Index fields
// ---------------------------------------------------------------------------

/// Searchable name fields of the clique index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexField {
    /// Preferred name, keyword-tokenized and lowercased.
    PreferredNameExactish,
    /// All synonyms, keyword-tokenized and lowercased.
    NamesExactish,
    /// Preferred name, run through the text analyzer.
    PreferredName,
    /// All synonyms, run through the text analyzer.
    Names,
}

impl IndexField {
    pub const ALL: [IndexField; 4] = [
        IndexField::PreferredNameExactish,
        IndexField::NamesExactish,
        IndexField::PreferredName,
        IndexField::Names,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IndexField::PreferredNameExactish => "preferred_name_exactish",
            IndexField::NamesExactish => "names_exactish",
            IndexField::PreferredName => "preferred_name",
            IndexField::Names => "names",
        }
    }
}

impl fmt::Display for IndexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field and the weight its matches contribute to the relevance score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeight {
    pub field: IndexField,
    pub weight: f32,
}

impl fmt::Display for FieldWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}^{}", self.field, self.weight)
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Weights for the four name fields, as read from one config table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FieldWeights {
    pub preferred_name_exactish: f32,
    pub names_exactish: f32,
    pub preferred_name: f32,
    pub names: f32,
}

impl FieldWeights {
    pub fn get(&self, field: IndexField) -> f32 {
        match field {
            IndexField::PreferredNameExactish => self.preferred_name_exactish,
            IndexField::NamesExactish => self.names_exactish,
            IndexField::PreferredName => self.preferred_name,
            IndexField::Names => self.names,
        }
    }

    /// Weights in descending precedence order.
    pub fn entries(&self) -> Vec<FieldWeight> {
        IndexField::ALL
            .iter()
            .map(|&field| FieldWeight { field, weight: self.get(field) })
            .collect()
    }

    fn check_order(&self, table: &str) -> Result<(), ConfigError> {
        use IndexField::*;

        for field in IndexField::ALL {
            let w = self.get(field);
            if !(w.is_finite() && w > 0.0) {
                return Err(ConfigError::Ranking(format!(
                    "{table}.{field} must be a positive number, got {w}"
                )));
            }
        }

        let must_exceed = [
            (PreferredNameExactish, PreferredName),
            (NamesExactish, Names),
            (PreferredNameExactish, NamesExactish),
            (PreferredName, Names),
        ];
        for (higher, lower) in must_exceed {
            if self.get(higher) <= self.get(lower) {
                return Err(ConfigError::Ranking(format!(
                    "{table}.{higher} ({}) must exceed {table}.{lower} ({})",
                    self.get(higher),
                    self.get(lower)
                )));
            }
        }
        Ok(())
    }
}

/// Multiplicative relevance boost applied on top of the field scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostFunction {
    /// `log(clique_identifier_count)`: richer cliques rank higher, with
    /// diminishing returns.
    LogCliqueSize,
    None,
}

impl BoostFunction {
    /// The function-query expression, or `None` when no boost applies.
    pub fn expression(self) -> Option<&'static str> {
        match self {
            BoostFunction::LogCliqueSize => Some("log(clique_identifier_count)"),
            BoostFunction::None => None,
        }
    }
}

/// `[ranking]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankingProfile {
    pub query_fields: FieldWeights,
    pub phrase_fields: FieldWeights,
    pub boost: BoostFunction,
}

impl Default for RankingProfile {
    fn default() -> Self {
        Self {
            query_fields: FieldWeights {
                preferred_name_exactish: 250.0,
                names_exactish: 100.0,
                preferred_name: 25.0,
                names: 10.0,
            },
            phrase_fields: FieldWeights {
                preferred_name_exactish: 500.0,
                names_exactish: 200.0,
                preferred_name: 50.0,
                names: 20.0,
            },
            boost: BoostFunction::LogCliqueSize,
        }
    }
}

impl RankingProfile {
    /// Reject weight tables that break the precedence order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.query_fields.check_order("query_fields")?;
        self.phrase_fields.check_order("phrase_fields")?;
        for field in IndexField::ALL {
            let token = self.query_fields.get(field);
            let phrase = self.phrase_fields.get(field);
            if phrase < token {
                return Err(ConfigError::Ranking(format!(
                    "phrase_fields.{field} ({phrase}) must be at least query_fields.{field} ({token})"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sort chain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One link of the tie-break chain, applied in order until a tie is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{} {dir}", self.field)
    }
}

/// The fixed tie-break chain: score, then clique size, then curie suffix.
pub const SORT_CHAIN: [SortKey; 3] = [
    SortKey { field: "score", direction: SortDirection::Desc },
    SortKey { field: "clique_identifier_count", direction: SortDirection::Desc },
    // Local part of the curie (after the namespace), stored at index time.
    SortKey { field: "curie_suffix", direction: SortDirection::Asc },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
