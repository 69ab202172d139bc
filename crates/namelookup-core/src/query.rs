//! Query assembler: validated lookup requests to backend [`SearchRequest`]s.
//!
//! Loosely-typed request parameters ([`LookupOptions`]) are validated exactly
//! once, into an immutable [`LookupQuery`]. The [`QueryAssembler`] then
//! combines the normalised string, compiled filters and the ranking profile
//! into one request.

use crate::backend::{HighlightRequest, QueryExpression, SearchRequest};
use crate::config::{HighlightConfig, LookupConfig, LIMIT_CEILING};
use crate::error::{LookupError, Result};
use crate::filter::{Clause, FilterSet, FIELD_CURIE};
use crate::normalizer::NormalizedQuery;
use crate::ranking::{IndexField, RankingProfile, SORT_CHAIN};
use serde::Deserialize;

/// Stored fields requested for every ranked lookup.
pub const RESULT_FIELDS: &[&str] = &[
    "id",
    "curie",
    "preferred_name",
    "names",
    "types",
    "taxa",
    "clique_identifier_count",
    "shortest_name_length",
    "score",
];

/// Expression matching every document, used by the status count.
const MATCH_ALL: &str = "*:*";

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Lookup options as they arrive from a caller, before validation.
///
/// Shared by single and bulk lookups. Numeric fields are signed so that
/// negative values reach validation instead of failing deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LookupOptions {
    pub autocomplete: bool,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    /// Biolink types, ORed. Entries may be pipe-separated.
    pub biolink_types: Vec<String>,
    /// Pipe-separated curie namespaces to keep.
    pub only_prefixes: Option<String>,
    /// Pipe-separated curie namespaces to drop.
    pub exclude_prefixes: Option<String>,
    /// Pipe-separated taxon curies.
    pub only_taxa: Option<String>,
    pub highlighting: bool,
}

/// A validated options set, shared by every string of a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOptions {
    autocomplete: bool,
    offset: usize,
    limit: usize,
    filters: FilterSet,
    highlighting: bool,
}

impl LookupOptions {
    /// Validate against the configured limits. Fails before any backend call.
    pub fn validate(&self, limits: &LookupConfig) -> Result<ValidatedOptions> {
        let offset = match self.offset {
            None => 0,
            Some(o) if o < 0 => {
                return Err(LookupError::validation(format!(
                    "offset must be non-negative, got {o}"
                )))
            }
            Some(o) => o as usize,
        };

        let max_limit = limits.max_limit.min(LIMIT_CEILING);
        let limit = match self.limit {
            None => limits.default_limit.min(max_limit),
            Some(l) if l < 0 || l as u64 > max_limit as u64 => {
                return Err(LookupError::validation(format!(
                    "limit must be between 0 and {max_limit}, got {l}"
                )))
            }
            Some(l) => l as usize,
        };

        let filters = FilterSet::new()
            .biolink_types(&self.biolink_types)?
            .only_prefixes(self.only_prefixes.as_deref())?
            .exclude_prefixes(self.exclude_prefixes.as_deref())?
            .only_taxa(self.only_taxa.as_deref())?;

        Ok(ValidatedOptions {
            autocomplete: self.autocomplete,
            offset,
            limit,
            filters,
            highlighting: self.highlighting,
        })
    }
}

impl ValidatedOptions {
    /// Bind these options to one search string.
    pub fn query(&self, raw_string: impl Into<String>) -> LookupQuery {
        LookupQuery {
            raw_string: raw_string.into(),
            options: self.clone(),
        }
    }
}

/// One validated, immutable lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupQuery {
    raw_string: String,
    options: ValidatedOptions,
}

impl LookupQuery {
    /// Validate `options` and bind them to `raw_string`.
    pub fn new(
        raw_string: impl Into<String>,
        options: &LookupOptions,
        limits: &LookupConfig,
    ) -> Result<Self> {
        Ok(options.validate(limits)?.query(raw_string))
    }

    pub fn raw_string(&self) -> &str {
        &self.raw_string
    }

    pub fn autocomplete(&self) -> bool {
        self.options.autocomplete
    }

    pub fn offset(&self) -> usize {
        self.options.offset
    }

    pub fn limit(&self) -> usize {
        self.options.limit
    }

    pub fn filters(&self) -> &FilterSet {
        &self.options.filters
    }

    pub fn highlighting(&self) -> bool {
        self.options.highlighting
    }
}

// ---------------------------------------------------------------------------
// Assembler
// ---------------------------------------------------------------------------

/// Builds backend requests from validated queries.
#[derive(Debug, Clone)]
pub struct QueryAssembler {
    ranking: RankingProfile,
    highlight: HighlightConfig,
}

impl QueryAssembler {
    pub fn new(ranking: RankingProfile, highlight: HighlightConfig) -> Self {
        Self { ranking, highlight }
    }

    /// Compile a ranked lookup. Returns `None` when the search string
    /// normalises to nothing, in which case no backend call must be made.
    pub fn lookup(&self, query: &LookupQuery) -> Option<SearchRequest> {
        let normalized = NormalizedQuery::new(query.raw_string(), query.autocomplete())?;
        let expression = normalized.expression();

        tracing::debug!(
            raw = %query.raw_string(),
            expression = %expression,
            offset = query.offset(),
            limit = query.limit(),
            "compiled lookup"
        );

        Some(SearchRequest {
            query: QueryExpression::Ranked {
                expression,
                query_fields: self.ranking.query_fields.entries(),
                phrase_fields: self.ranking.phrase_fields.entries(),
                boost: self.ranking.boost.expression().map(str::to_string),
            },
            filters: query.filters().compile(),
            sort: SORT_CHAIN.to_vec(),
            offset: query.offset(),
            limit: query.limit(),
            fields: RESULT_FIELDS.to_vec(),
            highlight: query.highlighting().then(|| self.highlight_request()),
        })
    }

    /// One disjunctive exact-match query over `curies`, unranked.
    ///
    /// `curies` must be non-empty.
    pub fn reverse_lookup(&self, curies: &[String], limit: usize) -> SearchRequest {
        let disjunction = Clause::Any(
            curies
                .iter()
                .map(|c| Clause::Phrase { field: FIELD_CURIE, value: c.clone() })
                .collect(),
        );

        SearchRequest {
            query: QueryExpression::Plain(disjunction.to_string()),
            filters: Vec::new(),
            sort: Vec::new(),
            offset: 0,
            limit,
            fields: RESULT_FIELDS.iter().copied().filter(|f| *f != "score").collect(),
            highlight: None,
        }
    }

    /// Count-only request over the whole index.
    pub fn status(&self) -> SearchRequest {
        SearchRequest {
            query: QueryExpression::Plain(MATCH_ALL.to_string()),
            filters: Vec::new(),
            sort: Vec::new(),
            offset: 0,
            limit: 0,
            fields: vec!["curie"],
            highlight: None,
        }
    }

    fn highlight_request(&self) -> HighlightRequest {
        HighlightRequest {
            fields: vec![
                IndexField::PreferredNameExactish.as_str(),
                IndexField::PreferredName.as_str(),
                IndexField::NamesExactish.as_str(),
                IndexField::Names.as_str(),
            ],
            pre_tag: self.highlight.pre_tag.clone(),
            post_tag: self.highlight.post_tag.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
