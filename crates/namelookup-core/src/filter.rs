//! Filter compiler: structured filter parameters to boolean clauses.
//!
//! Each [`FilterKind`] compiles to one [`Clause`]. Kinds are ANDed together by
//! the backend (one filter query per clause); alternatives inside a kind are
//! ORed, except prefix exclusion, which ANDs one negated clause per prefix.
//! A kind with no values contributes nothing.

use crate::error::{LookupError, Result};
use crate::normalizer::{escape_phrase, escape_term};
use crate::types::without_biolink_prefix;
use std::fmt;

/// Index fields that filters address.
pub const FIELD_TYPES: &str = "types";
pub const FIELD_CURIE: &str = "curie";
pub const FIELD_TAXA: &str = "taxa";

// ---------------------------------------------------------------------------
// Clause AST
// ---------------------------------------------------------------------------

/// A boolean clause in standard query-parser syntax.
///
/// Values are stored raw and escaped only when the clause is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `field:value`, value escaped as a single term.
    Term { field: &'static str, value: String },
    /// `field:"value"`, value escaped as a phrase.
    Phrase { field: &'static str, value: String },
    /// `field:value*`, matching any term that starts with `value`.
    Prefix { field: &'static str, value: String },
    Not(Box<Clause>),
    Any(Vec<Clause>),
    All(Vec<Clause>),
}

impl Clause {
    fn needs_grouping(&self) -> bool {
        matches!(self, Clause::Any(c) | Clause::All(c) if c.len() > 1)
    }

    fn fmt_joined(f: &mut fmt::Formatter<'_>, clauses: &[Clause], op: &str) -> fmt::Result {
        for (i, clause) in clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " {op} ")?;
            }
            if clause.needs_grouping() {
                write!(f, "({clause})")?;
            } else {
                write!(f, "{clause}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Term { field, value } => write!(f, "{field}:{}", escape_term(value)),
            Clause::Phrase { field, value } => write!(f, "{field}:\"{}\"", escape_phrase(value)),
            Clause::Prefix { field, value } => write!(f, "{field}:{}*", escape_term(value)),
            Clause::Not(inner) if inner.needs_grouping() => write!(f, "NOT ({inner})"),
            Clause::Not(inner) => write!(f, "NOT {inner}"),
            Clause::Any(clauses) => Clause::fmt_joined(f, clauses, "OR"),
            Clause::All(clauses) => Clause::fmt_joined(f, clauses, "AND"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter kinds
// ---------------------------------------------------------------------------

/// One kind of structured filter, carrying its validated values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// Biolink categories, without the `biolink:` namespace.
    BiolinkTypes(Vec<String>),
    /// Curie namespaces to keep, without the trailing `:`.
    OnlyPrefixes(Vec<String>),
    /// Curie namespaces to drop, without the trailing `:`.
    ExcludePrefixes(Vec<String>),
    /// Taxon curies, e.g. `NCBITaxon:9606`.
    OnlyTaxa(Vec<String>),
}

impl FilterKind {
    /// Compile to a clause. Returns `None` when the kind has no values.
    pub fn compile(&self) -> Option<Clause> {
        let clause = match self {
            FilterKind::BiolinkTypes(types) => Clause::Any(
                types
                    .iter()
                    .map(|t| Clause::Term { field: FIELD_TYPES, value: t.clone() })
                    .collect(),
            ),
            FilterKind::OnlyPrefixes(prefixes) => Clause::Any(
                prefixes.iter().map(|p| curie_prefix(p)).collect(),
            ),
            FilterKind::ExcludePrefixes(prefixes) => Clause::All(
                prefixes
                    .iter()
                    .map(|p| Clause::Not(Box::new(curie_prefix(p))))
                    .collect(),
            ),
            FilterKind::OnlyTaxa(taxa) => Clause::Any(
                taxa.iter()
                    .map(|t| Clause::Phrase { field: FIELD_TAXA, value: t.clone() })
                    .collect(),
            ),
        };
        let empty = matches!(&clause, Clause::Any(c) | Clause::All(c) if c.is_empty());
        (!empty).then_some(clause)
    }
}

fn curie_prefix(prefix: &str) -> Clause {
    Clause::Prefix {
        field: FIELD_CURIE,
        value: format!("{prefix}:"),
    }
}

/// The validated filter configuration of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    kinds: Vec<FilterKind>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to any of the given biolink types. Each entry may itself be a
    /// pipe-separated list; an optional `biolink:` namespace is stripped.
    pub fn biolink_types<S: AsRef<str>>(self, types: &[S]) -> Result<Self> {
        let mut values = Vec::new();
        for entry in types {
            for t in split_pipe(entry.as_ref()) {
                let t = without_biolink_prefix(&t).to_string();
                validate_value("biolink_type", &t)?;
                values.push(t);
            }
        }
        Ok(self.with(FilterKind::BiolinkTypes(values)))
    }

    /// Keep only curies in one of the pipe-separated namespaces.
    pub fn only_prefixes(self, prefixes: Option<&str>) -> Result<Self> {
        let values = parse_prefixes("only_prefixes", prefixes)?;
        Ok(self.with(FilterKind::OnlyPrefixes(values)))
    }

    /// Drop curies in any of the pipe-separated namespaces.
    pub fn exclude_prefixes(self, prefixes: Option<&str>) -> Result<Self> {
        let values = parse_prefixes("exclude_prefixes", prefixes)?;
        Ok(self.with(FilterKind::ExcludePrefixes(values)))
    }

    /// Keep only cliques annotated with one of the pipe-separated taxa.
    pub fn only_taxa(self, taxa: Option<&str>) -> Result<Self> {
        let values = taxa.map(split_pipe).unwrap_or_default();
        for t in &values {
            validate_value("only_taxa", t)?;
        }
        Ok(self.with(FilterKind::OnlyTaxa(values)))
    }

    fn with(mut self, kind: FilterKind) -> Self {
        self.kinds.push(kind);
        self
    }

    /// One clause per non-empty kind, in the order the kinds were added.
    pub fn compile(&self) -> Vec<Clause> {
        self.kinds.iter().filter_map(FilterKind::compile).collect()
    }
}

/// Split a pipe-separated list, trimming whitespace and dropping empty items.
pub fn split_pipe(input: &str) -> Vec<String> {
    input
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_prefixes(param: &str, input: Option<&str>) -> Result<Vec<String>> {
    let mut values = Vec::new();
    for p in input.map(split_pipe).unwrap_or_default() {
        let p = p.trim_end_matches(':').to_string();
        validate_value(param, &p)?;
        values.push(p);
    }
    Ok(values)
}

fn validate_value(param: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(LookupError::validation(format!("{param}: empty value")));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(LookupError::validation(format!(
            "{param}: {value:?} must not contain whitespace"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
