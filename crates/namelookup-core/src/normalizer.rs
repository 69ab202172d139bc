//! Normalizer: canonicalises a raw search string into the two escaped forms
//! the backend matches against.
//!
//! - The **exact-phrase** form drops only `"` and `\`, so the rest of the text
//!   is matched verbatim inside a quoted phrase.
//! - The **tokenized** form backslash-escapes every reserved query character and
//!   neutralises the `&&` / `||` operators, so the backend analyzer sees plain
//!   text. In autocomplete mode a trailing `*` turns the last token into a
//!   prefix match.
//!
//! Blank input yields `None`: the caller must not contact the backend at all.

/// Characters with meaning in the standard query parser. Each is escaped with
/// a backslash in the tokenized form.
const RESERVED: &[char] = &[
    '\\', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '/', '+', '-',
];

/// Operator spellings replaced by a single space in the tokenized form.
const OPERATORS: &[&str] = &["&&", "||"];

const WILDCARD: char = '*';

/// A search string prepared for both matching modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    exact_phrase: String,
    tokenized: String,
    autocomplete: bool,
}

impl NormalizedQuery {
    /// Normalise `raw`. Returns `None` when there is nothing left to search
    /// for, i.e. the input is empty, whitespace, or consists only of
    /// characters both forms discard.
    pub fn new(raw: &str, autocomplete: bool) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }

        let exact_phrase = exact_phrase(&lowered);
        let tokenized = tokenize(&lowered);
        if exact_phrase.trim().is_empty() && tokenized.is_empty() {
            return None;
        }

        Some(Self {
            exact_phrase,
            tokenized,
            autocomplete,
        })
    }

    /// The string with `"` and `\` removed, for use inside a quoted phrase.
    pub fn exact_phrase(&self) -> &str {
        &self.exact_phrase
    }

    /// The fully escaped form, without any autocomplete wildcard.
    pub fn tokenized(&self) -> &str {
        &self.tokenized
    }

    pub fn autocomplete(&self) -> bool {
        self.autocomplete
    }

    /// The compiled expression: `"<exact>" OR (<tokenized>[*])`.
    ///
    /// Either half is dropped when it would be empty, so the result is always
    /// syntactically valid.
    pub fn expression(&self) -> String {
        let phrase = (!self.exact_phrase.trim().is_empty())
            .then(|| format!("\"{}\"", self.exact_phrase));

        let group = (!self.tokenized.is_empty()).then(|| {
            if self.autocomplete {
                format!("({}{WILDCARD})", self.tokenized)
            } else {
                format!("({})", self.tokenized)
            }
        });

        match (phrase, group) {
            (Some(phrase), Some(group)) => format!("{phrase} OR {group}"),
            (Some(phrase), None) => phrase,
            (None, Some(group)) => group,
            (None, None) => String::new(),
        }
    }
}

/// Remove the characters that would end or escape a quoted phrase.
fn exact_phrase(lowered: &str) -> String {
    lowered.chars().filter(|c| !matches!(c, '"' | '\\')).collect()
}

/// Escape reserved characters, then blank out boolean operator spellings.
fn tokenize(lowered: &str) -> String {
    let mut escaped = escape_term(lowered);
    for op in OPERATORS {
        escaped = escaped.replace(op, " ");
    }
    escaped.trim().to_string()
}

/// Backslash-escape every reserved query-parser character in `value`.
///
/// Also used by the filter compiler for field values.
pub fn escape_term(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a value for use inside a double-quoted phrase.
pub fn escape_phrase(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
