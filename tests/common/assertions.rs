//! Domain-specific assertion macros for namelookup harnesses.
//!
//! These wrap `pretty_assertions` so that a failed ordering check prints a
//! readable diff of curies instead of whole result structs.

/// Assert the exact curie sequence of a result list.
///
/// ```rust
/// assert_curies!(results, ["MONDO:0004975", "MONDO:0011561"]);
/// ```
#[macro_export]
macro_rules! assert_curies {
    ($results:expr, [$($curie:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $results.iter().map(|r| r.curie.as_str()).collect();
        let expected: Vec<&str> = vec![$($curie),*];
        pretty_assertions::assert_eq!(actual, expected, "result curies out of order");
    }};
}

/// Assert that every result carries the given biolink type.
#[macro_export]
macro_rules! assert_all_typed {
    ($results:expr, $ty:expr) => {{
        let ty: &str = $ty;
        for r in $results.iter() {
            assert!(
                r.types.iter().any(|t| t == ty),
                "assert_all_typed! failed: {} has types {:?}, expected {}",
                r.curie,
                r.types,
                ty
            );
        }
    }};
}
