//! Rendering of [`SearchRequest`]s into Solr JSON Request API bodies.
//!
//! Ranked queries use the `edismax` parser with `qf`, `pf` and a
//! multiplicative `boost`; plain queries go to the standard parser. Filter
//! clauses become separate `filter` entries, which Solr ANDs together.

use namelookup_core::backend::{HighlightRequest, QueryExpression, SearchRequest};
use namelookup_core::ranking::{FieldWeight, SortKey};
use serde_json::{json, Map, Value};

/// Build the JSON body for `POST /select`.
pub fn render(request: &SearchRequest) -> Value {
    let mut body = Map::new();

    let query = match &request.query {
        QueryExpression::Ranked {
            expression,
            query_fields,
            phrase_fields,
            boost,
        } => {
            let mut edismax = Map::new();
            edismax.insert("query".into(), json!(expression));
            edismax.insert("qf".into(), json!(weights(query_fields)));
            edismax.insert("pf".into(), json!(weights(phrase_fields)));
            if let Some(boost) = boost {
                edismax.insert("boost".into(), json!(boost));
            }
            json!({ "edismax": edismax })
        }
        QueryExpression::Plain(expression) => json!(expression),
    };
    body.insert("query".into(), query);

    if !request.filters.is_empty() {
        let filters: Vec<String> = request.filters.iter().map(ToString::to_string).collect();
        body.insert("filter".into(), json!(filters));
    }
    if !request.sort.is_empty() {
        body.insert("sort".into(), json!(sort(&request.sort)));
    }
    body.insert("offset".into(), json!(request.offset));
    body.insert("limit".into(), json!(request.limit));
    body.insert("fields".into(), json!(request.fields.join(",")));

    if let Some(hl) = &request.highlight {
        body.insert("params".into(), highlight_params(hl));
    }

    Value::Object(body)
}

fn weights(fields: &[FieldWeight]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn sort(keys: &[SortKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn highlight_params(hl: &HighlightRequest) -> Value {
    json!({
        "hl": "true",
        "hl.method": "unified",
        "hl.fl": hl.fields.join(","),
        "hl.encoder": "html",
        "hl.tag.pre": hl.pre_tag,
        "hl.tag.post": hl.post_tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use namelookup_core::config::Config;
    use namelookup_core::query::{LookupOptions, LookupQuery, QueryAssembler};
    use pretty_assertions::assert_eq;

    fn assembler() -> QueryAssembler {
        let cfg = Config::defaults();
        QueryAssembler::new(cfg.ranking, cfg.highlighting)
    }

    fn ranked(raw: &str, options: LookupOptions) -> SearchRequest {
        let q = LookupQuery::new(raw, &options, &Config::defaults().lookup).unwrap();
        assembler().lookup(&q).unwrap()
    }

    #[test]
    fn ranked_lookup_renders_edismax_body() {
        let body = render(&ranked(
            "beta-secretase",
            LookupOptions { limit: Some(10), ..Default::default() },
        ));
        assert_eq!(
            body,
            json!({
                "query": {
                    "edismax": {
                        "query": r#""beta-secretase" OR (beta\-secretase)"#,
                        "qf": "preferred_name_exactish^250 names_exactish^100 preferred_name^25 names^10",
                        "pf": "preferred_name_exactish^500 names_exactish^200 preferred_name^50 names^20",
                        "boost": "log(clique_identifier_count)",
                    }
                },
                "sort": "score desc, clique_identifier_count desc, curie_suffix asc",
                "offset": 0,
                "limit": 10,
                "fields": "id,curie,preferred_name,names,types,taxa,clique_identifier_count,shortest_name_length,score",
            })
        );
    }

    #[test]
    fn filters_and_highlighting_render_as_extra_keys() {
        let body = render(&ranked(
            "parkinson",
            LookupOptions {
                biolink_types: vec!["biolink:Disease".into()],
                only_taxa: Some("NCBITaxon:9606".into()),
                highlighting: true,
                ..Default::default()
            },
        ));
        assert_eq!(
            body["filter"],
            json!(["types:Disease", r#"taxa:"NCBITaxon:9606""#])
        );
        assert_eq!(body["params"]["hl"], "true");
        assert_eq!(
            body["params"]["hl.fl"],
            "preferred_name_exactish,preferred_name,names_exactish,names"
        );
        assert_eq!(body["params"]["hl.tag.pre"], "<strong>");
    }

    #[test]
    fn plain_query_has_no_ranking_keys() {
        let body = render(&assembler().reverse_lookup(&["MONDO:0005737".to_string()], 1_000_000));
        assert_eq!(body["query"], r#"curie:"MONDO:0005737""#);
        assert_eq!(body["limit"], 1_000_000);
        assert!(body.get("sort").is_none());
        assert!(body.get("filter").is_none());
        assert!(body.get("params").is_none());
    }
}
