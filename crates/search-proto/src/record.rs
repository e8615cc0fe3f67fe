//! Wire types for the `/search` endpoint.
//!
//! The backend is loose about shapes: `role_number` arrives as a string or a
//! number, fields may be `null` or missing, and older deployments send
//! `title`/`description` instead of `role_title`/`chunk_text`. Decoding here
//! never fails on an absent or oddly-typed field; display code picks the first
//! available value and falls back to a placeholder.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TITLE_PLACEHOLDER: &str = "Role Title Not Available";
pub const BODY_PLACEHOLDER: &str = "No description available";
pub const ROLE_NUMBER_PLACEHOLDER: &str = "N/A";

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bm25_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_weight: Option<f32>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: None,
            bm25_weight: None,
            vector_weight: None,
        }
    }
}

/// Body returned by `POST /search`. Only `results` matters to the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    results: Option<Vec<Value>>,
}

impl SearchResponse {
    /// Records in server order. A missing or `null` `results` is empty.
    pub fn into_records(self) -> Vec<ResultRecord> {
        self.results
            .unwrap_or_default()
            .iter()
            .map(ResultRecord::from_json)
            .collect()
    }
}

/// One occupational role returned by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRecord {
    pub id: Option<String>,
    pub role_number: Option<String>,
    pub role_title: Option<String>,
    pub title: Option<String>,
    pub chunk_text: Option<String>,
    pub description: Option<String>,
    pub chunk_index: Option<i64>,
    pub bm25_score: Option<f64>,
    pub vector_score: Option<f64>,
    pub combined_score: Option<f64>,
}

impl ResultRecord {
    /// Build a record from one entry of the `results` array. Non-object
    /// entries produce a record with every field absent.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let text = |key: &str| obj.get(key).and_then(scalar_text);
        let float = |key: &str| obj.get(key).and_then(Value::as_f64);
        Self {
            id: text("id"),
            role_number: text("role_number"),
            role_title: text("role_title"),
            title: text("title"),
            chunk_text: text("chunk_text"),
            description: text("description"),
            chunk_index: obj.get("chunk_index").and_then(Value::as_i64),
            bm25_score: float("bm25_score"),
            vector_score: float("vector_score"),
            combined_score: float("combined_score"),
        }
    }

    pub fn display_title(&self) -> &str {
        first_present(&[&self.role_title, &self.title]).unwrap_or(TITLE_PLACEHOLDER)
    }

    pub fn display_body(&self) -> &str {
        first_present(&[&self.chunk_text, &self.description]).unwrap_or(BODY_PLACEHOLDER)
    }

    pub fn display_role_number(&self) -> &str {
        first_present(&[&self.role_number]).unwrap_or(ROLE_NUMBER_PLACEHOLDER)
    }

    /// Plain-text rendering used for clipboard copies.
    pub fn to_plain_text(&self) -> String {
        format!(
            "{} (Role {})\n{}",
            self.display_title(),
            self.display_role_number(),
            self.display_body()
        )
    }
}

/// First candidate that is set and not blank.
fn first_present<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.trim().is_empty())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_is_query_only_by_default() {
        let body = serde_json::to_value(SearchRequest::new("teacher")).unwrap();
        assert_eq!(body, json!({ "query": "teacher" }));
    }

    #[test]
    fn test_request_body_includes_set_knobs() {
        let mut req = SearchRequest::new("nurse");
        req.top_k = Some(3);
        let body = serde_json::to_value(req).unwrap();
        assert_eq!(body, json!({ "query": "nurse", "top_k": 3 }));
    }

    #[test]
    fn test_missing_results_is_empty() {
        let resp: SearchResponse = serde_json::from_value(json!({ "query": "x" })).unwrap();
        assert!(resp.into_records().is_empty());

        let resp: SearchResponse = serde_json::from_value(json!({ "results": null })).unwrap();
        assert!(resp.into_records().is_empty());
    }

    #[test]
    fn test_backend_record_shape() {
        let resp: SearchResponse = serde_json::from_value(json!({
            "query": "teacher",
            "results": [{
                "id": "chunk-17",
                "role_number": 2341.01,
                "chunk_index": 0,
                "chunk_text": "Educates students",
                "bm25_score": 1.2,
                "vector_score": 0.8,
                "combined_score": 0.96
            }]
        }))
        .unwrap();
        let records = resp.into_records();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id.as_deref(), Some("chunk-17"));
        assert_eq!(r.display_role_number(), "2341.01");
        assert_eq!(r.display_title(), TITLE_PLACEHOLDER);
        assert_eq!(r.display_body(), "Educates students");
        assert_eq!(r.combined_score, Some(0.96));
    }

    #[test]
    fn test_title_and_body_fallback_order() {
        let r = ResultRecord::from_json(&json!({
            "role_title": "Teacher",
            "title": "Generic",
            "description": "From description"
        }));
        assert_eq!(r.display_title(), "Teacher");
        assert_eq!(r.display_body(), "From description");

        let r = ResultRecord::from_json(&json!({ "title": "Generic", "role_title": null }));
        assert_eq!(r.display_title(), "Generic");
        assert_eq!(r.display_body(), BODY_PLACEHOLDER);
    }

    #[test]
    fn test_non_object_entry_becomes_blank_record() {
        let r = ResultRecord::from_json(&json!("garbage"));
        assert_eq!(r, ResultRecord::default());
        assert_eq!(r.display_title(), TITLE_PLACEHOLDER);
        assert_eq!(r.display_role_number(), ROLE_NUMBER_PLACEHOLDER);
    }

    #[test]
    fn test_blank_strings_fall_through() {
        let r = ResultRecord::from_json(&json!({ "role_title": "  ", "title": "Clerk" }));
        assert_eq!(r.display_title(), "Clerk");
    }
}
