//! HTTP client for the anagram engine's `query` endpoint
//!
//! The engine is an opaque collaborator: one GET per request, JSON back.
//! A 5xx status is reported as a structured value so the caller can tell
//! "no matches" apart from "service unavailable"; it is never an `Err`.
//! No retries; a failed request must be reissued by the caller.

use crate::error::GifResult;
use serde::{Deserialize, Serialize};
use ureq::Agent;

#[derive(Serialize, Deserialize, Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum SearchType {
    #[default]
    #[serde(rename = "ROOT")]
    Root,
    #[serde(rename = "EXACT")]
    Exact,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Root => "ROOT",
            SearchType::Exact => "EXACT",
        }
    }
}

/// One query. An empty `word_to_include` means the parameter is left out of
/// the request entirely.
#[derive(Clone, Debug, Default)]
pub struct SearchRequest {
    pub input: String,
    pub search_type: SearchType,
    pub word_to_include: String,
}

impl SearchRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self { input: input.into(), ..Self::default() }
    }

    /// Query-string pairs in the order the engine expects.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("input", self.input.as_str()),
            ("search_type", self.search_type.as_str()),
        ];
        if !self.word_to_include.is_empty() {
            pairs.push(("word_to_include", self.word_to_include.as_str()));
        }
        pairs
    }
}

/// Scored expressions from the engine, best first.
#[derive(Deserialize, Debug)]
pub struct AnagramResults {
    pub anagrams: Vec<(String, f32)>,
    pub was_truncated: bool,
}

#[derive(Debug)]
pub enum SearchResponse {
    Results(AnagramResults),
    /// The engine answered with a 5xx status.
    ServerError { code: u16, message: String },
}

pub struct SearchClient {
    agent: Agent,
    base_url: String,
}

impl SearchClient {
    /// `base_url` is the engine root, without the `/engine/query` path.
    pub fn new(base_url: impl Into<String>) -> Self {
        // Statuses are inspected here, not turned into transport errors.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent, base_url: base_url.into() }
    }

    pub fn query(&self, request: &SearchRequest) -> GifResult<SearchResponse> {
        let url = format!("{}/engine/query", self.base_url.trim_end_matches('/'));
        let mut builder = self.agent.get(url.as_str());
        for (key, value) in request.query_pairs() {
            builder = builder.query(key, value);
        }
        let mut response = builder.call()?;
        let status = response.status().as_u16();
        if status >= 500 {
            log::warn!("engine unavailable: status {status}");
            return Ok(SearchResponse::ServerError { code: status, message: "server error".into() });
        }
        let body = response.body_mut().read_to_string()?;
        Ok(SearchResponse::Results(serde_json::from_str(&body)?))
    }
}
