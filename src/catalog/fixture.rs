use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use super::{CatalogClient, QueryParams, SEARCH_PARAM};
use crate::model::RawPayload;

/// Search key used when no payload is registered for the exact search string.
pub const FALLBACK_SEARCH: &str = "*";

/// A payload of `{"$error": "..."}` makes the query fail with that message.
pub const FAILURE_KEY: &str = "$error";

/// Serves canned payloads from a JSON document shaped
/// `{ "<query>": { "<search string>": <payload>, "*": <payload> } }`.
#[derive(Clone, Debug, Default)]
pub struct FixtureClient {
    queries: BTreeMap<String, BTreeMap<String, Value>>,
}

impl FixtureClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read fixture {}", path.display()))?;
        let doc: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse fixture {}", path.display()))?;
        Self::from_value(doc).with_context(|| format!("load fixture {}", path.display()))
    }

    pub fn from_value(doc: Value) -> Result<Self> {
        let Value::Object(top) = doc else {
            anyhow::bail!("fixture must be an object keyed by query name");
        };
        let mut queries = BTreeMap::new();
        for (query, searches) in top {
            let Value::Object(searches) = searches else {
                anyhow::bail!("fixture entry {} must be an object keyed by search string", query);
            };
            queries.insert(query, searches.into_iter().collect());
        }
        Ok(Self { queries })
    }

    pub fn with(mut self, query: &str, search: &str, payload: Value) -> Self {
        self.queries
            .entry(query.to_string())
            .or_default()
            .insert(search.to_string(), payload);
        self
    }
}

impl CatalogClient for FixtureClient {
    fn query(&self, query_name: &str, params: &QueryParams) -> Result<RawPayload> {
        let searches = self
            .queries
            .get(query_name)
            .ok_or_else(|| anyhow!("unknown query {}", query_name))?;
        let search = params
            .get(SEARCH_PARAM)
            .map(String::as_str)
            .unwrap_or(FALLBACK_SEARCH);
        let payload = searches
            .get(search)
            .or_else(|| searches.get(FALLBACK_SEARCH))
            .ok_or_else(|| anyhow!("no fixture for {} search {:?}", query_name, search))?;
        if let Some(msg) = payload.get(FAILURE_KEY).and_then(Value::as_str) {
            anyhow::bail!("{}", msg);
        }
        Ok(payload.clone())
    }
}

#[cfg(test)]
#[path = "../tests/catalog/fixture_tests.rs"]
mod tests;
