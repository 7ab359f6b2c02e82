//! The catalog collaborator: the only thing the explorer needs from the
//! metadata catalog is "run this named query and hand back the raw payload".

use std::collections::BTreeMap;

use anyhow::Result;

use crate::model::RawPayload;

mod fixture;
mod http_client;

pub use self::fixture::FixtureClient;
pub use self::http_client::EgeriaClient;

pub type QueryParams = BTreeMap<String, String>;

/// Parameter carrying the search string (a qualified name, or `*`).
pub const SEARCH_PARAM: &str = "search_string";

pub trait CatalogClient {
    /// Runs `query_name`. The payload shape is whatever the catalog returns.
    fn query(&self, query_name: &str, params: &QueryParams) -> Result<RawPayload>;
}

impl<T: CatalogClient + ?Sized> CatalogClient for &T {
    fn query(&self, query_name: &str, params: &QueryParams) -> Result<RawPayload> {
        (**self).query(query_name, params)
    }
}

impl<T: CatalogClient + ?Sized> CatalogClient for Box<T> {
    fn query(&self, query_name: &str, params: &QueryParams) -> Result<RawPayload> {
        (**self).query(query_name, params)
    }
}

pub fn search_params(search: &str) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert(SEARCH_PARAM.to_string(), search.to_string());
    params
}
