use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLATFORM_URL: &str = "https://127.0.0.1:9443";
pub const DEFAULT_VIEW_SERVER: &str = "qs-view-server";
pub const DEFAULT_USER: &str = "erinoverview";
pub const DEFAULT_ROOT_SEARCH: &str = "*";

pub const CATALOG_QUERY: &str = "Digital-Product-Catalog-MyE";
pub const EXPLORE_QUERY: &str = "ExploreStructure";

const COLLECTIONS_BY_SEARCH: &str = "collection-manager/collections/by-search-string";

/// Names of the catalog queries issued at each level of the drill-down.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryNames {
    /// Lists catalogs; also used when selecting a catalog row.
    #[serde(default = "default_catalog_query")]
    pub catalogs: String,
    /// Looks up an individual member by qualified name.
    #[serde(default = "default_explore_query")]
    pub explore: String,
}

impl Default for QueryNames {
    fn default() -> Self {
        Self {
            catalogs: default_catalog_query(),
            explore: default_explore_query(),
        }
    }
}

fn default_catalog_query() -> String {
    CATALOG_QUERY.to_string()
}

fn default_explore_query() -> String {
    EXPLORE_QUERY.to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default = "default_platform_url")]
    pub platform_url: String,
    #[serde(default = "default_view_server")]
    pub view_server: String,
    #[serde(default = "default_user")]
    pub user: String,

    /// Pre-issued bearer token. Sent as-is; never refreshed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Local development platforms ship self-signed certificates.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    #[serde(default = "default_root_search")]
    pub root_search: String,

    #[serde(default)]
    pub queries: QueryNames,

    /// Query name -> API path below `/servers/{view_server}/api/open-metadata/`.
    #[serde(default = "default_endpoints")]
    pub endpoints: BTreeMap<String, String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            platform_url: default_platform_url(),
            view_server: default_view_server(),
            user: default_user(),
            token: None,
            accept_invalid_certs: false,
            root_search: default_root_search(),
            queries: QueryNames::default(),
            endpoints: default_endpoints(),
        }
    }
}

fn default_platform_url() -> String {
    DEFAULT_PLATFORM_URL.to_string()
}

fn default_view_server() -> String {
    DEFAULT_VIEW_SERVER.to_string()
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_root_search() -> String {
    DEFAULT_ROOT_SEARCH.to_string()
}

fn default_endpoints() -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    out.insert(CATALOG_QUERY.to_string(), COLLECTIONS_BY_SEARCH.to_string());
    out.insert(EXPLORE_QUERY.to_string(), COLLECTIONS_BY_SEARCH.to_string());
    out
}

impl ExplorerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config {}", path.display()))?;
        let cfg: ExplorerConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.platform_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("platform_url must start with http:// or https:// (got {:?})", url);
        }
        if self.view_server.trim().is_empty() {
            anyhow::bail!("view_server must not be empty");
        }
        if self.queries.catalogs.trim().is_empty() || self.queries.explore.trim().is_empty() {
            anyhow::bail!("query names must not be empty");
        }
        Ok(())
    }

    pub fn endpoint_for(&self, query_name: &str) -> Option<&str> {
        self.endpoints.get(query_name).map(String::as_str)
    }
}
