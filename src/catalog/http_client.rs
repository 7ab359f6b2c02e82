use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde_json::Value;

use super::{CatalogClient, QueryParams, SEARCH_PARAM};
use crate::model::{ExplorerConfig, RawPayload};

/// Rejections by the view server's security layer. Retrying cannot change the
/// answer, so `with_retries` reports these on the first attempt.
#[derive(Debug, thiserror::Error)]
pub(super) enum AuthError {
    #[error("unauthorized (token missing or expired; pass --token or set EGERIA_TOKEN)")]
    Unauthorized,
    #[error("forbidden (user {user} may not run this query)")]
    Forbidden { user: String },
}

pub(super) fn with_retries<T>(label: &str, mut f: impl FnMut() -> Result<T>) -> Result<T> {
    const ATTEMPTS: usize = 3;
    let mut last: Option<anyhow::Error> = None;
    for i in 0..ATTEMPTS {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) if err.downcast_ref::<AuthError>().is_some() => {
                return Err(err.context(label.to_string()));
            }
            Err(err) => {
                tracing::debug!(label, attempt = i + 1, error = %format!("{:#}", err), "catalog request failed");
                last = Some(err);
                if i + 1 < ATTEMPTS {
                    std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i)));
                }
            }
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow!("unknown error"))
        .context(label.to_string()))
}

#[derive(Debug, Serialize)]
struct FilterRequestBody<'a> {
    class: &'static str,
    filter: &'a str,
}

/// Blocking HTTP client for an Egeria view server.
pub struct EgeriaClient {
    config: ExplorerConfig,
    client: reqwest::blocking::Client,
}

impl EgeriaClient {
    pub fn new(config: ExplorerConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .user_agent("catalog-explorer")
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .context("build reqwest client")?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::Unauthorized.into());
        }
        if resp.status() == reqwest::StatusCode::FORBIDDEN {
            return Err(AuthError::Forbidden {
                user: self.config.user.clone(),
            }
            .into());
        }
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/servers/{}/api/open-metadata/{}",
            self.config.platform_url.trim_end_matches('/'),
            self.config.view_server,
            path.trim_start_matches('/')
        )
    }
}

impl CatalogClient for EgeriaClient {
    fn query(&self, query_name: &str, params: &QueryParams) -> Result<RawPayload> {
        let path = self
            .config
            .endpoint_for(query_name)
            .ok_or_else(|| anyhow!("no endpoint configured for query {}", query_name))?;
        let url = self.url(path);
        let search = params.get(SEARCH_PARAM).map(String::as_str).unwrap_or("*");
        let extra: Vec<(&str, &str)> = params
            .iter()
            .filter(|(k, _)| k.as_str() != SEARCH_PARAM)
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let body = FilterRequestBody {
            class: "FilterRequestBody",
            filter: search,
        };

        let label = format!("query {} ({})", query_name, search);
        tracing::debug!(%url, query = query_name, search, "catalog query");
        with_retries(&label, || {
            let mut req = self
                .client
                .post(&url)
                .query(&[("startFrom", "0"), ("pageSize", "0")])
                .query(&extra)
                .json(&body);
            if let Some(token) = &self.config.token {
                req = req.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let resp = req.send().with_context(|| format!("send {}", label))?;
            let resp = self.ensure_ok(resp, &label)?;
            let text = resp.text().context("read response body")?;
            // Non-JSON bodies go to the normalizer as text.
            Ok(serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text)))
        })
    }
}
