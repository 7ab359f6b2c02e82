use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use serde_json::{Value, json};
use tokio::sync::oneshot;

/// One request as the mock view server saw it.
#[derive(Clone, Debug)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: Value,
}

struct MockState {
    /// Response per `filter` value of the request body.
    answers: BTreeMap<String, (u16, String)>,
    requests: Mutex<Vec<CapturedRequest>>,
}

/// In-process stand-in for an Egeria view server. Answers every POST by
/// looking up the request body's `filter`; unknown filters get `{"data": null}`.
#[allow(dead_code)]
pub struct MockCatalog {
    pub base_url: String,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for MockCatalog {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(t) = self.thread.take() {
            let _ = t.join();
        }
    }
}

#[allow(dead_code)]
impl MockCatalog {
    pub fn start(answers: &[(&str, u16, &str)]) -> Result<Self> {
        let state = Arc::new(MockState {
            answers: answers
                .iter()
                .map(|(filter, status, body)| (filter.to_string(), (*status, body.to_string())))
                .collect(),
            requests: Mutex::new(Vec::new()),
        });

        let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind mock catalog")?;
        listener
            .set_nonblocking(true)
            .context("set mock listener nonblocking")?;
        let base_url = format!(
            "http://{}",
            listener.local_addr().context("read mock local addr")?
        );

        let (tx, rx) = oneshot::channel::<()>();
        let app = Router::new().fallback(answer).with_state(state.clone());
        let thread = thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("build mock runtime");
            rt.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("adopt mock listener");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = rx.await;
                    })
                    .await
                    .expect("mock catalog server");
            });
        });

        Ok(Self {
            base_url,
            state,
            shutdown: Some(tx),
            thread: Some(thread),
        })
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn answer(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::String(body));
    let filter = body
        .get("filter")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    state.requests.lock().unwrap().push(CapturedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        authorization: headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match state.answers.get(&filter) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body.clone(),
        ),
        None => (StatusCode::OK, json!({"data": null}).to_string()),
    }
}

/// Root listing with one collection (two members) and one plain catalog.
#[allow(dead_code)]
pub fn root_payload() -> Value {
    json!({"data": [
        {
            "Display Name": "Catalog A",
            "Qualified Name": "qa",
            "Type Name": "DigitalProductCatalog",
            "Containing Members": "[\"m1\",\"m2\"]"
        },
        {
            "Display Name": "Catalog B",
            "Qualified Name": "qb",
            "Type Name": "DigitalProductCatalog"
        }
    ]})
}

#[allow(dead_code)]
pub fn write_json(dir: &Path, name: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.join(name);
    let bytes = serde_json::to_vec_pretty(value).context("serialize json")?;
    std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
