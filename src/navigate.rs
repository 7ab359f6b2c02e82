//! Drill-down navigation: catalog list -> collection members -> member detail.
//!
//! The engine owns a [`NavigationStack`] whose bottom frame is the catalog
//! listing. Every transition issues exactly one catalog query and always ends
//! with a valid frame on top; failures become diagnostic rows.

use serde::Serialize;

use crate::catalog::{CatalogClient, search_params};
use crate::members::{resolve_latest, resolve_members};
use crate::model::{CanonicalResult, Diagnostic, ExplorerConfig, QueryNames, Record};
use crate::normalize::normalize;
use crate::project::{CATALOG_COLUMNS, DETAIL_COLUMNS, MEMBER_COLUMNS};

mod stack;
pub use self::stack::NavigationStack;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Root catalog listing.
    Catalog,
    /// Members of the selected collection.
    Members,
    /// Attributes of a leaf record.
    Detail,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Catalog => "catalogs",
            Level::Members => "members",
            Level::Detail => "details",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Level::Catalog => CATALOG_COLUMNS,
            Level::Members => MEMBER_COLUMNS,
            Level::Detail => DETAIL_COLUMNS,
        }
    }
}

/// What to send the catalog to (re)build a frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub query_name: String,
    pub search: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct NavigationFrame {
    level: Level,
    title: String,
    request: QueryRequest,
    records: Vec<Record>,
    cursor: usize,
    /// Snapshot of the selected record, used when the catalog returns nothing
    /// usable for it.
    #[serde(skip)]
    origin: Option<Record>,
}

impl NavigationFrame {
    fn new(level: Level, title: String, request: QueryRequest, records: Vec<Record>) -> Self {
        Self {
            level,
            title,
            request,
            records,
            cursor: 0,
            origin: None,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The search string this frame was built from.
    pub fn query(&self) -> &str {
        &self.request.search
    }

    pub fn request(&self) -> &QueryRequest {
        &self.request
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.cursor)
    }
}

/// Outcome of one engine call, for the status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Descended { members: usize },
    Leaf,
    Failed { reason: String },
    Ignored { reason: &'static str },
    Popped,
    AtRoot,
    Refreshed,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Descended { members } => {
                let label = if *members == 1 { "member" } else { "members" };
                write!(f, "{} {}", members, label)
            }
            Transition::Leaf => f.write_str("no members; showing details"),
            Transition::Failed { reason } => write!(f, "query failed: {}", reason),
            Transition::Ignored { reason } => f.write_str(reason),
            Transition::Popped => f.write_str("back"),
            Transition::AtRoot => f.write_str("already at the catalog list"),
            Transition::Refreshed => f.write_str("refreshed"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineSettings {
    pub queries: QueryNames,
    pub root_search: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&ExplorerConfig::default())
    }
}

impl EngineSettings {
    pub fn from_config(cfg: &ExplorerConfig) -> Self {
        Self {
            queries: cfg.queries.clone(),
            root_search: cfg.root_search.clone(),
        }
    }
}

pub struct NavigationEngine<C> {
    client: C,
    settings: EngineSettings,
    stack: NavigationStack,
}

impl<C: CatalogClient> NavigationEngine<C> {
    /// Loads the catalog listing. A failed load still yields a root frame.
    pub fn start(client: C, settings: EngineSettings) -> Self {
        let request = QueryRequest {
            query_name: settings.queries.catalogs.clone(),
            search: settings.root_search.clone(),
        };
        let records = match run(&client, &request) {
            Ok(result) => result.into_records(),
            Err(reason) => CanonicalResult::failure(reason).into_records(),
        };
        let root = NavigationFrame::new(
            Level::Catalog,
            settings.queries.catalogs.clone(),
            request,
            records,
        );
        Self {
            client,
            settings,
            stack: NavigationStack::new(root),
        }
    }

    pub fn current_frame(&self) -> &NavigationFrame {
        self.stack.current()
    }

    pub fn frames(&self) -> &[NavigationFrame] {
        self.stack.frames()
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn breadcrumbs(&self) -> Vec<&str> {
        self.stack.frames().iter().map(|f| f.title()).collect()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let frame = self.stack.current_mut();
        let max = frame.records.len().saturating_sub(1);
        frame.cursor = frame.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn select_current(&mut self) -> Transition {
        let idx = self.stack.current().cursor;
        self.select(idx)
    }

    /// Opens row `index` of the current frame: descends into its members, or
    /// shows it as a leaf.
    pub fn select(&mut self, index: usize) -> Transition {
        let frame = self.stack.current();
        let query_name = match frame.level {
            Level::Catalog => self.settings.queries.catalogs.clone(),
            Level::Members => self.settings.queries.explore.clone(),
            Level::Detail => {
                return Transition::Ignored {
                    reason: "details have nothing further to open",
                };
            }
        };
        let Some(record) = frame.records.get(index).cloned() else {
            return Transition::Ignored {
                reason: "no row selected",
            };
        };
        if record.is_diagnostic() {
            return Transition::Ignored {
                reason: "error rows cannot be opened",
            };
        }
        let Some(qualified_name) = record.qualified_name().map(str::to_string) else {
            return Transition::Ignored {
                reason: "record has no qualified name",
            };
        };

        self.stack.current_mut().cursor = index;
        let title = record
            .display_name()
            .unwrap_or(qualified_name.as_str())
            .to_string();
        let request = QueryRequest {
            query_name,
            search: qualified_name,
        };

        let result = match run(&self.client, &request) {
            Ok(result) => result,
            Err(reason) => {
                let records = CanonicalResult::failure(reason.clone()).into_records();
                self.stack
                    .push(NavigationFrame::new(Level::Detail, title, request, records));
                return Transition::Failed { reason };
            }
        };

        let (level, records, transition) = descend(&result, &record, &request.search);
        let mut frame = NavigationFrame::new(level, title, request, records);
        frame.origin = Some(record);
        tracing::debug!(level = level.label(), query = frame.query(), rows = frame.records.len(), "pushed frame");
        self.stack.push(frame);
        transition
    }

    /// Returns to the previous frame. At the catalog list this does nothing.
    pub fn back(&mut self) -> Transition {
        if self.stack.pop() {
            Transition::Popped
        } else {
            Transition::AtRoot
        }
    }

    /// Re-runs the current frame's query and replaces its rows in place.
    pub fn refresh(&mut self) -> Transition {
        let frame = self.stack.current();
        let request = frame.request.clone();
        let level = frame.level;
        let origin = frame.origin.clone();

        let (records, transition) = match run(&self.client, &request) {
            Err(reason) => (
                CanonicalResult::failure(reason.clone()).into_records(),
                Transition::Failed { reason },
            ),
            Ok(result) => {
                let records = match (level, origin.as_ref()) {
                    (Level::Members, Some(origin)) => {
                        match descend(&result, origin, &request.search) {
                            (Level::Members, records, _) => records,
                            _ => vec![Diagnostic::empty_result_with(format!(
                                "{} no longer has members",
                                request.search
                            ))],
                        }
                    }
                    (Level::Detail, Some(origin)) => leaf_records(&result, origin),
                    _ => result.into_records(),
                };
                (records, Transition::Refreshed)
            }
        };

        let frame = self.stack.current_mut();
        frame.records = records;
        frame.cursor = 0;
        transition
    }
}

/// Decides the next frame for `selected` given the catalog's answer for it.
fn descend(
    result: &CanonicalResult,
    selected: &Record,
    qualified_name: &str,
) -> (Level, Vec<Record>, Transition) {
    let source = resolve_latest(&result.records, qualified_name).unwrap_or(selected);
    if let Some(refs) = resolve_members(source) {
        let records = refs.iter().map(|r| r.to_record()).collect::<Vec<_>>();
        return (
            Level::Members,
            records,
            Transition::Descended {
                members: refs.len(),
            },
        );
    }

    (Level::Detail, leaf_records(result, selected), Transition::Leaf)
}

/// Rows of a detail frame: the fetched records, plus the selected snapshot
/// when the fetch held no entity.
fn leaf_records(result: &CanonicalResult, selected: &Record) -> Vec<Record> {
    let mut records = result.records.clone();
    if result.entities().next().is_none() {
        records.push(selected.clone());
    }
    records
}

fn run<C: CatalogClient>(client: &C, request: &QueryRequest) -> Result<CanonicalResult, String> {
    tracing::debug!(query = %request.query_name, search = %request.search, "catalog query");
    match client.query(&request.query_name, &search_params(&request.search)) {
        Ok(raw) => {
            let result = normalize(&raw);
            if let Some(kind) = result.diagnostic_kind() {
                tracing::info!(query = %request.query_name, search = %request.search, %kind, "catalog returned a diagnostic");
            }
            Ok(result)
        }
        Err(err) => {
            let reason = format!("{:#}", err);
            tracing::warn!(query = %request.query_name, search = %request.search, error = %reason, "catalog query failed");
            Err(reason)
        }
    }
}

#[cfg(test)]
#[path = "tests/navigate_tests.rs"]
mod tests;
