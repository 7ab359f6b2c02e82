mod config;
mod diagnostic;
mod record;

pub use self::config::{
    CATALOG_QUERY, DEFAULT_PLATFORM_URL, DEFAULT_ROOT_SEARCH, DEFAULT_USER, DEFAULT_VIEW_SERVER,
    EXPLORE_QUERY, ExplorerConfig, QueryNames,
};
pub use self::diagnostic::{CanonicalResult, Diagnostic, DiagnosticKind, NO_DATA_MESSAGE};
pub(crate) use self::diagnostic::render_for_debug;
pub use self::record::{
    FIELD_CATEGORIES, FIELD_CONTAINING_MEMBERS, FIELD_CONTAINS_MEMBERS, FIELD_DESCRIPTION,
    FIELD_DISPLAY_NAME, FIELD_GUID, FIELD_QUALIFIED_NAME, FIELD_STATUS, FIELD_TYPE_NAME,
    MISSING_FIELD, Record, render_value,
};

/// Untyped response body handed back by the catalog.
pub type RawPayload = serde_json::Value;
