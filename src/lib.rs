pub mod catalog;
pub mod logging;
pub mod members;
pub mod model;
pub mod navigate;
pub mod normalize;
pub mod project;
pub mod tui;

mod tui_shell;

pub use crate::catalog::{CatalogClient, EgeriaClient, FixtureClient};
pub use crate::members::{MemberReference, resolve_members};
pub use crate::model::{CanonicalResult, DiagnosticKind, Record};
pub use crate::navigate::{Level, NavigationEngine, NavigationFrame, Transition};
pub use crate::normalize::normalize;
pub use crate::project::{Row, project};
