use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use serde_json::json;

use crate::catalog::CatalogClient;
use crate::model::ExplorerConfig;
use crate::navigate::{EngineSettings, NavigationEngine, Transition};

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use super::view::RenderCtx;
use super::views::{render_details, render_records};

mod event_loop;
mod render;
mod runtime;
mod session_trace;
mod state;
mod time_utils;

pub(super) use self::runtime::run;
pub(in crate::tui_shell) use self::state::App;
use self::state::EntryKind;
use self::session_trace::TraceWriter;
pub(in crate::tui_shell) use self::time_utils::{fmt_since, fmt_ts_ui, now_ts};
