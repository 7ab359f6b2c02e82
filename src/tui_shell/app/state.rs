use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum EntryKind {
    Output,
    Error,
}

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct StatusEntry {
    pub(in crate::tui_shell) ts: String,
    pub(in crate::tui_shell) kind: EntryKind,
    pub(in crate::tui_shell) text: String,
}

pub(in crate::tui_shell) struct App {
    pub(in crate::tui_shell) engine: NavigationEngine<Box<dyn CatalogClient>>,
    pub(in crate::tui_shell) config: ExplorerConfig,

    pub(in crate::tui_shell) trace: Option<TraceWriter>,
    pub(in crate::tui_shell) last_screen_signature: Option<String>,

    /// When the current frame's rows were last fetched.
    pub(in crate::tui_shell) loaded_at: String,
    pub(in crate::tui_shell) last_result: Option<StatusEntry>,
    pub(in crate::tui_shell) show_help: bool,

    pub(in crate::tui_shell) quit: bool,
}

impl App {
    /// Runs the root catalog query; blocks until it answers.
    pub(in crate::tui_shell) fn load(
        client: Box<dyn CatalogClient>,
        config: ExplorerConfig,
        opts: crate::tui::TuiRunOptions,
    ) -> Self {
        let engine = NavigationEngine::start(client, EngineSettings::from_config(&config));
        let mut app = App {
            engine,
            config,
            trace: None,
            last_screen_signature: None,
            loaded_at: now_ts(),
            last_result: None,
            show_help: false,
            quit: false,
        };
        app.enable_trace(opts.trace);
        let rows = app.engine.current_frame().records().len();
        app.push_output(format!(
            "loaded {} {}",
            rows,
            if rows == 1 { "row" } else { "rows" }
        ));
        app
    }

    pub(in crate::tui_shell) fn push_output(&mut self, text: String) {
        self.last_result = Some(StatusEntry {
            ts: now_ts(),
            kind: EntryKind::Output,
            text,
        });
    }

    pub(in crate::tui_shell) fn push_error(&mut self, text: String) {
        self.last_result = Some(StatusEntry {
            ts: now_ts(),
            kind: EntryKind::Error,
            text,
        });
    }

    pub(in crate::tui_shell) fn select(&mut self) {
        let from = self.engine.depth();
        let t = self.engine.select_current();
        if from != self.engine.depth() {
            self.loaded_at = now_ts();
        }
        self.record_transition("select", t);
    }

    pub(in crate::tui_shell) fn back(&mut self) {
        let t = self.engine.back();
        self.record_transition("back", t);
    }

    pub(in crate::tui_shell) fn refresh(&mut self) {
        let t = self.engine.refresh();
        self.loaded_at = now_ts();
        self.record_transition("refresh", t);
    }

    fn record_transition(&mut self, action: &str, t: Transition) {
        self.trace_transition(action, &t);
        match &t {
            Transition::Failed { .. } => self.push_error(t.to_string()),
            _ => self.push_output(t.to_string()),
        }
    }

    pub(in crate::tui_shell) fn breadcrumb(&self) -> String {
        self.engine.breadcrumbs().join(" > ")
    }
}
