use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::*;

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct TraceStats {
    pub(in crate::tui_shell) screen_views: u64,
    pub(in crate::tui_shell) key_presses: u64,
    pub(in crate::tui_shell) transitions: u64,
    pub(in crate::tui_shell) failed_queries: u64,
}

/// Appends one JSON object per line: `seq`, `ts`, `event`, `payload`.
#[derive(Debug)]
pub(in crate::tui_shell) struct TraceWriter {
    out: BufWriter<File>,
    path: PathBuf,
    seq: u64,
    stats: TraceStats,
}

impl TraceWriter {
    pub(in crate::tui_shell) fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!(
                    "create parent directories for trace path {}",
                    path.display()
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open trace file {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            path: path.to_path_buf(),
            seq: 0,
            stats: TraceStats::default(),
        })
    }

    pub(in crate::tui_shell) fn write_event<T: Serialize>(
        &mut self,
        event: &str,
        payload: T,
    ) -> Result<()> {
        self.seq += 1;
        let line = json!({
            "seq": self.seq,
            "ts": now_ts(),
            "event": event,
            "payload": payload
        });
        serde_json::to_writer(&mut self.out, &line).context("serialize trace event")?;
        self.out.write_all(b"\n").context("write trace newline")?;
        self.out.flush().context("flush trace event")?;
        Ok(())
    }
}

impl App {
    pub(in crate::tui_shell) fn enable_trace(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else {
            return;
        };
        match TraceWriter::open(&path) {
            Ok(mut writer) => {
                let frame = self.engine.current_frame();
                let _ = writer.write_event(
                    "session_start",
                    json!({
                        "platform_url": self.config.platform_url,
                        "view_server": self.config.view_server,
                        "root_query": frame.request(),
                        "rows": frame.records().len(),
                    }),
                );
                self.trace = Some(writer);
            }
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "session trace disabled");
                self.push_error(format!("session trace disabled: {:#}", err));
            }
        }
    }

    pub(in crate::tui_shell) fn trace_screen_view_if_changed(&mut self) {
        if self.trace.is_none() {
            return;
        }

        let frame = self.engine.current_frame();
        let signature = format!(
            "{}|{}|{}|{}|{}",
            self.engine.depth(),
            frame.level().label(),
            frame.query(),
            frame.records().len(),
            self.show_help
        );
        if self.last_screen_signature.as_ref() == Some(&signature) {
            return;
        }
        self.last_screen_signature = Some(signature);

        let payload = json!({
            "level": frame.level(),
            "title": frame.title(),
            "query": frame.request(),
            "depth": self.engine.depth(),
            "rows": frame.records().len(),
            "error_rows": frame.records().iter().filter(|r| r.is_diagnostic()).count(),
            "breadcrumb": self.engine.breadcrumbs(),
            "help": self.show_help,
        });
        if let Some(writer) = self.trace.as_mut() {
            writer.stats.screen_views += 1;
        }
        self.write_trace_event("screen_view", payload);
    }

    pub(in crate::tui_shell) fn trace_key_action(&mut self, key: KeyEvent) {
        let Some(writer) = self.trace.as_mut() else {
            return;
        };
        writer.stats.key_presses += 1;
        let frame = self.engine.current_frame();
        let payload = json!({
            "key": key_to_string(&key),
            "level": frame.level(),
            "cursor": frame.cursor(),
        });
        self.write_trace_event("key_press", payload);
    }

    pub(in crate::tui_shell) fn trace_transition(&mut self, action: &str, t: &Transition) {
        let Some(writer) = self.trace.as_mut() else {
            return;
        };
        writer.stats.transitions += 1;
        if matches!(t, Transition::Failed { .. }) {
            writer.stats.failed_queries += 1;
        }
        let frame = self.engine.current_frame();
        let payload = json!({
            "action": action,
            "outcome": t.to_string(),
            "level": frame.level(),
            "query": frame.request(),
            "depth": self.engine.depth(),
        });
        self.write_trace_event("transition", payload);
    }

    pub(in crate::tui_shell) fn trace_session_end(&mut self, reason: &str) {
        let Some(writer) = self.trace.as_ref() else {
            return;
        };
        let payload = json!({
            "reason": reason,
            "stats": {
                "screen_views": writer.stats.screen_views,
                "key_presses": writer.stats.key_presses,
                "transitions": writer.stats.transitions,
                "failed_queries": writer.stats.failed_queries,
            },
            "trace_path": writer.path.display().to_string(),
        });
        self.write_trace_event("session_end", payload);
    }

    fn write_trace_event<T: Serialize>(&mut self, event: &str, payload: T) {
        let Some(writer) = self.trace.as_mut() else {
            return;
        };
        if writer.write_event(event, payload).is_err() {
            self.trace = None;
        }
    }
}

fn key_to_string(key: &KeyEvent) -> String {
    let mut parts = Vec::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("ctrl".to_string());
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("alt".to_string());
    }
    let code = match key.code {
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Char(c) => c.to_string(),
        _ => "other".to_string(),
    };
    parts.push(code);
    parts.join("+")
}
