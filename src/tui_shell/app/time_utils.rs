use std::sync::OnceLock;

use super::*;

fn ts_ui_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month repr:numerical padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]Z",
        )
        .unwrap_or_default()
    })
}

pub(in crate::tui_shell) fn fmt_ts_ui(ts: &str) -> String {
    OffsetDateTime::parse(ts, &Rfc3339)
        .ok()
        .and_then(|dt| dt.format(ts_ui_format()).ok())
        .unwrap_or_else(|| ts.to_string())
}

/// Short relative form of `ts`; `None` when an absolute time reads better.
pub(in crate::tui_shell) fn fmt_since(ts: &str, now: OffsetDateTime) -> Option<String> {
    let dt = OffsetDateTime::parse(ts, &Rfc3339).ok()?;
    let secs = (now - dt).whole_seconds();

    // Future timestamps are rare; show as absolute.
    if secs < 0 {
        return None;
    }

    let mins = secs / 60;
    let hours = mins / 60;
    let s = if secs < 60 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else if hours < 48 {
        format!("{}h ago", hours)
    } else {
        return None;
    };
    Some(s)
}

pub(in crate::tui_shell) fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

#[cfg(test)]
#[path = "../../tests/tui_shell/time_utils_tests.rs"]
mod tests;
