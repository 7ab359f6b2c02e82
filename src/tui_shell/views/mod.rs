pub(super) mod details;
pub(super) mod records;

pub(in crate::tui_shell) use details::render_details;
pub(in crate::tui_shell) use records::render_records;
