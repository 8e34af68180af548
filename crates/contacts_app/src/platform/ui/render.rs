use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use contacts_core::{AppViewModel, EditorView, SyncPhase};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn render(view: &AppViewModel) -> Vec<String> {
    render_in(view, &Local)
}

/// Renders the view as text lines, showing server timestamps in `tz`.
pub fn render_in<Tz>(view: &AppViewModel, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = Vec::new();

    let mut header = format!("== {} ==", result_summary(view));
    if !view.query.is_empty() {
        header.push_str(&format!("  search: {:?}", view.query));
    }
    if view.loading {
        header.push_str("  (loading...)");
    }
    lines.push(header);

    if view.contacts.is_empty() {
        lines.push("  (no contacts)".to_string());
    }
    for (index, row) in view.contacts.iter().enumerate() {
        let marker = if row.selected { '*' } else { ' ' };
        let mut line = format!("{:>3}. {} {}", index + 1, marker, display_name(&row.name));
        if let Some(email) = &row.primary_email {
            line.push_str(&format!(" <{}>", email));
        }
        lines.push(line);
    }

    if let Some(editor) = &view.editor {
        lines.push(String::new());
        render_editor(editor, tz, &mut lines);
    }

    match view.phase {
        SyncPhase::Idle | SyncPhase::ConfirmingDelete(_) => {}
        SyncPhase::Saving => lines.push("Saving...".to_string()),
        SyncPhase::Deleting => lines.push("Deleting...".to_string()),
    }

    if let Some(message) = &view.notification {
        lines.push(String::new());
        lines.push(format!("!! {}  (type 'ok' to dismiss)", message));
    }

    lines
}

fn render_editor<Tz>(editor: &EditorView, tz: &Tz, lines: &mut Vec<String>)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    lines.push(if editor.is_new {
        "-- New contact --".to_string()
    } else {
        "-- Edit contact --".to_string()
    });
    lines.push(format!("  First: {}", editor.first_name));
    lines.push(format!("  Last:  {}", editor.last_name));

    if editor.emails.is_empty() {
        lines.push("  Emails: none".to_string());
    } else {
        lines.push("  Emails:".to_string());
        for (index, row) in editor.emails.iter().enumerate() {
            lines.push(format!("  {:>3}. {}", index + 1, row.email));
        }
    }
    if editor.adding_email {
        lines.push(format!("  New email: {}_", editor.pending_email));
    }

    let stamps: Vec<String> = [
        ("Created", editor.created_at.as_deref()),
        ("Updated", editor.updated_at.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, raw)| raw.map(|raw| format!("{} {}", label, format_timestamp_in(raw, tz))))
    .collect();
    if !stamps.is_empty() {
        lines.push(format!("  {}", stamps.join(", ")));
    }

    let mut actions = Vec::new();
    if editor.can_save {
        actions.push("save");
    }
    if editor.can_delete {
        actions.push("delete");
    }
    actions.push("cancel");
    lines.push(format!("  [{}]", actions.join(" | ")));
}

fn result_summary(view: &AppViewModel) -> String {
    let noun = if view.total_contacts == 1 {
        "contact"
    } else {
        "contacts"
    };
    if view.query.is_empty() {
        format!("{} {}", view.total_contacts, noun)
    } else {
        format!("{} of {} {}", view.contacts.len(), view.total_contacts, noun)
    }
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        "(no name)"
    } else {
        name
    }
}

/// Formats a server timestamp in `tz`. RFC 3339 values keep their offset;
/// values without one are taken as UTC. Anything else is shown as received.
pub fn format_timestamp_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => naive
            .and_utc()
            .with_timezone(tz)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
