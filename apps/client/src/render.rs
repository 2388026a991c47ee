//! Plain-text rendering of client state. No I/O.

use chrono::{DateTime, Local, Utc};

use crate::api::MatchupRow;
use crate::state::ClientState;

fn fmt_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Confidence in [0, 1] as a whole percentage.
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title}\n"));
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
}

/// Renders the currently selected matchup.
pub fn render_selected(row: &MatchupRow) -> String {
    let mut out = format!("Question: {}\n", row.question);
    out.push_str(&format!(
        "{} | ID: {}\n",
        fmt_time(&row.created_at),
        row.id
    ));

    let Some(result) = &row.result else {
        out.push_str("\nNo result found for this request.\n");
        return out;
    };
    let answer = &result.answer_json;
    out.push_str(&format!(
        "Confidence: {}%\n",
        confidence_percent(answer.confidence)
    ));
    out.push_str(&format!("\nPick: {}\n", answer.pick));
    push_list(&mut out, "Reasons", &answer.reasons);
    push_list(&mut out, "Counter", &answer.counter);
    push_list(&mut out, "Context notes", &answer.context_notes);
    out
}

/// Renders the history sidebar as a numbered list; numbers feed `:open N`.
pub fn render_history(state: &ClientState) -> String {
    if state.history.is_empty() {
        return "No matchups yet.\n".to_string();
    }
    let selected_id = state.selected.as_ref().map(|r| r.id.as_str());
    let mut out = String::new();
    for (i, row) in state.history.iter().enumerate() {
        let marker = if Some(row.id.as_str()) == selected_id {
            '>'
        } else {
            ' '
        };
        let pick = match &row.result {
            Some(result) => format!("Pick: {}", result.answer_json.pick),
            None => "No result yet".to_string(),
        };
        out.push_str(&format!(
            "{marker}{:>3}. [{}] {} ({pick})\n",
            i + 1,
            fmt_time(&row.created_at),
            row.question
        ));
    }
    out
}

/// Renders the main pane: error banner, then the selection or a hint.
pub fn render(state: &ClientState) -> String {
    let mut out = String::new();
    if let Some(error) = &state.error {
        out.push_str(&format!("Error: {error}\n\n"));
    }
    match &state.selected {
        Some(row) => out.push_str(&render_selected(row)),
        None => out.push_str("Pick a matchup with :open N, or type a new question.\n"),
    }
    out
}
