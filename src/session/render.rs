//! Terminal rendering of the voting view.

use chrono::{DateTime, Local};
use std::fmt::Write;

use crate::session::state::VotingView;

pub const TITLE: &str = "Decentralized Voting System";

/// Unix seconds as local date and time.
pub fn format_date(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

/// Render the full view as text.
pub fn render_view(view: &VotingView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));

    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {}", error);
    }
    if view.loading {
        let _ = writeln!(out, "Processing transaction...");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Voting Period");
    let _ = writeln!(out, "  Start: {}", format_date(view.voting_start));
    let _ = writeln!(out, "  End:   {}", format_date(view.voting_end));
    if !view.time_left.is_empty() {
        let _ = writeln!(out, "  {}", view.time_left);
    }

    if view.is_owner {
        let _ = writeln!(out);
        let _ = writeln!(out, "You own this contract: add candidates with `add-candidate <name>`.");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Candidates");
    if view.candidates.is_empty() && !view.loading {
        let _ = writeln!(out, "  No candidates available");
    }
    for candidate in &view.candidates {
        let _ = writeln!(
            out,
            "  [{}] {:<24} {} votes",
            candidate.id, candidate.name, candidate.vote_count
        );
    }

    out
}

/// Render the view as pretty JSON.
pub fn render_json(view: &VotingView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}
