use std::fmt::Write;

use crate::app_state::{ComparisonState, Phase};

/// Plain-text rendering of the comparison screen.
pub fn render(state: &ComparisonState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Steam Games Comparison");
    let _ = writeln!(out, "Find games you can play together!");

    match state.phase {
        Phase::Loading => {
            let _ = writeln!(out, "\nComparing...");
        }
        Phase::Error if !state.error_message.is_empty() => {
            let _ = writeln!(out, "\nError: {}", state.error_message);
        }
        _ => {}
    }

    if state.profiles.is_empty() {
        return out;
    }

    let _ = writeln!(out);
    for profile in &state.profiles {
        let _ = writeln!(out, "{} ({})", profile.display_name, profile.id);
    }

    let visible = state.visible_items();
    let _ = writeln!(out, "\nShared Games ({})", visible.len());
    if visible.is_empty() {
        let suffix = if state.co_op_only_filter {
            " with co-op/multiplayer"
        } else {
            ""
        };
        let _ = writeln!(out, "No shared games found{suffix}.");
        return out;
    }

    for item in visible {
        let mut line = format!("- {} | Playtime: {} hours", item.name, item.playtime_hours);
        if item.supports_co_op {
            line.push_str(" [Co-op]");
        }
        if item.supports_multiplayer {
            line.push_str(" [Multiplayer]");
        }
        let _ = writeln!(out, "{line}");
    }
    out
}
