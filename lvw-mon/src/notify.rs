//! Notification formatting
//!
//! Pure string assembly; delivery happens elsewhere.

use crate::diff::NewVictory;
use lvw_common::mentions::MentionMap;

/// Format one victory as a webhook message.
///
/// The victor renders as `<@id> (name)` when the mention map knows the
/// name, else as the bare name. The raw difficulty value and its tier
/// token both appear in the message.
pub fn format_victory(event: &NewVictory, mentions: &MentionMap, tier_token: &str) -> String {
    let victor_display = match mentions.get(&event.victor) {
        Some(id) => format!("<@{}> ({})", id, event.victor),
        None => event.victor.clone(),
    };

    format!(
        "**{}** has beaten **{}** by {} - Difficulty: {} [{}]",
        victor_display, event.level_name, event.creators, event.difficulty, tier_token
    )
}
