//! Victor mention resolution
//!
//! The sheet carries a tracker username and an external mention id on the
//! same rows as the level data. The resulting map is rebuilt from scratch
//! on every poll and never persisted.

use crate::record::field;
use crate::schema::SheetSchema;
use std::collections::HashMap;

/// Mapping from tracker username to external mention id.
pub type MentionMap = HashMap<String, String>;

/// Build the mention map from the full row set, skipping the header row.
///
/// Rows missing either the username or the id contribute nothing.
/// Duplicate usernames resolve last-writer-wins; no error is reported.
pub fn build_mention_map(rows: &[Vec<String>], schema: &SheetSchema) -> MentionMap {
    let mut map = MentionMap::new();
    for row in rows.iter().skip(1) {
        let username = field(row, schema.tracker_username);
        let mention_id = field(row, schema.mention_id);
        if !username.is_empty() && !mention_id.is_empty() {
            map.insert(username.to_string(), mention_id.to_string());
        }
    }
    map
}
