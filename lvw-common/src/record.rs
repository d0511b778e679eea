//! Typed records parsed from raw sheet rows
//!
//! Rows arrive as ordered text fields. Parsing is deliberately lenient:
//! short rows read as empty trailing fields, and rows without a level id
//! are skipped as blank/separator rows. Difficulty text is carried
//! verbatim; classification happens at format time.

use crate::schema::SheetSchema;
use std::collections::BTreeSet;

/// One tracked level, rebuilt fresh from the sheet on every poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRecord {
    /// Stable identity key for the level
    pub level_id: String,
    /// Display name
    pub level_name: String,
    /// Creator attribution, free text
    pub creators: String,
    /// Raw difficulty value; a named tier or a numeric score
    pub difficulty: String,
    /// Distinct victor display names, order-irrelevant
    pub victors: BTreeSet<String>,
}

/// Read one column of a raw row, trimmed.
///
/// Columns past the end of a short row read as empty, so narrow rows never
/// fail to parse.
pub fn field<'a>(row: &'a [String], index: usize) -> &'a str {
    row.get(index).map(String::as_str).unwrap_or("").trim()
}

/// Split the comma-separated victor column, preserving list order.
///
/// Entries are trimmed; empty entries are dropped. The last entry is the
/// most recently listed victor.
pub fn split_victor_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse one raw row into a [`LevelRecord`].
///
/// Returns `None` when the level id column is empty (blank/separator rows).
pub fn parse_row(row: &[String], schema: &SheetSchema) -> Option<LevelRecord> {
    let level_id = field(row, schema.level_id);
    if level_id.is_empty() {
        return None;
    }

    Some(LevelRecord {
        level_id: level_id.to_string(),
        level_name: field(row, schema.level_name).to_string(),
        creators: field(row, schema.creator).to_string(),
        difficulty: field(row, schema.difficulty).to_string(),
        victors: split_victor_list(field(row, schema.victors))
            .into_iter()
            .collect(),
    })
}

/// Parse a full snapshot into records, skipping the header row and any
/// blank rows.
pub fn parse_rows(rows: &[Vec<String>], schema: &SheetSchema) -> Vec<LevelRecord> {
    rows.iter()
        .skip(1)
        .filter_map(|row| parse_row(row, schema))
        .collect()
}
