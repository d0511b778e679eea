//! Victor diff engine
//!
//! Holds the only mutable state in the process: the last recorded victor
//! set per level, plus whether a baseline poll has completed. Each poll's
//! snapshot is diffed against that state, and the recorded sets are
//! replaced wholesale only after the whole snapshot has been examined.
//!
//! The recorded set mirrors the latest snapshot only. A victor removed
//! from the sheet and later re-added is reported as new again; there is no
//! cumulative history.

use lvw_common::record::LevelRecord;
use std::collections::{BTreeSet, HashMap};

/// One newly observed victory, ready for formatting and delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVictory {
    pub level_id: String,
    pub victor: String,
    pub level_name: String,
    pub creators: String,
    pub difficulty: String,
}

/// Per-level victor state across polls.
#[derive(Debug, Default)]
pub struct VictorLedger {
    recorded: HashMap<String, BTreeSet<String>>,
    baseline_established: bool,
}

impl VictorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a baseline poll has seeded the ledger.
    pub fn baseline_established(&self) -> bool {
        self.baseline_established
    }

    /// Recorded victor set for one level; empty if the level was never seen.
    pub fn recorded(&self, level_id: &str) -> BTreeSet<String> {
        self.recorded.get(level_id).cloned().unwrap_or_default()
    }

    /// Diff one snapshot against the ledger, then commit it.
    ///
    /// Returned events are ordered: levels in snapshot order, victors
    /// within a level in lexicographic order. The baseline poll returns no
    /// events. Recorded sets are replaced only after every record has been
    /// examined, and levels absent from the snapshot keep their previous
    /// sets.
    pub fn process_snapshot(&mut self, records: &[LevelRecord]) -> Vec<NewVictory> {
        let mut events = Vec::new();
        let mut committed: Vec<(String, BTreeSet<String>)> = Vec::with_capacity(records.len());

        for record in records {
            if self.baseline_established {
                let recorded = self.recorded.get(&record.level_id);
                // BTreeSet iterates in lexicographic order
                for victor in &record.victors {
                    let already_seen = recorded.is_some_and(|set| set.contains(victor));
                    if !already_seen {
                        events.push(NewVictory {
                            level_id: record.level_id.clone(),
                            victor: victor.clone(),
                            level_name: record.level_name.clone(),
                            creators: record.creators.clone(),
                            difficulty: record.difficulty.clone(),
                        });
                    }
                }
            }
            committed.push((record.level_id.clone(), record.victors.clone()));
        }

        for (level_id, victors) in committed {
            self.recorded.insert(level_id, victors);
        }
        self.baseline_established = true;

        events
    }
}
