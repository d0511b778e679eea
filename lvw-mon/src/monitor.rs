//! Poll-cycle runner
//!
//! One cycle: fetch a snapshot, rebuild the mention map, parse records,
//! diff against the ledger, then format and deliver each new victory in
//! order. Cycles run strictly serially: the loop awaits a full cycle
//! before the next interval tick, so a slow cycle delays the next one
//! instead of overlapping it.

use crate::diff::VictorLedger;
use crate::notify::format_victory;
use crate::types::{Notifier, SnapshotSource};
use chrono::{DateTime, Utc};
use lvw_common::mentions::build_mention_map;
use lvw_common::record::parse_rows;
use lvw_common::schema::SheetSchema;
use lvw_common::tier::TierTable;
use lvw_common::{Error, Result};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

/// Summary of one completed check-cycle.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub checked_at: DateTime<Utc>,
    pub levels_seen: usize,
    pub events_emitted: usize,
    pub deliveries_failed: usize,
    /// True when this cycle established the baseline
    pub baseline: bool,
}

/// Owns the ledger and drives the fetch → diff → notify pipeline.
pub struct Monitor<S, N> {
    source: S,
    notifier: N,
    schema: SheetSchema,
    tiers: TierTable,
    ledger: VictorLedger,
}

impl<S: SnapshotSource, N: Notifier> Monitor<S, N> {
    pub fn new(source: S, notifier: N) -> Self {
        Self {
            source,
            notifier,
            schema: SheetSchema::default(),
            tiers: TierTable::default(),
            ledger: VictorLedger::new(),
        }
    }

    /// Ledger access for assertions in tests.
    pub fn ledger(&self) -> &VictorLedger {
        &self.ledger
    }

    /// Run one check-cycle.
    ///
    /// A fetch failure (or an empty/header-only snapshot) aborts the cycle
    /// with the ledger untouched. Delivery failures are logged per event
    /// and never abort the cycle: state for this poll is already committed
    /// and each remaining event still gets its attempt.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let checked_at = Utc::now();
        info!(at = %checked_at.format("%Y-%m-%d %H:%M:%S"), "checking for changes");

        let rows = self.source.fetch_rows().await?;
        if rows.len() < 2 {
            return Err(Error::Fetch("no data rows in sheet snapshot".to_string()));
        }

        let mentions = build_mention_map(&rows, &self.schema);
        let records = parse_rows(&rows, &self.schema);

        let baseline = !self.ledger.baseline_established();
        let events = self.ledger.process_snapshot(&records);

        let mut deliveries_failed = 0;
        for event in &events {
            info!(
                level = %event.level_name,
                victor = %event.victor,
                "new victor detected"
            );
            let tier = self.tiers.classify(&event.difficulty);
            let message = format_victory(event, &mentions, &tier);
            match self.notifier.send(&message).await {
                Ok(()) => info!(victor = %event.victor, "notification sent"),
                Err(err) if err.is_delivery() => {
                    deliveries_failed += 1;
                    warn!(victor = %event.victor, %err, "notification delivery failed");
                }
                Err(err) => {
                    deliveries_failed += 1;
                    error!(victor = %event.victor, %err, "unexpected notifier error");
                }
            }
        }

        Ok(CycleOutcome {
            checked_at,
            levels_seen: records.len(),
            events_emitted: events.len(),
            deliveries_failed,
            baseline,
        })
    }

    /// Poll forever: an immediate first cycle, then one per interval tick.
    pub async fn run(&mut self, check_interval: Duration) {
        let mut ticker = interval(check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match self.run_cycle().await {
                Ok(outcome) if outcome.baseline => {
                    info!(
                        levels = outcome.levels_seen,
                        "initial check completed - baseline established"
                    );
                }
                Ok(outcome) => {
                    info!(
                        levels = outcome.levels_seen,
                        new_victories = outcome.events_emitted,
                        failed_deliveries = outcome.deliveries_failed,
                        "check completed"
                    );
                }
                Err(err) => {
                    error!(%err, "check failed; retrying at next interval");
                }
            }
        }
    }
}
