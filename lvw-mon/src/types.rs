//! Collaborator contracts for the monitor pipeline
//!
//! The two network collaborators are traits so the cycle runner can be
//! exercised in tests with in-memory fakes.

use async_trait::async_trait;
use lvw_common::Result;

/// Produces one snapshot of raw sheet rows, or fails for this cycle.
///
/// A failure aborts the cycle with state untouched; the next scheduled
/// poll retries independently.
#[async_trait]
pub trait SnapshotSource {
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>>;
}

/// Accepts one formatted message for delivery.
///
/// Every outcome is terminal for that message: no retry, no re-queueing.
#[async_trait]
pub trait Notifier {
    async fn send(&self, message: &str) -> Result<()>;
}
