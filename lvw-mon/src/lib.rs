//! lvw-mon - Sheet Victor Monitor
//!
//! Polls the published level sheet on a fixed interval, diffs each level's
//! victor list against the previous poll, and posts one webhook
//! notification per newly listed victor.

pub mod diff;
pub mod monitor;
pub mod notify;
pub mod sheet_client;
pub mod types;
pub mod webhook_client;
