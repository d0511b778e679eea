//! Common error types for levelwatch

use thiserror::Error;

/// Common result type for levelwatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the levelwatch binaries
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sheet snapshot could not be fetched or read
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Webhook accepted the request but did not report success
    #[error("Delivery failed with status {status}: {body}")]
    Delivery { status: u16, body: String },

    /// Webhook request failed before any status was received
    #[error("Delivery transport error: {0}")]
    DeliveryTransport(String),
}

impl Error {
    /// True for failures of a single delivery attempt. These are terminal
    /// for the affected event and must not abort the rest of the cycle.
    pub fn is_delivery(&self) -> bool {
        matches!(self, Error::Delivery { .. } | Error::DeliveryTransport(_))
    }
}
