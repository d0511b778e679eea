//! Published-sheet TSV client

use crate::types::SnapshotSource;
use async_trait::async_trait;
use lvw_common::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Request timeout for sheet fetches
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "levelwatch/0.1.0";

/// HTTP client for the published TSV export of the level sheet.
pub struct SheetClient {
    http_client: reqwest::Client,
    url: String,
}

impl SheetClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SnapshotSource for SheetClient {
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>> {
        debug!(url = %self.url, "fetching sheet snapshot");

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("sheet request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("sheet returned status {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("failed to read sheet response: {e}")))?;

        Ok(parse_tsv(&body))
    }
}

/// Split a TSV body into rows of fields.
///
/// The published export never emits embedded tabs or newlines inside a
/// field, so plain splitting suffices; CRLF line endings are normalized.
pub fn parse_tsv(body: &str) -> Vec<Vec<String>> {
    body.lines()
        .map(|line| {
            line.trim_end_matches('\r')
                .split('\t')
                .map(str::to_string)
                .collect()
        })
        .collect()
}
