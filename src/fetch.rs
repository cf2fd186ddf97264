//! Remote data sources.
//!
//! The two datasets are fetched independently: a failure in one never
//! prevents the other from loading.

use log::{error, info, warn};
use std::time::{Duration, Instant};

use crate::analysis::{ActiveDevSeries, Ledger};
use crate::config::SourceConfig;
use crate::error::{DashboardError, Result};
use crate::types::Dataset;

/// HTTP client for the commit ledger and active developer feeds.
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: reqwest::Client,
    ledger_url: Option<String>,
    active_devs_url: Option<String>,
}

/// Outcome of loading both datasets; each side fails on its own.
#[derive(Debug)]
pub struct LoadResults {
    pub active_devs: Result<ActiveDevSeries>,
    pub ledger: Result<Ledger>,
}

impl SourceClient {
    pub fn new(config: &SourceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            ledger_url: config.ledger_url.clone(),
            active_devs_url: config.active_devs_url.clone(),
        }
    }

    fn url(&self, dataset: Dataset) -> Result<&str> {
        let url = match dataset {
            Dataset::ActiveDevs => self.active_devs_url.as_deref(),
            Dataset::CommitLedger => self.ledger_url.as_deref(),
        };
        url.filter(|u| !u.trim().is_empty())
            .ok_or(DashboardError::MissingSource(dataset))
    }

    async fn fetch_text(&self, dataset: Dataset) -> Result<String> {
        let url = self.url(dataset)?;
        let start = Instant::now();
        info!("Fetching {} from {}", dataset, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DashboardError::fetch(dataset, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Fetching {} returned HTTP {}", dataset, status);
            return Err(DashboardError::Status {
                dataset,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::fetch(dataset, e))?;
        info!(
            "Fetched {} ({} bytes) in {:.2}s",
            dataset,
            body.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(body)
    }

    /// Fetch and parse the commit ledger.
    pub async fn fetch_ledger(&self) -> Result<Ledger> {
        let text = self.fetch_text(Dataset::CommitLedger).await?;
        let ledger = Ledger::from_csv(&text)?;
        info!(
            "Commit ledger holds {} records up to {}",
            ledger.len(),
            ledger.max_date()
        );
        Ok(ledger)
    }

    /// Fetch and load the active developer series.
    pub async fn fetch_active_devs(&self) -> Result<ActiveDevSeries> {
        let text = self.fetch_text(Dataset::ActiveDevs).await?;
        let series = ActiveDevSeries::from_json(&text)?;
        info!("Active developer series holds {} points", series.points().len());
        Ok(series)
    }

    /// Fetch both datasets concurrently.
    pub async fn load_all(&self) -> LoadResults {
        let (active_devs, ledger) = tokio::join!(self.fetch_active_devs(), self.fetch_ledger());

        if let Err(e) = &active_devs {
            error!("Error fetching active developer data: {}", e);
        }
        if let Err(e) = &ledger {
            error!("Error fetching commit data: {}", e);
        }

        LoadResults { active_devs, ledger }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const LEDGER_CSV: &str = "date,dev,repo,commits\n2024-03-01,alice,foo/bar,5\n2024-01-01,bob,algorand/go-algorand,2\n";

    fn client_for(server: &MockServer) -> SourceClient {
        SourceClient::new(&SourceConfig {
            ledger_url: Some(server.url("/commits.csv")),
            active_devs_url: Some(server.url("/active.json")),
            timeout_secs: 5,
        })
    }

    #[tokio::test]
    async fn test_fetch_ledger() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/commits.csv");
                then.status(200).body(LEDGER_CSV);
            })
            .await;

        let ledger = client_for(&server).fetch_ledger().await.unwrap();
        mock.assert_async().await;
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.max_date().to_string(), "2024-03-01");
    }

    #[tokio::test]
    async fn test_fetch_active_devs() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/active.json");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"2024-01-02": 7, "2024-01-01": 5}"#);
            })
            .await;

        let series = client_for(&server).fetch_active_devs().await.unwrap();
        assert_eq!(series.points().len(), 2);
        assert_eq!(series.points()[0].active_dev_count, 5);
    }

    #[tokio::test]
    async fn test_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/commits.csv");
                then.status(503);
            })
            .await;

        let err = client_for(&server).fetch_ledger().await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Status { dataset: Dataset::CommitLedger, status: 503 }
        ));
    }

    #[tokio::test]
    async fn test_ledger_without_dates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/commits.csv");
                then.status(200).body("date,dev,repo,commits\n");
            })
            .await;

        let err = client_for(&server).fetch_ledger().await.unwrap_err();
        assert!(matches!(err, DashboardError::NoValidDates));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_the_other() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/commits.csv");
                then.status(200).body(LEDGER_CSV);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/active.json");
                then.status(500);
            })
            .await;

        let results = client_for(&server).load_all().await;
        assert!(results.active_devs.is_err());
        assert!(results.ledger.is_ok());
    }

    #[tokio::test]
    async fn test_missing_url() {
        let client = SourceClient::new(&SourceConfig::default());
        let err = client.fetch_active_devs().await.unwrap_err();
        assert!(matches!(err, DashboardError::MissingSource(Dataset::ActiveDevs)));
    }
}
