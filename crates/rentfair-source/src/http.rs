//! HTTP client for a lease-transaction API.

use async_trait::async_trait;
use rentfair_core::Transaction;
use tracing::info;

use crate::{Region, SourceError, TransactionSource, YearMonth};

/// Fetches one district-month per request from `{base_url}/api/transactions`.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// `base_url` should be like `http://localhost:8080` (a trailing slash is trimmed).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn transactions_url(&self) -> String {
        format!("{}/api/transactions", self.base_url)
    }
}

#[async_trait]
impl TransactionSource for HttpSource {
    async fn fetch_month(
        &self,
        region: &Region,
        month: YearMonth,
    ) -> Result<Vec<Transaction>, SourceError> {
        let url = self.transactions_url();

        info!(url = %url, %region, %month, "fetching lease transactions");
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("city", region.city.as_str()),
                ("district", region.district.as_str()),
                ("month", month.to_string().as_str()),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let records: Vec<Transaction> = resp.json().await?;
        info!(%month, count = records.len(), "fetched lease transactions");
        Ok(records)
    }
}
