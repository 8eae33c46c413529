use crate::domain::directory::TeamDirectory;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

/// Team id (lowercase) -> "W-L (conf W-L)".
pub type WinLossMap = BTreeMap<String, String>;

/// Team id -> external power rank.
pub type PowerRankMap = BTreeMap<String, i64>;

#[async_trait::async_trait]
pub trait WinLossProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_win_loss(&self) -> Result<WinLossMap>;
}

#[async_trait::async_trait]
pub trait PowerRankProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_power_ranks(&self, directory: &TeamDirectory) -> Result<PowerRankMap>;
}

pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build http client")
}

/// Single GET, no retries. Non-2xx, timeouts and undecodable bodies are all errors.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    what: &str,
) -> Result<T> {
    let res = http
        .get(url)
        .send()
        .await
        .with_context(|| format!("{what} request failed"))?;

    let status = res.status();
    let text = res
        .text()
        .await
        .with_context(|| format!("failed to read {what} response"))?;
    if !status.is_success() {
        anyhow::bail!("{what} HTTP {status}");
    }

    serde_json::from_str::<T>(&text).with_context(|| format!("failed to decode {what} response"))
}
