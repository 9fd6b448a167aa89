use async_trait::async_trait;

use crate::domain::LiveMatch;
use crate::error::ProviderError;
use crate::stats::RawStats;

/// Upstream source of live fixtures and their raw statistics.
///
/// Implementations own whatever session they need (HTTP client, browser,
/// socket); `shutdown` releases it and is awaited on every scheduler exit path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn list_live_matches(&self) -> Result<Vec<LiveMatch>, ProviderError>;

    /// Raw statistics record, passed untouched to the normalizer
    async fn get_match_stats(&self, match_id: &str) -> Result<RawStats, ProviderError>;

    async fn shutdown(&self) {}
}
