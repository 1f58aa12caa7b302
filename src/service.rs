//! Catalog resolution: try the remote datastore, fall back to the static
//! dataset.
//!
//! The four operations share one control flow, captured once in
//! [`CatalogService::resolve`] instead of being copied per endpoint:
//!
//! - remote unconfigured → answer from the static dataset
//! - remote query `Err` → log to stderr, answer from the static dataset
//! - remote query `Ok(None)` → a genuine "not found", surfaced as-is
//! - remote query `Ok(Some(_))` → served as-is

use std::future::Future;

use crate::fallback::StaticCatalog;
use crate::models::{CompanyDetail, ResearchEntry, Sector};
use crate::remote::RemoteSource;

pub struct CatalogService {
    remote: Option<Box<dyn RemoteSource>>,
    local: StaticCatalog,
}

impl CatalogService {
    pub fn new(remote: Option<Box<dyn RemoteSource>>) -> Self {
        Self {
            remote,
            local: StaticCatalog::new(),
        }
    }

    pub async fn sectors(&self) -> Vec<Sector> {
        let remote = self.remote.as_ref().map(|r| async move {
            // Listing never reports "not found"; an empty catalog is a
            // valid remote answer.
            r.sectors().await.map(Some)
        });

        self.resolve("sectors", remote, || Some(self.local.sectors()))
            .await
            .unwrap_or_default()
    }

    pub async fn sector_by_slug(&self, slug: &str) -> Option<Sector> {
        let remote = self.remote.as_ref().map(|r| r.sector_by_slug(slug));
        self.resolve("sector", remote, || self.local.sector_by_slug(slug))
            .await
    }

    pub async fn company_by_slug(&self, slug: &str) -> Option<CompanyDetail> {
        let remote = self.remote.as_ref().map(|r| r.company_by_slug(slug));
        self.resolve("company", remote, || self.local.company_by_slug(slug))
            .await
    }

    /// `None` when the company does not exist; `Some(vec![])` when it
    /// exists with no research entries.
    pub async fn research_for_company(&self, slug: &str) -> Option<Vec<ResearchEntry>> {
        let remote = self.remote.as_ref().map(|r| r.research_for_company(slug));
        self.resolve("research", remote, || {
            self.local.research_for_company(slug)
        })
        .await
    }

    /// The shared try-remote / fall-back-local branch.
    ///
    /// A successful remote answer — found or not — is final; only an
    /// upstream failure reaches the static dataset.
    async fn resolve<T, F>(
        &self,
        what: &str,
        remote: Option<F>,
        local: impl FnOnce() -> Option<T>,
    ) -> Option<T>
    where
        F: Future<Output = anyhow::Result<Option<T>>>,
    {
        if let Some(query) = remote {
            match query.await {
                Ok(answer) => return answer,
                Err(err) => {
                    eprintln!(
                        "warning: remote {} query failed, using fallback dataset: {:#}",
                        what, err
                    );
                }
            }
        }

        local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use async_trait::async_trait;

    /// Remote that fails every query, as a dead or misconfigured
    /// datastore would.
    struct BrokenRemote;

    #[async_trait]
    impl RemoteSource for BrokenRemote {
        async fn sectors(&self) -> Result<Vec<Sector>> {
            bail!("connection refused")
        }
        async fn sector_by_slug(&self, _slug: &str) -> Result<Option<Sector>> {
            bail!("connection refused")
        }
        async fn company_by_slug(&self, _slug: &str) -> Result<Option<CompanyDetail>> {
            bail!("connection refused")
        }
        async fn research_for_company(&self, _slug: &str) -> Result<Option<Vec<ResearchEntry>>> {
            bail!("connection refused")
        }
    }

    /// Remote that answers every lookup with a deliberate "not found".
    struct EmptyRemote;

    #[async_trait]
    impl RemoteSource for EmptyRemote {
        async fn sectors(&self) -> Result<Vec<Sector>> {
            Ok(Vec::new())
        }
        async fn sector_by_slug(&self, _slug: &str) -> Result<Option<Sector>> {
            Ok(None)
        }
        async fn company_by_slug(&self, _slug: &str) -> Result<Option<CompanyDetail>> {
            Ok(None)
        }
        async fn research_for_company(&self, _slug: &str) -> Result<Option<Vec<ResearchEntry>>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn unconfigured_remote_serves_static_dataset() {
        let service = CatalogService::new(None);
        let sectors = service.sectors().await;
        assert_eq!(sectors.len(), 6);
        assert!(service.sector_by_slug("yield").await.is_some());
    }

    #[tokio::test]
    async fn remote_failure_falls_back_silently() {
        let service = CatalogService::new(Some(Box::new(BrokenRemote)));

        let sectors = service.sectors().await;
        assert_eq!(sectors.len(), 6);

        let detail = service.company_by_slug("coinbase").await.unwrap();
        assert_eq!(detail.sector_name, "Exchanges / On-Off Ramps");

        let research = service.research_for_company("coinbase").await.unwrap();
        assert_eq!(research.len(), 1);
    }

    #[tokio::test]
    async fn remote_not_found_is_not_masked_by_fallback() {
        // The static dataset knows "coinbase", but a successful remote
        // query that matched nothing must win.
        let service = CatalogService::new(Some(Box::new(EmptyRemote)));

        assert!(service.sector_by_slug("yield").await.is_none());
        assert!(service.company_by_slug("coinbase").await.is_none());
        assert!(service.research_for_company("coinbase").await.is_none());
        assert!(service.sectors().await.is_empty());
    }

    #[tokio::test]
    async fn fallback_distinguishes_missing_company_from_empty_research() {
        let service = CatalogService::new(None);

        let binance = service.research_for_company("binance").await;
        assert_eq!(binance, Some(Vec::new()));

        assert!(service.research_for_company("unknown-slug").await.is_none());
    }
}
