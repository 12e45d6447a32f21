use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;

use crate::error::AppError;
use crate::portals::{DescriptorAdapter, ListingRecord, Portal, SiteAdapter, SourceError};

/// Merged outcome of one search across several portals.
#[derive(Debug, Default, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<ListingRecord>,
    pub errors: BTreeMap<Portal, String>,
}

/// Fans a query out to portal adapters and merges their independent outcomes.
pub struct Aggregator {
    adapters: Vec<Arc<dyn SiteAdapter>>,
    timeout: Option<Duration>,
}

impl Aggregator {
    pub fn new(adapters: Vec<Arc<dyn SiteAdapter>>) -> Self {
        Self {
            adapters,
            timeout: None,
        }
    }

    /// Build descriptor-driven adapters for every known portal, live URLs.
    pub fn live() -> Result<Self, SourceError> {
        let adapters = Portal::ALL
            .iter()
            .map(|portal| {
                DescriptorAdapter::new(portal.descriptor())
                    .map(|a| Arc::new(a) as Arc<dyn SiteAdapter>)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(adapters))
    }

    /// Bound each adapter call. `None` lets a hung portal hold only its own slot.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn portals(&self) -> Vec<Portal> {
        self.adapters.iter().map(|a| a.portal()).collect()
    }

    fn adapter(&self, portal: Portal) -> Option<&Arc<dyn SiteAdapter>> {
        self.adapters.iter().find(|a| a.portal() == portal)
    }

    /// Query every requested portal concurrently. Results keep the requested
    /// portal order, then each portal's document order. A failing portal only
    /// adds an entry to `errors`.
    pub async fn search(&self, query: &str, sites: &[Portal]) -> Result<SearchOutcome, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest("Missing search query".to_string()));
        }
        if sites.is_empty() {
            return Err(AppError::BadRequest("No portals requested".to_string()));
        }

        let mut selected: Vec<&dyn SiteAdapter> = Vec::with_capacity(sites.len());
        for &portal in sites {
            if selected.iter().any(|a| a.portal() == portal) {
                continue;
            }
            let adapter = self
                .adapter(portal)
                .ok_or_else(|| AppError::BadRequest(format!("Unsupported portal: {portal}")))?;
            selected.push(adapter.as_ref());
        }

        tracing::info!(query, portals = selected.len(), "Searching external portals");

        let calls = selected.iter().map(|adapter| self.call(*adapter, query));
        let settled = join_all(calls).await;

        let mut outcome = SearchOutcome::default();
        for (adapter, result) in selected.iter().zip(settled) {
            let portal = adapter.portal();
            match result {
                Ok(listings) => {
                    tracing::debug!(portal = %portal, count = listings.len(), "Portal search succeeded");
                    outcome.results.extend(listings);
                }
                Err(e) => {
                    tracing::warn!(portal = %portal, error = %e, "Portal search failed");
                    outcome.errors.insert(portal, e.to_string());
                }
            }
        }

        tracing::info!(
            query,
            results = outcome.results.len(),
            failed = outcome.errors.len(),
            "External search completed"
        );
        Ok(outcome)
    }

    async fn call(
        &self,
        adapter: &dyn SiteAdapter,
        query: &str,
    ) -> Result<Vec<ListingRecord>, SourceError> {
        match self.timeout {
            Some(after) => tokio::time::timeout(after, adapter.fetch_listings(query))
                .await
                .unwrap_or_else(|_| {
                    Err(SourceError::Timeout {
                        portal: adapter.portal(),
                        after,
                    })
                }),
            None => adapter.fetch_listings(query).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portals::{COMPANY_NOT_SPECIFIED, ListingKind};
    use async_trait::async_trait;

    enum Behavior {
        Yield(Vec<&'static str>),
        Fail,
        Hang,
    }

    struct FakeAdapter {
        portal: Portal,
        behavior: Behavior,
    }

    impl FakeAdapter {
        fn boxed(portal: Portal, behavior: Behavior) -> Arc<dyn SiteAdapter> {
            Arc::new(Self { portal, behavior })
        }
    }

    #[async_trait]
    impl SiteAdapter for FakeAdapter {
        fn portal(&self) -> Portal {
            self.portal
        }

        async fn fetch_listings(&self, _query: &str) -> Result<Vec<ListingRecord>, SourceError> {
            match &self.behavior {
                Behavior::Yield(titles) => Ok(titles
                    .iter()
                    .map(|t| ListingRecord {
                        title: t.to_string(),
                        link: "#".to_string(),
                        company: COMPANY_NOT_SPECIFIED.to_string(),
                        source: self.portal,
                        kind: ListingKind::External,
                    })
                    .collect()),
                Behavior::Fail => Err(SourceError::Fetch {
                    portal: self.portal,
                    message: "returned 503 Service Unavailable".to_string(),
                }),
                Behavior::Hang => std::future::pending().await,
            }
        }
    }

    fn titles(outcome: &SearchOutcome) -> Vec<&str> {
        outcome.results.iter().map(|l| l.title.as_str()).collect()
    }

    #[tokio::test]
    async fn partial_failure_keeps_successful_portal() {
        let aggregator = Aggregator::new(vec![
            FakeAdapter::boxed(Portal::Empleos, Behavior::Fail),
            FakeAdapter::boxed(Portal::MiFuturo, Behavior::Yield(vec!["a", "b", "c"])),
        ]);

        let outcome = aggregator
            .search("contador", &[Portal::Empleos, Portal::MiFuturo])
            .await
            .unwrap();

        assert_eq!(titles(&outcome), vec!["a", "b", "c"]);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[&Portal::Empleos].contains("503"));
    }

    #[tokio::test]
    async fn results_follow_requested_order_and_sum_counts() {
        let aggregator = Aggregator::new(vec![
            FakeAdapter::boxed(Portal::Empleos, Behavior::Yield(vec!["e1", "e2"])),
            FakeAdapter::boxed(Portal::MiFuturo, Behavior::Yield(vec!["m1"])),
        ]);

        let outcome = aggregator
            .search("dev", &[Portal::MiFuturo, Portal::Empleos, Portal::MiFuturo])
            .await
            .unwrap();

        assert_eq!(titles(&outcome), vec!["m1", "e1", "e2"]);
        assert!(outcome.errors.is_empty());
    }

    #[tokio::test]
    async fn all_failures_return_empty_results_with_full_error_map() {
        let aggregator = Aggregator::new(vec![
            FakeAdapter::boxed(Portal::Empleos, Behavior::Fail),
            FakeAdapter::boxed(Portal::MiFuturo, Behavior::Fail),
        ]);

        let outcome = aggregator.search("dev", &Portal::ALL).await.unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(
            outcome.errors.keys().copied().collect::<Vec<_>>(),
            vec![Portal::Empleos, Portal::MiFuturo]
        );
    }

    #[tokio::test]
    async fn hung_portal_times_out_without_blocking_others() {
        let aggregator = Aggregator::new(vec![
            FakeAdapter::boxed(Portal::Empleos, Behavior::Hang),
            FakeAdapter::boxed(Portal::MiFuturo, Behavior::Yield(vec!["m1", "m2", "m3"])),
        ])
        .with_timeout(Some(Duration::from_millis(50)));

        let outcome = aggregator.search("dev", &Portal::ALL).await.unwrap();
        assert_eq!(outcome.results.len(), 3);
        assert!(outcome.errors[&Portal::Empleos].contains("did not respond within 50ms"));
    }

    #[tokio::test]
    async fn rejects_missing_query_and_unregistered_portal() {
        let aggregator = Aggregator::new(vec![FakeAdapter::boxed(
            Portal::Empleos,
            Behavior::Yield(vec!["e1"]),
        )]);

        assert!(matches!(
            aggregator.search("   ", &[Portal::Empleos]).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            aggregator.search("dev", &[Portal::MiFuturo]).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            aggregator.search("dev", &[]).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
