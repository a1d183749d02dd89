//! # Dashboard Service
//!
//! Composes the KPI, growth, geographic and share-bucket builders into one
//! overview for a `(year, subdistrict)` filter pair.
//!
//! The four parts are independent reads against the member store and run
//! concurrently. If any of them fails the whole overview fails and the
//! remaining futures are dropped; a partial dashboard is never returned.

use std::sync::Arc;
use tracing::{error, info};

use crate::domain::calendar::parse_presentation_year;
use crate::domain::commands::dashboard::DashboardQuery;
use crate::domain::errors::DomainResult;
use crate::domain::geographic_service::GeographicService;
use crate::domain::growth_service::GrowthService;
use crate::domain::kpi_service::KpiService;
use crate::domain::models::dashboard::DashboardOverview;
use crate::domain::models::member::{normalize_criterion, MemberFilter, ALL_SENTINEL};
use crate::domain::shares_distribution_service::SharesDistributionService;
use crate::storage::MemberStorage;

/// Resolve the dashboard year parameter.
///
/// Only an absent parameter or the exact sentinel mean "every year". Any other
/// value, the empty string included, must be a presentation-calendar year.
fn dashboard_year(raw: Option<&str>) -> DomainResult<Option<i32>> {
    match raw {
        None | Some(ALL_SENTINEL) => Ok(None),
        Some(raw) => parse_presentation_year(raw).map(Some),
    }
}

#[derive(Clone)]
pub struct DashboardService {
    kpi: KpiService,
    growth: GrowthService,
    geographic: GeographicService,
    shares: SharesDistributionService,
}

impl DashboardService {
    pub fn new(store: Arc<dyn MemberStorage>) -> Self {
        Self {
            kpi: KpiService::new(store.clone()),
            growth: GrowthService::new(store.clone()),
            geographic: GeographicService::new(store.clone()),
            shares: SharesDistributionService::new(store),
        }
    }

    pub async fn overview(&self, query: DashboardQuery) -> DomainResult<DashboardOverview> {
        info!(
            "Building dashboard overview: account_year={:?}, subdistrict={:?}",
            query.account_year, query.subdistrict
        );

        // Validate before touching the store
        let account_year = dashboard_year(query.account_year.as_deref())?;
        let subdistrict = normalize_criterion(query.subdistrict.as_deref());
        let filter = MemberFilter::for_dashboard(account_year, subdistrict);

        let result = tokio::try_join!(
            self.kpi.snapshot(&filter),
            self.growth.membership_growth(),
            self.geographic.member_count_by_subdistrict(account_year),
            self.shares.shares_distribution(&filter),
        );

        match result {
            Ok((kpi, membership_growth, member_count_by_subdistrict, shares_distribution)) => {
                Ok(DashboardOverview {
                    kpi,
                    membership_growth,
                    member_count_by_subdistrict,
                    shares_distribution,
                })
            }
            Err(e) => {
                error!("Failed to build dashboard overview: {}", e);
                Err(e)
            }
        }
    }
}
