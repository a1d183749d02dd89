//! Headline numbers for the dashboard.

use chrono::{Datelike, Local, NaiveDate};
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::dashboard::{round_to, KpiSnapshot, MembersThisYearStats};
use crate::domain::models::member::MemberFilter;
use crate::storage::MemberStorage;

/// `total_shares / total_members` rounded to 2 decimals, 0 when there are no members.
pub fn average_shares_per_person(total_shares: f64, total_members: i64) -> f64 {
    if total_members == 0 {
        return 0.0;
    }
    round_to(total_shares / total_members as f64, 2)
}

#[derive(Clone)]
pub struct KpiService {
    store: Arc<dyn MemberStorage>,
}

impl KpiService {
    pub fn new(store: Arc<dyn MemberStorage>) -> Self {
        Self { store }
    }

    pub async fn total_members(&self, filter: &MemberFilter) -> DomainResult<i64> {
        Ok(self.store.count_members(filter).await?)
    }

    pub async fn total_shares(&self, filter: &MemberFilter) -> DomainResult<f64> {
        Ok(self.store.sum_shares_value(filter).await?)
    }

    /// New members this calendar year versus last year, ignoring every filter.
    pub async fn members_this_year(&self) -> DomainResult<MembersThisYearStats> {
        self.members_this_year_at(Local::now().date_naive()).await
    }

    pub async fn members_this_year_at(&self, today: NaiveDate) -> DomainResult<MembersThisYearStats> {
        let current_year = today.year();
        let current_count = self.store.count_joined_in_year(current_year).await?;
        let last_year_count = self.store.count_joined_in_year(current_year - 1).await?;

        Ok(MembersThisYearStats {
            current_count,
            last_year_count,
            delta: current_count - last_year_count,
        })
    }

    /// Full KPI block. Totals honour `filter`; the this-year comparison does not.
    pub async fn snapshot(&self, filter: &MemberFilter) -> DomainResult<KpiSnapshot> {
        info!("Computing KPI snapshot: filter={:?}", filter);

        let total_members = self.total_members(filter).await?;
        let total_shares = self.total_shares(filter).await?;
        let members_this_year = self.members_this_year().await?;

        Ok(KpiSnapshot {
            total_members,
            total_shares,
            average_shares_per_person: average_shares_per_person(total_shares, total_members),
            members_this_year,
        })
    }
}
