use std::sync::Arc;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::dashboard::{percent_of, SubdistrictSlice};
use crate::domain::models::member::MemberFilter;
use crate::storage::MemberStorage;

/// Groups members by subdistrict.
#[derive(Clone)]
pub struct GeographicService {
    store: Arc<dyn MemberStorage>,
}

impl GeographicService {
    pub fn new(store: Arc<dyn MemberStorage>) -> Self {
        Self { store }
    }

    /// Count and two-decimal share per literal subdistrict value.
    ///
    /// Only the account year narrows the set; the subdistrict is the grouping
    /// key, so there is no subdistrict filter here. Subdistricts without
    /// members are absent.
    pub async fn member_count_by_subdistrict(&self, account_year: Option<i32>) -> DomainResult<Vec<SubdistrictSlice>> {
        info!("Computing subdistrict distribution: account_year={:?}", account_year);

        let filter = MemberFilter::for_dashboard(account_year, None);
        let groups = self.store.count_by_subdistrict(&filter).await?;
        let total = self.store.count_members(&filter).await?;

        Ok(groups
            .into_iter()
            .map(|(subdistrict, count)| SubdistrictSlice {
                subdistrict,
                count,
                percent: percent_of(count, total, 2),
            })
            .collect())
    }
}
