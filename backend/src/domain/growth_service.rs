use std::sync::Arc;
use tracing::info;

use crate::domain::calendar::to_presentation_year;
use crate::domain::errors::DomainResult;
use crate::domain::models::dashboard::GrowthPoint;
use crate::storage::MemberStorage;

/// Builds the membership growth series. Always unfiltered.
#[derive(Clone)]
pub struct GrowthService {
    store: Arc<dyn MemberStorage>,
}

impl GrowthService {
    pub fn new(store: Arc<dyn MemberStorage>) -> Self {
        Self { store }
    }

    /// Member count per join year in presentation calendar, ascending.
    ///
    /// Members without a joining date are left out.
    pub async fn membership_growth(&self) -> DomainResult<Vec<GrowthPoint>> {
        info!("Computing membership growth");

        let mut points: Vec<GrowthPoint> = self
            .store
            .count_by_join_year()
            .await?
            .into_iter()
            .map(|(year, count)| GrowthPoint {
                presentation_year: to_presentation_year(year),
                count,
            })
            .collect();
        points.sort_by_key(|point| point.presentation_year);

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{sample_member, TestEnvironment};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_growth_converts_years_and_skips_missing_dates() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let joined = [
            ("1", NaiveDate::from_ymd_opt(2025, 1, 1)),
            ("2", NaiveDate::from_ymd_opt(2023, 8, 9)),
            ("3", NaiveDate::from_ymd_opt(2025, 11, 30)),
            ("4", None),
        ];
        for (id, date) in joined {
            let mut member = sample_member(id, "Suthep", 100.0);
            member.joining_date = date;
            env.members.insert_member(&member).await.unwrap();
        }

        let service = GrowthService::new(Arc::new(env.members.clone()));
        let growth = service.membership_growth().await.unwrap();

        assert_eq!(
            growth,
            vec![
                GrowthPoint { presentation_year: 2566, count: 1 },
                GrowthPoint { presentation_year: 2568, count: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn test_growth_empty_store() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let service = GrowthService::new(Arc::new(env.members.clone()));
        assert!(service.membership_growth().await.unwrap().is_empty());
    }
}
