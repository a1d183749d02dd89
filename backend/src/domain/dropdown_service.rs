use std::sync::Arc;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::member::LocationField;
use crate::storage::MemberStorage;

/// All three location lists at once
#[derive(Debug, Clone, PartialEq)]
pub struct LocationOptions {
    pub subdistricts: Vec<String>,
    pub districts: Vec<String>,
    pub provinces: Vec<String>,
}

/// Location reference data drawn from the member records
#[derive(Clone)]
pub struct DropdownService {
    store: Arc<dyn MemberStorage>,
}

impl DropdownService {
    pub fn new(store: Arc<dyn MemberStorage>) -> Self {
        Self { store }
    }

    /// Distinct non-empty values of one location field, ascending
    pub async fn values(&self, field: LocationField) -> DomainResult<Vec<String>> {
        info!("Listing distinct {} values", field.column());
        Ok(self.store.distinct_values(field).await?)
    }

    pub async fn full(&self) -> DomainResult<LocationOptions> {
        let (subdistricts, districts, provinces) = tokio::try_join!(
            self.values(LocationField::Subdistrict),
            self.values(LocationField::District),
            self.values(LocationField::Province),
        )?;

        Ok(LocationOptions {
            subdistricts,
            districts,
            provinces,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{sample_member, TestEnvironment};

    #[tokio::test]
    async fn test_full_dropdown() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let mut other = sample_member("2", "Chang Phueak", 1.0);
        other.province = "Lamphun".to_string();
        env.members.insert_member(&sample_member("1", "Suthep", 1.0)).await.unwrap();
        env.members.insert_member(&other).await.unwrap();

        let service = DropdownService::new(Arc::new(env.members.clone()));
        let options = service.full().await.unwrap();

        assert_eq!(options.subdistricts, vec!["Chang Phueak", "Suthep"]);
        assert_eq!(options.districts, vec!["Mueang Chiang Mai"]);
        assert_eq!(options.provinces, vec!["Chiang Mai", "Lamphun"]);
    }
}
