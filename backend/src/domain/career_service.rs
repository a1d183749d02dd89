use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::commands::careers::{CategoryListQuery, SubCategoryCommand, SubCategoryPage, SubCategoryPageQuery};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::career::{CareerCategory, CareerValidationError, SubCategory};
use crate::domain::models::member::{normalize_criterion, Member};
use crate::storage::CareerStorage;

impl From<CareerValidationError> for DomainError {
    fn from(err: CareerValidationError) -> Self {
        DomainError::InvalidInput(err.to_string())
    }
}

fn parse_id(raw: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::invalid(format!("Invalid id: '{}'", raw)))
}

fn validate_sub_category(command: &SubCategoryCommand) -> Result<(), CareerValidationError> {
    if command.sub_category_name.trim().is_empty() {
        return Err(CareerValidationError::EmptySubCategoryName);
    }
    if !command.sub_net_profit.is_finite() {
        return Err(CareerValidationError::InvalidNetProfit);
    }
    Ok(())
}

/// Career categories and their sub categories
#[derive(Clone)]
pub struct CareerService {
    store: Arc<dyn CareerStorage>,
}

impl CareerService {
    pub fn new(store: Arc<dyn CareerStorage>) -> Self {
        Self { store }
    }

    pub async fn create_category(&self, category_name: String) -> DomainResult<CareerCategory> {
        info!("Creating career category: {}", category_name);

        if category_name.trim().is_empty() {
            return Err(CareerValidationError::EmptyCategoryName.into());
        }
        let compact = Member::compact_name(&category_name);
        if self.store.find_category_by_compact_name(&compact, None).await?.is_some() {
            warn!("Rejected career category: duplicate name {}", category_name);
            return Err(DomainError::conflict("Career category already exists"));
        }

        let now = Utc::now();
        let category = CareerCategory {
            id: Uuid::new_v4(),
            category_name,
            sub_categories: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.store.insert_category(&category).await?;

        Ok(category)
    }

    pub async fn list_categories(&self, query: CategoryListQuery) -> DomainResult<Vec<CareerCategory>> {
        let name_filter = normalize_criterion(query.category_name.as_deref());
        let search = normalize_criterion(query.search.as_deref());
        info!("Listing career categories: name={:?}, search={:?}", name_filter, search);

        Ok(self
            .store
            .list_categories(name_filter.as_deref(), search.as_deref())
            .await?)
    }

    pub async fn get_category(&self, id: &str) -> DomainResult<CareerCategory> {
        let id = parse_id(id)?;
        self.store.get_category(id).await?.ok_or_else(|| {
            warn!("Career category not found: {}", id);
            DomainError::not_found("Career category not found")
        })
    }

    pub async fn update_category(&self, id: &str, category_name: String) -> DomainResult<CareerCategory> {
        let id = parse_id(id)?;
        info!("Updating career category: {}", id);

        if category_name.trim().is_empty() {
            return Err(CareerValidationError::EmptyCategoryName.into());
        }
        let mut category = self
            .store
            .get_category(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Career category not found"))?;

        let compact = Member::compact_name(&category_name);
        if self.store.find_category_by_compact_name(&compact, Some(id)).await?.is_some() {
            warn!("Rejected career category rename: duplicate name {}", category_name);
            return Err(DomainError::conflict("Career category already exists"));
        }

        category.category_name = category_name;
        category.updated_at = Utc::now();
        self.store.update_category(&category).await?;

        Ok(category)
    }

    /// Delete a category and all of its sub categories
    pub async fn delete_category(&self, id: &str) -> DomainResult<()> {
        let id = parse_id(id)?;
        info!("Deleting career category: {}", id);

        if !self.store.delete_category(id).await? {
            warn!("Career category not found for delete: {}", id);
            return Err(DomainError::not_found("Career category not found"));
        }
        Ok(())
    }

    pub async fn create_sub_category(&self, command: SubCategoryCommand) -> DomainResult<SubCategory> {
        info!("Creating sub category: {}", command.sub_category_name);

        let category_id = parse_id(&command.category_id)?;
        validate_sub_category(&command)?;
        if self.store.get_category(category_id).await?.is_none() {
            warn!("Sub category references missing category {}", category_id);
            return Err(DomainError::not_found("Career category not found"));
        }

        let now = Utc::now();
        let sub_category = SubCategory {
            id: Uuid::new_v4(),
            category_id,
            sub_category_name: command.sub_category_name,
            sub_net_profit: command.sub_net_profit,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_sub_category(&sub_category).await?;

        Ok(sub_category)
    }

    pub async fn list_sub_categories(&self) -> DomainResult<Vec<SubCategory>> {
        info!("Listing sub categories");
        Ok(self.store.list_sub_categories().await?)
    }

    pub async fn get_sub_category(&self, id: &str) -> DomainResult<SubCategory> {
        let id = parse_id(id)?;
        self.store.get_sub_category(id).await?.ok_or_else(|| {
            warn!("Sub category not found: {}", id);
            DomainError::not_found("Sub category not found")
        })
    }

    pub async fn list_sub_categories_by_category(
        &self,
        category_id: &str,
        query: SubCategoryPageQuery,
    ) -> DomainResult<SubCategoryPage> {
        let category_id = parse_id(category_id)?;
        let search = normalize_criterion(query.search.as_deref());
        let page = query.page;
        info!("Listing sub categories of {}: search={:?}, page={}", category_id, search, page.page);

        let (sub_categories, total) = self
            .store
            .list_sub_categories_by_category(category_id, search.as_deref(), page.offset(), i64::from(page.limit))
            .await?;

        Ok(SubCategoryPage {
            sub_categories,
            page,
            total,
            total_pages: page.total_pages(total),
        })
    }

    pub async fn update_sub_category(&self, id: &str, command: SubCategoryCommand) -> DomainResult<SubCategory> {
        let id = parse_id(id)?;
        info!("Updating sub category: {}", id);

        let category_id = parse_id(&command.category_id)?;
        validate_sub_category(&command)?;

        let mut sub_category = self
            .store
            .get_sub_category(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Sub category not found"))?;
        if self.store.get_category(category_id).await?.is_none() {
            return Err(DomainError::not_found("Career category not found"));
        }

        let compact = Member::compact_name(&command.sub_category_name);
        if self.store.find_sub_category_by_compact_name(&compact, Some(id)).await?.is_some() {
            warn!("Rejected sub category rename: duplicate name {}", command.sub_category_name);
            return Err(DomainError::conflict("Sub category already exists"));
        }

        sub_category.category_id = category_id;
        sub_category.sub_category_name = command.sub_category_name;
        sub_category.sub_net_profit = command.sub_net_profit;
        sub_category.updated_at = Utc::now();
        self.store.update_sub_category(&sub_category).await?;

        Ok(sub_category)
    }

    pub async fn delete_sub_category(&self, id: &str) -> DomainResult<()> {
        let id = parse_id(id)?;
        info!("Deleting sub category: {}", id);

        if !self.store.delete_sub_category(id).await? {
            return Err(DomainError::not_found("Sub category not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::PageRequest;
    use crate::storage::test_utils::TestEnvironment;

    async fn setup() -> (TestEnvironment, CareerService) {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let service = CareerService::new(Arc::new(env.careers.clone()));
        (env, service)
    }

    fn sub(category_id: Uuid, name: &str) -> SubCategoryCommand {
        SubCategoryCommand {
            category_id: category_id.to_string(),
            sub_category_name: name.to_string(),
            sub_net_profit: 15000.0,
        }
    }

    #[tokio::test]
    async fn test_category_lifecycle() {
        let (_env, service) = setup().await;

        let farming = service.create_category("Rice Farming".to_string()).await.unwrap();
        let err = service.create_category("RiceFarming".to_string()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        let err = service.create_category("  ".to_string()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let renamed = service
            .update_category(&farming.id.to_string(), "Rice  Farming".to_string())
            .await
            .unwrap();
        assert_eq!(renamed.category_name, "Rice  Farming");

        service.create_sub_category(sub(farming.id, "Jasmine rice")).await.unwrap();
        let loaded = service.get_category(&farming.id.to_string()).await.unwrap();
        assert_eq!(loaded.sub_categories.len(), 1);

        service.delete_category(&farming.id.to_string()).await.unwrap();
        assert!(service.list_sub_categories().await.unwrap().is_empty());
        let err = service.delete_category(&farming.id.to_string()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_sub_category_rules() {
        let (_env, service) = setup().await;
        let farming = service.create_category("Farming".to_string()).await.unwrap();

        let err = service.create_sub_category(sub(Uuid::new_v4(), "Orphan")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let rice = service.create_sub_category(sub(farming.id, "Rice")).await.unwrap();
        let corn = service.create_sub_category(sub(farming.id, "Corn")).await.unwrap();

        let err = service
            .update_sub_category(&corn.id.to_string(), sub(farming.id, "R ice"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let updated = service
            .update_sub_category(&rice.id.to_string(), sub(farming.id, "Rice"))
            .await
            .unwrap();
        assert_eq!(updated.created_at, rice.created_at);

        let page = service
            .list_sub_categories_by_category(
                &farming.id.to_string(),
                SubCategoryPageQuery {
                    search: None,
                    page: PageRequest { page: 1, limit: 1 },
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.sub_categories.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_ids_are_invalid_input() {
        let (_env, service) = setup().await;
        assert!(matches!(service.get_category("nope").await.unwrap_err(), DomainError::InvalidInput(_)));
        assert!(matches!(service.get_sub_category("nope").await.unwrap_err(), DomainError::InvalidInput(_)));
    }
}
