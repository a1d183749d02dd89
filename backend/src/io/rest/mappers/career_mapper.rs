use crate::domain::commands::careers::{SubCategoryCommand, SubCategoryPage};
use crate::domain::models::career::{CareerCategory as DomainCategory, SubCategory as DomainSubCategory};
use shared::{CareerCategory, PaginationInfo, SubCategory, SubCategoryListResponse, SubCategoryRequest};

/// Mapper between career DTOs and domain models.
pub struct CareerMapper;

impl CareerMapper {
    pub fn category_to_dto(domain: DomainCategory) -> CareerCategory {
        CareerCategory {
            id: domain.id.to_string(),
            category_name: domain.category_name,
            sub_category: domain.sub_categories.into_iter().map(Self::sub_category_to_dto).collect(),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn sub_category_to_dto(domain: DomainSubCategory) -> SubCategory {
        SubCategory {
            id: domain.id.to_string(),
            category_id: domain.category_id.to_string(),
            sub_category_name: domain.sub_category_name,
            sub_net_profit: domain.sub_net_profit,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_sub_category_command(dto: SubCategoryRequest) -> SubCategoryCommand {
        SubCategoryCommand {
            category_id: dto.category_id,
            sub_category_name: dto.sub_category_name,
            sub_net_profit: dto.sub_net_profit,
        }
    }

    pub fn to_sub_category_list_dto(page: SubCategoryPage) -> SubCategoryListResponse {
        SubCategoryListResponse {
            data: page.sub_categories.into_iter().map(Self::sub_category_to_dto).collect(),
            pagination: PaginationInfo {
                page: page.page.page,
                limit: page.page.limit,
                total: page.total,
                total_pages: page.total_pages,
            },
        }
    }
}
