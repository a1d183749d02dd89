use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct SubCategory {
    pub id: Uuid,
    pub category_id: Uuid,
    pub sub_category_name: String,
    pub sub_net_profit: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CareerCategory {
    pub id: Uuid,
    pub category_name: String,
    pub sub_categories: Vec<SubCategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CareerValidationError {
    #[error("Category name cannot be empty")]
    EmptyCategoryName,
    #[error("Sub category name cannot be empty")]
    EmptySubCategoryName,
    #[error("Net profit must be a finite number")]
    InvalidNetProfit,
}
