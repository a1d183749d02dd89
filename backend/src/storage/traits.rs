//! # Storage Traits
//!
//! Storage abstractions consumed by the domain layer. Services hold these as
//! `Arc<dyn ...>` so the SQLite repositories can be swapped for a stub in
//! tests or another backend later.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::admin::Admin;
use crate::domain::models::career::{CareerCategory, SubCategory};
use crate::domain::models::member::{LocationField, Member, MemberFilter, ShareValueRange};

/// Read and write operations over the member collection
#[async_trait]
pub trait MemberStorage: Send + Sync {
    /// Count members matching the filter
    async fn count_members(&self, filter: &MemberFilter) -> Result<i64>;

    /// Sum of `shares_value` over matching members, 0 when nothing matches
    async fn sum_shares_value(&self, filter: &MemberFilter) -> Result<f64>;

    /// Page of matching members ordered by `LENGTH(member_id)`, then `member_id`
    async fn list_members(&self, filter: &MemberFilter, offset: i64, limit: i64) -> Result<Vec<Member>>;

    /// Matching members grouped by literal subdistrict value
    async fn count_by_subdistrict(&self, filter: &MemberFilter) -> Result<Vec<(String, i64)>>;

    /// All members with a joining date, grouped by internal-calendar join year, ascending
    async fn count_by_join_year(&self) -> Result<Vec<(i32, i64)>>;

    /// Members whose joining date falls in the given internal-calendar year
    async fn count_joined_in_year(&self, year: i32) -> Result<i64>;

    /// Matching members whose `shares_value` lies in the range
    async fn count_in_value_range(&self, filter: &MemberFilter, range: &ShareValueRange) -> Result<i64>;

    async fn get_member(&self, id: Uuid) -> Result<Option<Member>>;

    async fn find_by_id_card(&self, id_card: &str, excluding: Option<Uuid>) -> Result<Option<Member>>;

    async fn find_by_member_id(&self, member_id: &str, excluding: Option<Uuid>) -> Result<Option<Member>>;

    /// Look up by full name with all spaces removed on both sides
    async fn find_by_compact_name(&self, compact_name: &str, excluding: Option<Uuid>) -> Result<Option<Member>>;

    async fn insert_member(&self, member: &Member) -> Result<()>;

    async fn update_member(&self, member: &Member) -> Result<()>;

    /// Returns true if a row was deleted
    async fn delete_member(&self, id: Uuid) -> Result<bool>;

    /// Distinct non-empty values of a location column, ascending
    async fn distinct_values(&self, field: LocationField) -> Result<Vec<String>>;
}

/// Career category and sub category persistence
#[async_trait]
pub trait CareerStorage: Send + Sync {
    async fn insert_category(&self, category: &CareerCategory) -> Result<()>;

    /// Categories ordered by name. `name_filter` and `sub_category_search` are
    /// space-insensitive substrings; when a search is given only categories
    /// owning a matching sub category are returned, each carrying only the
    /// matching sub categories.
    async fn list_categories(
        &self,
        name_filter: Option<&str>,
        sub_category_search: Option<&str>,
    ) -> Result<Vec<CareerCategory>>;

    /// Category with all of its sub categories
    async fn get_category(&self, id: Uuid) -> Result<Option<CareerCategory>>;

    async fn find_category_by_compact_name(&self, compact_name: &str, excluding: Option<Uuid>) -> Result<Option<CareerCategory>>;

    async fn update_category(&self, category: &CareerCategory) -> Result<()>;

    /// Delete a category together with its sub categories
    async fn delete_category(&self, id: Uuid) -> Result<bool>;

    async fn insert_sub_category(&self, sub_category: &SubCategory) -> Result<()>;

    async fn list_sub_categories(&self) -> Result<Vec<SubCategory>>;

    async fn get_sub_category(&self, id: Uuid) -> Result<Option<SubCategory>>;

    /// Page of a category's sub categories plus the total matching count
    async fn list_sub_categories_by_category(
        &self,
        category_id: Uuid,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<SubCategory>, i64)>;

    async fn find_sub_category_by_compact_name(&self, compact_name: &str, excluding: Option<Uuid>) -> Result<Option<SubCategory>>;

    async fn update_sub_category(&self, sub_category: &SubCategory) -> Result<()>;

    async fn delete_sub_category(&self, id: Uuid) -> Result<bool>;
}

/// Administrator account persistence
#[async_trait]
pub trait AdminStorage: Send + Sync {
    async fn insert_admin(&self, admin: &Admin) -> Result<()>;

    async fn get_admin(&self, id: Uuid) -> Result<Option<Admin>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>>;

    async fn find_by_compact_full_name(&self, compact_name: &str) -> Result<Option<Admin>>;
}
