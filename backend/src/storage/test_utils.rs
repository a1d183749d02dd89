//! Shared fixtures for storage and service tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::connection::DbConnection;
use super::repositories::{AdminRepository, CareerRepository, MemberRepository};
use super::traits::MemberStorage;
use crate::domain::models::member::{LocationField, Member, MemberFilter, ShareValueRange};

/// Fresh in-memory database plus one repository per aggregate
pub struct TestEnvironment {
    pub connection: DbConnection,
    pub members: MemberRepository,
    pub careers: CareerRepository,
    pub admins: AdminRepository,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let connection = DbConnection::init_test().await?;
        Ok(TestEnvironment {
            members: MemberRepository::new(connection.clone()),
            careers: CareerRepository::new(connection.clone()),
            admins: AdminRepository::new(connection.clone()),
            connection,
        })
    }
}

/// A valid member whose id card is derived from `member_id` so fixtures never collide.
pub fn sample_member(member_id: &str, subdistrict: &str, shares_value: f64) -> Member {
    let now = Utc::now();
    Member {
        id: Uuid::new_v4(),
        cooperative_id: "0105555000001".to_string(),
        id_card: format!("{:0>13}", member_id),
        account_year: "2025".to_string(),
        member_id: member_id.to_string(),
        full_name: format!("Member {}", member_id),
        nationality: "ไทย".to_string(),
        shares_num: shares_value / 10.0,
        shares_value,
        joining_date: NaiveDate::from_ymd_opt(2025, 1, 15),
        member_type: 1,
        leaving_date: None,
        address: "99/1".to_string(),
        moo: 3,
        subdistrict: subdistrict.to_string(),
        district: "Mueang Chiang Mai".to_string(),
        province: "Chiang Mai".to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Member store whose every call fails, for exercising error propagation
pub struct FailingMemberStorage;

fn unavailable<T>() -> Result<T> {
    Err(anyhow::anyhow!("member store unavailable"))
}

#[async_trait]
impl MemberStorage for FailingMemberStorage {
    async fn count_members(&self, _filter: &MemberFilter) -> Result<i64> {
        unavailable()
    }

    async fn sum_shares_value(&self, _filter: &MemberFilter) -> Result<f64> {
        unavailable()
    }

    async fn list_members(&self, _filter: &MemberFilter, _offset: i64, _limit: i64) -> Result<Vec<Member>> {
        unavailable()
    }

    async fn count_by_subdistrict(&self, _filter: &MemberFilter) -> Result<Vec<(String, i64)>> {
        unavailable()
    }

    async fn count_by_join_year(&self) -> Result<Vec<(i32, i64)>> {
        unavailable()
    }

    async fn count_joined_in_year(&self, _year: i32) -> Result<i64> {
        unavailable()
    }

    async fn count_in_value_range(&self, _filter: &MemberFilter, _range: &ShareValueRange) -> Result<i64> {
        unavailable()
    }

    async fn get_member(&self, _id: Uuid) -> Result<Option<Member>> {
        unavailable()
    }

    async fn find_by_id_card(&self, _id_card: &str, _excluding: Option<Uuid>) -> Result<Option<Member>> {
        unavailable()
    }

    async fn find_by_member_id(&self, _member_id: &str, _excluding: Option<Uuid>) -> Result<Option<Member>> {
        unavailable()
    }

    async fn find_by_compact_name(&self, _compact_name: &str, _excluding: Option<Uuid>) -> Result<Option<Member>> {
        unavailable()
    }

    async fn insert_member(&self, _member: &Member) -> Result<()> {
        unavailable()
    }

    async fn update_member(&self, _member: &Member) -> Result<()> {
        unavailable()
    }

    async fn delete_member(&self, _id: Uuid) -> Result<bool> {
        unavailable()
    }

    async fn distinct_values(&self, _field: LocationField) -> Result<Vec<String>> {
        unavailable()
    }
}
