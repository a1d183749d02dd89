//! Request and response types shared between the backend and its clients.
//!
//! Every type here serializes with camelCase field names, which is the
//! wire format the dashboard frontend expects.

use serde::{Deserialize, Serialize};

/// A cooperative member as exposed over the API.
///
/// Dates are `YYYY-MM-DD` strings; `leaving_date` is `None` while the
/// person is still a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub cooperative_id: String,
    pub id_card: String,
    /// Account year in the internal (Gregorian) calendar
    pub account_year: String,
    pub member_id: String,
    pub full_name: String,
    pub nationality: String,
    pub shares_num: f64,
    pub shares_value: f64,
    pub joining_date: Option<String>,
    pub member_type: i64,
    pub leaving_date: Option<String>,
    pub address: String,
    pub moo: i64,
    pub subdistrict: String,
    pub district: String,
    pub province: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body for creating or replacing a member.
///
/// `account_year` is given in the presentation (Buddhist) calendar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberRequest {
    pub cooperative_id: String,
    pub id_card: String,
    pub account_year: String,
    pub member_id: String,
    pub full_name: String,
    pub nationality: String,
    pub shares_num: f64,
    pub shares_value: f64,
    pub joining_date: String,
    pub member_type: i64,
    pub leaving_date: String,
    pub address: String,
    pub moo: i64,
    pub subdistrict: String,
    pub district: String,
    pub province: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberListResponse {
    pub data: Vec<Member>,
    pub pagination: PaginationInfo,
}

/// Envelope used for single-entity responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ---- Dashboard ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersThisYear {
    pub current_count: i64,
    pub last_year_count: i64,
    pub member_change: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub total_members: i64,
    pub total_shares: f64,
    pub average_shares_per_person: f64,
    pub members_this_year: MembersThisYear,
}

/// One point of the membership growth series, year in presentation calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: i32,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdistrictSlice {
    pub subdistrict: String,
    pub count: i64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueBucketSlice {
    pub bucket: String,
    pub member_count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub membership_growth: Vec<GrowthPoint>,
    pub member_count_by_subdistrict: Vec<SubdistrictSlice>,
    pub shares_distribution: Vec<ValueBucketSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub kpi: KpiSnapshot,
    pub charts: DashboardCharts,
}

// ---- Career categories ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: String,
    pub category_id: String,
    pub sub_category_name: String,
    pub sub_net_profit: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerCategory {
    pub id: String,
    pub category_name: String,
    pub sub_category: Vec<SubCategory>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerCategoryRequest {
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubCategoryRequest {
    pub category_id: String,
    pub sub_category_name: String,
    pub sub_net_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategoryListResponse {
    pub data: Vec<SubCategory>,
    pub pagination: PaginationInfo,
}

// ---- Auth ----

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterAdminRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "fullname")]
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginAdminRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: String,
    pub username: String,
    pub full_name: String,
}

// ---- Dropdown ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullDropdown {
    pub sub_districts: Vec<String>,
    pub districts: Vec<String>,
    pub provinces: Vec<String>,
}
