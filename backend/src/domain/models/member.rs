use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Domain representation of a cooperative member.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: Uuid,
    pub cooperative_id: String,
    pub id_card: String,
    /// Internal-calendar year, stored as text
    pub account_year: String,
    pub member_id: String,
    pub full_name: String,
    pub nationality: String,
    pub shares_num: f64,
    pub shares_value: f64,
    pub joining_date: Option<NaiveDate>,
    pub member_type: i64,
    /// `None` while the person is still a member
    pub leaving_date: Option<NaiveDate>,
    pub address: String,
    pub moo: i64,
    pub subdistrict: String,
    pub district: String,
    pub province: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Name with every space removed, used for duplicate detection.
    pub fn compact_name(name: &str) -> String {
        name.replace(' ', "")
    }
}

/// Sentinel accepted from clients to mean "no constraint".
pub const ALL_SENTINEL: &str = "all";

/// Turn a raw filter value into an optional constraint.
///
/// Absent, blank and the literal `"all"` (exact, case-sensitive, untrimmed)
/// mean "do not filter on this dimension". Other values pass through as given.
pub fn normalize_criterion(raw: Option<&str>) -> Option<String> {
    match raw {
        None | Some(ALL_SENTINEL) => None,
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(value.to_string()),
    }
}

/// Conjunctive filter over the member collection.
///
/// Text fields are case-insensitive substring matches with Unicode case
/// folding, `account_year` is an exact match on the internal-calendar year.
/// `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberFilter {
    pub full_name: Option<String>,
    pub subdistrict: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub account_year: Option<i32>,
}

impl MemberFilter {
    /// The filter shape used by the dashboard: year plus subdistrict only.
    pub fn for_dashboard(account_year: Option<i32>, subdistrict: Option<String>) -> Self {
        Self {
            account_year,
            subdistrict,
            ..Self::default()
        }
    }
}

/// A half-open range over `shares_value`: `lower < value <= upper`.
///
/// A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShareValueRange {
    pub lower_exclusive: Option<f64>,
    pub upper_inclusive: Option<f64>,
}

/// Location columns offered as dropdown reference data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Subdistrict,
    District,
    Province,
}

impl LocationField {
    pub fn column(&self) -> &'static str {
        match self {
            LocationField::Subdistrict => "subdistrict",
            LocationField::District => "district",
            LocationField::Province => "province",
        }
    }
}
