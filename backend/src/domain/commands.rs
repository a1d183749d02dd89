//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

/// Page/limit pair after defaults have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 20;

    /// Parse raw query values, falling back to the defaults for anything
    /// absent, non-numeric or below 1.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        fn positive(raw: Option<&str>, default: u32) -> u32 {
            raw.and_then(|value| value.trim().parse::<u32>().ok())
                .filter(|value| *value >= 1)
                .unwrap_or(default)
        }

        Self {
            page: positive(page, Self::DEFAULT_PAGE),
            limit: positive(limit, Self::DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// `ceil(total / limit)`
    pub fn total_pages(&self, total: i64) -> i64 {
        let limit = i64::from(self.limit);
        (total + limit - 1) / limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

pub mod members {
    use super::PageRequest;
    use crate::domain::models::member::Member;

    /// Query parameters for listing members.
    ///
    /// Text criteria are raw client values; `account_year` is in the
    /// presentation calendar.
    #[derive(Debug, Clone, Default)]
    pub struct MemberListQuery {
        pub full_name: Option<String>,
        pub subdistrict: Option<String>,
        pub district: Option<String>,
        pub province: Option<String>,
        pub account_year: Option<String>,
        pub page: PageRequest,
    }

    /// Input for creating or replacing a member.
    #[derive(Debug, Clone, Default)]
    pub struct MemberCommand {
        pub cooperative_id: String,
        pub id_card: String,
        /// Presentation-calendar year, may be empty
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

    /// Result of listing members.
    #[derive(Debug, Clone)]
    pub struct MemberPage {
        pub members: Vec<Member>,
        pub page: PageRequest,
        pub total: i64,
        pub total_pages: i64,
    }
}

pub mod dashboard {
    /// Raw dashboard filter pair as received from the client.
    #[derive(Debug, Clone, Default)]
    pub struct DashboardQuery {
        /// Presentation-calendar year or `"all"`
        pub account_year: Option<String>,
        pub subdistrict: Option<String>,
    }
}

pub mod careers {
    use super::PageRequest;
    use crate::domain::models::career::SubCategory;

    #[derive(Debug, Clone, Default)]
    pub struct CategoryListQuery {
        pub category_name: Option<String>,
        pub search: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct SubCategoryCommand {
        pub category_id: String,
        pub sub_category_name: String,
        pub sub_net_profit: f64,
    }

    #[derive(Debug, Clone, Default)]
    pub struct SubCategoryPageQuery {
        pub search: Option<String>,
        pub page: PageRequest,
    }

    #[derive(Debug, Clone)]
    pub struct SubCategoryPage {
        pub sub_categories: Vec<SubCategory>,
        pub page: PageRequest,
        pub total: i64,
        pub total_pages: i64,
    }
}

pub mod auth {
    use crate::domain::models::admin::Admin;

    #[derive(Debug, Clone)]
    pub struct RegisterAdminCommand {
        pub username: String,
        pub password: String,
        pub full_name: String,
    }

    #[derive(Debug, Clone)]
    pub struct LoginAdminCommand {
        pub username: String,
        pub password: String,
    }

    /// An authenticated admin together with a freshly signed token.
    #[derive(Debug, Clone)]
    pub struct AuthSession {
        pub admin: Admin,
        pub token: String,
    }
}
