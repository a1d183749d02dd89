//! # Domain Module
//!
//! Business logic for the cooperative backend. Services here depend only on
//! the storage traits, never on SQLite or HTTP types.
//!
//! ## Module Organization
//!
//! - **calendar**: conversion between internal (Gregorian) and presentation (Buddhist Era) years
//! - **member_service**: filtered member listing with pagination, plus single-member CRUD
//! - **kpi_service**, **growth_service**, **geographic_service**, **shares_distribution_service**:
//!   the dashboard builders
//! - **dashboard_service**: composes the builders into one overview
//! - **career_service**: career categories and sub categories
//! - **auth_service**: admin accounts, password hashing and session tokens
//! - **dropdown_service**: location reference data
//!
//! ## Business Rules
//!
//! - Users type years in the presentation calendar; storage holds internal years
//! - The literal `"all"` on a filter means no constraint
//! - Membership growth and the this-year comparison ignore dashboard filters
//! - Aggregates are computed fresh from the store on each request

pub mod auth_service;
pub mod calendar;
pub mod career_service;
pub mod commands;
pub mod dashboard_service;
pub mod dropdown_service;
pub mod errors;
pub mod geographic_service;
pub mod growth_service;
pub mod kpi_service;
pub mod member_service;
pub mod models;
pub mod shares_distribution_service;

pub use auth_service::AuthService;
pub use career_service::CareerService;
pub use dashboard_service::DashboardService;
pub use dropdown_service::DropdownService;
pub use errors::{DomainError, DomainResult};
pub use member_service::MemberService;
