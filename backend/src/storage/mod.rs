//! # Storage Module
//!
//! Persistence for the cooperative backend. The domain layer only sees the
//! traits in [`traits`]; the SQLite repositories here implement them on top
//! of a shared [`DbConnection`].
//!
//! ## Tables
//!
//! - `members`: one row per cooperative member, dates stored as ISO text
//! - `career_categories` / `sub_categories`: career reference data
//! - `admins`: administrator accounts with Argon2 password hashes

pub mod connection;
pub mod repositories;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{AdminRepository, CareerRepository, MemberRepository};
pub use traits::{AdminStorage, CareerStorage, MemberStorage};
