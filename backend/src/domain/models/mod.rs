pub mod admin;
pub mod career;
pub mod dashboard;
pub mod member;
