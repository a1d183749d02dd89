//! # IO Module
//!
//! The HTTP adapter between clients and the domain layer: REST handlers,
//! DTO mappers, session cookies and the authentication middleware.

pub mod middleware;
pub mod rest;
pub mod session;

pub use rest::*;
