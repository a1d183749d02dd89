// Repository modules
pub mod admin_repository;
pub mod career_repository;
pub mod member_repository;

// Re-export repository types
pub use admin_repository::AdminRepository;
pub use career_repository::CareerRepository;
pub use member_repository::MemberRepository;
