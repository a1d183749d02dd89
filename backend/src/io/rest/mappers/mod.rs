pub mod career_mapper;
pub mod dashboard_mapper;
pub mod member_mapper;

pub use career_mapper::CareerMapper;
pub use dashboard_mapper::DashboardMapper;
pub use member_mapper::MemberMapper;
