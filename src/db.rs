pub mod profile_repo;
pub use profile_repo::ProfileRepository;
pub mod role_repo;
pub use role_repo::{RoleRepository, RoleStore};
pub mod mutuelle_repo;
pub use mutuelle_repo::MutuelleRepository;
pub mod member_repo;
pub use member_repo::MemberRepository;
pub mod config_repo;
pub use config_repo::ConfigRepository;
pub mod contribution_repo;
pub use contribution_repo::{ContributionRepository, ContributionStore};
pub mod expense_repo;
pub use expense_repo::ExpenseRepository;
pub mod meeting_repo;
pub use meeting_repo::MeetingRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
