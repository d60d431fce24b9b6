pub mod access;
pub mod auth;
pub mod config_service;
pub mod contribution_service;
pub mod dashboard_service;
pub mod expense_service;
pub mod meeting_service;
pub mod member_service;
pub mod mutuelle_service;
pub mod payment_gateway;
pub mod role_service;
