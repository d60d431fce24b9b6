pub mod auth;
pub mod contribution_configs;
pub mod contributions;
pub mod dashboard;
pub mod expenses;
pub mod meetings;
pub mod members;
pub mod mutuelles;
pub mod roles;
pub mod webhooks;
