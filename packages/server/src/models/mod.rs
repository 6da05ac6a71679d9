pub mod admin_user;
pub mod auth;
pub mod blog;
pub mod contact_info;
pub mod dashboard;
pub mod media;
pub mod message;
pub mod portfolio;
pub mod shared;
pub mod team;
