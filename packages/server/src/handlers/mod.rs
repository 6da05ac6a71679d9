pub mod admin_user;
pub mod auth;
pub mod blog;
pub mod contact;
pub mod dashboard;
pub mod media;
pub mod message;
pub mod portfolio;
pub mod sitemap;
pub mod team;
