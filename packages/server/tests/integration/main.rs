mod common;

mod auth;
mod contact;
mod media;
mod messages;
mod portfolio;
mod sitemap;
mod team;
mod users;
