pub mod admin_user;
pub mod blog_post;
pub mod contact_info;
pub mod contact_message;
pub mod media_object;
pub mod media_ref;
pub mod portfolio_item;
pub mod team_member;
