use serde::Serialize;

/// Entity counts shown on the admin dashboard.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DashboardResponse {
    pub team_members: u64,
    pub active_team_members: u64,
    pub portfolio_items: u64,
    pub active_portfolio_items: u64,
    pub blog_posts: u64,
    pub published_blog_posts: u64,
    pub messages: u64,
    pub new_messages: u64,
    pub media_files: u64,
}
