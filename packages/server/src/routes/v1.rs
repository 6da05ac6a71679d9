use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/team", public_team_routes())
        .nest("/portfolio", public_portfolio_routes())
        .nest("/blog", public_blog_routes())
        .route("/contact", post(handlers::contact::submit_contact_form))
        .route("/contact-info", get(handlers::contact::get_contact_info))
        .route("/media/{ref_id}", get(handlers::media::serve_media))
        .nest("/admin", admin_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me))
}

fn public_team_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::team::list_team))
        .route("/{slug}", get(handlers::team::get_team_member))
}

fn public_portfolio_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::portfolio::list_portfolio))
        .route("/{slug}", get(handlers::portfolio::get_portfolio_item))
}

fn public_blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::blog::list_posts))
        .route("/{slug}", get(handlers::blog::get_post))
        .route("/{slug}/view", post(handlers::blog::increment_view_count))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .nest("/team", admin_team_routes())
        .nest("/portfolio", admin_portfolio_routes())
        .nest("/blog", admin_blog_routes())
        .nest("/messages", admin_message_routes())
        .nest("/users", admin_user_routes())
        .nest("/contact-info", admin_contact_info_routes())
        .nest("/media", admin_media_routes())
}

fn admin_team_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::team::admin_list_team).post(handlers::team::create_team_member),
        )
        .route("/reorder", put(handlers::team::reorder_team))
        .route(
            "/{id}",
            get(handlers::team::admin_get_team_member)
                .patch(handlers::team::update_team_member)
                .delete(handlers::team::delete_team_member),
        )
}

fn admin_portfolio_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::portfolio::admin_list_portfolio)
                .post(handlers::portfolio::create_portfolio_item),
        )
        .route("/reorder", put(handlers::portfolio::reorder_portfolio))
        .route(
            "/{id}",
            get(handlers::portfolio::admin_get_portfolio_item)
                .patch(handlers::portfolio::update_portfolio_item)
                .delete(handlers::portfolio::delete_portfolio_item),
        )
}

fn admin_blog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::blog::admin_list_posts).post(handlers::blog::create_post),
        )
        .route(
            "/{id}",
            get(handlers::blog::admin_get_post)
                .patch(handlers::blog::update_post)
                .delete(handlers::blog::delete_post),
        )
}

fn admin_message_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::message::list_messages))
        .route(
            "/{id}",
            get(handlers::message::get_message)
                .patch(handlers::message::update_message)
                .delete(handlers::message::delete_message),
        )
}

fn admin_user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::admin_user::list_admin_users)
                .post(handlers::admin_user::create_admin_user),
        )
        .route(
            "/{id}",
            get(handlers::admin_user::get_admin_user)
                .patch(handlers::admin_user::update_admin_user)
                .delete(handlers::admin_user::delete_admin_user),
        )
}

fn admin_contact_info_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::contact::admin_get_contact_info).put(handlers::contact::update_contact_info),
    )
}

fn admin_media_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::media::list_media)
                .post(handlers::media::upload_media)
                .layer(handlers::media::media_upload_body_limit()),
        )
        .route(
            "/{ref_id}",
            axum::routing::delete(handlers::media::delete_media),
        )
}
