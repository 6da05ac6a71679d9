use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::blog_post;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::blog::*;
use crate::models::shared::{Pagination, escape_like, resolve_slug, tags_to_json};
use crate::state::AppState;
use crate::utils::slug::validate_slug;

const LIST_COLUMNS: &[blog_post::Column] = &[
    blog_post::Column::Id,
    blog_post::Column::Title,
    blog_post::Column::Slug,
    blog_post::Column::Excerpt,
    blog_post::Column::ImageRef,
    blog_post::Column::Author,
    blog_post::Column::Category,
    blog_post::Column::ReadTime,
    blog_post::Column::IsPublished,
    blog_post::Column::PublishedAt,
    blog_post::Column::ViewCount,
    blog_post::Column::CreatedAt,
    blog_post::Column::UpdatedAt,
];

#[utoipa::path(
    get,
    path = "/",
    tag = "Blog",
    operation_id = "listPosts",
    summary = "List published blog posts",
    description = "Returns published posts newest first, paginated (per_page clamped 1-50), with optional case-insensitive title search and category filter. Full content is omitted from list results. Public endpoint.",
    params(BlogListQuery),
    responses(
        (status = 200, description = "List of posts", body = BlogListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<BlogListResponse>, AppError> {
    let select = blog_post::Entity::find().filter(blog_post::Column::IsPublished.eq(true));
    paginated_post_list(&state.db, select, &query, blog_post::Column::PublishedAt).await
}

#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Blog",
    operation_id = "getPost",
    summary = "Get a published post by slug",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post details", body = BlogPostResponse),
        (status = 404, description = "Not found or unpublished (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(slug))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostResponse>, AppError> {
    let post = blog_post::Entity::find()
        .filter(blog_post::Column::Slug.eq(&slug))
        .filter(blog_post::Column::IsPublished.eq(true))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))?;

    Ok(Json(post.into()))
}

#[utoipa::path(
    post,
    path = "/{slug}/view",
    tag = "Blog",
    operation_id = "incrementViewCount",
    summary = "Increment a post's view counter",
    description = "Atomically increments view_count for a published post and returns the new value. Public endpoint; the increment happens server-side so concurrent views never lose counts.",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "New view count", body = ViewCountResponse),
        (status = 404, description = "Not found or unpublished (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(slug))]
pub async fn increment_view_count(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ViewCountResponse>, AppError> {
    let result = blog_post::Entity::update_many()
        .filter(blog_post::Column::Slug.eq(&slug))
        .filter(blog_post::Column::IsPublished.eq(true))
        .col_expr(blog_post::Column::ViewCount, Expr::cust("view_count + 1"))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Post not found".into()));
    }

    let view_count: i64 = blog_post::Entity::find()
        .filter(blog_post::Column::Slug.eq(&slug))
        .select_only()
        .column(blog_post::Column::ViewCount)
        .into_tuple::<i64>()
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))?;

    Ok(Json(ViewCountResponse { view_count }))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Blog",
    operation_id = "adminListPosts",
    summary = "List all posts including drafts",
    params(BlogListQuery),
    responses(
        (status = 200, description = "List of posts", body = BlogListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, query))]
pub async fn admin_list_posts(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<BlogListResponse>, AppError> {
    let select = blog_post::Entity::find();
    paginated_post_list(&state.db, select, &query, blog_post::Column::CreatedAt).await
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blog",
    operation_id = "createPost",
    summary = "Create a blog post",
    description = "Creates a post. When read_time is omitted it is estimated from the content length. Publishing at creation stamps published_at.",
    request_body = CreateBlogPostRequest,
    responses(
        (status = 201, description = "Post created", body = BlogPostResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Slug already in use (SLUG_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload), fields(title = %payload.title))]
pub async fn create_post(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_blog_post(&payload)?;
    let slug = resolve_slug(payload.slug.as_deref(), &payload.title)?;

    let read_time = payload
        .read_time
        .unwrap_or_else(|| estimate_read_time(&payload.content));

    let now = chrono::Utc::now();
    let new_post = blog_post::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        slug: Set(slug),
        excerpt: Set(payload.excerpt.trim().to_string()),
        content: Set(payload.content),
        image_ref: Set(payload.image_ref),
        author: Set(payload.author.trim().to_string()),
        category: Set(payload.category.trim().to_string()),
        read_time: Set(read_time),
        keywords: Set(tags_to_json(&payload.keywords)),
        is_published: Set(payload.is_published),
        published_at: Set(payload.is_published.then_some(now)),
        view_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_post.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::SlugTaken,
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(BlogPostResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blog",
    operation_id = "adminGetPost",
    summary = "Get a post by ID",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post details", body = BlogPostResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn admin_get_post(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogPostResponse>, AppError> {
    let model = find_post(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Blog",
    operation_id = "updatePost",
    summary = "Update a blog post",
    description = "Partially updates a post using PATCH semantics. The first time is_published flips to true, published_at is stamped; it is kept on later unpublish/republish cycles.",
    params(("id" = i32, Path, description = "Post ID")),
    request_body = UpdateBlogPostRequest,
    responses(
        (status = 200, description = "Post updated", body = BlogPostResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug already in use (SLUG_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload), fields(id))]
pub async fn update_post(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateBlogPostRequest>,
) -> Result<Json<BlogPostResponse>, AppError> {
    validate_update_blog_post(&payload)?;

    if payload == UpdateBlogPostRequest::default() {
        let existing = find_post(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_post(&txn, id).await?;
    let first_publish = payload.is_published == Some(true) && existing.published_at.is_none();
    let mut active: blog_post::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(ref slug) = payload.slug {
        let slug = validate_slug(slug).map_err(|e| AppError::Validation(e.message().into()))?;
        active.slug = Set(slug.to_string());
    }
    if let Some(ref excerpt) = payload.excerpt {
        active.excerpt = Set(excerpt.trim().to_string());
    }
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
    if let Some(image_ref) = payload.image_ref {
        active.image_ref = Set(image_ref);
    }
    if let Some(ref author) = payload.author {
        active.author = Set(author.trim().to_string());
    }
    if let Some(ref category) = payload.category {
        active.category = Set(category.trim().to_string());
    }
    if let Some(read_time) = payload.read_time {
        active.read_time = Set(read_time);
    }
    if let Some(ref keywords) = payload.keywords {
        active.keywords = Set(tags_to_json(keywords));
    }
    if let Some(is_published) = payload.is_published {
        active.is_published = Set(is_published);
        if first_publish {
            active.published_at = Set(Some(chrono::Utc::now()));
        }
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::SlugTaken,
        _ => AppError::from(e),
    })?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blog",
    operation_id = "deletePost",
    summary = "Delete a blog post",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn delete_post(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    find_post(&state.db, id).await?;
    blog_post::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Shared pagination/search/category plumbing for the public and admin
/// list endpoints; they differ only in base filter and sort column.
async fn paginated_post_list(
    db: &DatabaseConnection,
    mut select: Select<blog_post::Entity>,
    query: &BlogListQuery,
    sort_column: blog_post::Column,
) -> Result<Json<BlogListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 50);

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(blog_post::Column::Title)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    if let Some(ref category) = query.category {
        select = select.filter(blog_post::Column::Category.eq(category));
    }

    let total = select.clone().paginate(db, per_page).num_items().await?;
    let total_pages = total.div_ceil(per_page);

    let mut list = select.select_only();
    for &column in LIST_COLUMNS {
        list = list.column(column);
    }

    let data = list
        .order_by_desc(sort_column)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .into_model::<BlogListItem>()
        .all(db)
        .await?;

    Ok(Json(BlogListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

async fn find_post<C: ConnectionTrait>(db: &C, id: i32) -> Result<blog_post::Model, AppError> {
    blog_post::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))
}
