use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::contact_info::{self, SINGLETON_ID};
use crate::entity::contact_message;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::contact_info::{
    ContactInfoResponse, UpdateContactInfoRequest, validate_update_contact_info,
};
use crate::models::message::{ContactFormRequest, ContactFormResponse, validate_contact_form};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/contact",
    tag = "Contact",
    operation_id = "submitContactForm",
    summary = "Submit the public contact form",
    description = "Stores a contact message with status `new` for the admin inbox. Public endpoint.",
    request_body = ContactFormRequest,
    responses(
        (status = 201, description = "Message stored", body = ContactFormResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(subject = %payload.subject))]
pub async fn submit_contact_form(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ContactFormRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_contact_form(&payload)?;

    let now = chrono::Utc::now();
    let new_message = contact_message::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        phone: Set(payload.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())),
        subject: Set(payload.subject.trim().to_string()),
        body: Set(payload.body),
        status: Set("new".to_string()),
        admin_notes: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_message.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(ContactFormResponse { id: model.id })))
}

#[utoipa::path(
    get,
    path = "/contact-info",
    tag = "Contact",
    operation_id = "getContactInfo",
    summary = "Get the company contact info",
    description = "Returns the contact-info singleton read by every page footer and CTA. Public endpoint.",
    responses(
        (status = 200, description = "Contact info", body = ContactInfoResponse),
        (status = 404, description = "Not configured yet (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_contact_info(
    State(state): State<AppState>,
) -> Result<Json<ContactInfoResponse>, AppError> {
    let info = find_contact_info(&state.db).await?;
    Ok(Json(info.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Contact",
    operation_id = "adminGetContactInfo",
    summary = "Get the contact info for editing",
    responses(
        (status = 200, description = "Contact info", body = ContactInfoResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not configured yet (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth))]
pub async fn admin_get_contact_info(
    _auth: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<ContactInfoResponse>, AppError> {
    let info = find_contact_info(&state.db).await?;
    Ok(Json(info.into()))
}

#[utoipa::path(
    put,
    path = "/",
    tag = "Contact",
    operation_id = "updateContactInfo",
    summary = "Replace the contact info",
    description = "Full replacement of the singleton row; creates it if seeding was skipped.",
    request_body = UpdateContactInfoRequest,
    responses(
        (status = 200, description = "Contact info updated", body = ContactInfoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload))]
pub async fn update_contact_info(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateContactInfoRequest>,
) -> Result<Json<ContactInfoResponse>, AppError> {
    validate_update_contact_info(&payload)?;

    let now = chrono::Utc::now();
    let social_links = serde_json::Value::Object(payload.social_links);

    let model = match contact_info::Entity::find_by_id(SINGLETON_ID)
        .one(&state.db)
        .await?
    {
        Some(existing) => {
            let mut active: contact_info::ActiveModel = existing.into();
            active.phone = Set(payload.phone.trim().to_string());
            active.email = Set(payload.email.trim().to_string());
            active.address = Set(payload.address.trim().to_string());
            active.working_hours = Set(payload.working_hours.trim().to_string());
            active.social_links = Set(social_links);
            active.updated_at = Set(now);
            active.update(&state.db).await?
        }
        None => {
            let active = contact_info::ActiveModel {
                id: Set(SINGLETON_ID),
                phone: Set(payload.phone.trim().to_string()),
                email: Set(payload.email.trim().to_string()),
                address: Set(payload.address.trim().to_string()),
                working_hours: Set(payload.working_hours.trim().to_string()),
                social_links: Set(social_links),
                updated_at: Set(now),
            };
            active.insert(&state.db).await?
        }
    };

    Ok(Json(model.into()))
}

async fn find_contact_info<C: ConnectionTrait>(db: &C) -> Result<contact_info::Model, AppError> {
    contact_info::Entity::find_by_id(SINGLETON_ID)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact info not configured".into()))
}
