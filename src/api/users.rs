//! User registration endpoints
//!
//! Maps service envelopes to HTTP statuses: 201 with a Location header on
//! create, 400 for validation and create/update failures, 404 for missing
//! users, 500 when listing fails. The envelope is the body in every case.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::ApiResponse;
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// Request to register a new user
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserApiRequest {
    #[validate(length(min = 2, max = 100, message = "Full name must be 2-100 characters"))]
    pub full_name: String,
    #[validate(
        email(message = "Email address is not valid"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    #[validate(
        length(max = 20, message = "Phone must be at most 20 characters"),
        custom(function = "validate_phone")
    )]
    pub phone: String,
    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub password: String,
}

/// Request to update a user; an absent password keeps the current one
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserApiRequest {
    #[validate(length(min = 2, max = 100, message = "Full name must be 2-100 characters"))]
    pub full_name: String,
    #[validate(
        email(message = "Email address is not valid"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    #[validate(
        length(max = 20, message = "Phone must be at most 20 characters"),
        custom(function = "validate_phone")
    )]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub password: Option<String>,
}

impl From<CreateUserApiRequest> for CreateUserRequest {
    fn from(request: CreateUserApiRequest) -> Self {
        Self {
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            password: request.password,
        }
    }
}

impl From<UpdateUserApiRequest> for UpdateUserRequest {
    fn from(request: UpdateUserApiRequest) -> Self {
        Self {
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            password: request.password,
        }
    }
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let mut digits = 0;

    for (i, c) in phone.chars().enumerate() {
        match c {
            '0'..='9' => digits += 1,
            '+' if i == 0 => {}
            ' ' | '-' | '(' | ')' | '.' => {}
            _ => {
                return Err(ValidationError::new("invalid_phone")
                    .with_message("Phone number contains invalid characters".into()))
            }
        }
    }

    if digits < 7 {
        return Err(ValidationError::new("invalid_phone")
            .with_message("Phone number must contain at least 7 digits".into()));
    }

    Ok(())
}

/// First human-readable message out of a validation failure
fn validation_message(errors: &ValidationErrors) -> String {
    for kind in errors.errors().values() {
        if let ValidationErrorsKind::Field(field_errors) = kind {
            for error in field_errors {
                if let Some(message) = &error.message {
                    return message.to_string();
                }
            }
        }
    }

    "Invalid request".to_string()
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Response {
    debug!(email = %request.email, "Creating user");

    if let Err(errors) = request.validate() {
        let response: ApiResponse<i32> = ApiResponse::error(validation_message(&errors));
        return (StatusCode::BAD_REQUEST, Json(response)).into_response();
    }

    let response = state.user_service.create_user(request.into()).await;

    if !response.is_success() {
        return (StatusCode::BAD_REQUEST, Json(response)).into_response();
    }

    let location = response
        .data()
        .map(|id| format!("/api/users/{}", id))
        .unwrap_or_else(|| "/api/users".to_string());

    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    )
        .into_response()
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Response {
    debug!("Listing all users");

    let response = state.user_service.get_all_users().await;

    if !response.is_success() {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
    }

    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/users/{id}
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    debug!(user_id = id, "Getting user");

    let response = state.user_service.get_user_by_id(id).await;

    if !response.is_success() {
        return (StatusCode::NOT_FOUND, Json(response)).into_response();
    }

    (StatusCode::OK, Json(response)).into_response()
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Response {
    debug!(user_id = id, "Updating user");

    if let Err(errors) = request.validate() {
        let response: ApiResponse<()> = ApiResponse::error(validation_message(&errors));
        return (StatusCode::BAD_REQUEST, Json(response)).into_response();
    }

    let response = state.user_service.update_user(id, request.into()).await;

    if !response.is_success() {
        let status = if response.message().contains("not found") {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };

        return (status, Json(response)).into_response();
    }

    (StatusCode::OK, Json(response)).into_response()
}

/// DELETE /api/users/{id}
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    debug!(user_id = id, "Deleting user");

    let response = state.user_service.delete_user(id).await;

    if !response.is_success() {
        return (StatusCode::NOT_FOUND, Json(response)).into_response();
    }

    (StatusCode::OK, Json(response)).into_response()
}
