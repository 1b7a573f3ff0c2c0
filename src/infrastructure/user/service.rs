//! User service for registration and account management

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use super::password::PasswordHasher;
use crate::domain::{ApiResponse, User, UserRepository};

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Request for updating an existing user.
///
/// An absent or blank password preserves the stored hash.
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: Option<String>,
}

/// Client-facing projection of a user; the password hash is not part of
/// this shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            full_name: user.full_name().to_string(),
            email: user.email().to_string(),
            phone: user.phone().to_string(),
            created_at: user.created_at(),
        }
    }
}

/// User service orchestrating validation, hashing, and repository calls.
///
/// Every method returns an [`ApiResponse`] envelope; failures of any kind
/// (validation, store, hashing) surface as error envelopes, never as Err.
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Create a new user
    pub async fn create_user(&self, request: CreateUserRequest) -> ApiResponse<i32> {
        if is_blank(&request.full_name)
            || is_blank(&request.email)
            || is_blank(&request.phone)
            || is_blank(&request.password)
        {
            return ApiResponse::error("All fields are required");
        }

        let password_hash = match self.hasher.hash(&request.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!(error = %e, "Error creating user");
                return ApiResponse::error(format!("An error occurred: {}", e));
            }
        };

        let (success, message, user_id) = self
            .repository
            .create_user(
                &request.full_name,
                &request.email,
                &request.phone,
                &password_hash,
            )
            .await
            .into_parts();

        match user_id {
            Some(id) if success => ApiResponse::success(message, id),
            _ => ApiResponse::error(message),
        }
    }

    /// Get all users, projected to views in store order
    pub async fn get_all_users(&self) -> ApiResponse<Vec<UserView>> {
        let (success, message, users) = self.repository.get_all_users().await.into_parts();

        match users {
            Some(users) if success => {
                ApiResponse::success(message, users.iter().map(UserView::from).collect())
            }
            _ => ApiResponse::error(message),
        }
    }

    /// Get a user by their ID
    pub async fn get_user_by_id(&self, id: i32) -> ApiResponse<UserView> {
        let (success, message, user) = self.repository.get_user_by_id(id).await.into_parts();

        match user {
            Some(user) if success => ApiResponse::success(message, UserView::from(&user)),
            _ => ApiResponse::error(message),
        }
    }

    /// Update an existing user
    pub async fn update_user(&self, id: i32, request: UpdateUserRequest) -> ApiResponse<()> {
        if is_blank(&request.full_name) || is_blank(&request.email) || is_blank(&request.phone) {
            return ApiResponse::error("FullName, Email, and Phone are required");
        }

        if !self.repository.get_user_by_id(id).await.success() {
            return ApiResponse::error(format!("User with ID {} not found", id));
        }

        let password_hash = match request.password.as_deref().filter(|p| !is_blank(p)) {
            Some(password) => match self.hasher.hash(password) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    error!(error = %e, user_id = id, "Error updating user");
                    return ApiResponse::error(format!("An error occurred: {}", e));
                }
            },
            None => None,
        };

        let (success, message, _) = self
            .repository
            .update_user(
                id,
                &request.full_name,
                &request.email,
                &request.phone,
                password_hash.as_deref(),
            )
            .await
            .into_parts();

        if success {
            ApiResponse::success_empty(message)
        } else {
            ApiResponse::error(message)
        }
    }

    /// Delete a user by their ID
    pub async fn delete_user(&self, id: i32) -> ApiResponse<()> {
        if !self.repository.get_user_by_id(id).await.success() {
            return ApiResponse::error(format!("User with ID {} not found", id));
        }

        let (success, message, _) = self.repository.delete_user(id).await.into_parts();

        if success {
            ApiResponse::success_empty(message)
        } else {
            ApiResponse::error(message)
        }
    }
}
