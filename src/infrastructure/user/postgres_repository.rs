//! PostgreSQL user repository over stored procedures

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::error;

use super::procedure::ProcedureReply;
use crate::domain::{DomainError, Outcome, User, UserRepository};

/// Repository invoking the five database functions.
///
/// Each operation checks a connection out of the pool for exactly one
/// `SELECT function(...)` round-trip with bound parameters, decodes the JSON
/// reply, and folds every transport or decode error into a failure
/// [`Outcome`] - nothing propagates to the caller.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn call_create_user(
        &self,
        full_name: &str,
        email: &str,
        phone: &str,
        password_hash: &str,
    ) -> Result<Outcome<i32>, DomainError> {
        let raw: Option<Value> = sqlx::query_scalar("SELECT create_user($1, $2, $3, $4)")
            .bind(full_name)
            .bind(email)
            .bind(phone)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        match raw.filter(|value| !value.is_null()) {
            Some(raw) => ProcedureReply::decode(raw)?.into_created_id(),
            None => Ok(Outcome::fail(
                "Failed to create user: No result returned from database",
            )),
        }
    }

    async fn call_get_all_users(&self) -> Result<Outcome<Vec<User>>, DomainError> {
        let raw: Option<Value> = sqlx::query_scalar("SELECT get_all_users()")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        match raw.filter(|value| !value.is_null()) {
            Some(raw) => ProcedureReply::decode(raw)?.into_users(),
            None => Ok(Outcome::fail(
                "Failed to get users: No result returned from database",
            )),
        }
    }

    async fn call_get_user_by_id(&self, id: i32) -> Result<Outcome<User>, DomainError> {
        let raw: Option<Value> = sqlx::query_scalar("SELECT get_user_by_id($1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        match raw.filter(|value| !value.is_null()) {
            Some(raw) => ProcedureReply::decode(raw)?.into_user(),
            None => Ok(Outcome::fail(
                "Failed to get user: No result returned from database",
            )),
        }
    }

    async fn call_update_user(
        &self,
        id: i32,
        full_name: &str,
        email: &str,
        phone: &str,
        password_hash: Option<&str>,
    ) -> Result<Outcome<()>, DomainError> {
        let raw: Option<Value> = sqlx::query_scalar("SELECT update_user($1, $2, $3, $4, $5)")
            .bind(id)
            .bind(full_name)
            .bind(email)
            .bind(phone)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        match raw.filter(|value| !value.is_null()) {
            Some(raw) => Ok(ProcedureReply::decode(raw)?.into_ack()),
            None => Ok(Outcome::fail(
                "Failed to update user: No result returned from database",
            )),
        }
    }

    async fn call_delete_user(&self, id: i32) -> Result<Outcome<()>, DomainError> {
        let raw: Option<Value> = sqlx::query_scalar("SELECT delete_user($1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        match raw.filter(|value| !value.is_null()) {
            Some(raw) => Ok(ProcedureReply::decode(raw)?.into_ack()),
            None => Ok(Outcome::fail(
                "Failed to delete user: No result returned from database",
            )),
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        phone: &str,
        password_hash: &str,
    ) -> Outcome<i32> {
        match self
            .call_create_user(full_name, email, phone, password_hash)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Error creating user");
                Outcome::fail(format!("An error occurred while creating the user: {}", e))
            }
        }
    }

    async fn get_all_users(&self) -> Outcome<Vec<User>> {
        match self.call_get_all_users().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Error getting all users");
                Outcome::fail(format!("An error occurred while retrieving users: {}", e))
            }
        }
    }

    async fn get_user_by_id(&self, id: i32) -> Outcome<User> {
        match self.call_get_user_by_id(id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, user_id = id, "Error getting user by ID");
                Outcome::fail(format!(
                    "An error occurred while retrieving the user: {}",
                    e
                ))
            }
        }
    }

    async fn update_user(
        &self,
        id: i32,
        full_name: &str,
        email: &str,
        phone: &str,
        password_hash: Option<&str>,
    ) -> Outcome<()> {
        match self
            .call_update_user(id, full_name, email, phone, password_hash)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, user_id = id, "Error updating user");
                Outcome::fail(format!("An error occurred while updating the user: {}", e))
            }
        }
    }

    async fn delete_user(&self, id: i32) -> Outcome<()> {
        match self.call_delete_user(id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, user_id = id, "Error deleting user");
                Outcome::fail(format!("An error occurred while deleting the user: {}", e))
            }
        }
    }
}
