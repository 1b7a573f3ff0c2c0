//! Decoding of stored-procedure replies
//!
//! Every database function returns a single JSON value shaped
//! `{success, message, data}`. This module turns that raw value into typed
//! [`Outcome`]s, isolated from any live connection so the edge cases
//! (missing `data`, JSON-null `data`, malformed rows) can be covered with
//! literal fixtures.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{DomainError, Outcome, User};

/// Raw reply shape shared by all five procedures
#[derive(Debug, Deserialize)]
pub(crate) struct ProcedureReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

impl ProcedureReply {
    pub(crate) fn decode(raw: Value) -> Result<Self, DomainError> {
        serde_json::from_value(raw)
            .map_err(|e| DomainError::storage(format!("Malformed procedure reply: {}", e)))
    }

    fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string())
    }

    fn data(self) -> Option<Value> {
        self.data.filter(|value| !value.is_null())
    }

    /// Reply from `create_user`: the new id lives in `data.id`. A success
    /// without data stays successful but payload-less; the service treats
    /// that as a failure.
    pub(crate) fn into_created_id(self) -> Result<Outcome<i32>, DomainError> {
        if !self.success {
            return Ok(Outcome::fail(self.message()));
        }

        let message = self.message();

        match self.data() {
            Some(data) => {
                #[derive(Deserialize)]
                struct Created {
                    id: i32,
                }

                let created: Created = serde_json::from_value(data).map_err(|e| {
                    DomainError::storage(format!("Malformed created-user data: {}", e))
                })?;

                Ok(Outcome::ok(message, created.id))
            }
            None => Ok(Outcome::ok_empty(message)),
        }
    }

    /// Reply from `get_user_by_id`: a successful reply with null data means
    /// the row does not exist
    pub(crate) fn into_user(self) -> Result<Outcome<User>, DomainError> {
        if !self.success {
            return Ok(Outcome::fail(self.message()));
        }

        let message = self.message();

        match self.data() {
            Some(data) => {
                let user: User = serde_json::from_value(data)
                    .map_err(|e| DomainError::storage(format!("Malformed user data: {}", e)))?;

                Ok(Outcome::ok(message, user))
            }
            None => Ok(Outcome::fail("User not found")),
        }
    }

    /// Reply from `get_all_users`: null data is an empty collection, not an
    /// error
    pub(crate) fn into_users(self) -> Result<Outcome<Vec<User>>, DomainError> {
        if !self.success {
            return Ok(Outcome::fail(self.message()));
        }

        let message = self.message();

        match self.data() {
            Some(data) => {
                let users: Vec<User> = serde_json::from_value(data)
                    .map_err(|e| DomainError::storage(format!("Malformed user list: {}", e)))?;

                Ok(Outcome::ok(message, users))
            }
            None => Ok(Outcome::ok(message, Vec::new())),
        }
    }

    /// Reply from `update_user` / `delete_user`: acknowledgement only
    pub(crate) fn into_ack(self) -> Outcome<()> {
        if self.success {
            Outcome::ok_empty(self.message())
        } else {
            Outcome::fail(self.message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_id() {
        let reply = ProcedureReply::decode(json!({
            "success": true,
            "message": "User created successfully",
            "data": {"id": 12}
        }))
        .unwrap();

        let outcome = reply.into_created_id().unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.message(), "User created successfully");
        assert_eq!(outcome.payload(), Some(&12));
    }

    #[test]
    fn test_created_failure_keeps_store_message() {
        let reply = ProcedureReply::decode(json!({
            "success": false,
            "message": "Email already exists",
            "data": null
        }))
        .unwrap();

        let outcome = reply.into_created_id().unwrap();
        assert!(!outcome.success());
        assert_eq!(outcome.message(), "Email already exists");
    }

    #[test]
    fn test_created_success_without_data_has_no_payload() {
        let reply = ProcedureReply::decode(json!({
            "success": true,
            "message": "User created successfully"
        }))
        .unwrap();

        let outcome = reply.into_created_id().unwrap();
        assert!(outcome.success());
        assert!(outcome.payload().is_none());
    }

    #[test]
    fn test_null_message_falls_back() {
        let reply = ProcedureReply::decode(json!({
            "success": false,
            "message": null
        }))
        .unwrap();

        assert_eq!(reply.into_ack().message(), "Unknown error");
    }

    #[test]
    fn test_missing_success_is_malformed() {
        let result = ProcedureReply::decode(json!({"message": "ok"}));

        assert!(result.is_err());
    }

    #[test]
    fn test_user_null_data_is_not_found() {
        let reply = ProcedureReply::decode(json!({
            "success": true,
            "message": "User retrieved successfully",
            "data": null
        }))
        .unwrap();

        let outcome = reply.into_user().unwrap();
        assert!(!outcome.success());
        assert_eq!(outcome.message(), "User not found");
    }

    #[test]
    fn test_user_row_decodes() {
        let reply = ProcedureReply::decode(json!({
            "success": true,
            "message": "User retrieved successfully",
            "data": {
                "id": 3,
                "fullName": "Jane Doe",
                "email": "jane@example.com",
                "phone": "+15551234567",
                "createdAt": "2026-01-15T10:30:00+00:00"
            }
        }))
        .unwrap();

        let outcome = reply.into_user().unwrap();
        assert!(outcome.success());

        let user = outcome.payload().unwrap();
        assert_eq!(user.id(), 3);
        assert_eq!(user.full_name(), "Jane Doe");
        assert!(user.password_hash().is_none());
    }

    #[test]
    fn test_user_malformed_row_is_error() {
        let reply = ProcedureReply::decode(json!({
            "success": true,
            "message": "User retrieved successfully",
            "data": {"id": "not-a-number"}
        }))
        .unwrap();

        assert!(reply.into_user().is_err());
    }

    #[test]
    fn test_users_null_data_is_empty_collection() {
        let reply = ProcedureReply::decode(json!({
            "success": true,
            "message": "Users retrieved successfully",
            "data": null
        }))
        .unwrap();

        let outcome = reply.into_users().unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.payload(), Some(&Vec::new()));
    }

    #[test]
    fn test_users_preserve_store_order() {
        let reply = ProcedureReply::decode(json!({
            "success": true,
            "message": "Users retrieved successfully",
            "data": [
                {"id": 2, "fullName": "B", "email": "b@example.com", "phone": "+15550000002",
                 "createdAt": "2026-01-02T00:00:00+00:00"},
                {"id": 1, "fullName": "A", "email": "a@example.com", "phone": "+15550000001",
                 "createdAt": "2026-01-01T00:00:00+00:00"}
            ]
        }))
        .unwrap();

        let outcome = reply.into_users().unwrap();
        let users = outcome.payload().unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id(), 2);
        assert_eq!(users[1].id(), 1);
    }

    #[test]
    fn test_users_failure_keeps_message() {
        let reply = ProcedureReply::decode(json!({
            "success": false,
            "message": "permission denied"
        }))
        .unwrap();

        let outcome = reply.into_users().unwrap();
        assert!(!outcome.success());
        assert_eq!(outcome.message(), "permission denied");
    }

    #[test]
    fn test_ack() {
        let ok = ProcedureReply::decode(json!({
            "success": true,
            "message": "User deleted successfully"
        }))
        .unwrap();
        let failed = ProcedureReply::decode(json!({
            "success": false,
            "message": "User not found"
        }))
        .unwrap();

        assert!(ok.into_ack().success());
        assert!(!failed.into_ack().success());
    }
}
