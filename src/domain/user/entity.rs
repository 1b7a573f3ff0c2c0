//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User record as stored by the backing store.
///
/// Decodes directly from the store's JSON row shape
/// `{id, fullName, email, phone, createdAt}`. The password hash is never
/// part of that shape and is never serialized; it is only populated
/// in-process where a backend keeps it alongside the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier, immutable after creation
    id: i32,
    full_name: String,
    email: String,
    phone: String,
    /// SHA-256 hex digest; never exposed in serialization
    #[serde(default, skip_serializing)]
    password_hash: Option<String>,
    /// Set once at creation, never mutated
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: i32,
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            password_hash: None,
            created_at,
        }
    }

    // Getters

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Mutators

    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.full_name = full_name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = Some(password_hash.into());
    }
}
