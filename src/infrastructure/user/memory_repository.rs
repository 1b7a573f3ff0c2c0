//! In-memory user repository implementation
//!
//! Mirrors the stored procedures' envelope semantics (same messages, same
//! duplicate-email check, hash-preserving updates) so the service behaves
//! identically with or without a database. Used in tests and when no
//! connection string is configured.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::{Outcome, User, UserRepository};

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i32, User>,
    next_id: i32,
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Inner>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of a user as the store would return it, without the hash
    fn row(user: &User) -> User {
        User::new(
            user.id(),
            user.full_name(),
            user.email(),
            user.phone(),
            user.created_at(),
        )
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        phone: &str,
        password_hash: &str,
    ) -> Outcome<i32> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email() == email) {
            return Outcome::fail("Email already exists");
        }

        inner.next_id += 1;
        let id = inner.next_id;

        let mut user = User::new(id, full_name, email, phone, Utc::now());
        user.set_password_hash(password_hash);
        inner.users.insert(id, user);

        Outcome::ok("User created successfully", id)
    }

    async fn get_all_users(&self) -> Outcome<Vec<User>> {
        let inner = self.inner.read().await;
        let users = inner.users.values().map(Self::row).collect();

        Outcome::ok("Users retrieved successfully", users)
    }

    async fn get_user_by_id(&self, id: i32) -> Outcome<User> {
        let inner = self.inner.read().await;

        match inner.users.get(&id) {
            Some(user) => Outcome::ok("User retrieved successfully", Self::row(user)),
            None => Outcome::fail("User not found"),
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
        let mut inner = self.inner.write().await;

        if inner
            .users
            .values()
            .any(|u| u.id() != id && u.email() == email)
        {
            return Outcome::fail("Email already exists");
        }

        match inner.users.get_mut(&id) {
            Some(user) => {
                user.set_full_name(full_name);
                user.set_email(email);
                user.set_phone(phone);

                if let Some(hash) = password_hash {
                    user.set_password_hash(hash);
                }

                Outcome::ok_empty("User updated successfully")
            }
            None => Outcome::fail("User not found"),
        }
    }

    async fn delete_user(&self, id: i32) -> Outcome<()> {
        let mut inner = self.inner.write().await;

        match inner.users.remove(&id) {
            Some(_) => Outcome::ok_empty("User deleted successfully"),
            None => Outcome::fail("User not found"),
        }
    }
}
