//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::User;
use crate::domain::outcome::Outcome;

/// Repository seam over the backing store's five user operations.
///
/// Every method reports its result through an [`Outcome`] and never fails
/// outright: store errors are folded into failure outcomes by the
/// implementation.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Create a user; a successful outcome carries the new id
    async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        phone: &str,
        password_hash: &str,
    ) -> Outcome<i32>;

    /// Fetch all users in store order
    async fn get_all_users(&self) -> Outcome<Vec<User>>;

    /// Fetch a single user; a missing row is a failure outcome
    async fn get_user_by_id(&self, id: i32) -> Outcome<User>;

    /// Update a user; `password_hash` of `None` preserves the stored hash
    async fn update_user(
        &self,
        id: i32,
        full_name: &str,
        email: &str,
        phone: &str,
        password_hash: Option<&str>,
    ) -> Outcome<()>;

    /// Delete a user permanently
    async fn delete_user(&self, id: i32) -> Outcome<()>;
}
