//! Application state for shared services

use std::sync::Arc;

use crate::domain::{ApiResponse, UserRepository};
use crate::infrastructure::user::{
    CreateUserRequest, PasswordHasher, UpdateUserRequest, UserService, UserView,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create_user(&self, request: CreateUserRequest) -> ApiResponse<i32>;
    async fn get_all_users(&self) -> ApiResponse<Vec<UserView>>;
    async fn get_user_by_id(&self, id: i32) -> ApiResponse<UserView>;
    async fn update_user(&self, id: i32, request: UpdateUserRequest) -> ApiResponse<()>;
    async fn delete_user(&self, id: i32) -> ApiResponse<()>;
}

#[async_trait::async_trait]
impl<R: UserRepository, H: PasswordHasher> UserServiceTrait for UserService<R, H> {
    async fn create_user(&self, request: CreateUserRequest) -> ApiResponse<i32> {
        UserService::create_user(self, request).await
    }

    async fn get_all_users(&self) -> ApiResponse<Vec<UserView>> {
        UserService::get_all_users(self).await
    }

    async fn get_user_by_id(&self, id: i32) -> ApiResponse<UserView> {
        UserService::get_user_by_id(self, id).await
    }

    async fn update_user(&self, id: i32, request: UpdateUserRequest) -> ApiResponse<()> {
        UserService::update_user(self, id, request).await
    }

    async fn delete_user(&self, id: i32) -> ApiResponse<()> {
        UserService::delete_user(self, id).await
    }
}
