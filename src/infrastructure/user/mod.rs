//! User infrastructure
//!
//! Store-facing implementations of the user domain: password hashing,
//! stored-procedure reply decoding, the PostgreSQL and in-memory
//! repositories, and the service orchestrating them.

pub mod memory_repository;
pub mod password;
mod procedure;
pub mod postgres_repository;
pub mod service;

pub use memory_repository::InMemoryUserRepository;
pub use password::{PasswordHasher, Sha256Hasher};
pub use postgres_repository::PostgresUserRepository;
pub use service::{CreateUserRequest, UpdateUserRequest, UserService, UserView};
