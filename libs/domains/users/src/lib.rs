//! Users Domain
//!
//! Admin and customer accounts with Argon2 password hashes.
//!
//! # Features
//!
//! - User CRUD, unique email and username
//! - Password change with old-password verification
//! - Credential check for `POST /auth/login` (no sessions or tokens)
//!
//! The stored [`User`] carries the hash; handlers only ever return
//! [`UserResponse`], and the `users_index` projection ([`UserDocument`])
//! leaves it out as well.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_users::{InMemoryUserRepository, SEARCH_INDEX, UserService, handlers};
//! use search::{InMemorySearchIndex, SearchMirror};
//!
//! let mirror = SearchMirror::new(Arc::new(InMemorySearchIndex::new()), SEARCH_INDEX);
//! let service = UserService::new(InMemoryUserRepository::new(), mirror);
//!
//! let users = handlers::router(service.clone());
//! let auth = handlers::auth_router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, AuthApiDoc};
pub use models::{
    COLLECTION, ChangePassword, CreateUser, LoginRequest, Role, SEARCH_INDEX, UpdateUser, User,
    UserDocument, UserFilter, UserResponse, UserStatus,
};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
