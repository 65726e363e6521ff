//! User Service - password handling, uniqueness checks, search mirroring

use axum_helpers::Paginated;
use search::{SearchMirror, SearchQuery, order_by_ids};
use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{
    ChangePassword, CreateUser, LoginRequest, UpdateUser, User, UserDocument, UserFilter,
    UserResponse, UserStatus,
};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;

const SEARCH_FIELDS: &[&str] = &["name", "email"];

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    search: SearchMirror,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, search: SearchMirror) -> Self {
        Self {
            repository: Arc::new(repository),
            search,
        }
    }

    async fn find(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    async fn ensure_unique(&self, email: &str, username: &str, exclude: Option<Uuid>) -> UserResult<()> {
        if self.repository.exists_by_email(email, exclude).await? {
            return Err(UserError::DuplicateEmail);
        }
        if self.repository.exists_by_username(username, exclude).await? {
            return Err(UserError::DuplicateUsername);
        }
        Ok(())
    }

    async fn mirror(&self, user: &User) {
        self.search
            .upsert_document(&user.id.to_string(), &UserDocument::from(user))
            .await;
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, filter: UserFilter) -> UserResult<Paginated<UserResponse>> {
        let query = SearchQuery::new()
            .text(filter.search.as_deref(), SEARCH_FIELDS)
            .term_opt("role", filter.role.map(|r| r.to_string()))
            .paginate(filter.page, filter.limit);

        let page = match self.search.search(&query).await {
            Ok(hits) => {
                let ids: Vec<Uuid> = hits.parsed_ids();
                let records = self.repository.get_many(&ids).await?;
                Paginated::new(
                    filter.page,
                    filter.limit,
                    hits.total,
                    order_by_ids(&ids, records, |u| u.id),
                )
            }
            Err(e) => {
                warn!(error = %e, "User search unavailable, listing from database");
                let total = self.repository.count(&filter).await?;
                let records = self.repository.list(&filter).await?;
                Paginated::new(filter.page, filter.limit, total, records)
            }
        };
        Ok(page.map(UserResponse::from))
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        Ok(self.find(id).await?.into())
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        self.ensure_unique(&input.email, &input.username, None).await?;

        let password_hash = hash_password(&input.password)?;
        let user = self.repository.create(User::new(input, password_hash)).await?;

        self.search
            .index_document(&user.id.to_string(), &UserDocument::from(&user))
            .await;
        Ok(user.into())
    }

    /// Replace profile fields; the password is changed only through
    /// [`change_password`](Self::change_password).
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<UserResponse> {
        let mut user = self.find(id).await?;
        self.ensure_unique(&input.email, &input.username, Some(id))
            .await?;

        user.replace_with(input);
        let user = self.repository.replace(user).await?;
        self.mirror(&user).await;
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        self.search.remove(&id.to_string()).await;
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn change_password(&self, id: Uuid, input: ChangePassword) -> UserResult<UserResponse> {
        if input.new_password == input.old_password {
            return Err(UserError::SamePassword);
        }
        if input.new_password != input.confirm_password {
            return Err(UserError::PasswordMismatch);
        }

        let mut user = self.find(id).await?;
        if !verify_password(&input.old_password, &user.password_hash)? {
            return Err(UserError::WrongPassword);
        }

        user.password_hash = hash_password(&input.new_password)?;
        user.updated_at = chrono::Utc::now();
        let user = self.repository.replace(user).await?;
        self.mirror(&user).await;
        Ok(user.into())
    }

    /// Verify credentials; no session or token is issued.
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<UserResponse> {
        let user = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }
        if user.status != UserStatus::Active {
            return Err(UserError::Inactive);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user.into())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            search: self.search.clone(),
        }
    }
}
