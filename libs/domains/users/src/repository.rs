use async_trait::async_trait;
use axum_helpers::page_offset;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserFilter};

/// Repository trait for User persistence
///
/// Implementations enforce unique `email` (case-insensitive) and `username`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn get_many(&self, ids: &[Uuid]) -> UserResult<Vec<User>>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// `exclude` skips the user being edited.
    async fn exists_by_email(&self, email: &str, exclude: Option<Uuid>) -> UserResult<bool>;

    async fn exists_by_username(&self, username: &str, exclude: Option<Uuid>) -> UserResult<bool>;

    /// Paged database listing, newest first
    async fn list(&self, filter: &UserFilter) -> UserResult<Vec<User>>;

    async fn count(&self, filter: &UserFilter) -> UserResult<u64>;

    async fn replace(&self, user: User) -> UserResult<User>;

    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(user: &User, filter: &UserFilter) -> bool {
        if let Some(role) = filter.role {
            if user.role != role {
                return false;
            }
        }
        if let Some(ref search) = filter.search {
            let needle = search.to_lowercase();
            if !user.name.to_lowercase().contains(&needle)
                && !user.email.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    fn check_unique(users: &HashMap<Uuid, User>, user: &User) -> UserResult<()> {
        let others = || users.values().filter(|u| u.id != user.id);
        if others().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(UserError::DuplicateEmail);
        }
        if others().any(|u| u.username == user.username) {
            return Err(UserError::DuplicateUsername);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;
        Self::check_unique(&users, &user)?;
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn exists_by_email(&self, email: &str, exclude: Option<Uuid>) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| Some(u.id) != exclude && u.email.eq_ignore_ascii_case(email)))
    }

    async fn exists_by_username(&self, username: &str, exclude: Option<Uuid>) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| Some(u.id) != exclude && u.username == username))
    }

    async fn list(&self, filter: &UserFilter) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users
            .values()
            .filter(|u| Self::matches(u, filter))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result
            .into_iter()
            .skip(page_offset(filter.page, filter.limit) as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &UserFilter) -> UserResult<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| Self::matches(u, filter)).count() as u64)
    }

    async fn replace(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }
        Self::check_unique(&users, &user)?;
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let removed = self.users.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(removed)
    }
}
