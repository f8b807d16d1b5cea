use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{entity::user, error::TaskResult, models::User};

/// Read-only lookup of users by login name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_user_name(&self, user_name: &str) -> TaskResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, user: User) {
        self.users.write().await.insert(user.user_name.clone(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_user_name(&self, user_name: &str) -> TaskResult<Option<User>> {
        Ok(self.users.read().await.get(user_name).cloned())
    }
}

pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_user_name(&self, user_name: &str) -> TaskResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::UserName.eq(user_name))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }
}
