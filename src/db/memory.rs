//! In-process user store for tests and `STORAGE=memory`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repositories::{UserStore, DUPLICATE_USERNAME};
use crate::error::{AppError, AppResult};
use crate::models::user::{NewUser, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    by_username: HashMap<String, Uuid>,
}

/// Users held in memory. The write lock spans the uniqueness check and the insert.
#[derive(Default)]
pub struct MemoryUserStore {
    tables: RwLock<Tables>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Flip `is_active`; returns false when the user does not exist.
    pub async fn set_active(&self, id: Uuid, active: bool) -> bool {
        match self.tables.write().await.users.get_mut(&id) {
            Some(user) => {
                user.is_active = active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new: NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.by_username.contains_key(&new.username) {
            return Err(AppError::field("username", DUPLICATE_USERNAME));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            is_doctor: new.is_doctor,
            specialty: new.specialty,
            is_customer: new.is_customer,
            is_active: true,
            date_joined: Utc::now(),
        };
        tables.by_username.insert(user.username.clone(), user.id);
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_username
            .get(username)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: String::new(),
            password_hash: "hash".to_string(),
            is_doctor: false,
            specialty: None,
            is_customer: true,
        }
    }

    #[tokio::test]
    async fn insert_and_find() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("alice")).await.unwrap();
        assert!(user.is_active);

        let by_name = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        let by_id = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
        assert!(store.find_by_username("Alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_field_error() {
        let store = MemoryUserStore::new();
        store.insert(new_user("bob")).await.unwrap();
        let err = store.insert(new_user("bob")).await.unwrap_err();
        match err {
            AppError::Validation(fields) => assert!(fields.contains_key("username")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_inserts_keep_usernames_unique() {
        let store = Arc::new(MemoryUserStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.insert(new_user("carol")).await }));
        }
        let mut created = 0;
        for h in handles {
            if h.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn set_active_toggles_flag() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("dave")).await.unwrap();
        assert!(store.set_active(user.id, false).await);
        assert!(!store.find_by_id(user.id).await.unwrap().unwrap().is_active);
        assert!(!store.set_active(Uuid::new_v4(), false).await);
    }
}
