//! In-memory `UserStore` used by the router tests.

use std::sync::Mutex;

use axum::async_trait;

use crate::users::{
    repo::UserStore,
    repo_types::{NewUser, UserChanges, UserId, UserRecord},
};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<UserRecord>>,
}

impl MemoryUserStore {
    fn with_users<T>(&self, f: impl FnOnce(&mut Vec<UserRecord>) -> T) -> T {
        let mut users = self.users.lock().expect("user store lock poisoned");
        f(&mut users)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> anyhow::Result<UserId> {
        let id = UserId::new();
        self.with_users(|users| users.push(user.into_record(id)));
        Ok(id)
    }

    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<UserRecord>> {
        Ok(self.with_users(|users| users.iter().find(|u| u.id == id).cloned()))
    }

    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<UserRecord>> {
        Ok(self.with_users(|users| {
            users
                .iter()
                .find(|u| u.username == login || u.email == login)
                .cloned()
        }))
    }

    async fn list(&self) -> anyhow::Result<Vec<UserRecord>> {
        Ok(self.with_users(|users| users.clone()))
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> anyhow::Result<bool> {
        Ok(self.with_users(|users| match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                changes.apply(user);
                true
            }
            None => false,
        }))
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        Ok(self.with_users(|users| {
            let count = users.len() as u64;
            users.clear();
            count
        }))
    }

    async fn delete(&self, id: UserId) -> anyhow::Result<bool> {
        Ok(self.with_users(|users| {
            let before = users.len();
            users.retain(|u| u.id != id);
            users.len() < before
        }))
    }
}
