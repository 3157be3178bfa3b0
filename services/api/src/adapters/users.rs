//! services/api/src/adapters/users.rs
//!
//! The in-memory user store, implementing the `UserService` port.
//! Passwords are kept and compared as plaintext.

use async_trait::async_trait;
use bookstore_core::domain::User;
use bookstore_core::ports::{PortError, PortResult, UserService};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// An in-memory user store keyed by username.
#[derive(Default)]
pub struct InMemoryUsers {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserService for InMemoryUsers {
    async fn register(&self, username: &str, password: &str) -> PortResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(PortError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(PortError::AlreadyExists(format!("user '{}'", username)));
        }
        users.insert(
            username.to_string(),
            User {
                username: username.to_string(),
                password: password.to_string(),
            },
        );
        Ok(())
    }

    async fn authenticate(&self, username: &str, password: &str) -> PortResult<User> {
        self.users
            .read()
            .await
            .get(username)
            .filter(|user| user.password == password)
            .cloned()
            .ok_or(PortError::InvalidCredentials)
    }
}
