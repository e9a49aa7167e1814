use async_trait::async_trait;
use cuid2::CuidConstructor;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[cfg(any(test, feature = "mocks"))]
use mockall::{automock, predicate::*};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("todo item {todo_id} not found for user {user_id}")]
    NotFound { user_id: String, todo_id: String },
    #[error("todo store request failed: {0}")]
    Upstream(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub user_id: String,
    pub todo_id: String,
    pub created_at: String,
    pub name: String,
    pub due_date: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TodoItem {
    pub fn new(
        user_id: String,
        todo_id: String,
        created_at: String,
        name: String,
        due_date: String,
    ) -> Self {
        Self {
            user_id,
            todo_id,
            created_at,
            name,
            due_date,
            done: false,
            attachment_url: None,
        }
    }
}

/// Patch payload for the mutable fields of a todo item. Applied as a partial
/// update, never stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    pub name: String,
    pub due_date: String,
    pub done: bool,
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait TodoRepository: Debug {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>, RepositoryError>;
    async fn get_by_user_and_id(
        &self,
        user_id: &str,
        todo_id: &str,
    ) -> Result<Option<TodoItem>, RepositoryError>;
    async fn create(&self, item: TodoItem) -> Result<TodoItem, RepositoryError>;
    async fn update_fields(
        &self,
        update: TodoUpdate,
        user_id: &str,
        todo_id: &str,
    ) -> Result<(), RepositoryError>;
    async fn update_attachment_url(
        &self,
        attachment_url: String,
        user_id: &str,
        todo_id: &str,
    ) -> Result<(), RepositoryError>;
    async fn delete(&self, todo_id: &str, user_id: &str) -> Result<(), RepositoryError>;
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
pub trait IdGenerator {
    fn generate_id(&self) -> String;
}

pub struct CuidGenerator {
    gen: CuidConstructor,
}

impl CuidGenerator {
    pub fn new() -> Self {
        Self {
            gen: CuidConstructor::new(),
        }
    }
}

impl IdGenerator for CuidGenerator {
    fn generate_id(&self) -> String {
        self.gen.create_id()
    }
}
