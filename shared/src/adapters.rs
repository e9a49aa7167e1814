use crate::core::{RepositoryError, TodoItem, TodoRepository, TodoUpdate};
use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use lambda_http::tracing;
use std::collections::HashMap;

#[derive(Debug)]
pub struct DynamoDbTodoRepository {
    table_name: String,
    dynamodb_client: Client,
}

impl DynamoDbTodoRepository {
    pub fn new(table_name: String, dynamodb_client: Client) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }
}

#[async_trait]
impl TodoRepository for DynamoDbTodoRepository {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>, RepositoryError> {
        tracing::info!("Listing todo items for user {}", user_id);

        let result = self
            .dynamodb_client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("userId = :userId")
            .expression_attribute_values(":userId", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| {
                RepositoryError::Upstream(format!("Error querying todo items: {:?}", e))
            })?;

        let mut todos = vec![];
        if let Some(items) = result.items {
            for item in items {
                // ignore item that cannot be properly deserialized
                if let Ok(todo) = TodoItem::try_from(item) {
                    todos.push(todo);
                }
            }
        }

        tracing::info!("Listed {} todo items for user {}", todos.len(), user_id);

        Ok(todos)
    }

    async fn get_by_user_and_id(
        &self,
        user_id: &str,
        todo_id: &str,
    ) -> Result<Option<TodoItem>, RepositoryError> {
        tracing::info!("Getting todo item {} for user {}", todo_id, user_id);

        let result = self
            .dynamodb_client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("userId = :userId AND todoId = :todoId")
            .expression_attribute_values(":userId", AttributeValue::S(user_id.to_string()))
            .expression_attribute_values(":todoId", AttributeValue::S(todo_id.to_string()))
            .send()
            .await
            .map_err(|e| {
                RepositoryError::Upstream(format!("Error querying todo item: {:?}", e))
            })?;

        let todo = result
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|item| TodoItem::try_from(item).ok());

        tracing::info!("Get todo item {} for user {} success", todo_id, user_id);

        Ok(todo)
    }

    async fn create(&self, item: TodoItem) -> Result<TodoItem, RepositoryError> {
        tracing::info!(
            "Creating todo item {} for user {}",
            item.todo_id,
            item.user_id
        );

        let mut put_item = self
            .dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .item("userId", AttributeValue::S(item.user_id.clone()))
            .item("todoId", AttributeValue::S(item.todo_id.clone()))
            .item("createdAt", AttributeValue::S(item.created_at.clone()))
            .item("name", AttributeValue::S(item.name.clone()))
            .item("dueDate", AttributeValue::S(item.due_date.clone()))
            .item("done", AttributeValue::Bool(item.done));
        if let Some(attachment_url) = &item.attachment_url {
            put_item = put_item.item("attachmentUrl", AttributeValue::S(attachment_url.clone()));
        }

        put_item
            .send()
            .await
            .map_err(|e| RepositoryError::Upstream(format!("Error adding todo item: {:?}", e)))?;

        tracing::info!(
            "Create todo item {} for user {} success",
            item.todo_id,
            item.user_id
        );

        Ok(item)
    }

    async fn update_fields(
        &self,
        update: TodoUpdate,
        user_id: &str,
        todo_id: &str,
    ) -> Result<(), RepositoryError> {
        tracing::info!("Updating todo item {} for user {}", todo_id, user_id);

        // `name` is a DynamoDB reserved word, hence the placeholder.
        let result = self
            .dynamodb_client
            .update_item()
            .table_name(&self.table_name)
            .key("userId", AttributeValue::S(user_id.to_string()))
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .update_expression("SET #name = :name, dueDate = :dueDate, done = :done")
            .expression_attribute_names("#name", "name")
            .expression_attribute_values(":name", AttributeValue::S(update.name))
            .expression_attribute_values(":dueDate", AttributeValue::S(update.due_date))
            .expression_attribute_values(":done", AttributeValue::Bool(update.done))
            .condition_expression("attribute_exists(todoId)")
            .send()
            .await;

        match result {
            Ok(_) => {
                tracing::info!("Update todo item {} for user {} success", todo_id, user_id);
                Ok(())
            }
            Err(e) => {
                let generic_err_msg = format!("Error updating todo item: {:?}", e);
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    tracing::error!("Todo item {} not found for user {}", todo_id, user_id);
                    Err(RepositoryError::NotFound {
                        user_id: user_id.to_string(),
                        todo_id: todo_id.to_string(),
                    })
                } else {
                    Err(RepositoryError::Upstream(generic_err_msg))
                }
            }
        }
    }

    async fn update_attachment_url(
        &self,
        attachment_url: String,
        user_id: &str,
        todo_id: &str,
    ) -> Result<(), RepositoryError> {
        tracing::info!(
            "Updating attachment url of todo item {} for user {}",
            todo_id,
            user_id
        );

        let result = self
            .dynamodb_client
            .update_item()
            .table_name(&self.table_name)
            .key("userId", AttributeValue::S(user_id.to_string()))
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .update_expression("SET attachmentUrl = :attachmentUrl")
            .expression_attribute_values(":attachmentUrl", AttributeValue::S(attachment_url))
            .condition_expression("attribute_exists(todoId)")
            .send()
            .await;

        match result {
            Ok(_) => {
                tracing::info!(
                    "Update attachment url of todo item {} for user {} success",
                    todo_id,
                    user_id
                );
                Ok(())
            }
            Err(e) => {
                let generic_err_msg = format!("Error updating attachment url: {:?}", e);
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    tracing::error!("Todo item {} not found for user {}", todo_id, user_id);
                    Err(RepositoryError::NotFound {
                        user_id: user_id.to_string(),
                        todo_id: todo_id.to_string(),
                    })
                } else {
                    Err(RepositoryError::Upstream(generic_err_msg))
                }
            }
        }
    }

    async fn delete(&self, todo_id: &str, user_id: &str) -> Result<(), RepositoryError> {
        tracing::info!("Deleting todo item {} for user {}", todo_id, user_id);

        self.dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key("userId", AttributeValue::S(user_id.to_string()))
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::Upstream(format!("Error deleting todo item: {:?}", e)))
    }
}

impl TryFrom<HashMap<String, AttributeValue>> for TodoItem {
    type Error = String;

    fn try_from(item: HashMap<String, AttributeValue>) -> Result<Self, Self::Error> {
        let user_id = item
            .get("userId")
            .ok_or_else(|| "userId not found".to_string())?
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| "userId is not a String".to_string())?;
        let todo_id = item
            .get("todoId")
            .ok_or_else(|| "todoId not found".to_string())?
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| "todoId is not a String".to_string())?;
        let created_at = item
            .get("createdAt")
            .ok_or_else(|| "createdAt not found".to_string())?
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| "createdAt is not a String".to_string())?;
        let name = item
            .get("name")
            .ok_or_else(|| "name not found".to_string())?
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| "name is not a String".to_string())?;
        let due_date = item
            .get("dueDate")
            .ok_or_else(|| "dueDate not found".to_string())?
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| "dueDate is not a String".to_string())?;
        let done = item
            .get("done")
            .ok_or_else(|| "done not found".to_string())?
            .as_bool()
            .map(|b| *b)
            .map_err(|_| "done is not a Bool".to_string())?;
        let attachment_url = item
            .get("attachmentUrl")
            .and_then(|a| a.as_s().map(|s| s.to_string()).ok());

        Ok(TodoItem {
            user_id,
            todo_id,
            created_at,
            name,
            due_date,
            done,
            attachment_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_item() -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("userId".to_string(), AttributeValue::S("u1".to_string())),
            ("todoId".to_string(), AttributeValue::S("t1".to_string())),
            (
                "createdAt".to_string(),
                AttributeValue::S("2024-01-01T00:00:00Z".to_string()),
            ),
            ("name".to_string(), AttributeValue::S("buy milk".to_string())),
            (
                "dueDate".to_string(),
                AttributeValue::S("2024-01-01".to_string()),
            ),
            ("done".to_string(), AttributeValue::Bool(false)),
        ])
    }

    #[test]
    fn when_all_attributes_present_should_convert() {
        let mut item = full_item();
        item.insert(
            "attachmentUrl".to_string(),
            AttributeValue::S("https://bucket.s3.amazonaws.com/a1".to_string()),
        );

        let todo = TodoItem::try_from(item).unwrap();

        assert_eq!(todo.user_id, "u1");
        assert_eq!(todo.todo_id, "t1");
        assert_eq!(todo.created_at, "2024-01-01T00:00:00Z");
        assert_eq!(todo.name, "buy milk");
        assert_eq!(todo.due_date, "2024-01-01");
        assert!(!todo.done);
        assert_eq!(
            todo.attachment_url.unwrap(),
            "https://bucket.s3.amazonaws.com/a1"
        );
    }

    #[test]
    fn when_attachment_url_missing_should_convert_without_it() {
        let todo = TodoItem::try_from(full_item()).unwrap();

        assert!(todo.attachment_url.is_none());
    }

    #[test]
    fn when_required_attribute_missing_should_fail() {
        let mut item = full_item();
        item.remove("dueDate");

        let result = TodoItem::try_from(item);

        assert_eq!(result.unwrap_err(), "dueDate not found");
    }

    #[test]
    fn when_attribute_has_wrong_type_should_fail() {
        let mut item = full_item();
        item.insert("done".to_string(), AttributeValue::S("false".to_string()));

        let result = TodoItem::try_from(item);

        assert_eq!(result.unwrap_err(), "done is not a Bool");
    }
}
