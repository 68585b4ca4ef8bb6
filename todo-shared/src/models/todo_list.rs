/// Todo list model and database operations
///
/// A list row has no owner column. Who may see or change it is recorded only
/// in `users_lists` (see [`crate::models::ownership`]), and every query here
/// that is scoped to a user goes through that table.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todo_lists (
///     id          BIGSERIAL PRIMARY KEY,
///     title       VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use validator::{Validate, ValidationError};

/// A todo list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TodoList {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Input for creating a todo list
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodoList {
    /// Required, non-empty
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,

    /// Optional, stored as an empty string when absent
    #[serde(default)]
    pub description: String,
}

/// Partial update for a todo list
///
/// `None` leaves the column unchanged. At least one field must be set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "require_list_change"))]
pub struct UpdateListInput {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,
}

fn require_list_change(input: &UpdateListInput) -> Result<(), ValidationError> {
    if input.title.is_none() && input.description.is_none() {
        let mut err = ValidationError::new("empty_update");
        err.message = Some("update structure has no values".into());
        return Err(err);
    }
    Ok(())
}

impl TodoList {
    /// Inserts a list row
    ///
    /// This only writes `todo_lists`; linking the list to its owner is the
    /// caller's job and must happen in the same transaction.
    pub async fn create<'e, E>(executor: E, data: &CreateTodoList) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TodoList>(
            r#"
            INSERT INTO todo_lists (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .fetch_one(executor)
        .await
    }

    /// Finds a list by id, without any ownership scoping
    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TodoList>(
            "SELECT id, title, description FROM todo_lists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Lists every list linked to `user_id`, oldest first
    pub async fn list_by_owner<'e, E>(executor: E, user_id: i64) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TodoList>(
            r#"
            SELECT tl.id, tl.title, tl.description
            FROM todo_lists tl
            INNER JOIN users_lists ul ON ul.list_id = tl.id
            WHERE ul.user_id = $1
            ORDER BY tl.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }

    /// Applies the set fields of `data`
    ///
    /// Returns `None` if the row does not exist.
    pub async fn update<'e, E>(
        executor: E,
        id: i64,
        data: &UpdateListInput,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TodoList>(
            r#"
            UPDATE todo_lists
            SET title = COALESCE($2, title),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, title, description
            "#,
        )
        .bind(id)
        .bind(data.title.as_deref())
        .bind(data.description.as_deref())
        .fetch_optional(executor)
        .await
    }

    /// Deletes a list row, returns whether it existed
    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM todo_lists WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_title() {
        let input = CreateTodoList {
            title: String::new(),
            description: "x".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        let input = CreateTodoList {
            title: "Groceries".to_string(),
            description: String::new(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_description_defaults_to_empty() {
        let input: CreateTodoList = serde_json::from_str(r#"{"title":"Groceries"}"#).unwrap();
        assert_eq!(input.description, "");
    }

    #[test]
    fn test_update_rejects_empty_input() {
        assert!(UpdateListInput::default().validate().is_err());

        let input: UpdateListInput = serde_json::from_str("{}").unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_accepts_any_single_field() {
        let only_description = UpdateListInput {
            description: Some("y".to_string()),
            ..Default::default()
        };
        assert!(only_description.validate().is_ok());

        let only_title = UpdateListInput {
            title: Some("A".to_string()),
            ..Default::default()
        };
        assert!(only_title.validate().is_ok());
    }

    #[test]
    fn test_update_allows_clearing_description() {
        let input = UpdateListInput {
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_empty_title() {
        let input = UpdateListInput {
            title: Some(String::new()),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }
}
