/// Todo item model and database operations
///
/// Like lists, items carry no reference to their container. Membership is the
/// `lists_items` link table; ownership is reached through the list.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todo_items (
///     id          BIGSERIAL PRIMARY KEY,
///     title       VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     done        BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use validator::{Validate, ValidationError};

/// A todo item
///
/// `done` is a plain toggle; any value may replace any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub done: bool,
}

/// Input for creating a todo item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodoItem {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub done: bool,
}

/// Partial update for a todo item
///
/// At least one of `title`, `description`, `done` must be set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "require_item_change"))]
pub struct UpdateItemInput {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub done: Option<bool>,
}

fn require_item_change(input: &UpdateItemInput) -> Result<(), ValidationError> {
    if input.title.is_none() && input.description.is_none() && input.done.is_none() {
        let mut err = ValidationError::new("empty_update");
        err.message = Some("update structure has no values".into());
        return Err(err);
    }
    Ok(())
}

impl TodoItem {
    /// Inserts an item row (unlinked)
    pub async fn create<'e, E>(executor: E, data: &CreateTodoItem) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TodoItem>(
            r#"
            INSERT INTO todo_items (title, description, done)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, done
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.done)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TodoItem>(
            "SELECT id, title, description, done FROM todo_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Lists the items linked to `list_id`, oldest first
    pub async fn list_by_list<'e, E>(executor: E, list_id: i64) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TodoItem>(
            r#"
            SELECT ti.id, ti.title, ti.description, ti.done
            FROM todo_items ti
            INNER JOIN lists_items li ON li.item_id = ti.id
            WHERE li.list_id = $1
            ORDER BY ti.id ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(executor)
        .await
    }

    /// Applies the set fields of `data`, `None` if the row is gone
    pub async fn update<'e, E>(
        executor: E,
        id: i64,
        data: &UpdateItemInput,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TodoItem>(
            r#"
            UPDATE todo_items
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                done = COALESCE($4, done)
            WHERE id = $1
            RETURNING id, title, description, done
            "#,
        )
        .bind(id)
        .bind(data.title.as_deref())
        .bind(data.description.as_deref())
        .bind(data.done)
        .fetch_optional(executor)
        .await
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM todo_items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes every item in `ids`, returns the number of rows removed
    pub async fn delete_many<'e, E>(executor: E, ids: &[i64]) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM todo_items WHERE id = ANY($1)")
            .bind(ids)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
