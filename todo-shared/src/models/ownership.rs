/// Ownership index: the user↔list and list↔item link tables
///
/// These two relations are the only record of who may touch what. Lists and
/// items have no owner column, so a list without a `users_lists` row and an
/// item without a `lists_items` row are unreachable by everyone.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users_lists (
///     id      BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     list_id BIGINT NOT NULL REFERENCES todo_lists (id) ON DELETE CASCADE,
///     CONSTRAINT users_lists_pair_key UNIQUE (user_id, list_id),
///     CONSTRAINT users_lists_single_owner_key UNIQUE (list_id)
/// );
///
/// CREATE TABLE lists_items (
///     id      BIGSERIAL PRIMARY KEY,
///     list_id BIGINT NOT NULL REFERENCES todo_lists (id) ON DELETE CASCADE,
///     item_id BIGINT NOT NULL REFERENCES todo_items (id) ON DELETE CASCADE,
///     CONSTRAINT lists_items_pair_key UNIQUE (list_id, item_id),
///     CONSTRAINT lists_items_single_list_key UNIQUE (item_id)
/// );
/// ```
///
/// # Cardinality
///
/// One owner per list and one list per item. Linking the same pair twice is a
/// no-op that returns the existing row; linking a list to a second user (or an
/// item to a second list) fails on the `*_single_*_key` constraint.

use serde::Serialize;
use sqlx::PgExecutor;

/// Row lock taken on a link inside a transaction
///
/// Writers that keep the link in place (create, update) take `Share`;
/// writers that remove it (delete) take `Update`. Locks are always taken
/// on `users_lists` before `lists_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkLock {
    /// `FOR SHARE`
    Share,
    /// `FOR UPDATE`
    Update,
}

/// A user owns a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserListLink {
    pub id: i64,
    pub user_id: i64,
    pub list_id: i64,
}

/// A list contains an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ListItemLink {
    pub id: i64,
    pub list_id: i64,
    pub item_id: i64,
}

impl UserListLink {
    /// Records that `user_id` owns `list_id`
    ///
    /// Idempotent for an existing identical pair.
    ///
    /// # Errors
    ///
    /// - Foreign key violation if the user or list does not exist
    /// - Unique violation on `users_lists_single_owner_key` if the list is
    ///   already owned by someone else
    pub async fn link<'e, E>(executor: E, user_id: i64, list_id: i64) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        // The no-op update makes RETURNING yield the existing row on conflict
        sqlx::query_as::<_, UserListLink>(
            r#"
            INSERT INTO users_lists (user_id, list_id)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT users_lists_pair_key
            DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, list_id
            "#,
        )
        .bind(user_id)
        .bind(list_id)
        .fetch_one(executor)
        .await
    }

    /// True iff a link exists for exactly this pair
    pub async fn exists<'e, E>(executor: E, user_id: i64, list_id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users_lists
                WHERE user_id = $1 AND list_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(list_id)
        .fetch_one(executor)
        .await
    }

    /// Removes the owner link of a list, returns the number of rows removed
    pub async fn unlink_list<'e, E>(executor: E, list_id: i64) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM users_lists WHERE list_id = $1")
            .bind(list_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Locks the link for `(user_id, list_id)` until the transaction ends
    ///
    /// Returns `false` if no such link exists once the lock is granted. A
    /// `LinkLock::Share` holder blocks a concurrent `LinkLock::Update` holder
    /// and vice versa, so a list delete waits for in-flight writes into the
    /// list and those writes see the link gone afterwards.
    pub async fn lock<'e, E>(
        executor: E,
        user_id: i64,
        list_id: i64,
        mode: LinkLock,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let sql = match mode {
            LinkLock::Share => {
                "SELECT id FROM users_lists WHERE user_id = $1 AND list_id = $2 FOR SHARE"
            }
            LinkLock::Update => {
                "SELECT id FROM users_lists WHERE user_id = $1 AND list_id = $2 FOR UPDATE"
            }
        };

        let id: Option<i64> = sqlx::query_scalar(sql)
            .bind(user_id)
            .bind(list_id)
            .fetch_optional(executor)
            .await?;

        Ok(id.is_some())
    }
}

impl ListItemLink {
    /// Records that `item_id` belongs to `list_id`
    ///
    /// Same idempotency and error behaviour as [`UserListLink::link`].
    pub async fn link<'e, E>(executor: E, list_id: i64, item_id: i64) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, ListItemLink>(
            r#"
            INSERT INTO lists_items (list_id, item_id)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT lists_items_pair_key
            DO UPDATE SET list_id = EXCLUDED.list_id
            RETURNING id, list_id, item_id
            "#,
        )
        .bind(list_id)
        .bind(item_id)
        .fetch_one(executor)
        .await
    }

    /// Resolves the list an item belongs to
    ///
    /// `None` for unknown items and for orphaned items with no link.
    pub async fn list_of_item<'e, E>(executor: E, item_id: i64) -> Result<Option<i64>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT list_id FROM lists_items WHERE item_id = $1")
            .bind(item_id)
            .fetch_optional(executor)
            .await
    }

    /// Removes the membership link of one item
    pub async fn unlink_item<'e, E>(executor: E, item_id: i64) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM lists_items WHERE item_id = $1")
            .bind(item_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Removes every membership link of a list and returns the unlinked item ids
    pub async fn unlink_items_of_list<'e, E>(executor: E, list_id: i64) -> Result<Vec<i64>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("DELETE FROM lists_items WHERE list_id = $1 RETURNING item_id")
            .bind(list_id)
            .fetch_all(executor)
            .await
    }

    /// Locks the link for `(list_id, item_id)` until the transaction ends
    ///
    /// Returns `false` if the item is no longer in that list once the lock is
    /// granted. Take the owner lock on the list first.
    pub async fn lock<'e, E>(
        executor: E,
        list_id: i64,
        item_id: i64,
        mode: LinkLock,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let sql = match mode {
            LinkLock::Share => {
                "SELECT id FROM lists_items WHERE list_id = $1 AND item_id = $2 FOR SHARE"
            }
            LinkLock::Update => {
                "SELECT id FROM lists_items WHERE list_id = $1 AND item_id = $2 FOR UPDATE"
            }
        };

        let id: Option<i64> = sqlx::query_scalar(sql)
            .bind(list_id)
            .bind(item_id)
            .fetch_optional(executor)
            .await?;

        Ok(id.is_some())
    }
}
