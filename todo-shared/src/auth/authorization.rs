/// Ownership checks over the link tables
///
/// Every list and item access is decided here, and only from the link rows in
/// [`crate::models::ownership`]:
///
/// 1. **List**: `user_id` owns `list_id` iff a `users_lists` row holds that exact pair
/// 2. **Item**: resolve the item's list through `lists_items`, then apply rule 1
///
/// Missing links fail closed. An item with no `lists_items` row is owned by
/// nobody, and so is a list with no `users_lists` row.
///
/// The `require_*` and `lock_*` helpers return [`AuthzError::NotOwner`] for
/// both "does not exist" and "belongs to someone else" so callers cannot leak
/// the difference.
///
/// Reads use `require_*`. Writes use `lock_*` inside their transaction: the
/// link rows stay locked until commit, so the ownership that was checked is
/// still the ownership when the transaction commits.
///
/// # Example
///
/// ```no_run
/// use todo_shared::auth::authorization::{require_list_owner, user_owns_item};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// require_list_owner(&pool, 1, 10).await?;
///
/// let mut conn = pool.acquire().await?;
/// if user_owns_item(&mut conn, 1, 100).await? {
///     println!("item 100 is reachable by user 1");
/// }
/// # Ok(())
/// # }
/// ```

use sqlx::PgConnection;
use tracing::debug;

use crate::models::ownership::{LinkLock, ListItemLink, UserListLink};

/// Error type for ownership checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Resource is missing or owned by another user
    #[error("Not authorized to access this resource")]
    NotOwner,

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// True iff `user_id` owns `list_id`
pub async fn user_owns_list<'e, E>(executor: E, user_id: i64, list_id: i64) -> Result<bool, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    let owned = UserListLink::exists(executor, user_id, list_id).await?;
    debug!(user_id, list_id, owned, "List ownership check");
    Ok(owned)
}

/// True iff `user_id` owns the list that contains `item_id`
///
/// Takes a connection rather than a generic executor because it issues two
/// queries; pass `&mut *tx` inside a transaction or `&mut *pool.acquire().await?`.
pub async fn user_owns_item(
    conn: &mut PgConnection,
    user_id: i64,
    item_id: i64,
) -> Result<bool, sqlx::Error> {
    let Some(list_id) = ListItemLink::list_of_item(&mut *conn, item_id).await? else {
        debug!(user_id, item_id, "Item has no list link, denying");
        return Ok(false);
    };

    user_owns_list(&mut *conn, user_id, list_id).await
}

/// Fails with [`AuthzError::NotOwner`] unless `user_id` owns `list_id`
pub async fn require_list_owner<'e, E>(executor: E, user_id: i64, list_id: i64) -> Result<(), AuthzError>
where
    E: sqlx::PgExecutor<'e>,
{
    if !user_owns_list(executor, user_id, list_id).await? {
        return Err(AuthzError::NotOwner);
    }

    Ok(())
}

/// Fails with [`AuthzError::NotOwner`] unless `user_id` owns `item_id` through its list
pub async fn require_item_owner(
    conn: &mut PgConnection,
    user_id: i64,
    item_id: i64,
) -> Result<(), AuthzError> {
    if !user_owns_item(conn, user_id, item_id).await? {
        return Err(AuthzError::NotOwner);
    }

    Ok(())
}

/// Like [`require_list_owner`], but locks the owner link until the
/// transaction ends
pub async fn lock_list_owner(
    conn: &mut PgConnection,
    user_id: i64,
    list_id: i64,
    mode: LinkLock,
) -> Result<(), AuthzError> {
    let owned = UserListLink::lock(&mut *conn, user_id, list_id, mode).await?;
    debug!(user_id, list_id, owned, ?mode, "Locked list ownership check");

    if !owned {
        return Err(AuthzError::NotOwner);
    }

    Ok(())
}

/// Like [`require_item_owner`], but locks both links until the transaction
/// ends and returns the item's list id
///
/// The owner link is always locked in `Share` mode and before the item link,
/// matching the order a list delete takes them in.
pub async fn lock_item_owner(
    conn: &mut PgConnection,
    user_id: i64,
    item_id: i64,
    mode: LinkLock,
) -> Result<i64, AuthzError> {
    let Some(list_id) = ListItemLink::list_of_item(&mut *conn, item_id).await? else {
        debug!(user_id, item_id, "Item has no list link, denying");
        return Err(AuthzError::NotOwner);
    };

    lock_list_owner(&mut *conn, user_id, list_id, LinkLock::Share).await?;

    // The item may have been deleted while we waited for the owner lock
    if !ListItemLink::lock(&mut *conn, list_id, item_id, mode).await? {
        debug!(user_id, item_id, list_id, "Item link gone after lock, denying");
        return Err(AuthzError::NotOwner);
    }

    Ok(list_id)
}
