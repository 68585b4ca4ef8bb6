/// Database models
///
/// # Models
///
/// - `user`: accounts and password hashes (the credential store)
/// - `todo_list`: todo lists, no owner column
/// - `todo_item`: todo items, no list column
/// - `ownership`: the `users_lists` and `lists_items` link tables
///
/// Query functions are generic over `sqlx::PgExecutor`, so the same call works
/// on a `&PgPool` or inside a transaction via `&mut *tx`.
///
/// # Example
///
/// ```no_run
/// use todo_shared::models::todo_list::{CreateTodoList, TodoList};
/// use todo_shared::models::ownership::UserListLink;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, user_id: i64) -> Result<(), sqlx::Error> {
/// let mut tx = pool.begin().await?;
///
/// let list = TodoList::create(&mut *tx, &CreateTodoList {
///     title: "Groceries".to_string(),
///     description: String::new(),
/// }).await?;
/// UserListLink::link(&mut *tx, user_id, list.id).await?;
///
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```

pub mod ownership;
pub mod todo_item;
pub mod todo_list;
pub mod user;
