/// Application services
///
/// - [`auth`]: registration, sign-in and token verification
/// - [`todo_list`]: ownership-scoped list CRUD
/// - [`todo_item`]: item CRUD, owned transitively through the containing list
///
/// All three are cheap to clone (they hold a `PgPool` handle) and are meant
/// to live in the HTTP layer's shared state.

pub mod auth;
pub mod todo_item;
pub mod todo_list;
