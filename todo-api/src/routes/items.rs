/// Todo item endpoints
///
/// Items are addressed two ways: through their list
/// (`/api/lists/:id/items`) for create and list, and directly
/// (`/api/items/:id`) for the rest. Either way the caller must own the list.

use crate::{
    app::AppState,
    error::ApiResult,
    routes::{IdResponse, StatusResponse},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use todo_shared::{
    auth::middleware::AuthContext,
    models::todo_item::{CreateTodoItem, TodoItem, UpdateItemInput},
};

/// `POST /api/lists/:id/items`
pub async fn create_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateTodoItem>, JsonRejection>,
) -> ApiResult<Json<IdResponse>> {
    let Path(list_id) = path?;
    let Json(input) = payload?;

    let id = state.items.create(auth.user_id, list_id, input).await?;

    Ok(Json(IdResponse { id }))
}

/// `GET /api/lists/:id/items`; a bare JSON array
pub async fn get_all_items(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<TodoItem>>> {
    let Path(list_id) = path?;

    let items = state.items.get_all(auth.user_id, list_id).await?;

    Ok(Json(items))
}

/// `GET /api/items/:id`
pub async fn get_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TodoItem>> {
    let Path(item_id) = path?;

    let item = state.items.get_by_id(auth.user_id, item_id).await?;

    Ok(Json(item))
}

/// `PUT /api/items/:id`
pub async fn update_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateItemInput>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(item_id) = path?;
    let Json(input) = payload?;

    state.items.update(auth.user_id, item_id, input).await?;

    Ok(Json(StatusResponse::ok()))
}

/// `DELETE /api/items/:id`
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(item_id) = path?;

    state.items.delete(auth.user_id, item_id).await?;

    Ok(Json(StatusResponse::ok()))
}
