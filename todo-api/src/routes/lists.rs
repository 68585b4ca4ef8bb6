/// Todo list endpoints
///
/// Every handler runs behind the bearer-token layer and acts on behalf of
/// the [`AuthContext`] it inserted. Lists owned by other users answer
/// `404`, exactly like lists that do not exist.

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
use serde::Serialize;
use todo_shared::{
    auth::middleware::AuthContext,
    models::todo_list::{CreateTodoList, TodoList, UpdateListInput},
};

/// `GET /api/lists` response
#[derive(Debug, Serialize)]
pub struct ListsResponse {
    pub data: Vec<TodoList>,
}

/// `POST /api/lists`
pub async fn create_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<CreateTodoList>, JsonRejection>,
) -> ApiResult<Json<IdResponse>> {
    let Json(input) = payload?;

    let id = state.lists.create(auth.user_id, input).await?;

    Ok(Json(IdResponse { id }))
}

/// `GET /api/lists`
pub async fn get_all_lists(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ListsResponse>> {
    let data = state.lists.get_all(auth.user_id).await?;

    Ok(Json(ListsResponse { data }))
}

/// `GET /api/lists/:id`
pub async fn get_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TodoList>> {
    let Path(list_id) = path?;

    let list = state.lists.get_by_id(auth.user_id, list_id).await?;

    Ok(Json(list))
}

/// `PUT /api/lists/:id`
///
/// Partial update; a body with no fields is a `400`.
pub async fn update_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateListInput>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(list_id) = path?;
    let Json(input) = payload?;

    state.lists.update(auth.user_id, list_id, input).await?;

    Ok(Json(StatusResponse::ok()))
}

/// `DELETE /api/lists/:id`
///
/// Removes the list, its items and every link between them.
pub async fn delete_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(list_id) = path?;

    state.lists.delete(auth.user_id, list_id).await?;

    Ok(Json(StatusResponse::ok()))
}
