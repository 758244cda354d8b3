use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use admin_core::{ApiResponse, ListParams, ListResult, ServiceError};

use crate::api::AppState;
use crate::model::{CreateUser, User, UserRecord};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_users).post(create_user))
        .route("/user/delete", post(delete_users))
        .route(
            "/user/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[derive(Serialize)]
struct Deleted {
    deleted: usize,
}

async fn list_users(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<ListResult<UserRecord>>>, ServiceError> {
    let page = svc.list_users(&params)?;
    Ok(Json(ApiResponse::ok(page)))
}

async fn create_user(
    State(svc): State<AppState>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ServiceError> {
    let user = svc.create_user(input)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

async fn get_user(
    State(svc): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<User>>, ServiceError> {
    let user = svc.get_user(id)?;
    Ok(Json(ApiResponse::ok(user)))
}

async fn update_user(
    State(svc): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<User>>, ServiceError> {
    let user = svc.update_user(id, patch)?;
    Ok(Json(ApiResponse::ok(user)))
}

async fn delete_user(
    State(svc): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    svc.delete_user(id)?;
    Ok(Json(ApiResponse::ok(())))
}

/// Body is a JSON array of user ids.
async fn delete_users(
    State(svc): State<AppState>,
    Json(ids): Json<Vec<u64>>,
) -> Result<Json<ApiResponse<Deleted>>, ServiceError> {
    let deleted = svc.delete_users(&ids)?;
    Ok(Json(ApiResponse::ok(Deleted { deleted })))
}
