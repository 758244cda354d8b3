use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use admin_core::{ApiResponse, ListParams, ListResult, ServiceError};

use crate::api::AppState;
use crate::model::{Role, RoleEditor, SaveRole};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/role", get(list_roles).post(create_role))
        .route("/role/all", get(all_roles))
        .route(
            "/role/{id}",
            get(get_role).put(update_role).delete(delete_role),
        )
        .route("/role/{id}/editor", get(role_editor))
}

async fn list_roles(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<ListResult<Role>>>, ServiceError> {
    let page = svc.list_roles(&params)?;
    Ok(Json(ApiResponse::ok(page)))
}

async fn all_roles(
    State(svc): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Role>>>, ServiceError> {
    let roles = svc.all_roles()?;
    Ok(Json(ApiResponse::ok(roles)))
}

async fn create_role(
    State(svc): State<AppState>,
    Json(input): Json<SaveRole>,
) -> Result<(StatusCode, Json<ApiResponse<Role>>), ServiceError> {
    let role = svc.create_role(input)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(role))))
}

async fn get_role(
    State(svc): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Role>>, ServiceError> {
    let role = svc.get_role(id)?;
    Ok(Json(ApiResponse::ok(role)))
}

async fn role_editor(
    State(svc): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<RoleEditor>>, ServiceError> {
    let editor = svc.role_editor(id)?;
    Ok(Json(ApiResponse::ok(editor)))
}

async fn update_role(
    State(svc): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<SaveRole>,
) -> Result<Json<ApiResponse<Role>>, ServiceError> {
    let role = svc.update_role(id, input)?;
    Ok(Json(ApiResponse::ok(role)))
}

async fn delete_role(
    State(svc): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    svc.delete_role(id)?;
    Ok(Json(ApiResponse::ok(())))
}
