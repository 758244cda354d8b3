use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use admin_core::{ApiResponse, ServiceError};

use crate::api::AppState;
use crate::model::{CreateMenu, MenuNode, MenuTree};
use crate::service::AttachmentCheck;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/menu/list", get(list_menus))
        .route("/menu/tree", get(menu_tree))
        .route("/menu", post(create_menu))
        .route(
            "/menu/{id}",
            get(get_menu).put(update_menu).delete(delete_menu),
        )
        .route("/menu/attachable/{parent_id}", get(attachable))
}

async fn list_menus(
    State(svc): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuNode>>>, ServiceError> {
    let menus = svc.list_menus()?;
    Ok(Json(ApiResponse::ok(menus)))
}

async fn menu_tree(
    State(svc): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuTree>>>, ServiceError> {
    let tree = svc.menu_tree()?;
    Ok(Json(ApiResponse::ok(tree)))
}

async fn create_menu(
    State(svc): State<AppState>,
    Json(input): Json<CreateMenu>,
) -> Result<(StatusCode, Json<ApiResponse<MenuNode>>), ServiceError> {
    let menu = svc.create_menu(input)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(menu))))
}

async fn get_menu(
    State(svc): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<MenuNode>>, ServiceError> {
    let menu = svc.get_menu(id)?;
    Ok(Json(ApiResponse::ok(menu)))
}

async fn update_menu(
    State(svc): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<MenuNode>>, ServiceError> {
    let menu = svc.update_menu(id, patch)?;
    Ok(Json(ApiResponse::ok(menu)))
}

async fn delete_menu(
    State(svc): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    svc.delete_menu(id)?;
    Ok(Json(ApiResponse::ok(())))
}

async fn attachable(
    State(svc): State<AppState>,
    Path(parent_id): Path<u64>,
) -> Result<Json<ApiResponse<AttachmentCheck>>, ServiceError> {
    let check = svc.attachment_check(parent_id)?;
    Ok(Json(ApiResponse::ok(check)))
}
