use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use admin_core::{ApiResponse, ServiceError};

use crate::api::AppState;
use crate::hierarchy::{NavItem, RouteEntry};
use crate::model::{MenuNode, Principal};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/session/{user_id}", get(principal))
        .route("/session/{user_id}/routes", get(session_routes))
        .route("/session/{user_id}/menus", get(session_menus))
        .route("/session/{user_id}/nav", get(session_nav))
        .route("/routes", get(anonymous_routes))
}

async fn principal(
    State(svc): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<ApiResponse<Principal>>, ServiceError> {
    let principal = svc.resolve_principal(user_id)?;
    Ok(Json(ApiResponse::ok(principal)))
}

async fn session_routes(
    State(svc): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<ApiResponse<Vec<RouteEntry>>>, ServiceError> {
    let routes = svc.session_routes(user_id)?;
    Ok(Json(ApiResponse::ok(routes)))
}

async fn session_menus(
    State(svc): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<ApiResponse<Vec<MenuNode>>>, ServiceError> {
    let menus = svc.session_menus(user_id)?;
    Ok(Json(ApiResponse::ok(menus)))
}

async fn session_nav(
    State(svc): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<ApiResponse<Vec<NavItem>>>, ServiceError> {
    let nav = svc.session_nav(user_id)?;
    Ok(Json(ApiResponse::ok(nav)))
}

/// Route set served before anyone signs in.
async fn anonymous_routes(
    State(svc): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RouteEntry>>>, ServiceError> {
    let routes = svc.resolve_routes(None)?;
    Ok(Json(ApiResponse::ok(routes)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::testing::{app, call};

    async fn seed_user(app: &axum::Router, checked: serde_json::Value) {
        call(
            app,
            "POST",
            "/sys/role",
            Some(json!({"name": "Viewer", "checked_menu_ids": checked})),
        )
        .await;
        call(
            app,
            "POST",
            "/sys/user",
            Some(json!({"username": "viewer", "real_name": "Viewer", "role_id": 1})),
        )
        .await;
    }

    #[tokio::test]
    async fn test_session_projections() {
        let app = app();
        seed_user(&app, json!([4])).await;

        let (status, body) = call(&app, "GET", "/sys/session/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["menu_ids"], json!([2, 3, 4]));
        assert_eq!(
            body["data"]["permissions"],
            json!(["system:list", "user:add", "user:list"])
        );

        let (_, body) = call(&app, "GET", "/sys/session/1/routes", None).await;
        assert_eq!(
            body["data"],
            json!([
                {
                    "path": "/system",
                    "name": "System",
                    "menu_id": 2,
                    "protected": true,
                    "children": [
                        {"path": "/system/user", "name": "Users", "menu_id": 3, "protected": true}
                    ]
                },
                {"path": "*", "redirect": "/dashboard"}
            ])
        );

        let (_, body) = call(&app, "GET", "/sys/session/1/menus", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let (_, body) = call(&app, "GET", "/sys/session/1/nav", None).await;
        assert_eq!(body["data"][0]["key"], "/system");
        assert!(body["data"][0].get("target").is_none());
        assert_eq!(body["data"][0]["children"][0]["target"], "/system/user");
    }

    #[tokio::test]
    async fn test_anonymous_and_unknown() {
        let app = app();
        let (_, body) = call(&app, "GET", "/sys/routes", None).await;
        assert_eq!(body["data"][0]["path"], "/login");
        assert_eq!(body["data"][0]["exact"], true);
        assert_eq!(body["data"][2]["path"], "*");

        let (status, _) = call(&app, "GET", "/sys/session/9/routes", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
