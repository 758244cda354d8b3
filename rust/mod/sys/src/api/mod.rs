mod menus;
mod roles;
mod session;
mod users;

use std::sync::Arc;

use axum::Router;

use crate::service::SysService;

/// Shared application state.
pub type AppState = Arc<SysService>;

/// Build the sys API router.
///
/// All routes are relative; the caller nests them under `/sys`.
pub fn build_router(svc: Arc<SysService>) -> Router {
    Router::new()
        .merge(menus::routes())
        .merge(roles::routes())
        .merge(users::routes())
        .merge(session::routes())
        .with_state(svc)
}

#[cfg(test)]
pub(crate) mod testing {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::service::testing::scenario_service;

    pub fn app() -> Router {
        Router::new().nest("/sys", super::build_router(scenario_service()))
    }

    pub async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1 << 20).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
