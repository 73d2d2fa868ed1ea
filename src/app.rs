use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::PageStore;
use crate::handlers::{protected, public};
use crate::middleware::require_admin;
use crate::services::{PageResolver, PageService, SectionEditor};

/// Everything a handler needs, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn PageStore>,
    pub pages: PageService,
    pub sections: SectionEditor,
    pub resolver: PageResolver,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, store: Arc<dyn PageStore>) -> Self {
        let pages = PageService::new(store.clone());
        Self {
            sections: SectionEditor::new(store.clone(), config.editor.reorder_unknown_ids),
            resolver: PageResolver::new(pages.clone()),
            pages,
            store,
            config,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let api = &state.config.api;
    let security = &state.config.security;

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Admin (JWT)
        .merge(admin_routes(state.clone()))
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes));

    if security.enable_cors {
        router = router.layer(cors_layer(security));
    }
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/pages/:slug", get(public::page_get))
        .route("/pages/:slug/render", get(public::page_render))
        .route("/admin/login", post(public::login_post))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use protected::{pages, sections};

    Router::new()
        .route("/admin/pages", get(pages::page_list).post(pages::page_create))
        .route(
            "/admin/pages/:id",
            get(pages::page_show)
                .put(pages::page_update)
                .delete(pages::page_delete),
        )
        .route("/admin/pages/:id/sections", post(sections::section_create))
        .route("/admin/pages/:id/sections/reorder", put(sections::sections_reorder))
        .route(
            "/admin/pages/:id/sections/:section_id",
            put(sections::section_update).delete(sections::section_delete),
        )
        .route_layer(from_fn_with_state(state, require_admin))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Atelier API",
            "version": version,
            "description": "Page composition backend: typed sections, admin editing, public rendering",
            "endpoints": {
                "pages": "/pages/:slug[/render] (public)",
                "login": "/admin/login (public - token acquisition)",
                "admin": "/admin/pages[/:id[/sections[/:section_id|/reorder]]] (admin JWT)",
                "health": "/health (public)"
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "page store unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryPageStore;
    use crate::page::ReorderPolicy;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    fn test_app(policy: ReorderPolicy) -> Router {
        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        config.editor.reorder_unknown_ids = policy;
        app(AppState::new(Arc::new(config), Arc::new(MemoryPageStore::new())))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn login(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/admin/login",
            None,
            Some(json!({"username": "admin", "password": "admin"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn create_page(app: &Router, token: &str, body: Value) -> Value {
        let (status, created) = send(app, Method::POST, "/admin/pages", Some(token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{}", created);
        created["data"].clone()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = test_app(ReorderPolicy::Drop);
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn admin_routes_require_token() {
        let app = test_app(ReorderPolicy::Drop);
        let (status, body) = send(&app, Method::GET, "/admin/pages", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let (status, _) = send(&app, Method::GET, "/admin/pages", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = test_app(ReorderPolicy::Drop);
        let (status, _) = send(
            &app,
            Method::POST,
            "/admin/login",
            None,
            Some(json!({"username": "admin", "password": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn created_page_is_public_and_renders() {
        let app = test_app(ReorderPolicy::Drop);
        let token = login(&app).await;
        create_page(
            &app,
            &token,
            json!({
                "slug": "faq",
                "title": "FAQ",
                "sections": [{
                    "type": "faq",
                    "items": [{"title": "Q1", "description": "A1"}, {"title": "Q2"}]
                }]
            }),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/pages/faq", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["sections"][0]["type"], "faq");
        assert_eq!(body["data"]["sections"][0]["items"].as_array().unwrap().len(), 2);

        let (status, body) = send(&app, Method::GET, "/pages/faq/render", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let section = &body["data"]["sections"][0];
        assert_eq!(section["block"], "accordion");
        assert_eq!(section["entries"][0]["expanded"], false);

        let (status, body) = send(&app, Method::GET, "/pages/missing", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn duplicate_slug_and_bad_json_are_bad_requests() {
        let app = test_app(ReorderPolicy::Drop);
        let token = login(&app).await;
        create_page(&app, &token, json!({"slug": "about", "title": "About"})).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/admin/pages",
            Some(&token),
            Some(json!({"slug": "about", "title": "Again"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "DUPLICATE_SLUG");

        let (status, body) = send(
            &app,
            Method::POST,
            "/admin/pages",
            Some(&token),
            Some(json!({"title": "No slug"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn stale_if_match_conflicts() {
        let app = test_app(ReorderPolicy::Drop);
        let token = login(&app).await;
        let page = create_page(&app, &token, json!({"slug": "home", "title": "Home"})).await;
        let uri = format!("/admin/pages/{}", page["id"].as_str().unwrap());

        let request = |title: &str| {
            Request::builder()
                .method(Method::PUT)
                .uri(&uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::IF_MATCH, "\"1\"")
                .body(Body::from(json!({ "title": title }).to_string()))
                .unwrap()
        };

        let first = app.clone().oneshot(request("Home 2")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let second = app.clone().oneshot(request("Home 3")).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn reorder_with_reject_policy_leaves_page_unchanged() {
        let app = test_app(ReorderPolicy::Reject);
        let token = login(&app).await;
        let page = create_page(
            &app,
            &token,
            json!({
                "slug": "home",
                "title": "Home",
                "sections": [{"id": "a", "type": "hero"}, {"id": "b", "type": "text"}]
            }),
        )
        .await;
        let id = page["id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/admin/pages/{}/sections/reorder", id),
            Some(&token),
            Some(json!({"sections": ["b", "ghost"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNKNOWN_SECTION_IDS");

        let (_, body) = send(&app, Method::GET, &format!("/admin/pages/{}", id), Some(&token), None).await;
        assert_eq!(body["data"]["sections"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["revision"], 1);
    }

    #[tokio::test]
    async fn section_routes_edit_the_page() {
        let app = test_app(ReorderPolicy::Drop);
        let token = login(&app).await;
        let page = create_page(
            &app,
            &token,
            json!({
                "slug": "home",
                "title": "Home",
                "sections": [{"id": "a", "type": "hero"}, {"id": "b", "type": "text"}]
            }),
        )
        .await;
        let base = format!("/admin/pages/{}/sections", page["id"].as_str().unwrap());

        let (status, body) = send(
            &app,
            Method::POST,
            &base,
            Some(&token),
            Some(json!({"id": "c", "type": "cards", "settings": {"columns": 4}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["sections"].as_array().unwrap().len(), 3);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("{}/reorder", base),
            Some(&token),
            Some(json!({"sections": ["c", "a", "b"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = body["data"]["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("{}/a", base),
            Some(&token),
            Some(json!({"settings": {"columns": 9}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_SECTION_SETTINGS");

        let (status, _) = send(&app, Method::DELETE, &format!("{}/zzz", base), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::DELETE, &format!("{}/a", base), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["sections"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn section_named_like_a_route_stays_editable() {
        let app = test_app(ReorderPolicy::Drop);
        let token = login(&app).await;
        let page = create_page(
            &app,
            &token,
            json!({
                "slug": "studio",
                "title": "Studio",
                "sections": [{"id": "reorder", "type": "hero"}]
            }),
        )
        .await;
        let base = format!("/admin/pages/{}/sections", page["id"].as_str().unwrap());
        let first = page["sections"][0]["id"].as_str().unwrap().to_string();
        assert_ne!(first, "reorder");

        let (status, body) = send(
            &app,
            Method::POST,
            &base,
            Some(&token),
            Some(json!({"id": "reorder", "type": "text"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let added = body["data"]["sections"][1]["id"].as_str().unwrap().to_string();
        assert_ne!(added, "reorder");

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("{}/{}", base, added),
            Some(&token),
            Some(json!({"title": "New"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["sections"][1]["title"], "New");

        let (status, body) =
            send(&app, Method::DELETE, &format!("{}/{}", base, added), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["sections"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["sections"][0]["id"], first.as_str());
    }
}
