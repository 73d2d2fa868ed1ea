// handlers/public/page_get.rs - GET /pages/:slug handler

use axum::extract::{Path, State};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::page::Page;

/// GET /pages/:slug - active page with sections in display order
pub async fn page_get(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<Page> {
    let page = state.resolver.resolve(&slug).await?;
    Ok(ApiResponse::success(page))
}
