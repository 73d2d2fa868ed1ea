// handlers/public/page_render.rs - GET /pages/:slug/render handler

use axum::extract::{Path, State};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::RenderedPage;

/// GET /pages/:slug/render - page with every section turned into a presentation block
pub async fn page_render(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<RenderedPage> {
    let rendered = state.resolver.render(&slug).await?;
    Ok(ApiResponse::success(rendered))
}
