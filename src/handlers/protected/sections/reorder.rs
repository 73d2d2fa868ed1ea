use axum::extract::{rejection::JsonRejection, Path, State};
use axum::http::HeaderMap;
use axum::{Extension, Json};
use serde::Deserialize;

use super::super::utils::{expected_revision, parse_page_id};
use crate::app::AppState;
use crate::auth::AdminContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::page::Page;

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    /// Section ids in the desired order.
    pub sections: Vec<String>,
}

/// PUT /admin/pages/:id/sections/reorder
pub async fn sections_reorder(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> ApiResult<Page> {
    let page_id = parse_page_id(&id)?;
    let expected = expected_revision(&headers)?;
    let Json(req) = payload?;

    let page = state
        .sections
        .reorder_sections(&ctx, page_id, &req.sections, expected)
        .await?;
    Ok(ApiResponse::success(page))
}
