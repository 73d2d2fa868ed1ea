use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Extension;

use super::super::utils::{expected_revision, parse_page_id};
use crate::app::AppState;
use crate::auth::AdminContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::page::Page;

/// DELETE /admin/pages/:id/sections/:section_id
pub async fn section_delete(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path((id, section_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Page> {
    let page_id = parse_page_id(&id)?;
    let expected = expected_revision(&headers)?;

    let page = state
        .sections
        .delete_section(&ctx, page_id, &section_id, expected)
        .await?;
    Ok(ApiResponse::success(page))
}
