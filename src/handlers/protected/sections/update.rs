use axum::extract::{rejection::JsonRejection, Path, State};
use axum::http::HeaderMap;
use axum::{Extension, Json};

use super::super::utils::{expected_revision, parse_page_id};
use crate::app::AppState;
use crate::auth::AdminContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::page::{Page, SectionPatch};

/// PUT /admin/pages/:id/sections/:section_id - merge fields into one section
pub async fn section_update(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path((id, section_id)): Path<(String, String)>,
    headers: HeaderMap,
    payload: Result<Json<SectionPatch>, JsonRejection>,
) -> ApiResult<Page> {
    let page_id = parse_page_id(&id)?;
    let expected = expected_revision(&headers)?;
    let Json(patch) = payload?;

    let page = state
        .sections
        .update_section(&ctx, page_id, &section_id, patch, expected)
        .await?;
    Ok(ApiResponse::success(page))
}
