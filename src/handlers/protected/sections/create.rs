use axum::extract::{rejection::JsonRejection, Path, State};
use axum::http::HeaderMap;
use axum::{Extension, Json};

use super::super::utils::{expected_revision, parse_page_id};
use crate::app::AppState;
use crate::auth::AdminContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::page::{Page, SectionInput};

/// POST /admin/pages/:id/sections - append a section (id optional)
pub async fn section_create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<SectionInput>, JsonRejection>,
) -> ApiResult<Page> {
    let page_id = parse_page_id(&id)?;
    let expected = expected_revision(&headers)?;
    let Json(input) = payload?;

    let page = state.sections.add_section(&ctx, page_id, input, expected).await?;
    Ok(ApiResponse::success(page))
}
