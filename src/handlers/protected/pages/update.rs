use axum::extract::{rejection::JsonRejection, Path, State};
use axum::http::HeaderMap;
use axum::{Extension, Json};

use super::super::utils::{expected_revision, parse_page_id};
use crate::app::AppState;
use crate::auth::AdminContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::page::{Page, PagePatch};

/// PUT /admin/pages/:id - partial update; honours `If-Match`
pub async fn page_update(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<PagePatch>, JsonRejection>,
) -> ApiResult<Page> {
    let id = parse_page_id(&id)?;
    let expected = expected_revision(&headers)?;
    let Json(patch) = payload?;

    let page = state.pages.update(&ctx, id, patch, expected).await?;
    Ok(ApiResponse::success(page))
}
