use axum::extract::{rejection::JsonRejection, State};
use axum::{Extension, Json};

use crate::app::AppState;
use crate::auth::AdminContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::page::{Page, PageInput};

/// POST /admin/pages - create a page; 201 with the stored page
pub async fn page_create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    payload: Result<Json<PageInput>, JsonRejection>,
) -> ApiResult<Page> {
    let Json(input) = payload?;
    let page = state.pages.create(&ctx, input).await?;
    Ok(ApiResponse::created(page))
}
