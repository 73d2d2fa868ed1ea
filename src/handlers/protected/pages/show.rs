use axum::extract::{Path, State};

use super::super::utils::parse_page_id;
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::page::Page;

/// GET /admin/pages/:id - single page by id, including inactive ones
pub async fn page_show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Page> {
    let id = parse_page_id(&id)?;
    let page = state.pages.get_by_id(id).await?;
    Ok(ApiResponse::success(page))
}
