use axum::extract::{Query, State};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::PageOrder;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::page::Page;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// e.g. `title asc, updatedAt desc`
    pub order: Option<String>,
}

/// GET /admin/pages - every page, active or not, most recently updated first
pub async fn page_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Page>> {
    let order = match query.order.as_deref() {
        Some(raw) => PageOrder::parse_list(raw).map_err(ApiError::bad_request)?,
        None => Vec::new(),
    };

    let pages = state.pages.list_all(&order).await?;
    Ok(ApiResponse::success(pages))
}
