use axum::extract::{Path, State};
use axum::Extension;
use serde_json::{json, Value};

use super::super::utils::parse_page_id;
use crate::app::AppState;
use crate::auth::AdminContext;
use crate::middleware::{ApiResponse, ApiResult};

/// DELETE /admin/pages/:id - hard delete
pub async fn page_delete(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_page_id(&id)?;
    state.pages.delete(&ctx, id).await?;
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}
