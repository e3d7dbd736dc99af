use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use stockscan_core::perform_decrement;
use stockscan_shared::{StockLevel, TransactionResult};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub product: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateStockResponse {
    #[serde(flatten)]
    pub result: TransactionResult,
    pub status: StockLevel,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/update-stock", get(update_stock))
}

/// GET /api/update-stock?product=<name>
/// Decrement one unit of the named product
async fn update_stock(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> Result<Json<UpdateStockResponse>, AppError> {
    let product = query.product.unwrap_or_default();

    let result = perform_decrement(state.store.as_ref(), &product, Utc::now()).await?;
    let status = result.stock_level();

    Ok(Json(UpdateStockResponse { result, status }))
}
