//! Kitchen Reports API Handlers

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use shared::models::{
    ItemPerformance, KitchenBarComparison, KitchenEfficiency, KitchenSummary, PeakHour,
};

use crate::core::ServerState;
use crate::reports::{ReportMetric, ReportQuery};
use crate::utils::{ApiResponse, AppResult};

/// GET /api/kitchen-reports/summary
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<ApiResponse<KitchenSummary>> {
    let report = state.reports.summary(&query).await?;
    Ok(ApiResponse::success_with_message("Kitchen summary retrieved", report))
}

/// GET /api/kitchen-reports/efficiency
pub async fn efficiency(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<ApiResponse<KitchenEfficiency>> {
    let report = state.reports.efficiency(&query).await?;
    Ok(ApiResponse::success_with_message("Kitchen efficiency retrieved", report))
}

/// GET /api/kitchen-reports/item-performance
pub async fn item_performance(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<ApiResponse<Vec<ItemPerformance>>> {
    let report = state.reports.item_performance(&query).await?;
    Ok(ApiResponse::success_with_message("Item performance retrieved", report))
}

/// GET /api/kitchen-reports/peak-hours
pub async fn peak_hours(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<ApiResponse<Vec<PeakHour>>> {
    let report = state.reports.peak_hours(&query).await?;
    Ok(ApiResponse::success_with_message("Peak hours retrieved", report))
}

/// GET /api/kitchen-reports/comparison
pub async fn comparison(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<ApiResponse<KitchenBarComparison>> {
    let report = state.reports.comparison(&query).await?;
    Ok(ApiResponse::success_with_message("Kitchen/bar comparison retrieved", report))
}

#[derive(Debug, Deserialize)]
pub struct InvalidateQuery {
    pub metric: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidateResult {
    pub removed: usize,
    /// None when the whole namespace was cleared
    pub metric: Option<&'static str>,
}

/// DELETE /api/kitchen-reports/cache?metric=summary
pub async fn invalidate_cache(
    State(state): State<ServerState>,
    Query(query): Query<InvalidateQuery>,
) -> AppResult<ApiResponse<InvalidateResult>> {
    let metric = query
        .metric
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::parse::<ReportMetric>)
        .transpose()?;
    let removed = state.reports.invalidate(metric).await?;
    Ok(ApiResponse::success_with_message(
        "Kitchen report cache cleared",
        InvalidateResult {
            removed,
            metric: metric.map(|m| m.as_str()),
        },
    ))
}
