use crate::error::AppError;
use crate::extract::ApiQuery;
use crate::schemas::{
    DailySummaryQuery, DailySummaryResponse, DateRangeQuery, TimeAnalysisResponse,
    VehicleTypeSummaryResponse,
};
use crate::utils::date_range;
use crate::AppState;
use axum::{extract::State, Json};
use chrono::Utc;

/// Revenue for one day grouped by vehicle size and package
#[utoipa::path(
    get,
    path = "/api/reports/daily-summary",
    params(DailySummaryQuery),
    responses(
        (status = 200, description = "Daily summary", body = DailySummaryResponse)
    ),
    tag = "Reports"
)]
pub async fn daily_summary(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DailySummaryQuery>,
) -> Result<Json<DailySummaryResponse>, AppError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let (start_time, end_time) = date_range::day_bounds(date);

    let summary = state.reports.daily_summary(start_time, end_time).await?;

    Ok(Json(DailySummaryResponse {
        success: true,
        date,
        start_time,
        end_time,
        summary,
    }))
}

pub async fn time_analysis(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<TimeAnalysisResponse>, AppError> {
    let range = date_range::optional_range(query.start_date, query.end_date)
        .map_err(AppError::BadRequest)?;

    let report = state
        .reports
        .time_analysis(range.map(|(from, _)| from), range.map(|(_, until)| until))
        .await?;

    Ok(Json(TimeAnalysisResponse {
        success: true,
        start_date: query.start_date,
        end_date: query.end_date,
        report,
    }))
}

pub async fn vehicle_type_summary(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<VehicleTypeSummaryResponse>, AppError> {
    let range = date_range::optional_range(query.start_date, query.end_date)
        .map_err(AppError::BadRequest)?;

    let summary = state
        .reports
        .vehicle_type_summary(range.map(|(from, _)| from), range.map(|(_, until)| until))
        .await?;

    Ok(Json(VehicleTypeSummaryResponse {
        success: true,
        start_date: query.start_date,
        end_date: query.end_date,
        summary,
    }))
}
