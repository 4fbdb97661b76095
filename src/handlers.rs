use crate::config::MAX_WINDOW_DAYS;
use crate::errors::AppError;
use crate::histogram::{self, ChartSeries};
use crate::models::{
    ReportCounts, ReportPageQuery, ReportType, SubmitRequest, TrendQuery, TrendResponse,
};
use crate::state::AppState;
use crate::ui::{render_index, render_report};
use crate::validation::{validate_embark_id, INVALID_EMBARK_ID};
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::info;

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn report_page(Query(query): Query<ReportPageQuery>) -> Html<String> {
    let embark_id = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());
    Html(render_report(embark_id))
}

pub async fn get_counts(
    State(state): State<AppState>,
    Path(embark_id): Path<String>,
) -> Result<Json<ReportCounts>, AppError> {
    let embark_id = checked_embark_id(&embark_id)?;
    let counts = state.api.fetch_counts(embark_id).await?;
    Ok(Json(counts))
}

pub async fn get_trend(
    State(state): State<AppState>,
    Path(embark_id): Path<String>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendResponse>, AppError> {
    let embark_id = checked_embark_id(&embark_id)?;
    let window_days = query.days.unwrap_or(state.config.window_days);
    if window_days > MAX_WINDOW_DAYS {
        return Err(AppError::bad_request(format!(
            "days must be at most {MAX_WINDOW_DAYS}"
        )));
    }

    let history = state.api.fetch_history(embark_id).await?;
    let timezone = state.config.timezone;
    let anchor = today_in(timezone);
    let buckets = histogram::build(anchor, window_days, timezone, &history.history)?;

    Ok(Json(TrendResponse {
        embark_id: embark_id.to_string(),
        timezone: timezone.name().to_string(),
        anchor,
        window_days,
        total: buckets.iter().map(|bucket| bucket.count).sum(),
        series: ChartSeries::from_buckets(&buckets),
        buckets,
    }))
}

pub async fn submit_report(
    State(state): State<AppState>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let embark_id = checked_embark_id(&payload.embark_id)?;
    let report_type = match payload.report_type.as_deref().map(str::trim) {
        None | Some("") => return Err(AppError::bad_request("Please select a report type")),
        Some(value) => ReportType::parse(value)
            .ok_or_else(|| AppError::bad_request(format!("unknown report type '{value}'")))?,
    };

    let result = state
        .api
        .submit_report(embark_id, report_type, &state.identity.reporter_id)
        .await?;
    info!("report submitted for {embark_id}: {report_type}");

    Ok(Json(result))
}

fn checked_embark_id(raw: &str) -> Result<&str, AppError> {
    let embark_id = raw.trim();
    if validate_embark_id(embark_id) {
        Ok(embark_id)
    } else {
        Err(AppError::bad_request(INVALID_EMBARK_ID))
    }
}

fn today_in(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}
