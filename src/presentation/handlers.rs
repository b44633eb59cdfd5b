// HTTP request handlers
use crate::application::analytics_service::{
    FilteredAnalytics, OrderTrends, RankingReport, RestaurantListing,
};
use crate::application::report_service::{ExportFormat, ReportAck, ReportType};
use crate::domain::error::AnalyticsError;
use crate::domain::filter::{DateRange, OrderFilter};
use crate::domain::ranking::RestaurantQuery;
use crate::infrastructure::config::FilterDefaults;
use crate::infrastructure::csv_export::export_file_name;
use crate::infrastructure::http_response::{accepts_brotli, csv_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub cuisine: Option<String>,
    pub location: Option<String>,
    pub sort: Option<String>,
}

impl ListingQuery {
    pub fn to_query(self) -> Result<RestaurantQuery, AnalyticsError> {
        let sort = match self.sort.as_deref() {
            Some(key) => key.parse()?,
            None => Default::default(),
        };

        Ok(RestaurantQuery {
            search: self.search.unwrap_or_default(),
            cuisine: self.cuisine.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            sort,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub top: Option<usize>,
    /// Zero-fill the hourly axis to all 24 hours
    pub dense: Option<bool>,
}

/// Missing bounds fall back to the lookback window ending today
fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    defaults: &FilterDefaults,
    today: NaiveDate,
) -> DateRange {
    let to = to.unwrap_or(today);
    let from = from.unwrap_or_else(|| defaults.date_range(to).from);
    DateRange::new(from, to)
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub min_hour: Option<u8>,
    pub max_hour: Option<u8>,
    pub cuisine: Option<String>,
    pub location: Option<String>,
    /// Comma-separated restaurant ids; empty means every restaurant
    pub restaurants: Option<String>,
}

impl AnalyticsQuery {
    pub fn to_filter(&self, defaults: &FilterDefaults, today: NaiveDate) -> OrderFilter {
        let selected = self
            .restaurants
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let mut filter = OrderFilter::new()
            .with_date_range(resolve_range(self.from, self.to, defaults, today))
            .with_amount_range(
                self.min_amount.unwrap_or(defaults.min_amount),
                self.max_amount.unwrap_or(defaults.max_amount),
            )
            .with_hour_range(
                self.min_hour.unwrap_or(defaults.min_hour),
                self.max_hour.unwrap_or(defaults.max_hour),
            )
            .with_restaurants(selected);
        if let Some(cuisine) = &self.cuisine {
            filter = filter.with_cuisine(cuisine.as_str());
        }
        if let Some(location) = &self.location {
            filter = filter.with_location(location.as_str());
        }
        filter
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub report_type: String,
    pub format: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Restaurant listing with search, filters and sort
pub async fn list_restaurants(
    query: Result<Query<ListingQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RestaurantListing>, AnalyticsError> {
    let Query(query) = query?;
    let query = query.to_query()?;
    let listing = state.analytics_service.listings(&query).await?;
    Ok(Json(listing))
}

/// Order trends for a single restaurant
pub async fn restaurant_trends(
    Path(id): Path<String>,
    query: Result<Query<RangeQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<OrderTrends>, AnalyticsError> {
    let Query(query) = query?;
    let range = resolve_range(query.from, query.to, &state.filter_defaults, state.today());
    let trends = state
        .analytics_service
        .trends(&id, range, query.dense.unwrap_or(false))
        .await?;
    Ok(Json(trends))
}

/// Top restaurants by revenue over a period
pub async fn rankings(
    query: Result<Query<RangeQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RankingReport>, AnalyticsError> {
    let Query(query) = query?;
    let range = resolve_range(query.from, query.to, &state.filter_defaults, state.today());
    let top_n = query.top.unwrap_or(state.ranking.top_n);
    let report = state.analytics_service.ranking(range, top_n).await?;
    Ok(Json(report))
}

/// Full filter pipeline
pub async fn filtered_analytics(
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilteredAnalytics>, AnalyticsError> {
    let Query(query) = query?;
    let filter = query.to_filter(&state.filter_defaults, state.today());
    let analytics = state.analytics_service.filtered(&filter).await?;
    Ok(Json(analytics))
}

/// CSV download of the filtered orders
pub async fn export_orders(
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return AnalyticsError::from(rejection).into_response(),
    };
    let today = state.today();
    let filter = query.to_filter(&state.filter_defaults, today);

    let csv = match state.analytics_service.export_csv(&filter).await {
        Ok(csv) => csv,
        Err(e) => return e.into_response(),
    };

    match csv_response(csv, &export_file_name(today), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Report generation stub
pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    request: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Json<ReportAck>, AnalyticsError> {
    let Json(request) = request?;
    let report_type: ReportType = request.report_type.parse()?;
    let format: ExportFormat = request.format.parse()?;
    Ok(Json(state.report_service.generate(report_type, format)))
}
