// Application state for HTTP handlers
use crate::application::analytics_service::AnalyticsService;
use crate::application::report_service::ReportService;
use crate::infrastructure::config::{FilterDefaults, RankingSettings};
use chrono::NaiveDate;

#[derive(Clone)]
pub struct AppState {
    pub analytics_service: AnalyticsService,
    pub report_service: ReportService,
    pub filter_defaults: FilterDefaults,
    pub ranking: RankingSettings,
    /// Fixed "today" for default date windows; the local date when unset
    pub pinned_today: Option<NaiveDate>,
}

impl AppState {
    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
