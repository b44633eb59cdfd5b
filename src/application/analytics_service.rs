// Analytics service - View projections over the shared aggregation pipeline
use crate::application::order_repository::OrderRepository;
use crate::domain::analytics::{
    fill_hours, run_pipeline, round_cents, round_whole, Bucket, BucketView, SummaryView,
};
use crate::domain::error::AnalyticsError;
use crate::domain::filter::{DateRange, OrderFilter};
use crate::domain::order::Order;
use crate::domain::ranking::{
    rank_top, RankedRestaurant, RestaurantPerformance, RestaurantQuery,
};
use crate::domain::restaurant::{
    distinct_cuisines, distinct_locations, Restaurant, RestaurantIndex,
};
use crate::infrastructure::csv_export::orders_to_csv;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantListing {
    pub restaurants: Vec<Restaurant>,
    pub total: usize,
    pub cuisines: Vec<String>,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrend {
    pub date: String,
    pub full_date: NaiveDate,
    pub orders: usize,
    pub revenue: f64,
    pub aov: f64,
}

impl From<&Bucket<NaiveDate>> for DailyTrend {
    fn from(bucket: &Bucket<NaiveDate>) -> Self {
        Self {
            date: bucket.key.format("%b %d").to_string(),
            full_date: bucket.key,
            orders: bucket.count,
            revenue: round_whole(bucket.sum),
            aov: round_cents(bucket.average()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyTrend {
    pub hour: String,
    pub hour_num: u8,
    pub orders: usize,
    pub revenue: f64,
}

impl From<&Bucket<u8>> for HourlyTrend {
    fn from(bucket: &Bucket<u8>) -> Self {
        let view = BucketView::from(bucket);
        Self {
            hour: format!("{}:00", view.key),
            hour_num: view.key,
            orders: view.count,
            revenue: view.sum,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTrends {
    pub restaurant: Restaurant,
    pub date_range: DateRange,
    pub daily: Vec<DailyTrend>,
    pub hourly: Vec<HourlyTrend>,
    pub summary: SummaryView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingReport {
    pub date_range: DateRange,
    pub top: Vec<RankedRestaurant>,
    pub total_revenue: f64,
    pub total_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRevenue {
    pub id: String,
    pub name: String,
    pub orders: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredAnalytics {
    pub filtered_orders: Vec<Order>,
    pub summary: SummaryView,
    pub trend: Vec<DailyTrend>,
    pub hourly: Vec<HourlyTrend>,
    pub restaurants: Vec<RestaurantRevenue>,
    pub cuisines: Vec<String>,
    pub locations: Vec<String>,
}

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Arc<dyn OrderRepository>,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    async fn load(&self) -> Result<(Arc<Vec<Order>>, Arc<Vec<Restaurant>>), AnalyticsError> {
        let orders = self.repository.list_orders().await?;
        let restaurants = self.repository.list_restaurants().await?;
        Ok((orders, restaurants))
    }

    /// Restaurant listing with search, category filters and sort
    pub async fn listings(&self, query: &RestaurantQuery) -> Result<RestaurantListing, AnalyticsError> {
        let restaurants = self.repository.list_restaurants().await?;
        let selected = query.apply(&restaurants);

        Ok(RestaurantListing {
            total: restaurants.len(),
            cuisines: distinct_cuisines(&restaurants),
            locations: distinct_locations(&restaurants),
            restaurants: selected,
        })
    }

    /// Daily and hourly order trends for one restaurant.
    ///
    /// Hours without orders are omitted unless `dense_hours` is set.
    pub async fn trends(
        &self,
        restaurant_id: &str,
        date_range: DateRange,
        dense_hours: bool,
    ) -> Result<OrderTrends, AnalyticsError> {
        let (orders, restaurants) = self.load().await?;

        let restaurant = restaurants
            .iter()
            .find(|r| r.id == restaurant_id)
            .cloned()
            .ok_or_else(|| AnalyticsError::RestaurantNotFound(restaurant_id.to_string()))?;

        let filter = OrderFilter::new()
            .with_date_range(date_range)
            .with_restaurants([restaurant_id]);
        filter.validate()?;

        let output = run_pipeline(&orders, &restaurants, &filter);

        tracing::debug!(
            "Trends for {}: {} orders over {} days",
            restaurant.name,
            output.summary.total_orders,
            output.by_date.len()
        );

        let hours = if dense_hours {
            fill_hours(&output.by_hour)
        } else {
            output.by_hour
        };

        Ok(OrderTrends {
            restaurant,
            date_range,
            daily: output.by_date.iter().map(DailyTrend::from).collect(),
            hourly: hours.iter().map(HourlyTrend::from).collect(),
            summary: output.summary.display(),
        })
    }

    /// Top restaurants by period revenue
    pub async fn ranking(
        &self,
        date_range: DateRange,
        top_n: usize,
    ) -> Result<RankingReport, AnalyticsError> {
        let (orders, restaurants) = self.load().await?;

        let filter = OrderFilter::new().with_date_range(date_range);
        filter.validate()?;

        let output = run_pipeline(&orders, &restaurants, &filter);
        let performances = RestaurantPerformance::for_all(&restaurants, &output.filtered_orders);
        let total_revenue: f64 = performances.iter().map(|p| p.revenue).sum();
        let total_orders = performances.iter().map(|p| p.orders).sum();

        Ok(RankingReport {
            date_range,
            top: rank_top(&performances, top_n),
            total_revenue: round_whole(total_revenue),
            total_orders,
        })
    }

    /// Full filter set: orders, summary, trend and per-restaurant breakdown
    pub async fn filtered(&self, filter: &OrderFilter) -> Result<FilteredAnalytics, AnalyticsError> {
        filter.validate()?;
        let (orders, restaurants) = self.load().await?;
        let output = run_pipeline(&orders, &restaurants, filter);

        // Orders whose restaurant is unknown stay in the totals but get no row
        let index = RestaurantIndex::new(&restaurants);
        let mut breakdown: Vec<RestaurantRevenue> = output
            .by_restaurant
            .iter()
            .filter_map(|bucket| {
                index.get(&bucket.key).map(|r| RestaurantRevenue {
                    id: r.id.clone(),
                    name: r.name.clone(),
                    orders: bucket.count,
                    revenue: bucket.sum,
                })
            })
            .collect();
        breakdown.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));

        Ok(FilteredAnalytics {
            summary: output.summary.display(),
            trend: output.by_date.iter().map(DailyTrend::from).collect(),
            hourly: output.by_hour.iter().map(HourlyTrend::from).collect(),
            restaurants: breakdown
                .into_iter()
                .map(|r| RestaurantRevenue {
                    revenue: round_whole(r.revenue),
                    ..r
                })
                .collect(),
            cuisines: distinct_cuisines(&restaurants),
            locations: distinct_locations(&restaurants),
            filtered_orders: output.filtered_orders.into_iter().cloned().collect(),
        })
    }

    /// CSV text of the orders passing `filter`
    pub async fn export_csv(&self, filter: &OrderFilter) -> Result<String, AnalyticsError> {
        filter.validate()?;
        let (orders, restaurants) = self.load().await?;
        let output = run_pipeline(&orders, &restaurants, filter);

        tracing::info!("Exporting {} orders as CSV", output.filtered_orders.len());
        Ok(orders_to_csv(&output.filtered_orders, &restaurants))
    }
}
