// Aggregation pipeline - grouping, summary statistics and the shared filter run
use super::filter::{OrderFilter, MAX_HOUR};
use super::order::Order;
use super::restaurant::{Restaurant, RestaurantIndex};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Count and running amount sum for one grouping key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket<K> {
    pub key: K,
    pub count: usize,
    pub sum: f64,
}

impl<K> Bucket<K> {
    pub fn new(key: K) -> Self {
        Self { key, count: 0, sum: 0.0 }
    }

    fn add(&mut self, amount: f64) {
        self.count += 1;
        self.sum += amount;
    }

    /// Average amount per order, 0 for an empty bucket
    pub fn average(&self) -> f64 {
        safe_ratio(self.sum, self.count as f64)
    }
}

/// Bucket with its sum rounded to whole currency units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketView<K> {
    pub key: K,
    pub count: usize,
    pub sum: f64,
}

impl<K: Clone> From<&Bucket<K>> for BucketView<K> {
    fn from(bucket: &Bucket<K>) -> Self {
        Self {
            key: bucket.key.clone(),
            count: bucket.count,
            sum: round_whole(bucket.sum),
        }
    }
}

fn group_by<K, F>(orders: &[&Order], key: F) -> Vec<Bucket<K>>
where
    K: Ord + Clone,
    F: Fn(&Order) -> K,
{
    let mut buckets: BTreeMap<K, Bucket<K>> = BTreeMap::new();
    for order in orders {
        let k = key(*order);
        buckets
            .entry(k.clone())
            .or_insert_with(|| Bucket::new(k))
            .add(order.amount);
    }
    buckets.into_values().collect()
}

/// Sparse per-day buckets in chronological order
pub fn group_by_date(orders: &[&Order]) -> Vec<Bucket<NaiveDate>> {
    group_by(orders, |o| o.date)
}

/// Sparse per-hour buckets, hour 0 first
pub fn group_by_hour(orders: &[&Order]) -> Vec<Bucket<u8>> {
    group_by(orders, |o| o.hour)
}

/// Per-restaurant buckets, ordered by id. Ranking decides display order.
pub fn group_by_restaurant(orders: &[&Order]) -> Vec<Bucket<String>> {
    group_by(orders, |o| o.restaurant_id.clone())
}

/// Dense 0-23 hour axis, zero buckets for hours with no orders
pub fn fill_hours(sparse: &[Bucket<u8>]) -> Vec<Bucket<u8>> {
    (0..=MAX_HOUR)
        .map(|hour| {
            sparse
                .iter()
                .find(|b| b.key == hour)
                .cloned()
                .unwrap_or_else(|| Bucket::new(hour))
        })
        .collect()
}

/// Bucket with the most orders. Ties keep the earliest bucket.
pub fn peak_bucket<K: Clone>(buckets: &[Bucket<K>]) -> Option<Bucket<K>> {
    let mut peak: Option<&Bucket<K>> = None;
    for bucket in buckets {
        match peak {
            Some(current) if bucket.count <= current.count => {}
            _ => peak = Some(bucket),
        }
    }
    peak.cloned()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub average_order_value: f64,
    pub unique_restaurants: usize,
    pub peak_hour: Option<Bucket<u8>>,
}

impl Summary {
    pub fn from_orders(orders: &[&Order]) -> Self {
        let total_revenue: f64 = orders.iter().map(|o| o.amount).sum();
        let total_orders = orders.len();
        let unique_restaurants = orders
            .iter()
            .map(|o| o.restaurant_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        let peak_hour = peak_bucket(&group_by_hour(orders));

        Self {
            total_revenue,
            total_orders,
            average_order_value: safe_ratio(total_revenue, total_orders as f64),
            unique_restaurants,
            peak_hour,
        }
    }

    /// Presentation copy: whole-unit revenue, 2-decimal average
    pub fn display(&self) -> SummaryView {
        SummaryView {
            total_revenue: round_whole(self.total_revenue),
            total_orders: self.total_orders,
            average_order_value: round_cents(self.average_order_value),
            unique_restaurants: self.unique_restaurants,
            peak_hour: self.peak_hour.as_ref().map(|b| format!("{}:00", b.key)),
            peak_hour_orders: self.peak_hour.as_ref().map(|b| b.count).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub average_order_value: f64,
    pub unique_restaurants: usize,
    pub peak_hour: Option<String>,
    pub peak_hour_orders: usize,
}

/// Everything the views project from one filter run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput<'a> {
    pub filtered_orders: Vec<&'a Order>,
    pub summary: Summary,
    pub by_date: Vec<Bucket<NaiveDate>>,
    pub by_hour: Vec<Bucket<u8>>,
    pub by_restaurant: Vec<Bucket<String>>,
}

/// Filters, summarizes and groups in one pass over borrowed data.
pub fn run_pipeline<'a>(
    orders: &'a [Order],
    restaurants: &[Restaurant],
    filter: &OrderFilter,
) -> PipelineOutput<'a> {
    let index = RestaurantIndex::new(restaurants);
    let filtered_orders = filter.apply(orders, &index);

    tracing::debug!(
        "Pipeline kept {} of {} orders",
        filtered_orders.len(),
        orders.len()
    );

    let by_hour = group_by_hour(&filtered_orders);
    let summary = Summary::from_orders(&filtered_orders);

    PipelineOutput {
        by_date: group_by_date(&filtered_orders),
        by_restaurant: group_by_restaurant(&filtered_orders),
        by_hour,
        summary,
        filtered_orders,
    }
}

/// Division that yields 0 instead of NaN or infinity
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn round_whole(value: f64) -> f64 {
    value.round()
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::DateRange;
    use crate::domain::order::sample_order;
    use crate::domain::restaurant::sample_restaurant;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn scenario() -> (Vec<Order>, Vec<Restaurant>, OrderFilter) {
        let orders = vec![
            sample_order("1", "A", 10.0, "2025-01-01", 12),
            sample_order("2", "B", 20.0, "2025-01-01", 18),
            sample_order("3", "A", 30.0, "2025-01-02", 12),
        ];
        let restaurants = vec![
            sample_restaurant("A", "Alpha", "Italian", "Downtown"),
            sample_restaurant("B", "Beta", "Chinese", "Chinatown"),
        ];
        let filter = OrderFilter::new()
            .with_date_range(DateRange::new(date("2024-12-01"), date("2025-02-01")))
            .with_amount_range(0.0, 100.0)
            .with_hour_range(0, 23)
            .with_cuisine("")
            .with_location("");
        (orders, restaurants, filter)
    }

    #[test]
    fn test_example_scenario() {
        let (orders, restaurants, filter) = scenario();
        let output = run_pipeline(&orders, &restaurants, &filter);

        assert_eq!(output.filtered_orders.len(), 3);
        assert_eq!(output.summary.total_revenue, 60.0);
        assert_eq!(output.summary.total_orders, 3);
        assert_eq!(output.summary.average_order_value, 20.0);
        assert_eq!(output.summary.unique_restaurants, 2);
        assert_eq!(
            output.by_date,
            vec![
                Bucket { key: date("2025-01-01"), count: 2, sum: 30.0 },
                Bucket { key: date("2025-01-02"), count: 1, sum: 30.0 },
            ]
        );
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let (orders, restaurants, filter) = scenario();
        let first = run_pipeline(&orders, &restaurants, &filter);
        let second = run_pipeline(&orders, &restaurants, &filter);
        assert_eq!(first, second);
    }

    #[test]
    fn test_total_revenue_matches_filtered_sum() {
        let (orders, restaurants, _) = scenario();
        let filter = OrderFilter::new().with_amount_range(15.0, 100.0);
        let output = run_pipeline(&orders, &restaurants, &filter);

        let expected: f64 = output.filtered_orders.iter().map(|o| o.amount).sum();
        assert_eq!(output.summary.total_revenue, expected);
        assert_eq!(output.summary.total_revenue, 50.0);
    }

    #[test]
    fn test_empty_input_yields_zeroed_summary() {
        let output = run_pipeline(&[], &[], &OrderFilter::new());

        assert!(output.filtered_orders.is_empty());
        assert!(output.by_date.is_empty());
        assert!(output.by_hour.is_empty());
        assert!(output.by_restaurant.is_empty());
        assert_eq!(output.summary.total_orders, 0);
        assert_eq!(output.summary.total_revenue, 0.0);
        assert_eq!(output.summary.average_order_value, 0.0);
        assert!(!output.summary.average_order_value.is_nan());
        assert!(output.summary.peak_hour.is_none());

        let view = output.summary.display();
        assert_eq!(view.peak_hour, None);
        assert_eq!(view.peak_hour_orders, 0);
    }

    #[test]
    fn test_hour_buckets_are_sparse_and_ascending() {
        let (orders, restaurants, filter) = scenario();
        let output = run_pipeline(&orders, &restaurants, &filter);

        let hours: Vec<u8> = output.by_hour.iter().map(|b| b.key).collect();
        assert_eq!(hours, vec![12, 18]);
        assert_eq!(output.by_hour[0].count, 2);
        assert_eq!(output.by_hour[0].sum, 40.0);

        let dense = fill_hours(&output.by_hour);
        assert_eq!(dense.len(), 24);
        assert_eq!(dense[0], Bucket::new(0));
        assert_eq!(dense[12].count, 2);
        assert_eq!(dense[18].sum, 20.0);
    }

    #[test]
    fn test_restaurant_buckets() {
        let (orders, restaurants, filter) = scenario();
        let output = run_pipeline(&orders, &restaurants, &filter);

        assert_eq!(output.by_restaurant.len(), 2);
        let a = output.by_restaurant.iter().find(|b| b.key == "A").unwrap();
        assert_eq!(a.count, 2);
        assert_eq!(a.sum, 40.0);
        assert_eq!(a.average(), 20.0);
    }

    #[test]
    fn test_peak_hour_ties_keep_lowest_hour() {
        let orders = [
            sample_order("1", "A", 5.0, "2025-01-01", 19),
            sample_order("2", "A", 5.0, "2025-01-01", 11),
            sample_order("3", "A", 5.0, "2025-01-01", 19),
            sample_order("4", "A", 5.0, "2025-01-01", 11),
        ];
        let refs: Vec<&Order> = orders.iter().collect();
        let summary = Summary::from_orders(&refs);

        let peak = summary.peak_hour.unwrap();
        assert_eq!(peak.key, 11);
        assert_eq!(peak.count, 2);
    }

    #[test]
    fn test_display_rounding() {
        let orders = [
            sample_order("1", "A", 10.5, "2025-01-01", 9),
            sample_order("2", "A", 20.0, "2025-01-01", 9),
            sample_order("3", "B", 12.0, "2025-01-01", 10),
        ];
        let refs: Vec<&Order> = orders.iter().collect();
        let summary = Summary::from_orders(&refs);
        let view = summary.display();

        assert_eq!(view.total_revenue, 43.0);
        assert_eq!(view.average_order_value, 14.17);
        assert_eq!(view.peak_hour.as_deref(), Some("9:00"));
        assert_eq!(view.peak_hour_orders, 2);
        // unrounded value stays available for chained computation
        assert_eq!(summary.total_revenue, 42.5);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let orders = [sample_order("1", "A", 10.0, "2025-01-01", 9)];
        let refs: Vec<&Order> = orders.iter().collect();
        let json = serde_json::to_value(Summary::from_orders(&refs)).unwrap();

        assert_eq!(json["totalRevenue"], 10.0);
        assert_eq!(json["totalOrders"], 1);
        assert_eq!(json["averageOrderValue"], 10.0);
        assert_eq!(json["uniqueRestaurants"], 1);
        assert_eq!(json["peakHour"]["key"], 9);
        assert!(json.get("total_revenue").is_none());
    }

    #[test]
    fn test_safe_ratio() {
        assert_eq!(safe_ratio(10.0, 0.0), 0.0);
        assert_eq!(safe_ratio(0.0, 0.0), 0.0);
        assert_eq!(safe_ratio(10.0, 4.0), 2.5);
        assert_eq!(Bucket::<u8>::new(3).average(), 0.0);
    }
}
