// Order filter predicates
use super::error::AnalyticsError;
use super::order::Order;
use super::restaurant::{is_wildcard, Restaurant, RestaurantIndex};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MAX_HOUR: u8 = 23;

/// Inclusive calendar-day interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// `days` calendar days ending at (and including) `end`.
    /// The start clamps to the earliest representable date.
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        let span = u64::from(days.max(1)) - 1;
        Self {
            from: end
                .checked_sub_days(Days::new(span))
                .unwrap_or(NaiveDate::MIN),
            to: end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Inclusive numeric interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> ValueRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The active filter set. Every field is disabled by default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    pub date_range: Option<DateRange>,
    pub amount_range: Option<ValueRange<f64>>,
    pub hour_range: Option<ValueRange<u8>>,
    pub cuisine: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub selected_restaurant_ids: BTreeSet<String>,
}

impl OrderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_amount_range(mut self, min: f64, max: f64) -> Self {
        self.amount_range = Some(ValueRange::new(min, max));
        self
    }

    pub fn with_hour_range(mut self, min: u8, max: u8) -> Self {
        self.hour_range = Some(ValueRange::new(min, max));
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_restaurants<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_restaurant_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Active cuisine target, `None` when absent, empty or `all`
    pub fn active_cuisine(&self) -> Option<&str> {
        active_category(self.cuisine.as_deref())
    }

    pub fn active_location(&self) -> Option<&str> {
        active_category(self.location.as_deref())
    }

    /// Checks the filter bounds before it reaches the pipeline.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if let Some(range) = self.date_range {
            if range.from > range.to {
                return Err(AnalyticsError::InvalidDateRange {
                    from: range.from,
                    to: range.to,
                });
            }
        }

        if let Some(range) = self.amount_range {
            let finite = range.min.is_finite() && range.max.is_finite();
            if !finite || range.min < 0.0 || range.min > range.max {
                return Err(AnalyticsError::invalid_range("amount", range.min, range.max));
            }
        }

        if let Some(range) = self.hour_range {
            if range.min > range.max || range.max > MAX_HOUR {
                return Err(AnalyticsError::invalid_range("hour", range.min, range.max));
            }
        }

        Ok(())
    }

    /// True when the order satisfies every active predicate.
    ///
    /// An empty restaurant selection is a pass-through, not "match nothing".
    /// Cuisine and location fail closed when the order's restaurant is unknown.
    pub fn matches(&self, order: &Order, restaurants: &RestaurantIndex<'_>) -> bool {
        if let Some(range) = self.date_range {
            if !range.contains(order.date) {
                return false;
            }
        }

        if let Some(range) = self.amount_range {
            if !range.contains(order.amount) {
                return false;
            }
        }

        if let Some(range) = self.hour_range {
            if !range.contains(order.hour) {
                return false;
            }
        }

        if !self.selected_restaurant_ids.is_empty()
            && !self.selected_restaurant_ids.contains(&order.restaurant_id)
        {
            return false;
        }

        let cuisine = self.active_cuisine();
        let location = self.active_location();
        if cuisine.is_none() && location.is_none() {
            return true;
        }

        match restaurants.get(&order.restaurant_id) {
            Some(restaurant) => matches_category(restaurant, cuisine, location),
            None => false,
        }
    }

    /// Orders passing the filter, in input order
    pub fn apply<'o>(&self, orders: &'o [Order], restaurants: &RestaurantIndex<'_>) -> Vec<&'o Order> {
        orders
            .iter()
            .filter(|order| self.matches(order, restaurants))
            .collect()
    }
}

fn active_category(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !is_wildcard(v))
}

fn matches_category(restaurant: &Restaurant, cuisine: Option<&str>, location: Option<&str>) -> bool {
    cuisine.is_none_or(|c| restaurant.cuisine == c) && location.is_none_or(|l| restaurant.location == l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::sample_order;
    use crate::domain::restaurant::sample_restaurant;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn restaurants() -> Vec<Restaurant> {
        vec![
            sample_restaurant("A", "Bella Italia", "Italian", "Downtown"),
            sample_restaurant("B", "Dragon Palace", "Chinese", "Chinatown"),
        ]
    }

    fn orders() -> Vec<Order> {
        vec![
            sample_order("1", "A", 10.0, "2025-01-01", 12),
            sample_order("2", "B", 20.0, "2025-01-01", 18),
            sample_order("3", "A", 30.0, "2025-01-02", 12),
        ]
    }

    #[test]
    fn test_default_filter_passes_everything() {
        let restaurants = restaurants();
        let index = RestaurantIndex::new(&restaurants);
        let orders = orders();

        assert_eq!(OrderFilter::new().apply(&orders, &index).len(), 3);
    }

    #[test]
    fn test_empty_selection_is_pass_through() {
        let restaurants = restaurants();
        let index = RestaurantIndex::new(&restaurants);
        let orders = orders();
        let filter = OrderFilter::new().with_restaurants(Vec::<String>::new());

        assert!(filter.selected_restaurant_ids.is_empty());
        assert_eq!(filter.apply(&orders, &index).len(), 3);
    }

    #[test]
    fn test_selection_restricts_membership() {
        let restaurants = restaurants();
        let index = RestaurantIndex::new(&restaurants);
        let orders = orders();
        let filter = OrderFilter::new().with_restaurants(["B"]);

        let ids: Vec<&str> = filter.apply(&orders, &index).iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let restaurants = restaurants();
        let index = RestaurantIndex::new(&restaurants);
        let orders = orders();

        let by_date = OrderFilter::new().with_date_range(DateRange::new(date("2025-01-02"), date("2025-01-02")));
        assert_eq!(by_date.apply(&orders, &index).len(), 1);

        let by_amount = OrderFilter::new().with_amount_range(10.0, 20.0);
        assert_eq!(by_amount.apply(&orders, &index).len(), 2);

        let by_hour = OrderFilter::new().with_hour_range(18, 18);
        assert_eq!(by_hour.apply(&orders, &index).len(), 1);
    }

    #[test]
    fn test_category_wildcards_disable_predicate() {
        let restaurants = restaurants();
        let index = RestaurantIndex::new(&restaurants);
        let orders = orders();

        assert_eq!(OrderFilter::new().with_cuisine("all").apply(&orders, &index).len(), 3);
        assert_eq!(OrderFilter::new().with_location("").apply(&orders, &index).len(), 3);
        assert_eq!(OrderFilter::new().with_cuisine("Italian").apply(&orders, &index).len(), 2);
        assert_eq!(OrderFilter::new().with_location("Chinatown").apply(&orders, &index).len(), 1);
        assert_eq!(
            OrderFilter::new()
                .with_cuisine("Italian")
                .with_location("Chinatown")
                .apply(&orders, &index)
                .len(),
            0
        );
    }

    #[test]
    fn test_unknown_restaurant_fails_category_predicates_only() {
        let restaurants = restaurants();
        let index = RestaurantIndex::new(&restaurants);
        let orphan = sample_order("9", "ghost", 15.0, "2025-01-01", 12);

        assert!(OrderFilter::new().matches(&orphan, &index));
        assert!(!OrderFilter::new().with_cuisine("Italian").matches(&orphan, &index));
        assert!(!OrderFilter::new().with_location("Downtown").matches(&orphan, &index));
    }

    #[test]
    fn test_filtered_orders_satisfy_filter() {
        let restaurants = restaurants();
        let index = RestaurantIndex::new(&restaurants);
        let orders = orders();
        let filter = OrderFilter::new()
            .with_amount_range(15.0, 100.0)
            .with_hour_range(0, 12)
            .with_cuisine("Italian");

        let filtered = filter.apply(&orders, &index);
        assert_eq!(filtered.len(), 1);
        for order in filtered {
            assert!(orders.contains(order));
            assert!(filter.matches(order, &index));
        }
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let inverted_dates =
            OrderFilter::new().with_date_range(DateRange::new(date("2025-01-03"), date("2025-01-01")));
        assert!(matches!(
            inverted_dates.validate(),
            Err(AnalyticsError::InvalidDateRange { .. })
        ));

        assert!(OrderFilter::new().with_amount_range(50.0, 10.0).validate().is_err());
        assert!(OrderFilter::new().with_amount_range(-1.0, 10.0).validate().is_err());
        assert!(OrderFilter::new().with_amount_range(0.0, f64::NAN).validate().is_err());
        assert!(OrderFilter::new().with_hour_range(0, 24).validate().is_err());
        assert!(OrderFilter::new().with_hour_range(20, 10).validate().is_err());
        assert!(OrderFilter::new()
            .with_amount_range(0.0, 200.0)
            .with_hour_range(0, 23)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_date_range_ending_at() {
        let range = DateRange::ending_at(date("2025-01-07"), 7);
        assert_eq!(range.from, date("2025-01-01"));
        assert_eq!(range.to, date("2025-01-07"));
        assert!(range.contains(date("2025-01-01")));
        assert!(!range.contains(date("2024-12-31")));

        let single = DateRange::ending_at(date("2025-01-07"), 0);
        assert_eq!(single.from, single.to);
    }

    #[test]
    fn test_date_range_ending_near_min_date_clamps() {
        let end = NaiveDate::MIN.succ_opt().unwrap();
        let range = DateRange::ending_at(end, 7);
        assert_eq!(range.from, NaiveDate::MIN);
        assert_eq!(range.to, end);
        assert!(range.contains(NaiveDate::MIN));
    }
}
