// Restaurant ranking and listing order
use super::analytics::{round_cents, round_whole, safe_ratio};
use super::error::AnalyticsError;
use super::order::Order;
use super::restaurant::{is_wildcard, Restaurant};
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Rating,
    Revenue,
    Orders,
    AverageOrderValue,
}

impl FromStr for SortKey {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "rating" => Ok(SortKey::Rating),
            "revenue" => Ok(SortKey::Revenue),
            "orders" => Ok(SortKey::Orders),
            "aov" => Ok(SortKey::AverageOrderValue),
            other => Err(AnalyticsError::InvalidSortKey(other.to_string())),
        }
    }
}

/// Case-insensitive first, raw text as the tiebreak
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Stable in-place sort; equal keys keep their prior relative order.
pub fn sort_restaurants(restaurants: &mut [Restaurant], key: SortKey) {
    restaurants.sort_by(|a, b| match key {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Rating => descending(a.rating, b.rating),
        SortKey::Revenue => descending(a.total_revenue, b.total_revenue),
        SortKey::Orders => b.total_orders.cmp(&a.total_orders),
        SortKey::AverageOrderValue => descending(a.average_order_value, b.average_order_value),
    });
}

/// Listing view query over the restaurant catalog
#[derive(Debug, Clone, Default)]
pub struct RestaurantQuery {
    pub search: String,
    pub cuisine: String,
    pub location: String,
    pub sort: SortKey,
}

impl RestaurantQuery {
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = restaurant.name.to_lowercase().contains(&term)
            || restaurant.cuisine.to_lowercase().contains(&term);
        let matches_cuisine = is_wildcard(&self.cuisine) || restaurant.cuisine == self.cuisine;
        let matches_location = is_wildcard(&self.location) || restaurant.location == self.location;

        matches_search && matches_cuisine && matches_location
    }

    pub fn apply(&self, restaurants: &[Restaurant]) -> Vec<Restaurant> {
        let mut selected: Vec<Restaurant> = restaurants
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        sort_restaurants(&mut selected, self.sort);
        selected
    }
}

/// A restaurant's figures over an order period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPerformance {
    pub restaurant: Restaurant,
    pub revenue: f64,
    pub orders: usize,
    pub average_order_value: f64,
}

impl RestaurantPerformance {
    pub fn compute(restaurant: &Restaurant, orders: &[&Order]) -> Self {
        let (revenue, count) = orders
            .iter()
            .filter(|o| o.restaurant_id == restaurant.id)
            .fold((0.0, 0usize), |(sum, n), o| (sum + o.amount, n + 1));

        Self {
            restaurant: restaurant.clone(),
            revenue,
            orders: count,
            average_order_value: safe_ratio(revenue, count as f64),
        }
    }

    /// One entry per restaurant, in catalog order
    pub fn for_all(restaurants: &[Restaurant], orders: &[&Order]) -> Vec<Self> {
        restaurants
            .iter()
            .map(|r| Self::compute(r, orders))
            .collect()
    }
}

/// Stable sort by period revenue, highest first
pub fn sort_by_revenue(performances: &mut [RestaurantPerformance]) {
    performances.sort_by(|a, b| descending(a.revenue, b.revenue));
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRestaurant {
    pub rank: usize,
    pub restaurant: Restaurant,
    pub period_revenue: f64,
    pub period_orders: usize,
    pub period_aov: f64,
    pub market_share: f64,
}

/// Top `n` by revenue with 1-based rank and market share in whole percent.
///
/// Share is measured against every restaurant's revenue, not only the top `n`.
pub fn rank_top(performances: &[RestaurantPerformance], n: usize) -> Vec<RankedRestaurant> {
    let total_revenue: f64 = performances.iter().map(|p| p.revenue).sum();

    let mut sorted = performances.to_vec();
    sort_by_revenue(&mut sorted);

    sorted
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, p)| RankedRestaurant {
            rank: i + 1,
            market_share: round_whole(safe_ratio(p.revenue, total_revenue) * 100.0),
            period_revenue: round_whole(p.revenue),
            period_orders: p.orders,
            period_aov: round_cents(p.average_order_value),
            restaurant: p.restaurant,
        })
        .collect()
}
