// Restaurant domain model
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub location: String,
    pub rating: f64,
    pub image: String,
    pub total_orders: u32,
    pub total_revenue: f64,
    pub average_order_value: f64,
}

impl Restaurant {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        name: &str,
        cuisine: &str,
        location: &str,
        rating: f64,
        image: &str,
        total_orders: u32,
        total_revenue: f64,
        average_order_value: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            location: location.to_string(),
            rating,
            image: image.to_string(),
            total_orders,
            total_revenue,
            average_order_value,
        }
    }
}

/// Id lookup over a borrowed restaurant slice, built once per pipeline run
#[derive(Debug, Clone)]
pub struct RestaurantIndex<'a> {
    by_id: HashMap<&'a str, &'a Restaurant>,
}

impl<'a> RestaurantIndex<'a> {
    pub fn new(restaurants: &'a [Restaurant]) -> Self {
        let mut by_id = HashMap::with_capacity(restaurants.len());
        for restaurant in restaurants {
            // First entry wins on duplicate ids, same as a linear find
            by_id.entry(restaurant.id.as_str()).or_insert(restaurant);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Restaurant> {
        self.by_id.get(id).copied()
    }

    /// Display name for an id, empty when the id does not resolve
    pub fn name_of(&self, id: &str) -> &'a str {
        self.get(id).map(|r| r.name.as_str()).unwrap_or("")
    }
}

/// Cuisine and location selectors treat an empty value or `all` as "no filter".
pub fn is_wildcard(value: &str) -> bool {
    value.is_empty() || value == "all"
}

/// Distinct cuisines in first-seen order
pub fn distinct_cuisines(restaurants: &[Restaurant]) -> Vec<String> {
    distinct_by(restaurants, |r| &r.cuisine)
}

/// Distinct locations in first-seen order
pub fn distinct_locations(restaurants: &[Restaurant]) -> Vec<String> {
    distinct_by(restaurants, |r| &r.location)
}

fn distinct_by<F>(restaurants: &[Restaurant], field: F) -> Vec<String>
where
    F: Fn(&Restaurant) -> &String,
{
    let mut seen: Vec<String> = Vec::new();
    for restaurant in restaurants {
        let value = field(restaurant);
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

#[cfg(test)]
pub(crate) fn sample_restaurant(id: &str, name: &str, cuisine: &str, location: &str) -> Restaurant {
    Restaurant::new(id, name, cuisine, location, 4.5, "/placeholder.png", 0, 0.0, 0.0)
}
