// Order domain model
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub restaurant_id: String,
    pub amount: f64,
    pub order_time: String,
    pub date: NaiveDate,
    pub hour: u8,
    pub customer_name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Order {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        restaurant_id: String,
        amount: f64,
        date: NaiveDate,
        hour: u8,
        minute: u8,
        customer_name: String,
        items: Vec<String>,
    ) -> Self {
        Self {
            id,
            restaurant_id,
            amount,
            order_time: format!("{:02}:{:02}", hour, minute),
            date,
            hour,
            customer_name,
            items,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_order(id: &str, restaurant_id: &str, amount: f64, date: &str, hour: u8) -> Order {
    Order::new(
        id.to_string(),
        restaurant_id.to_string(),
        amount,
        date.parse().unwrap(),
        hour,
        0,
        format!("Customer {}", id),
        Vec::new(),
    )
}
