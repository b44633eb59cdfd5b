// In-memory repository over records loaded once at startup
use crate::application::order_repository::OrderRepository;
use crate::domain::order::Order;
use crate::domain::restaurant::Restaurant;
use crate::infrastructure::config::DataSettings;
use crate::infrastructure::mock_data::{generate_seeded, mock_restaurants};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    restaurants: Arc<Vec<Restaurant>>,
    orders: Arc<Vec<Order>>,
}

impl InMemoryRepository {
    pub fn new(restaurants: Vec<Restaurant>, orders: Vec<Order>) -> Self {
        Self {
            restaurants: Arc::new(restaurants),
            orders: Arc::new(orders),
        }
    }

    /// Mock catalog plus generated orders ending at the configured anchor day
    pub fn with_mock_data(settings: &DataSettings, today: NaiveDate) -> Self {
        let restaurants = mock_restaurants();
        let anchor = settings.anchor_date.unwrap_or(today);
        let orders = generate_seeded(&restaurants, anchor, settings.days, settings.seed);

        tracing::info!(
            "Generated {} mock orders for {} restaurants ({} days ending {})",
            orders.len(),
            restaurants.len(),
            settings.days,
            anchor
        );

        Self::new(restaurants, orders)
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepository {
    async fn list_restaurants(&self) -> anyhow::Result<Arc<Vec<Restaurant>>> {
        Ok(self.restaurants.clone())
    }

    async fn list_orders(&self) -> anyhow::Result<Arc<Vec<Order>>> {
        Ok(self.orders.clone())
    }
}
