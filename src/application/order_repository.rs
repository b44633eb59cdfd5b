// Repository trait for restaurant and order data access
use crate::domain::order::Order;
use crate::domain::restaurant::Restaurant;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Full restaurant catalog
    async fn list_restaurants(&self) -> anyhow::Result<Arc<Vec<Restaurant>>>;

    /// Every known order, newest day first
    async fn list_orders(&self) -> anyhow::Result<Arc<Vec<Order>>>;
}
