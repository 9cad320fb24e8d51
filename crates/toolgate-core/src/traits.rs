use std::sync::Arc;

use crate::types::{Order, Product, WeatherRecord};

/// Read-only table of current weather conditions.
pub trait WeatherTable: Send + Sync {
    /// Look up a city by its normalized key (trimmed, lowercase).
    fn lookup(&self, city_key: &str) -> Option<WeatherRecord>;

    /// Display names of every city with data, in table order.
    fn cities(&self) -> Vec<String>;
}

/// Read-only product catalog.
pub trait ProductCatalog: Send + Sync {
    /// All products, in catalog order.
    fn products(&self) -> &[Product];
}

/// Read-only order-status table.
pub trait OrderTable: Send + Sync {
    /// Exact, case-sensitive lookup by order ID.
    fn lookup(&self, order_id: &str) -> Option<Order>;

    /// Every known order ID, in table order.
    fn order_ids(&self) -> Vec<String>;
}

/// The data providers the domain resolvers read from.
#[derive(Clone)]
pub struct DataSources {
    pub weather: Arc<dyn WeatherTable>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub orders: Arc<dyn OrderTable>,
}
