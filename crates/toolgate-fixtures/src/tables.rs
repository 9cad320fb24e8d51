use std::sync::{Arc, LazyLock};

use toolgate_core::traits::{DataSources, OrderTable, ProductCatalog, WeatherTable};
use toolgate_core::types::{Order, Product, WeatherRecord};

/// (lookup key, display name, temperature_c, condition, humidity_pct, wind_kmh)
type WeatherRow = (&'static str, &'static str, i32, &'static str, u8, u16);

const WEATHER_ROWS: [WeatherRow; 8] = [
    ("london", "London", 12, "Cloudy", 78, 18),
    ("tokyo", "Tokyo", 22, "Sunny", 55, 10),
    ("new york", "New York", 8, "Rainy", 82, 25),
    ("sydney", "Sydney", 28, "Sunny", 45, 14),
    ("berlin", "Berlin", 5, "Snowy", 90, 20),
    ("seattle", "Seattle", 10, "Drizzle", 85, 12),
    ("paris", "Paris", 14, "Partly Cloudy", 65, 15),
    ("dubai", "Dubai", 38, "Sunny", 30, 8),
];

/// (id, name, category, price_usd, rating, in_stock)
type ProductRow = (&'static str, &'static str, &'static str, f64, f64, bool);

const PRODUCT_ROWS: [ProductRow; 10] = [
    ("P001", "Wireless Noise-Cancelling Headphones", "Electronics", 149.99, 4.7, true),
    ("P002", "Ergonomic Mechanical Keyboard", "Electronics", 89.99, 4.5, true),
    ("P003", "USB-C 4-Port Hub", "Electronics", 24.99, 4.3, true),
    ("P004", "Standing Desk Converter", "Furniture", 199.00, 4.6, false),
    ("P005", "Laptop Stand with Cooling Fan", "Electronics", 39.99, 4.2, true),
    ("P006", "27-inch 4K Monitor", "Electronics", 449.00, 4.8, true),
    ("P007", "Mesh Office Chair", "Furniture", 299.00, 4.4, true),
    ("P008", "Portable Phone Charger 20000mAh", "Electronics", 34.99, 4.1, false),
    ("P009", "Smart LED Desk Lamp", "Lighting", 49.99, 4.6, true),
    ("P010", "2m Braided USB-C Cable (3-pack)", "Electronics", 14.99, 4.0, true),
];

/// (id, status, placed, estimated_delivery, delivered, carrier, tracking)
type OrderRow = (
    &'static str,
    &'static str,
    &'static str,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
);

const ORDER_ROWS: [OrderRow; 5] = [
    (
        "ORD-1001",
        "Delivered",
        "2026-02-10",
        Some("2026-02-14"),
        Some("2026-02-13"),
        Some("FedEx"),
        Some("FX123456789"),
    ),
    (
        "ORD-1002",
        "In Transit",
        "2026-02-15",
        Some("2026-02-20"),
        None,
        Some("UPS"),
        Some("1Z9999W99999999999"),
    ),
    (
        "ORD-1003",
        "Processing",
        "2026-02-18",
        Some("2026-02-24"),
        None,
        None,
        None,
    ),
    (
        "ORD-1004",
        "Shipped",
        "2026-02-17",
        Some("2026-02-22"),
        None,
        Some("USPS"),
        Some("9400111899223445401090"),
    ),
    ("ORD-1005", "Cancelled", "2026-02-12", None, None, None, None),
];

static WEATHER: LazyLock<Vec<(&'static str, WeatherRecord)>> = LazyLock::new(|| {
    WEATHER_ROWS
        .iter()
        .map(|&(key, city, temperature_c, condition, humidity_pct, wind_kmh)| {
            (
                key,
                WeatherRecord {
                    city: city.to_string(),
                    temperature_c,
                    condition: condition.to_string(),
                    humidity_pct,
                    wind_kmh,
                },
            )
        })
        .collect()
});

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    PRODUCT_ROWS
        .iter()
        .map(|&(id, name, category, price_usd, rating, in_stock)| Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price_usd,
            rating,
            in_stock,
        })
        .collect()
});

static ORDERS: LazyLock<Vec<Order>> = LazyLock::new(|| {
    ORDER_ROWS
        .iter()
        .map(
            |&(order_id, status, placed, estimated_delivery, delivered, carrier, tracking)| Order {
                order_id: order_id.to_string(),
                status: status.to_string(),
                placed: placed.to_string(),
                estimated_delivery: estimated_delivery.map(str::to_string),
                delivered: delivered.map(str::to_string),
                carrier: carrier.map(str::to_string),
                tracking: tracking.map(str::to_string),
            },
        )
        .collect()
});

/// Mock datasets backed by process-wide, read-only tables.
///
/// The tables are built on first access and never mutated afterwards, so a
/// single `FixtureStore` can be shared freely across requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureStore;

impl FixtureStore {
    /// Create a new `FixtureStore`, forcing the tables to load.
    #[must_use]
    pub fn new() -> Self {
        tracing::debug!(
            cities = WEATHER.len(),
            products = PRODUCTS.len(),
            orders = ORDERS.len(),
            "fixture tables loaded"
        );
        Self
    }

    /// Bundle this store as the provider for every lookup table.
    #[must_use]
    pub fn data_sources(self) -> DataSources {
        DataSources {
            weather: Arc::new(self),
            catalog: Arc::new(self),
            orders: Arc::new(self),
        }
    }
}

impl WeatherTable for FixtureStore {
    fn lookup(&self, city_key: &str) -> Option<WeatherRecord> {
        WEATHER
            .iter()
            .find(|(key, _)| *key == city_key)
            .map(|(_, record)| record.clone())
    }

    fn cities(&self) -> Vec<String> {
        WEATHER.iter().map(|(_, r)| r.city.clone()).collect()
    }
}

impl ProductCatalog for FixtureStore {
    fn products(&self) -> &[Product] {
        &PRODUCTS
    }
}

impl OrderTable for FixtureStore {
    fn lookup(&self, order_id: &str) -> Option<Order> {
        ORDERS.iter().find(|o| o.order_id == order_id).cloned()
    }

    fn order_ids(&self) -> Vec<String> {
        ORDERS.iter().map(|o| o.order_id.clone()).collect()
    }
}
