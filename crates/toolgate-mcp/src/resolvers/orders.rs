use serde::Serialize;

use toolgate_core::traits::OrderTable;
use toolgate_core::{ArgumentBag, Error, Order, ParameterSpec, ToolDescriptor};

use super::{to_text, SOURCE};

pub const NAME: &str = "get_order_status";
pub const ORDER_ID: &str = "order_id";

#[must_use]
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        NAME,
        "Look up the status and tracking information for an order by its ID. Uses mock data.",
    )
    .param(ParameterSpec::required(
        ORDER_ID,
        "The order ID to look up (e.g. ORD-1001).",
    ))
}

#[derive(Serialize)]
struct OrderReport<'a> {
    #[serde(flatten)]
    order: &'a Order,
    source: &'static str,
}

#[derive(Serialize)]
struct OrderNotFound<'a> {
    order_id: &'a str,
    status: &'static str,
    message: String,
    source: &'static str,
}

/// Status of the order with exactly this ID.
///
/// Matching is case-sensitive; an unknown ID yields a "Not Found" answer.
///
/// # Errors
///
/// Only if the result cannot be rendered.
pub fn resolve(table: &dyn OrderTable, args: &ArgumentBag) -> Result<String, Error> {
    let order_id = args.get_or_empty(ORDER_ID);
    tracing::info!(order_id, "{NAME} triggered");

    if let Some(order) = table.lookup(order_id) {
        return to_text(&OrderReport {
            order: &order,
            source: SOURCE,
        });
    }

    let known = table.order_ids();
    let hint = match (known.first(), known.last()) {
        (Some(first), Some(last)) => format!(" Valid examples: {first} through {last}."),
        _ => String::new(),
    };
    to_text(&OrderNotFound {
        order_id,
        status: "Not Found",
        message: format!("No order found with ID '{order_id}'.{hint}"),
        source: SOURCE,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use toolgate_fixtures::FixtureStore;

    use super::*;

    fn status_of(order_id: &str) -> Value {
        let args: ArgumentBag = [(ORDER_ID, order_id)].into_iter().collect();
        let text = resolve(&FixtureStore::new(), &args).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn fixture_orders_have_fixed_statuses() {
        let expected = [
            ("ORD-1001", "Delivered"),
            ("ORD-1002", "In Transit"),
            ("ORD-1003", "Processing"),
            ("ORD-1004", "Shipped"),
            ("ORD-1005", "Cancelled"),
        ];
        for (id, status) in expected {
            let result = status_of(id);
            assert_eq!(result["order_id"], id);
            assert_eq!(result["status"], status);
            assert_eq!(result["source"], "mock data");
        }
    }

    #[test]
    fn delivered_order_has_tracking() {
        let result = status_of("ORD-1001");
        assert_eq!(result["carrier"], "FedEx");
        assert_eq!(result["tracking"], "FX123456789");
        assert_eq!(result["delivered"], "2026-02-13");
    }

    #[test]
    fn cancelled_order_has_no_carrier() {
        let result = status_of("ORD-1005");
        assert!(result["carrier"].is_null());
        assert!(result["estimated_delivery"].is_null());
    }

    #[test]
    fn unknown_order_is_not_found() {
        let result = status_of("ORD-9999");
        assert_eq!(result["status"], "Not Found");
        assert_eq!(
            result["message"],
            "No order found with ID 'ORD-9999'. Valid examples: ORD-1001 through ORD-1005."
        );
        assert_eq!(result, status_of("ORD-9999"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(status_of("ord-1001")["status"], "Not Found");
        assert_eq!(status_of(" ORD-1001")["status"], "Not Found");
    }
}
