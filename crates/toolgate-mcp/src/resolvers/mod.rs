//! Business logic of the built-in tools.
//!
//! Every resolver is a pure function of its arguments and a read-only table.
//! A lookup miss is an ordinary result carrying an explanatory message; only
//! a fault inside the resolver itself is an error.

pub mod greeting;
pub mod orders;
pub mod products;
pub mod weather;

use serde::Serialize;

use toolgate_core::Error;

/// Provenance tag attached to every result.
pub const SOURCE: &str = "mock data";

/// Render a result as compact JSON text.
fn to_text<T: Serialize>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|e| Error::Internal(e.to_string()))
}
