use serde::Serialize;

use toolgate_core::traits::WeatherTable;
use toolgate_core::{ArgumentBag, Error, ParameterSpec, ToolDescriptor};

use super::{to_text, SOURCE};

pub const NAME: &str = "get_weather";
pub const CITY: &str = "city";

#[must_use]
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        NAME,
        "Returns current weather conditions for a given city. Uses mock data.",
    )
    .param(ParameterSpec::required(
        CITY,
        "The name of the city to get weather for.",
    ))
}

#[derive(Serialize)]
struct Conditions<'a> {
    city: &'a str,
    temperature_c: i32,
    temperature_f: f64,
    condition: &'a str,
    humidity_pct: u8,
    wind_kmh: u16,
    source: &'static str,
}

#[derive(Serialize)]
struct UnknownCity<'a> {
    city: &'a str,
    status: &'static str,
    message: String,
    source: &'static str,
}

/// Current conditions for `city`, matched case-insensitively.
///
/// An unknown city yields a fixed "Unknown City" answer listing the cities
/// that do have data.
///
/// # Errors
///
/// Only if the result cannot be rendered.
pub fn resolve(table: &dyn WeatherTable, args: &ArgumentBag) -> Result<String, Error> {
    let city = args.get_or_empty(CITY).trim();
    tracing::info!(city, "{NAME} triggered");

    match table.lookup(&city.to_lowercase()) {
        Some(record) => to_text(&Conditions {
            city: &record.city,
            temperature_c: record.temperature_c,
            temperature_f: record.temperature_f(),
            condition: &record.condition,
            humidity_pct: record.humidity_pct,
            wind_kmh: record.wind_kmh,
            source: SOURCE,
        }),
        None => {
            let shown = if city.is_empty() { "Unknown" } else { city };
            to_text(&UnknownCity {
                city: shown,
                status: "Unknown City",
                message: format!(
                    "No weather data for '{shown}'. Known cities: {}.",
                    table.cities().join(", ")
                ),
                source: SOURCE,
            })
        }
    }
}
