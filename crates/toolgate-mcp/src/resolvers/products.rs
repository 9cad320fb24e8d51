use serde::Serialize;

use toolgate_core::traits::ProductCatalog;
use toolgate_core::{ArgumentBag, Error, ParameterSpec, Product, ToolDescriptor};

use super::{to_text, SOURCE};

pub const NAME: &str = "search_products";
pub const QUERY: &str = "query";
pub const MAX_RESULTS: &str = "max_results";

/// Result count when `max_results` is absent or not an integer.
pub const DEFAULT_MAX_RESULTS: usize = 3;
/// Upper bound on `max_results`.
pub const MAX_RESULTS_CAP: usize = 5;

#[must_use]
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        NAME,
        "Search a product catalog and return matching items. Uses mock data.",
    )
    .param(ParameterSpec::required(
        QUERY,
        "Search term to find matching products.",
    ))
    .param(ParameterSpec::optional(
        MAX_RESULTS,
        "Maximum number of results to return (default 3, max 5).",
    ))
}

#[derive(Serialize)]
struct SearchResult<'a> {
    query: &'a str,
    total_matches: usize,
    returned: usize,
    products: Vec<&'a Product>,
    source: &'static str,
}

/// Interpret the `max_results` argument.
///
/// Non-integers fall back to [`DEFAULT_MAX_RESULTS`]; negatives clamp to
/// zero; anything above [`MAX_RESULTS_CAP`] is capped.
#[must_use]
pub fn parse_max_results(raw: Option<&str>) -> usize {
    match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
        None => DEFAULT_MAX_RESULTS,
        Some(n) => {
            usize::try_from(n.max(0)).map_or(MAX_RESULTS_CAP, |n| n.min(MAX_RESULTS_CAP))
        }
    }
}

/// Products whose name or category contains `query`, ignoring case.
///
/// An empty query matches the whole catalog; no match is an empty list.
///
/// # Errors
///
/// Only if the result cannot be rendered.
pub fn resolve(catalog: &dyn ProductCatalog, args: &ArgumentBag) -> Result<String, Error> {
    let query = args.get_or_empty(QUERY).trim().to_lowercase();
    let max_results = parse_max_results(args.get(MAX_RESULTS));
    tracing::info!(query = %query, max_results, "{NAME} triggered");

    let matches: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| p.matches(&query))
        .collect();
    let total_matches = matches.len();
    let products: Vec<&Product> = matches.into_iter().take(max_results).collect();

    to_text(&SearchResult {
        query: &query,
        total_matches,
        returned: products.len(),
        products,
        source: SOURCE,
    })
}
