//! `trading212://` resource routing.

use rmcp::model::{AnnotateAble, RawResource, Resource};
use url::Url;

use stock_helper_provider::OrderHistoryQuery;

use crate::envelope::JSON_MIME_TYPE;

pub const SCHEME: &str = "trading212";

pub const PORTFOLIO_URI: &str = "trading212://portfolio";
pub const ACCOUNT_CASH_URI: &str = "trading212://account/cash";
pub const ORDERS_HISTORY_URI: &str = "trading212://orders/history";
pub const ACCOUNT_METADATA_URI: &str = "trading212://account/metadata";

/// Upstream call a resource URI maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRoute {
    Portfolio,
    AccountCash,
    OrdersHistory(OrderHistoryQuery),
    AccountMetadata,
}

/// Map a resource URI to its route.
///
/// The error string is the description handed back to the caller.
pub fn route(uri: &str) -> Result<ResourceRoute, String> {
    let parsed = Url::parse(uri).map_err(|e| format!("Invalid resource URI '{uri}': {e}"))?;
    if parsed.scheme() != SCHEME {
        return Err(format!("Unsupported resource URI scheme: {}", parsed.scheme()));
    }

    let host = parsed.host_str().unwrap_or_default();
    let path = parsed.path().trim_end_matches('/');
    match (host, path) {
        ("portfolio", "") => Ok(ResourceRoute::Portfolio),
        ("account", "/cash") => Ok(ResourceRoute::AccountCash),
        ("account", "/metadata") => Ok(ResourceRoute::AccountMetadata),
        ("orders", "/history") => Ok(ResourceRoute::OrdersHistory(history_query(&parsed))),
        _ => Err(format!("Unknown resource: {uri}")),
    }
}

/// Query-string filters; values that fail to parse are ignored.
fn history_query(uri: &Url) -> OrderHistoryQuery {
    let mut query = OrderHistoryQuery::default();
    for (key, value) in uri.query_pairs() {
        match key.as_ref() {
            "cursor" => query.cursor = value.parse().ok(),
            "limit" => query.limit = value.parse().ok(),
            "ticker" if !value.is_empty() => query.ticker = Some(value.into_owned()),
            _ => {}
        }
    }
    query
}

/// Noun used in upstream error messages.
pub fn subject(route: &ResourceRoute) -> &'static str {
    match route {
        ResourceRoute::Portfolio => "portfolio",
        ResourceRoute::AccountCash => "account cash",
        ResourceRoute::OrdersHistory(_) => "orders history",
        ResourceRoute::AccountMetadata => "account metadata",
    }
}

fn resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut raw = RawResource::new(uri, name);
    raw.description = Some(description.to_string());
    raw.mime_type = Some(JSON_MIME_TYPE.to_string());
    raw.no_annotation()
}

/// Static resource catalog, in stable order.
pub fn catalog() -> Vec<Resource> {
    vec![
        resource(
            PORTFOLIO_URI,
            "portfolio",
            "All open positions with quantity, average price, current price and profit/loss",
        ),
        resource(
            ACCOUNT_CASH_URI,
            "account-cash",
            "Free, invested, blocked and total cash of the account",
        ),
        resource(
            ORDERS_HISTORY_URI,
            "orders-history",
            "Historical orders; accepts ?cursor=, ?limit= and ?ticker= query parameters",
        ),
        resource(
            ACCOUNT_METADATA_URI,
            "account-metadata",
            "Account currency and account id",
        ),
    ]
}
