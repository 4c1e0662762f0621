//! Typed endpoint methods on [`ApiClient`](crate::ApiClient), one module per backend.

pub mod alerts;
pub mod auth;
pub mod portfolio;
pub mod stocks;

/// Percent-encodes one path segment (symbols, ids) so it cannot alter the route.
pub(crate) fn segment(raw: &str) -> String {
	url::form_urlencoded::byte_serialize(raw.as_bytes()).collect::<String>().replace('+', "%20")
}
