//! Request descriptions handed to the dispatcher.

// self
use crate::{_prelude::*, config::Destination, error::ConfigError, http::Method};

/// Optional per-call settings: query parameters and extra headers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
	/// Query pairs appended to the URL in insertion order.
	pub query: Vec<(String, String)>,
	/// Extra headers; `Authorization` is always owned by the client.
	pub headers: Vec<(String, String)>,
}
impl RequestOptions {
	/// Empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a query pair.
	pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
		self.query.push((name.into(), value.to_string()));

		self
	}

	/// Appends a query pair when `value` is present.
	pub fn query_opt(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
		match value {
			Some(value) => self.query(name, value),
			None => self,
		}
	}

	/// Appends an extra header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}
}

/// One logical API call, including the bookkeeping the refresh path needs.
#[derive(Clone, Debug)]
pub struct RequestContext {
	/// Backend the call targets.
	pub destination: Destination,
	/// HTTP method.
	pub method: Method,
	/// Path relative to the destination base URL.
	pub path: String,
	/// Query parameters and extra headers.
	pub options: RequestOptions,
	/// Pre-encoded JSON body; ignored for `GET`.
	pub body: Option<Vec<u8>>,
	retried: bool,
}
impl RequestContext {
	/// Describes a body-less call.
	pub fn new(destination: Destination, method: Method, path: impl Into<String>) -> Self {
		Self {
			destination,
			method,
			path: path.into(),
			options: RequestOptions::default(),
			body: None,
			retried: false,
		}
	}

	/// Encodes `body` as the JSON payload.
	pub fn with_json<B>(mut self, body: &B) -> Result<Self>
	where
		B: ?Sized + Serialize,
	{
		let encoded =
			serde_json::to_vec(body).map_err(|source| ConfigError::BodySerialize { source })?;

		self.body = Some(encoded);

		Ok(self)
	}

	/// Replaces the per-call options.
	pub fn with_options(mut self, options: RequestOptions) -> Self {
		self.options = options;

		self
	}

	/// Returns `true` once the call has been replayed after a refresh.
	pub fn is_retried(&self) -> bool {
		self.retried
	}

	pub(crate) fn mark_retried(&mut self) {
		self.retried = true;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn optional_query_pairs_are_skipped() {
		let options = RequestOptions::new()
			.query("page", 2)
			.query_opt("sector", None::<&str>)
			.query_opt("search", Some("apple"));

		assert_eq!(
			options.query,
			vec![("page".to_owned(), "2".to_owned()), ("search".to_owned(), "apple".to_owned())]
		);
	}

	#[test]
	fn json_bodies_are_encoded_once() {
		let request = RequestContext::new(Destination::Alert, Method::Post, "/api/alerts")
			.with_json(&serde_json::json!({ "symbol": "AAPL" }))
			.expect("JSON body should encode.");

		assert_eq!(request.body.as_deref(), Some(br#"{"symbol":"AAPL"}"#.as_slice()));
		assert!(!request.is_retried());
	}
}
