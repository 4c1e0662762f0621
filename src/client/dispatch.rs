//! Single-attempt dispatch: request assembly, status mapping, and envelope decoding.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::{ApiClient, RequestContext},
	error::{ApiError, ConfigError},
	http::{HttpTransport, TransportRequest, TransportResponse},
	model::Envelope,
	obs::{self, CallOutcome, CallSpan, CallStage},
};

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const JSON: &str = "application/json";

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Sends `request` once with `token` as the bearer credential.
	///
	/// Resolves to the raw response for 2xx statuses and to [`Error::Api`] for every other
	/// status. No refresh handling happens here.
	pub(crate) async fn dispatch(
		&self,
		request: &RequestContext,
		token: Option<&TokenSecret>,
		stage: CallStage,
	) -> Result<TransportResponse> {
		let span = CallSpan::new(request.destination, stage);

		obs::record_call_outcome(stage, CallOutcome::Attempt);

		let result = span
			.instrument(async {
				let outbound = self.build_request(request, token)?;
				let response = self.transport.send(outbound).await?;

				if response.is_success() {
					Ok(response)
				} else {
					Err(Error::Api(normalize_failure(&response)))
				}
			})
			.await;

		obs::record_call_outcome(stage, CallOutcome::of(&result));

		result
	}

	pub(crate) fn build_request(
		&self,
		request: &RequestContext,
		token: Option<&TokenSecret>,
	) -> Result<TransportRequest> {
		let base = self.config().endpoints.base(request.destination);
		let mut url = endpoint_url(base, &request.path).map_err(|source| {
			ConfigError::InvalidPath {
				destination: request.destination,
				path: request.path.clone(),
				source,
			}
		})?;

		if !request.options.query.is_empty() {
			url.query_pairs_mut().extend_pairs(&request.options.query);
		}

		let mut headers = Vec::with_capacity(request.options.headers.len() + 2);

		for (name, value) in &request.options.headers {
			if !is_header_name(name) || !is_header_value(value) {
				return Err(ConfigError::InvalidHeader { name: name.clone() }.into());
			}
			if name.eq_ignore_ascii_case(AUTHORIZATION) {
				continue;
			}

			headers.push((name.clone(), value.clone()));
		}

		if !headers.iter().any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE)) {
			headers.insert(0, (CONTENT_TYPE.to_owned(), JSON.to_owned()));
		}
		if let Some(token) = token {
			headers.push((AUTHORIZATION.to_owned(), token.bearer()));
		}

		let body = if request.method.allows_body() { request.body.clone() } else { None };

		Ok(TransportRequest {
			method: request.method,
			url,
			headers,
			body,
			timeout: self.config().request_timeout,
		})
	}
}

/// Joins `path` onto `base` by concatenation so base URLs keep any path prefix.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
	let base = base.as_str().trim_end_matches('/');
	let path = path.trim_start_matches('/');

	Url::parse(&format!("{base}/{path}"))
}

/// Decodes a JSON body, reporting the failing path on mismatch.
pub(crate) fn decode_json<R>(response: &TransportResponse) -> Result<R>
where
	R: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { source, status: response.status })
}

/// Decodes the standard envelope and keeps only its `data` member.
///
/// A blank body (204 and friends) decodes as `data: null`, so `()` and `Option<_>` succeed.
pub(crate) fn unwrap_envelope<R>(response: &TransportResponse) -> Result<R>
where
	R: DeserializeOwned,
{
	if response.body.iter().all(u8::is_ascii_whitespace) {
		return serde_path_to_error::deserialize(serde_json::Value::Null)
			.map_err(|source| Error::Decode { source, status: response.status });
	}

	decode_json::<Envelope<R>>(response).map(|envelope| envelope.data)
}

/// Maps a non-2xx response into the normalized error shape.
///
/// The message comes from the body's `message` field when present, otherwise from the status.
pub(crate) fn normalize_failure(response: &TransportResponse) -> ApiError {
	let body = serde_json::from_slice::<serde_json::Value>(&response.body).ok();
	let message = body
		.as_ref()
		.and_then(|body| body.get("message"))
		.and_then(serde_json::Value::as_str)
		.filter(|message| !message.trim().is_empty())
		.map(ToOwned::to_owned)
		.unwrap_or_else(|| format!("Request failed with status code {}", response.status));
	let errors = body
		.as_ref()
		.and_then(|body| body.get("errors"))
		.and_then(|errors| serde_json::from_value(errors.clone()).ok());
	let normalized = ApiError::new(message, response.status);

	match errors {
		Some(errors) => normalized.with_errors(errors),
		None => normalized,
	}
}

fn is_header_name(name: &str) -> bool {
	!name.is_empty()
		&& name.bytes().all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

fn is_header_value(value: &str) -> bool {
	value.bytes().all(|b| b == b'\t' || (b >= 0x20 && b != 0x7f))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		config::{ClientConfig, Destination},
		error::FALLBACK_MESSAGE,
		http::{Method, TransportFuture},
		store::MemoryStore,
	};

	struct Unreachable;
	impl HttpTransport for Unreachable {
		fn send(&self, _: TransportRequest) -> TransportFuture<'_> {
			Box::pin(async { Err(crate::error::TransportError::message("unreachable")) })
		}
	}

	fn client() -> ApiClient<Unreachable> {
		let config = ClientConfig::builder()
			.base_url(
				Destination::Portfolio,
				Url::parse("http://portfolio.test/v1/").expect("Fixture URL should parse."),
			)
			.build()
			.expect("Fixture configuration should be valid.");

		ApiClient::with_transport(config, Arc::new(MemoryStore::default()), Unreachable)
	}

	fn response(status: u16, body: &str) -> TransportResponse {
		TransportResponse { status, body: body.as_bytes().to_vec() }
	}

	#[test]
	fn build_request_attaches_defaults_and_bearer() {
		let client = client();
		let request = RequestContext::new(Destination::Portfolio, Method::Get, "/api/transactions")
			.with_options(
				crate::client::RequestOptions::new()
					.query("page", 2)
					.header("Authorization", "Bearer spoofed")
					.header("X-Trace", "abc"),
			);
		let built = client
			.build_request(&request, Some(&TokenSecret::new("live")))
			.expect("Request should build.");

		assert_eq!(built.url.as_str(), "http://portfolio.test/v1/api/transactions?page=2");
		assert_eq!(built.header("content-type"), Some(JSON));
		assert_eq!(built.header("authorization"), Some("Bearer live"));
		assert_eq!(built.header("x-trace"), Some("abc"));
		assert_eq!(built.timeout, Duration::from_millis(30_000));
		assert!(built.body.is_none());
	}

	#[test]
	fn build_request_rejects_malformed_headers() {
		let request = RequestContext::new(Destination::Gateway, Method::Get, "/api/auth/me")
			.with_options(crate::client::RequestOptions::new().header("X-Bad", "line\r\nbreak"));
		let err = client().build_request(&request, None).expect_err("CRLF should be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidHeader { .. })));
	}

	#[test]
	fn get_requests_drop_bodies() {
		let mut request = RequestContext::new(Destination::Gateway, Method::Get, "api/stocks");

		request.body = Some(b"{}".to_vec());

		let built = client().build_request(&request, None).expect("Request should build.");

		assert!(built.body.is_none());
		assert!(built.header("authorization").is_none());
		assert_eq!(built.url.as_str(), "http://localhost:8080/api/stocks");
	}

	#[test]
	fn failures_prefer_body_message_then_status() {
		let err = normalize_failure(&response(
			422,
			r#"{"success":false,"message":"Invalid","errors":{"quantity":["must be positive"]}}"#,
		));

		assert_eq!(err.message, "Invalid");
		assert_eq!(err.status_code, 422);
		assert_eq!(
			err.errors.as_ref().and_then(|e| e.get("quantity")).map(Vec::len),
			Some(1),
			"Field errors should be copied from the body."
		);

		let err = normalize_failure(&response(503, "<html>bad gateway</html>"));

		assert_eq!(err.message, "Request failed with status code 503");
		assert_eq!(err.status_code, 503);
		assert!(err.errors.is_none());
		assert_ne!(err.message, FALLBACK_MESSAGE);
	}

	#[test]
	fn blank_bodies_decode_as_null_data() {
		unwrap_envelope::<()>(&response(204, "")).expect("Unit should decode from no content.");

		assert_eq!(
			unwrap_envelope::<Option<serde_json::Value>>(&response(200, " \n"))
				.expect("Option should decode from a blank body."),
			None
		);

		let err = unwrap_envelope::<Vec<u32>>(&response(204, ""))
			.expect_err("Required data cannot come from no content.");

		assert!(matches!(err, Error::Decode { status: 204, .. }));
	}

	#[test]
	fn envelope_mismatch_reports_path() {
		let err = unwrap_envelope::<Vec<u32>>(&response(200, r#"{"success":true,"data":[1,"x"]}"#))
			.expect_err("Mismatched payload should fail.");

		match err {
			Error::Decode { source, status } => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "data[1]");
			},
			other => panic!("Expected a decode error, got {other:?}."),
		}
	}
}
