//! Client-level error types and the normalized error shape every failure converts into.

// self
use crate::{_prelude::*, config::Destination};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message reported when neither the backend nor the transport supplied one.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";
/// Status reported for failures that never produced an HTTP response.
pub const FALLBACK_STATUS: u16 = 500;

/// Canonical client error exposed by public APIs.
///
/// Every variant can be flattened into an [`ApiError`] through [`Error::normalized`], which is
/// the shape application code is expected to render or log.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Backend answered with a non-2xx status (including a 401 that could not be recovered).
	#[error(transparent)]
	Api(#[from] ApiError),
	/// No response was received (network, timeout, I/O).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A 2xx response body did not match the expected envelope.
	#[error("Response body did not match the expected envelope at `{}`.", .source.path())]
	Decode {
		/// Structured parsing failure, including the JSON path that failed.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status of the undecodable response.
		status: u16,
	},
	/// The access-token refresh exchange failed; local credentials were cleared.
	#[error("Access token refresh failed: {source}")]
	Refresh {
		/// Failure reported by the refresh call itself.
		#[source]
		source: Box<Error>,
	},
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Wraps the failure of a refresh exchange.
	pub fn refresh(source: Error) -> Self {
		Self::Refresh { source: Box::new(source) }
	}

	/// Status code of the normalized form of this error.
	pub fn status_code(&self) -> u16 {
		match self {
			Self::Api(err) => err.status_code,
			Self::Refresh { source } => source.status_code(),
			Self::Transport(_) | Self::Decode { .. } | Self::Config(_) => FALLBACK_STATUS,
		}
	}

	/// Returns `true` for a backend 401 response.
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Api(err) if err.status_code == 401)
	}

	/// Converts the error into the normalized shape handed to application code.
	pub fn normalized(&self) -> ApiError {
		match self {
			Self::Api(err) => err.clone(),
			Self::Refresh { source } => source.normalized(),
			Self::Transport(err) => ApiError::new(err.to_string(), FALLBACK_STATUS),
			Self::Decode { source, .. } => ApiError::new(
				format!(
					"Response body did not match the expected envelope at `{}`: {}",
					source.path(),
					source.inner()
				),
				FALLBACK_STATUS,
			),
			Self::Config(err) => ApiError::new(err.to_string(), FALLBACK_STATUS),
		}
	}
}

/// Normalized error: the single failure shape surfaced to application code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[serde(rename_all = "camelCase")]
#[error("{message} (status {status_code})")]
pub struct ApiError {
	/// Best available human-readable message.
	pub message: String,
	/// HTTP status, or [`FALLBACK_STATUS`] when no response was received.
	pub status_code: u16,
	/// Field-level validation messages reported by the backend.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub errors: Option<BTreeMap<String, Vec<String>>>,
}
impl ApiError {
	/// Builds an error, substituting [`FALLBACK_MESSAGE`] for a blank message.
	pub fn new(message: impl Into<String>, status_code: u16) -> Self {
		let message = message.into();
		let message =
			if message.trim().is_empty() { FALLBACK_MESSAGE.to_owned() } else { message };

		Self { message, status_code, errors: None }
	}

	/// Attaches field-level validation messages.
	pub fn with_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
		self.errors = Some(errors);

		self
	}
}
impl From<Error> for ApiError {
	fn from(e: Error) -> Self {
		match e {
			Error::Api(err) => err,
			other => other.normalized(),
		}
	}
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Client configuration failed validation.
	#[error(transparent)]
	Validation(#[from] crate::config::ConfigValidationError),
	/// Request path cannot be joined onto the destination base URL.
	#[error("Path `{path}` cannot be joined onto the {destination} base URL.")]
	InvalidPath {
		/// Destination the request targeted.
		destination: Destination,
		/// Offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be encoded as JSON.
	#[error("Request body could not be serialized.")]
	BodySerialize {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// Caller-supplied header is not valid HTTP.
	#[error("Header `{name}` is not a valid HTTP header.")]
	InvalidHeader {
		/// Offending header name.
		name: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures: the request produced no HTTP response.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The request exceeded the destination timeout.
	#[error("Request timed out after {timeout:?}.")]
	Timeout {
		/// Timeout that elapsed.
		timeout: Duration,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("{message}")]
	Network {
		/// Transport-supplied message; may be empty.
		message: String,
		/// Transport-specific network error.
		#[source]
		source: Option<BoxError>,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while sending the request: {0}")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error, keeping its message.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { message: src.to_string(), source: Some(Box::new(src)) }
	}

	/// Builds a network failure that carries only a message.
	pub fn message(message: impl Into<String>) -> Self {
		Self::Network { message: message.into(), source: None }
	}
}
