//! Destination definitions and validated client configuration.
//!
//! The four backend destinations are fixed for the lifetime of a client. Their base URLs come
//! from [`ClientConfig::from_env`] (or an explicit [`ClientConfigBuilder`]) at startup and are
//! never mutated afterwards.

// self
use crate::_prelude::*;

/// Uniform per-request timeout applied to every destination by default.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(30_000);
/// Default entry point the client redirects to when the session cannot be recovered.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Named backend targets the client can call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Destination {
	/// API gateway (authentication and generic calls).
	Gateway,
	/// Market data service (stocks, quotes, history).
	MarketData,
	/// Portfolio service (holdings and transactions).
	Portfolio,
	/// Alert service (price alerts).
	Alert,
}
impl Destination {
	/// Every destination, in declaration order.
	pub const ALL: [Destination; 4] =
		[Destination::Gateway, Destination::MarketData, Destination::Portfolio, Destination::Alert];

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Destination::Gateway => "gateway",
			Destination::MarketData => "marketData",
			Destination::Portfolio => "portfolio",
			Destination::Alert => "alert",
		}
	}

	const fn env_key(self) -> &'static str {
		match self {
			Destination::Gateway => "STOCKDASH_API_GATEWAY_URL",
			Destination::MarketData => "STOCKDASH_MARKET_DATA_URL",
			Destination::Portfolio => "STOCKDASH_PORTFOLIO_URL",
			Destination::Alert => "STOCKDASH_ALERT_URL",
		}
	}

	const fn default_url(self) -> &'static str {
		match self {
			Destination::Gateway => "http://localhost:8080",
			Destination::MarketData => "http://localhost:8081",
			Destination::Portfolio => "http://localhost:8082",
			Destination::Alert => "http://localhost:8083",
		}
	}
}
impl Display for Destination {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Base URLs for every destination plus the WebSocket feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEndpoints {
	/// API gateway base URL.
	pub gateway: Url,
	/// Market data base URL.
	pub market_data: Url,
	/// Portfolio base URL.
	pub portfolio: Url,
	/// Alert base URL.
	pub alert: Url,
	/// WebSocket feed URL.
	pub ws: Url,
}
impl ServiceEndpoints {
	/// Returns the base URL configured for `destination`.
	pub fn base(&self, destination: Destination) -> &Url {
		match destination {
			Destination::Gateway => &self.gateway,
			Destination::MarketData => &self.market_data,
			Destination::Portfolio => &self.portfolio,
			Destination::Alert => &self.alert,
		}
	}
}

/// Immutable configuration consumed by [`ApiClient`](crate::client::ApiClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
	/// Destination base URLs.
	pub endpoints: ServiceEndpoints,
	/// Timeout applied to every request.
	pub request_timeout: Duration,
	/// Path handed to the login redirect hook after a failed refresh.
	pub login_path: String,
}
impl ClientConfig {
	/// Creates a builder seeded with the local development defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Loads configuration from the process environment.
	///
	/// Reads `STOCKDASH_API_GATEWAY_URL`, `STOCKDASH_MARKET_DATA_URL`, `STOCKDASH_PORTFOLIO_URL`,
	/// `STOCKDASH_ALERT_URL`, `STOCKDASH_WS_URL`, and `STOCKDASH_REQUEST_TIMEOUT_MS`; unset or empty
	/// values fall back to the development defaults.
	pub fn from_env() -> Result<Self, ConfigValidationError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Loads configuration through an arbitrary key lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigValidationError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
		let mut builder = ClientConfigBuilder::default();

		for destination in Destination::ALL {
			if let Some(raw) = read(destination.env_key()) {
				builder = builder.base_url(destination, parse_url("base", &raw)?);
			}
		}
		if let Some(raw) = read(WS_ENV_KEY) {
			builder = builder.ws_url(parse_url("ws", &raw)?);
		}
		if let Some(raw) = read(TIMEOUT_ENV_KEY) {
			let millis = raw.trim().parse::<u64>().map_err(|_| {
				ConfigValidationError::InvalidTimeout { value: raw.trim().to_owned() }
			})?;

			builder = builder.request_timeout(Duration::from_millis(millis));
		}

		builder.build()
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			endpoints: ServiceEndpoints {
				gateway: default_url(Destination::Gateway),
				market_data: default_url(Destination::MarketData),
				portfolio: default_url(Destination::Portfolio),
				alert: default_url(Destination::Alert),
				ws: builtin_url(DEFAULT_WS_URL),
			},
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			login_path: DEFAULT_LOGIN_PATH.to_owned(),
		}
	}
}

const WS_ENV_KEY: &str = "STOCKDASH_WS_URL";
const TIMEOUT_ENV_KEY: &str = "STOCKDASH_REQUEST_TIMEOUT_MS";
const DEFAULT_WS_URL: &str = "ws://localhost:8081/ws";

fn default_url(destination: Destination) -> Url {
	builtin_url(destination.default_url())
}

fn builtin_url(raw: &'static str) -> Url {
	Url::parse(raw).expect("Built-in endpoint constants must parse.")
}

fn parse_url(endpoint: &'static str, raw: &str) -> Result<Url, ConfigValidationError> {
	Url::parse(raw.trim())
		.map_err(|_| ConfigValidationError::UnparsableUrl { endpoint, value: raw.trim().to_owned() })
}

/// Errors raised while constructing or validating a [`ClientConfig`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigValidationError {
	/// A configured value is not a URL at all.
	#[error("The {endpoint} URL cannot be parsed: {value}.")]
	UnparsableUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Raw value that failed to parse.
		value: String,
	},
	/// Destination base URLs must use HTTP(S) and be usable as a base.
	#[error("The {destination} base URL must be an http(s) base URL: {url}.")]
	InvalidBaseUrl {
		/// Which destination failed validation.
		destination: Destination,
		/// URL that failed validation.
		url: String,
	},
	/// The WebSocket feed must use `ws` or `wss`.
	#[error("The WebSocket URL must use ws or wss: {url}.")]
	InvalidWsUrl {
		/// URL that failed validation.
		url: String,
	},
	/// Request timeout must be a positive number of milliseconds.
	#[error("Request timeout must be a positive number of milliseconds: {value}.")]
	InvalidTimeout {
		/// Raw value that failed validation.
		value: String,
	},
	/// Login redirect target must be an absolute path.
	#[error("Login path must start with `/`: {path}.")]
	InvalidLoginPath {
		/// Path that failed validation.
		path: String,
	},
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	config: ClientConfig,
}
impl ClientConfigBuilder {
	/// Sets the base URL for a single destination.
	pub fn base_url(mut self, destination: Destination, url: Url) -> Self {
		let endpoints = &mut self.config.endpoints;
		let slot = match destination {
			Destination::Gateway => &mut endpoints.gateway,
			Destination::MarketData => &mut endpoints.market_data,
			Destination::Portfolio => &mut endpoints.portfolio,
			Destination::Alert => &mut endpoints.alert,
		};

		*slot = url;

		self
	}

	/// Points every destination at the same base URL.
	pub fn all_base_urls(mut self, url: Url) -> Self {
		for destination in Destination::ALL {
			self = self.base_url(destination, url.clone());
		}

		self
	}

	/// Sets the WebSocket feed URL.
	pub fn ws_url(mut self, url: Url) -> Self {
		self.config.endpoints.ws = url;

		self
	}

	/// Overrides the request timeout (defaults to 30 seconds).
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.config.request_timeout = timeout;

		self
	}

	/// Overrides the login redirect path (defaults to `/login`).
	pub fn login_path(mut self, path: impl Into<String>) -> Self {
		self.config.login_path = path.into();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigValidationError> {
		self.config.validate()?;

		Ok(self.config)
	}
}
impl ClientConfig {
	fn validate(&self) -> Result<(), ConfigValidationError> {
		for destination in Destination::ALL {
			validate_base_url(destination, self.endpoints.base(destination))?;
		}

		if !matches!(self.endpoints.ws.scheme(), "ws" | "wss") {
			return Err(ConfigValidationError::InvalidWsUrl { url: self.endpoints.ws.to_string() });
		}
		if self.request_timeout.is_zero() {
			return Err(ConfigValidationError::InvalidTimeout {
				value: self.request_timeout.as_millis().to_string(),
			});
		}
		if !self.login_path.starts_with('/') {
			return Err(ConfigValidationError::InvalidLoginPath { path: self.login_path.clone() });
		}

		Ok(())
	}
}

fn validate_base_url(destination: Destination, url: &Url) -> Result<(), ConfigValidationError> {
	if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() {
		Ok(())
	} else {
		Err(ConfigValidationError::InvalidBaseUrl { destination, url: url.to_string() })
	}
}
