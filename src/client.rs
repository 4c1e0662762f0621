//! Authenticated API client: request dispatch, envelope unwrapping, and transparent refresh.

pub mod dispatch;
pub mod refresh;
pub mod request;

pub use refresh::*;
pub use request::*;

// self
use crate::{
	_prelude::*,
	config::{ClientConfig, Destination},
	ext::{LoginRedirect, NoopRedirect},
	http::{HttpTransport, Method},
	store::CredentialStore,
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestTransport};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Calls the dashboard backends on behalf of one signed-in user.
///
/// The client owns the transport, the credential store, and the login redirect hook. Every call
/// goes through the dispatcher, which attaches the current access token and unwraps the response
/// envelope. A 401 is intercepted once per call: the client exchanges the refresh token for a new
/// access token (at most one exchange in flight at a time) and replays the call with it.
pub struct ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// HTTP transport used for every outbound request.
	pub transport: Arc<T>,
	/// Credential store holding the access and refresh tokens.
	pub store: Arc<dyn CredentialStore>,
	/// Hook invoked when the session cannot be recovered.
	pub redirect: Arc<dyn LoginRedirect>,
	/// Counters for refresh exchanges.
	pub refresh_metrics: Arc<RefreshMetrics>,
	config: ClientConfig,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client over a caller-provided transport.
	pub fn with_transport(
		config: ClientConfig,
		store: Arc<dyn CredentialStore>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			store,
			redirect: Arc::new(NoopRedirect),
			refresh_metrics: Default::default(),
			config,
			refresh_guard: Arc::new(AsyncMutex::new(())),
		}
	}

	/// Installs the hook invoked after a failed refresh.
	pub fn with_redirect(mut self, redirect: Arc<dyn LoginRedirect>) -> Self {
		self.redirect = redirect;

		self
	}

	/// Configuration the client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Executes `request` and returns the unwrapped `data` field of the response envelope.
	pub async fn send<R>(&self, request: RequestContext) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let response = self.execute(request).await?;

		dispatch::unwrap_envelope(&response)
	}

	/// Executes `request` and discards the response body (no-content endpoints).
	pub async fn send_empty(&self, request: RequestContext) -> Result<()> {
		self.execute(request).await.map(|_| ())
	}

	/// Issues a `GET` against `destination`.
	pub async fn get<R>(
		&self,
		destination: Destination,
		path: impl Into<String>,
		options: RequestOptions,
	) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.send(RequestContext::new(destination, Method::Get, path).with_options(options)).await
	}

	/// Issues a `POST` with a JSON body against `destination`.
	pub async fn post<R, B>(
		&self,
		destination: Destination,
		path: impl Into<String>,
		body: &B,
		options: RequestOptions,
	) -> Result<R>
	where
		R: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.send_with_body(destination, Method::Post, path, body, options).await
	}

	/// Issues a `PUT` with a JSON body against `destination`.
	pub async fn put<R, B>(
		&self,
		destination: Destination,
		path: impl Into<String>,
		body: &B,
		options: RequestOptions,
	) -> Result<R>
	where
		R: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.send_with_body(destination, Method::Put, path, body, options).await
	}

	/// Issues a `PATCH` with a JSON body against `destination`.
	pub async fn patch<R, B>(
		&self,
		destination: Destination,
		path: impl Into<String>,
		body: &B,
		options: RequestOptions,
	) -> Result<R>
	where
		R: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.send_with_body(destination, Method::Patch, path, body, options).await
	}

	/// Issues a `DELETE` against `destination`.
	pub async fn delete<R>(
		&self,
		destination: Destination,
		path: impl Into<String>,
		options: RequestOptions,
	) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.send(RequestContext::new(destination, Method::Delete, path).with_options(options))
			.await
	}

	async fn send_with_body<R, B>(
		&self,
		destination: Destination,
		method: Method,
		path: impl Into<String>,
		body: &B,
		options: RequestOptions,
	) -> Result<R>
	where
		R: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		let request =
			RequestContext::new(destination, method, path).with_json(body)?.with_options(options);

		self.send(request).await
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client with its own reqwest transport.
	pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Self {
		Self::with_transport(config, store, ReqwestTransport::default())
	}

	/// Creates a client from [`ClientConfig::from_env`].
	pub fn from_env(store: Arc<dyn CredentialStore>) -> Result<Self> {
		let config = ClientConfig::from_env().map_err(ConfigError::from)?;

		Ok(Self::new(config, store))
	}
}
impl<T> Clone for ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			store: self.store.clone(),
			redirect: self.redirect.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
			config: self.config.clone(),
			refresh_guard: self.refresh_guard.clone(),
		}
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("config", &self.config)
			.field("access_token_set", &self.store.access_token().is_some())
			.finish()
	}
}
