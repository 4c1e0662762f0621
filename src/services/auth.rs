//! Gateway authentication endpoints and local token management.

// self
use crate::{
	_prelude::*,
	auth::CredentialPair,
	client::{ApiClient, RequestContext, RequestOptions},
	config::Destination,
	http::{HttpTransport, Method},
	model::{AuthResponse, LoginRequest, RegisterRequest, User},
};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const LOGOUT_PATH: &str = "/api/auth/logout";
const ME_PATH: &str = "/api/auth/me";

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Signs in and persists the issued token pair.
	pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
		let session: AuthResponse =
			self.post(Destination::Gateway, LOGIN_PATH, credentials, RequestOptions::new()).await?;

		self.set_auth_tokens(session.credentials());

		Ok(session)
	}

	/// Creates an account and persists the issued token pair.
	pub async fn register(&self, account: &RegisterRequest) -> Result<AuthResponse> {
		let session: AuthResponse =
			self.post(Destination::Gateway, REGISTER_PATH, account, RequestOptions::new()).await?;

		self.set_auth_tokens(session.credentials());

		Ok(session)
	}

	/// Ends the session remotely and always clears local credentials.
	///
	/// The remote outcome is still returned so callers can log it.
	pub async fn logout(&self) -> Result<()> {
		let outcome =
			self.send_empty(RequestContext::new(Destination::Gateway, Method::Post, LOGOUT_PATH)).await;

		self.clear_tokens();

		outcome
	}

	/// Profile of the signed-in account.
	pub async fn current_user(&self) -> Result<User> {
		self.get(Destination::Gateway, ME_PATH, RequestOptions::new()).await
	}

	/// Stores a token pair obtained out of band.
	pub fn set_auth_tokens(&self, pair: CredentialPair) {
		self.store.set_credentials(pair);
	}

	/// Forgets both tokens.
	pub fn clear_tokens(&self) {
		self.store.clear();
	}

	/// Returns `true` while an access token is stored.
	pub fn is_authenticated(&self) -> bool {
		self.store.access_token().is_some()
	}
}
