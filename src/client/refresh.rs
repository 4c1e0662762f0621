//! Transparent access-token refresh with a single replay per call.
//!
//! [`ApiClient::execute`] wraps every dispatch. When the first attempt comes back 401 the call
//! takes the client-wide refresh guard, so at most one `POST /api/auth/refresh` is in flight at a
//! time. Waiters that acquire the guard after another call already rotated the access token reuse
//! that token instead of exchanging again. The replay goes straight to the dispatcher, so a second
//! 401 is surfaced as-is. A failed exchange clears the store and fires the login redirect once.

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::{CredentialKey, TokenSecret},
	client::{ApiClient, RequestContext, dispatch},
	config::Destination,
	http::{HttpTransport, Method, TransportResponse},
	model::{RefreshRequest, RefreshedTokens},
	obs::CallStage,
};

/// Gateway path of the refresh-token exchange.
pub const REFRESH_PATH: &str = "/api/auth/refresh";

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Dispatches `request`, recovering from one 401 by refreshing and replaying.
	pub async fn execute(&self, mut request: RequestContext) -> Result<TransportResponse> {
		let sent = self.store.access_token();
		let unauthorized = match self.dispatch(&request, sent.as_ref(), CallStage::Dispatch).await {
			Err(e) if e.is_unauthorized() && !request.is_retried() => e,
			outcome => return outcome,
		};

		request.mark_retried();

		let token = self.recover_session(sent, unauthorized).await?;

		self.dispatch(&request, Some(&token), CallStage::Replay).await
	}

	/// Returns an access token usable for the replay, or the error the caller should see.
	async fn recover_session(
		&self,
		sent: Option<TokenSecret>,
		unauthorized: Error,
	) -> Result<TokenSecret> {
		let _singleflight = self.refresh_guard.lock().await;
		let current = self.store.access_token();

		if current != sent {
			return match current {
				Some(token) => {
					self.refresh_metrics.record_join();

					Ok(token)
				},
				// Another call already ended the session.
				None => Err(unauthorized),
			};
		}

		let Some(refresh_token) = self.store.refresh_token() else {
			// Anonymous 401s (bad login, public endpoints) leave the store alone.
			if sent.is_some() {
				self.end_session();
			}

			return Err(unauthorized);
		};

		self.refresh_metrics.record_attempt();

		match self.exchange_refresh_token(&refresh_token).await {
			Ok(RefreshedTokens { token, refresh_token: rotated }) => {
				self.store.set(CredentialKey::AccessToken, token.clone());

				if let Some(rotated) = rotated {
					self.store.set(CredentialKey::RefreshToken, rotated);
				}

				self.refresh_metrics.record_success();

				Ok(token)
			},
			Err(e) => {
				self.refresh_metrics.record_failure();
				self.end_session();

				Err(Error::refresh(e))
			},
		}
	}

	async fn exchange_refresh_token(&self, refresh_token: &TokenSecret) -> Result<RefreshedTokens> {
		let request = RequestContext::new(Destination::Gateway, Method::Post, REFRESH_PATH)
			.with_json(&RefreshRequest { refresh_token: refresh_token.expose() })?;
		let response = self.dispatch(&request, None, CallStage::Refresh).await?;

		dispatch::decode_json(&response)
	}

	fn end_session(&self) {
		self.store.clear();
		self.redirect.redirect(&self.config().login_path);
	}
}
