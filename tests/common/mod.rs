//! Shared helpers for the integration suites.

#![allow(dead_code, unused_imports)]

pub use std::sync::Arc;

pub use httpmock::prelude::*;
pub use parking_lot::Mutex;
pub use serde_json::json;
pub use stockdash_client::{
	ApiClient, ApiError, ClientConfig, Destination, Error, Result,
	auth::{CredentialKey, CredentialPair, TokenSecret},
	client::ReqwestApiClient,
	ext::LoginRedirect,
	store::{CredentialStore, MemoryStore},
	url::Url,
};

/// Redirect hook that remembers every target it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingRedirect {
	targets: Mutex<Vec<String>>,
}
impl RecordingRedirect {
	pub fn targets(&self) -> Vec<String> {
		self.targets.lock().clone()
	}
}
impl LoginRedirect for RecordingRedirect {
	fn redirect(&self, target: &str) {
		self.targets.lock().push(target.to_owned());
	}
}

pub struct Harness {
	pub client: ReqwestApiClient,
	pub store: Arc<MemoryStore>,
	pub redirect: Arc<RecordingRedirect>,
}
impl Harness {
	/// Seeds the store with an access/refresh pair.
	pub fn signed_in(self, access: &str, refresh: &str) -> Self {
		self.client.set_auth_tokens(CredentialPair::new(access, refresh));

		self
	}

	pub fn access_token(&self) -> Option<String> {
		self.store.access_token().map(|secret| secret.expose().to_owned())
	}

	pub fn refresh_token(&self) -> Option<String> {
		self.store.refresh_token().map(|secret| secret.expose().to_owned())
	}
}

/// Client whose four destinations all point at `server`.
pub fn harness(server: &MockServer) -> Harness {
	let config = ClientConfig::builder()
		.all_base_urls(mock_url(server))
		.build()
		.expect("Mock server configuration should be valid.");

	harness_with(config)
}

pub fn harness_with(config: ClientConfig) -> Harness {
	let store = Arc::new(MemoryStore::default());
	let redirect = Arc::new(RecordingRedirect::default());
	let client = ReqwestApiClient::new(config, store.clone()).with_redirect(redirect.clone());

	Harness { client, store, redirect }
}

pub fn mock_url(server: &MockServer) -> Url {
	Url::parse(&server.base_url()).expect("Mock server base URL should parse.")
}

/// Standard success envelope around `data`.
pub fn envelope(data: serde_json::Value) -> serde_json::Value {
	json!({ "success": true, "data": data })
}
