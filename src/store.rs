//! Credential storage contract and built-in store implementations.
//!
//! Stores are synchronous and infallible from the caller's point of view: a backend that cannot
//! read or write degrades to "no value" instead of raising, so the dispatcher never fails because
//! credentials could not be persisted.

pub mod detached;
pub mod file;
pub mod memory;

pub use detached::DetachedStore;
pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{CredentialKey, CredentialPair, TokenSecret},
};

/// Key-value storage for the access and refresh tokens.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Returns the stored secret, or `None` when absent or unreadable.
	fn get(&self, key: CredentialKey) -> Option<TokenSecret>;

	/// Overwrites the secret stored under `key`.
	fn set(&self, key: CredentialKey, value: TokenSecret);

	/// Removes the secret stored under `key`, if any.
	fn remove(&self, key: CredentialKey);

	/// Removes both tokens. Safe to call on an empty store.
	fn clear(&self) {
		for key in CredentialKey::ALL {
			self.remove(key);
		}
	}

	/// Returns the current access token.
	fn access_token(&self) -> Option<TokenSecret> {
		self.get(CredentialKey::AccessToken)
	}

	/// Returns the current refresh token.
	fn refresh_token(&self) -> Option<TokenSecret> {
		self.get(CredentialKey::RefreshToken)
	}

	/// Persists a freshly issued credential pair.
	fn set_credentials(&self, pair: CredentialPair) {
		self.set(CredentialKey::AccessToken, pair.access_token);
		self.set(CredentialKey::RefreshToken, pair.refresh_token);
	}
}

/// Error type produced while opening a persistent store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Snapshot could not be encoded or decoded.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage medium.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
