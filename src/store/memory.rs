//! Thread-safe in-memory [`CredentialStore`] for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{CredentialKey, CredentialPair, TokenSecret},
	store::CredentialStore,
};

type CredentialMap = Arc<RwLock<HashMap<CredentialKey, TokenSecret>>>;

/// Storage backend that keeps credentials in-process. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(CredentialMap);
impl MemoryStore {
	/// Creates a store pre-seeded with a credential pair.
	pub fn with_credentials(pair: CredentialPair) -> Self {
		let store = Self::default();

		store.set_credentials(pair);

		store
	}

	/// Number of stored keys.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when neither token is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl CredentialStore for MemoryStore {
	fn get(&self, key: CredentialKey) -> Option<TokenSecret> {
		self.0.read().get(&key).cloned()
	}

	fn set(&self, key: CredentialKey, value: TokenSecret) {
		self.0.write().insert(key, value);
	}

	fn remove(&self, key: CredentialKey) {
		self.0.write().remove(&key);
	}

	fn clear(&self) {
		self.0.write().clear();
	}
}
