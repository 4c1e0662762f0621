//! Store for execution contexts without persistent storage.

// self
use crate::{
	auth::{CredentialKey, TokenSecret},
	store::CredentialStore,
};

/// Credential store that never holds anything.
///
/// Models non-interactive contexts (server-side rendering, batch jobs) where no persistent
/// storage exists: reads return `None` and writes are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedStore;
impl CredentialStore for DetachedStore {
	fn get(&self, _key: CredentialKey) -> Option<TokenSecret> {
		None
	}

	fn set(&self, _key: CredentialKey, _value: TokenSecret) {}

	fn remove(&self, _key: CredentialKey) {}
}
