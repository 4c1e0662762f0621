//! Credential keys and the access/refresh token pair.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Fixed keys under which the two credential strings are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CredentialKey {
	/// Short-lived bearer token attached to API calls.
	#[serde(rename = "auth_token")]
	AccessToken,
	/// Longer-lived token used solely to mint new access tokens.
	#[serde(rename = "refresh_token")]
	RefreshToken,
}
impl CredentialKey {
	/// Both keys, in the order they are cleared.
	pub const ALL: [CredentialKey; 2] = [CredentialKey::AccessToken, CredentialKey::RefreshToken];

	/// Storage name of the key.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialKey::AccessToken => "auth_token",
			CredentialKey::RefreshToken => "refresh_token",
		}
	}
}
impl Display for CredentialKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Access and refresh token issued together by login, registration, or refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialPair {
	/// Bearer token attached to outbound requests.
	pub access_token: TokenSecret,
	/// Token exchanged for a new access token on a 401.
	pub refresh_token: TokenSecret,
}
impl CredentialPair {
	/// Creates a pair from raw token strings.
	pub fn new(access_token: impl Into<TokenSecret>, refresh_token: impl Into<TokenSecret>) -> Self {
		Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
	}
}
