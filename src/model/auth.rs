//! Authentication payloads.

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
};

/// Body of `POST /api/auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
	/// Account email.
	pub email: String,
	/// Plain-text password.
	pub password: String,
}
impl LoginRequest {
	/// Builds a login body.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into() }
	}
}
impl Debug for LoginRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
	/// Account email.
	pub email: String,
	/// Plain-text password.
	pub password: String,
	/// Password confirmation; the backend checks that it matches.
	pub confirm_password: String,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
}
impl Debug for RegisterRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RegisterRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.field("confirm_password", &"<redacted>")
			.field("first_name", &self.first_name)
			.field("last_name", &self.last_name)
			.finish()
	}
}

/// Session issued by login and registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
	/// Signed-in account.
	pub user: User,
	/// Access token.
	pub token: TokenSecret,
	/// Refresh token.
	pub refresh_token: TokenSecret,
}
impl AuthResponse {
	/// Token pair to persist in the credential store.
	pub fn credentials(&self) -> CredentialPair {
		CredentialPair::new(self.token.clone(), self.refresh_token.clone())
	}
}

/// Account profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	/// Account identifier.
	pub id: String,
	/// Account email.
	pub email: String,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Creation time.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Last update time.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// Body of `POST /api/auth/refresh`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
	/// Refresh token being exchanged.
	pub refresh_token: &'a str,
}

/// Top-level (non-enveloped) answer of the refresh endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedTokens {
	/// New access token.
	pub token: TokenSecret,
	/// Rotated refresh token, when the gateway rotates.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn auth_response_yields_credential_pair() {
		let raw = r#"{
			"user": {
				"id": "u-1",
				"email": "ada@example.com",
				"firstName": "Ada",
				"lastName": "Lovelace",
				"createdAt": "2024-03-01T09:30:00Z",
				"updatedAt": "2024-03-02T10:00:00+02:00"
			},
			"token": "access-1",
			"refreshToken": "refresh-1"
		}"#;
		let response: AuthResponse = serde_json::from_str(raw).expect("Auth payload should decode.");
		let pair = response.credentials();

		assert_eq!(pair.access_token.expose(), "access-1");
		assert_eq!(pair.refresh_token.expose(), "refresh-1");
		assert_eq!(response.user.first_name, "Ada");
		assert_eq!(response.user.updated_at.offset().whole_hours(), 2);
	}

	#[test]
	fn register_body_is_camel_case_and_debug_hides_passwords() {
		let request = RegisterRequest {
			email: "ada@example.com".into(),
			password: "hunter22".into(),
			confirm_password: "hunter22".into(),
			first_name: "Ada".into(),
			last_name: "Lovelace".into(),
		};
		let body = serde_json::to_value(&request).expect("Register body should serialize.");

		assert_eq!(body["confirmPassword"], "hunter22");
		assert_eq!(body["firstName"], "Ada");
		assert!(!format!("{request:?}").contains("hunter22"));
		assert!(!format!("{:?}", LoginRequest::new("ada@example.com", "hunter22")).contains("hunter22"));
	}

	#[test]
	fn refresh_answer_rotation_is_optional() {
		let tokens: RefreshedTokens =
			serde_json::from_str(r#"{"token":"access-2"}"#).expect("Refresh answer should decode.");

		assert_eq!(tokens.token.expose(), "access-2");
		assert!(tokens.refresh_token.is_none());
		assert_eq!(
			serde_json::to_string(&RefreshRequest { refresh_token: "r" })
				.expect("Refresh body should serialize."),
			r#"{"refreshToken":"r"}"#
		);
	}
}
