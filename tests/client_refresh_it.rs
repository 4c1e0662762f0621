#![cfg(feature = "reqwest")]

mod common;

// self
use common::*;

fn portfolio_body() -> serde_json::Value {
	envelope(json!({
		"id": "p-1",
		"userId": "u-1",
		"totalValue": 1500.0,
		"totalCost": 1200.0,
		"totalGainLoss": 300.0,
		"totalGainLossPercent": 25.0,
		"positions": [],
		"createdAt": "2024-01-01T00:00:00Z",
		"updatedAt": "2024-01-02T00:00:00Z"
	}))
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_replayed_once() {
	let server = MockServer::start_async().await;
	let harness = harness(&server).signed_in("stale", "refresh-1");
	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/portfolio").header("authorization", "Bearer stale");
			then.status(401).json_body(json!({ "message": "Token expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/refresh")
				.json_body(json!({ "refreshToken": "refresh-1" }));
			then.status(200).json_body(json!({ "token": "fresh" }));
		})
		.await;
	let accepted = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/portfolio").header("authorization", "Bearer fresh");
			then.status(200).json_body(portfolio_body());
		})
		.await;
	let portfolio =
		harness.client.portfolio().await.expect("Replay after refresh should succeed.");

	rejected.assert_async().await;
	refresh.assert_async().await;
	accepted.assert_async().await;

	assert_eq!(portfolio.id, "p-1");
	assert_eq!(harness.access_token().as_deref(), Some("fresh"));
	assert_eq!(
		harness.refresh_token().as_deref(),
		Some("refresh-1"),
		"A refresh answer without rotation should keep the existing refresh token."
	);
	assert_eq!(harness.client.refresh_metrics.attempts(), 1);
	assert_eq!(harness.client.refresh_metrics.successes(), 1);
	assert!(harness.redirect.targets().is_empty());
}

#[tokio::test]
async fn rotated_refresh_token_is_persisted() {
	let server = MockServer::start_async().await;
	let harness = harness(&server).signed_in("stale", "refresh-1");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me").header("authorization", "Bearer stale");
			then.status(401);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "fresh", "refreshToken": "refresh-2" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me").header("authorization", "Bearer fresh");
			then.status(200).json_body(envelope(json!({
				"id": "u-1",
				"email": "ada@example.com",
				"firstName": "Ada",
				"lastName": "Lovelace",
				"createdAt": "2024-01-01T00:00:00Z",
				"updatedAt": "2024-01-01T00:00:00Z"
			})));
		})
		.await;

	let user = harness.client.current_user().await.expect("Replay should return the profile.");

	assert_eq!(user.email, "ada@example.com");
	assert_eq!(harness.access_token().as_deref(), Some("fresh"));
	assert_eq!(harness.refresh_token().as_deref(), Some("refresh-2"));
}

#[tokio::test]
async fn second_unauthorized_response_is_surfaced_without_another_refresh() {
	let server = MockServer::start_async().await;
	let harness = harness(&server).signed_in("stale", "refresh-1");
	let protected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/portfolio");
			then.status(401).json_body(json!({ "message": "Account locked" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "fresh" }));
		})
		.await;
	let err = harness.client.portfolio().await.expect_err("A replayed 401 should be surfaced.");

	protected.assert_calls_async(2).await;
	refresh.assert_calls_async(1).await;

	assert!(err.is_unauthorized());
	assert_eq!(err.normalized().message, "Account locked");
	assert_eq!(err.status_code(), 401);
	assert_eq!(harness.access_token().as_deref(), Some("fresh"));
	assert!(harness.redirect.targets().is_empty());
}

#[tokio::test]
async fn failed_refresh_clears_credentials_and_redirects_once() {
	let server = MockServer::start_async().await;
	let harness = harness(&server).signed_in("stale", "revoked");
	let protected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/portfolio");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(403).json_body(json!({ "message": "Refresh token revoked" }));
		})
		.await;
	let err = harness.client.portfolio().await.expect_err("A failed refresh should be surfaced.");

	protected.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;

	assert!(matches!(err, Error::Refresh { .. }));
	assert_eq!(err.status_code(), 403);
	assert_eq!(ApiError::from(err).message, "Refresh token revoked");
	assert!(harness.store.is_empty());
	assert_eq!(harness.redirect.targets(), vec!["/login".to_owned()]);
	assert_eq!(harness.client.refresh_metrics.failures(), 1);
}

#[tokio::test]
async fn missing_refresh_token_returns_original_unauthorized() {
	let server = MockServer::start_async().await;
	let harness = harness(&server);

	harness.store.set(CredentialKey::AccessToken, TokenSecret::new("stale"));

	let protected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/stocks/AAPL");
			then.status(401).json_body(json!({ "message": "Token expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "never" }));
		})
		.await;
	let err = harness
		.client
		.stock_detail("AAPL")
		.await
		.expect_err("Without a refresh token the 401 should be surfaced.");

	protected.assert_calls_async(1).await;
	refresh.assert_calls_async(0).await;

	assert!(err.is_unauthorized());
	assert_eq!(err.normalized().message, "Token expired");
	assert!(harness.store.is_empty());
	assert_eq!(harness.redirect.targets(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn rejected_login_does_not_touch_the_session() {
	let server = MockServer::start_async().await;
	let harness = harness(&server);
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(401).json_body(json!({ "message": "Invalid credentials" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "never" }));
		})
		.await;
	let err = harness
		.client
		.login(&stockdash_client::model::LoginRequest::new("ada@example.com", "wrong"))
		.await
		.expect_err("Bad credentials should be rejected.");

	login.assert_calls_async(1).await;
	refresh.assert_calls_async(0).await;

	assert_eq!(err.normalized(), ApiError::new("Invalid credentials", 401));
	assert!(harness.redirect.targets().is_empty());
}

#[tokio::test]
async fn concurrent_unauthorized_calls_share_one_refresh() {
	let server = MockServer::start_async().await;
	let harness = harness(&server).signed_in("stale", "refresh-1");
	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/portfolio").header("authorization", "Bearer stale");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200)
				.delay(std::time::Duration::from_millis(50))
				.json_body(json!({ "token": "fresh" }));
		})
		.await;
	let accepted = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/portfolio").header("authorization", "Bearer fresh");
			then.status(200).json_body(portfolio_body());
		})
		.await;
	let (first, second) = tokio::join!(harness.client.portfolio(), harness.client.portfolio());

	first.expect("First concurrent call should succeed after refresh.");
	second.expect("Second concurrent call should succeed after refresh.");
	rejected.assert_calls_async(2).await;
	refresh.assert_calls_async(1).await;
	accepted.assert_calls_async(2).await;

	assert_eq!(harness.client.refresh_metrics.attempts(), 1);
	assert_eq!(harness.client.refresh_metrics.joins(), 1);
}

#[tokio::test]
async fn concurrent_calls_after_failed_refresh_redirect_once() {
	let server = MockServer::start_async().await;
	let harness = harness(&server).signed_in("stale", "revoked");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/alerts");
			then.status(401);
		})
		.await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(401).json_body(json!({ "message": "Refresh token expired" }));
		})
		.await;
	let (first, second) = tokio::join!(
		harness.client.alerts(Default::default()),
		harness.client.alerts(Default::default())
	);
	let errors = [
		first.expect_err("First call should fail."),
		second.expect_err("Second call should fail."),
	];

	refresh.assert_calls_async(1).await;

	assert_eq!(errors.iter().filter(|e| matches!(e, Error::Refresh { .. })).count(), 1);
	assert_eq!(errors.iter().filter(|e| e.is_unauthorized()).count(), 1);
	assert_eq!(harness.redirect.targets().len(), 1);
	assert!(harness.store.is_empty());
}
