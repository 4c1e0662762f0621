//! Signs in against a mocked gateway, lets the access token expire, and shows the client
//! refreshing it transparently before printing the portfolio.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use stockdash_client::{
	ClientConfig,
	client::ReqwestApiClient,
	model::LoginRequest,
	store::{CredentialStore, MemoryStore},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200).json_body(json!({
				"success": true,
				"data": {
					"user": {
						"id": "u-demo",
						"email": "demo@example.com",
						"firstName": "Demo",
						"lastName": "User",
						"createdAt": "2024-01-01T00:00:00Z",
						"updatedAt": "2024-01-01T00:00:00Z"
					},
					"token": "demo-access",
					"refreshToken": "demo-refresh"
				}
			}));
		})
		.await;
	let expired_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/portfolio").header("authorization", "Bearer demo-access");
			then.status(401).json_body(json!({ "message": "Token expired" }));
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "demo-access-2" }));
		})
		.await;
	let portfolio_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/portfolio").header("authorization", "Bearer demo-access-2");
			then.status(200).json_body(json!({
				"success": true,
				"data": {
					"id": "p-demo",
					"userId": "u-demo",
					"totalValue": 12500.0,
					"totalCost": 10000.0,
					"totalGainLoss": 2500.0,
					"totalGainLossPercent": 25.0,
					"positions": [],
					"createdAt": "2024-01-01T00:00:00Z",
					"updatedAt": "2024-06-01T00:00:00Z"
				}
			}));
		})
		.await;
	let config = ClientConfig::builder().all_base_urls(Url::parse(&server.base_url())?).build()?;
	let store = Arc::new(MemoryStore::default());
	let client = ReqwestApiClient::new(config, store.clone());
	let session = client.login(&LoginRequest::new("demo@example.com", "demo-password")).await?;

	println!("Signed in as {} {}.", session.user.first_name, session.user.last_name);

	let portfolio = client.portfolio().await?;

	println!(
		"Portfolio {} is worth {:.2} ({:+.2}%).",
		portfolio.id, portfolio.total_value, portfolio.total_gain_loss_percent
	);
	println!(
		"Refresh exchanges: {}; current token: {:?}.",
		client.refresh_metrics.attempts(),
		store.access_token()
	);

	login_mock.assert_async().await;
	expired_mock.assert_async().await;
	refresh_mock.assert_async().await;
	portfolio_mock.assert_async().await;

	Ok(())
}
