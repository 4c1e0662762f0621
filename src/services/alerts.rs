//! Price alert endpoints.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, RequestContext, RequestOptions},
	config::Destination,
	http::{HttpTransport, Method},
	model::{Alert, AlertQuery, CreateAlertRequest, Paginated, UpdateAlertRequest},
	services,
};

const ALERTS_PATH: &str = "/api/alerts";

fn alert_path(id: &str) -> String {
	format!("{ALERTS_PATH}/{}", services::segment(id))
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the signed-in user's alerts.
	pub async fn alerts(&self, query: AlertQuery) -> Result<Paginated<Alert>> {
		let options = RequestOptions::new()
			.query_opt("page", query.page)
			.query_opt("limit", query.limit)
			.query_opt("status", query.status);

		self.get(Destination::Alert, ALERTS_PATH, options).await
	}

	/// Single alert by id.
	pub async fn alert(&self, id: &str) -> Result<Alert> {
		self.get(Destination::Alert, alert_path(id), RequestOptions::new()).await
	}

	/// Creates a price alert.
	pub async fn create_alert(&self, alert: &CreateAlertRequest) -> Result<Alert> {
		self.post(Destination::Alert, ALERTS_PATH, alert, RequestOptions::new()).await
	}

	/// Applies a partial update.
	pub async fn update_alert(&self, id: &str, update: &UpdateAlertRequest) -> Result<Alert> {
		self.patch(Destination::Alert, alert_path(id), update, RequestOptions::new()).await
	}

	/// Deletes an alert. The response body is ignored.
	pub async fn delete_alert(&self, id: &str) -> Result<()> {
		self.send_empty(RequestContext::new(Destination::Alert, Method::Delete, alert_path(id)))
			.await
	}
}
