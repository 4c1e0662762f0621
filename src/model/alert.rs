//! Price alert payloads.

// self
use crate::_prelude::*;

/// Direction in which the price must cross the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertCondition {
	/// Fires when the price rises to or above the target.
	Above,
	/// Fires when the price falls to or below the target.
	Below,
}

/// Alert lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
	/// Waiting for the condition.
	Active,
	/// Condition met.
	Triggered,
	/// Cancelled by the user.
	Cancelled,
	/// Lapsed without firing.
	Expired,
}
impl AlertStatus {
	/// Wire label, also used as a query value.
	pub const fn as_str(self) -> &'static str {
		match self {
			AlertStatus::Active => "ACTIVE",
			AlertStatus::Triggered => "TRIGGERED",
			AlertStatus::Cancelled => "CANCELLED",
			AlertStatus::Expired => "EXPIRED",
		}
	}
}
impl Display for AlertStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Price alert owned by the signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
	/// Alert identifier.
	pub id: String,
	/// Owning account.
	pub user_id: String,
	/// Ticker symbol.
	pub symbol: String,
	/// Company name.
	pub stock_name: String,
	/// Crossing direction.
	pub condition: AlertCondition,
	/// Price that fires the alert.
	pub target_price: f64,
	/// Latest market price.
	pub current_price: f64,
	/// Lifecycle state.
	pub status: AlertStatus,
	/// User note.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Creation time.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Time the alert fired.
	#[serde(default, skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
	pub triggered_at: Option<OffsetDateTime>,
}

/// Body of `POST /api/alerts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
	/// Ticker symbol.
	pub symbol: String,
	/// Crossing direction.
	pub condition: AlertCondition,
	/// Price that fires the alert.
	pub target_price: f64,
	/// User note.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

/// Body of `PATCH /api/alerts/{id}`; absent fields stay unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlertRequest {
	/// New crossing direction.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub condition: Option<AlertCondition>,
	/// New target price.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub target_price: Option<f64>,
	/// New lifecycle state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<AlertStatus>,
	/// New user note.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

/// Filters for `GET /api/alerts`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlertQuery {
	/// 1-based page number.
	pub page: Option<u32>,
	/// Page size.
	pub limit: Option<u32>,
	/// Restricts the listing to one state.
	pub status: Option<AlertStatus>,
}
