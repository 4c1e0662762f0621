//! Portfolio payloads.

// self
use crate::_prelude::*;

/// Aggregated holdings of the signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
	/// Portfolio identifier.
	pub id: String,
	/// Owning account.
	pub user_id: String,
	/// Market value of every position.
	pub total_value: f64,
	/// Cost basis of every position.
	pub total_cost: f64,
	/// Unrealized gain or loss.
	pub total_gain_loss: f64,
	/// Unrealized gain or loss, in percent.
	pub total_gain_loss_percent: f64,
	/// Open positions.
	pub positions: Vec<Position>,
	/// Creation time.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Last update time.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// Holding in a single symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
	/// Position identifier.
	pub id: String,
	/// Owning portfolio.
	pub portfolio_id: String,
	/// Ticker symbol.
	pub symbol: String,
	/// Company name.
	pub stock_name: String,
	/// Shares held.
	pub quantity: f64,
	/// Average purchase price.
	pub average_price: f64,
	/// Latest market price.
	pub current_price: f64,
	/// Market value.
	pub total_value: f64,
	/// Cost basis.
	pub total_cost: f64,
	/// Unrealized gain or loss.
	pub gain_loss: f64,
	/// Unrealized gain or loss, in percent.
	pub gain_loss_percent: f64,
	/// Creation time.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Last update time.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// Side of a trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
	/// Purchase.
	Buy,
	/// Sale.
	Sell,
}

/// Executed trade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	/// Transaction identifier.
	pub id: String,
	/// Owning portfolio.
	pub portfolio_id: String,
	/// Ticker symbol.
	pub symbol: String,
	/// Trade side.
	#[serde(rename = "type")]
	pub kind: TransactionType,
	/// Shares traded.
	pub quantity: f64,
	/// Execution price.
	pub price: f64,
	/// `quantity * price` as booked by the backend.
	pub total_amount: f64,
	/// Booking time.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

/// Body of `POST /api/portfolio/transactions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
	/// Ticker symbol.
	pub symbol: String,
	/// Trade side.
	#[serde(rename = "type")]
	pub kind: TransactionType,
	/// Shares to trade.
	pub quantity: f64,
	/// Limit price.
	pub price: f64,
}

/// Page selection for listing endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
	/// 1-based page number.
	pub page: Option<u32>,
	/// Page size.
	pub limit: Option<u32>,
}
impl PageQuery {
	/// Selects `page` with `limit` items per page.
	pub fn new(page: u32, limit: u32) -> Self {
		Self { page: Some(page), limit: Some(limit) }
	}
}
