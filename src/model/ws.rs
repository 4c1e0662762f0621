//! Push messages published on the WebSocket feed.
//!
//! Only the wire shape lives here; connecting to and consuming the feed is left to the caller.

// self
use crate::{_prelude::*, model::AlertCondition};

/// Kind of push message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebSocketMessageType {
	/// Carries a [`PriceUpdateMessage`].
	PriceUpdate,
	/// Carries an [`AlertTriggeredMessage`].
	AlertTriggered,
	/// Carries a portfolio snapshot.
	PortfolioUpdate,
}

/// Frame envelope; `data` stays untyped until [`WebSocketMessage::payload`] decodes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WebSocketMessage<T = serde_json::Value> {
	/// Message kind.
	#[serde(rename = "type")]
	pub kind: WebSocketMessageType,
	/// Kind-specific payload.
	pub data: T,
	/// Publish time.
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}
impl WebSocketMessage {
	/// Parses one text frame.
	pub fn from_json(frame: &str) -> Result<Self, serde_path_to_error::Error<serde_json::Error>> {
		let mut deserializer = serde_json::Deserializer::from_str(frame);

		serde_path_to_error::deserialize(&mut deserializer)
	}

	/// Decodes the payload into the type matching [`WebSocketMessage::kind`].
	pub fn payload<U>(&self) -> Result<U, serde_path_to_error::Error<serde_json::Error>>
	where
		U: DeserializeOwned,
	{
		serde_path_to_error::deserialize(&self.data)
	}
}

/// Payload of a `PRICE_UPDATE` frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdateMessage {
	/// Ticker symbol.
	pub symbol: String,
	/// Last traded price.
	pub price: f64,
	/// Absolute change since the previous close.
	pub change: f64,
	/// Relative change since the previous close, in percent.
	pub change_percent: f64,
	/// Traded volume.
	pub volume: f64,
	/// Quote time.
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}

/// Payload of an `ALERT_TRIGGERED` frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertTriggeredMessage {
	/// Alert that fired.
	pub alert_id: String,
	/// Ticker symbol.
	pub symbol: String,
	/// Configured target.
	pub target_price: f64,
	/// Price that crossed the target.
	pub current_price: f64,
	/// Crossing direction.
	pub condition: AlertCondition,
	/// User note.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Trigger time.
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}
