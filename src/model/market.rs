//! Market-data payloads.

// self
use crate::_prelude::*;

/// Quote summary returned by listings and searches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
	/// Ticker symbol.
	pub symbol: String,
	/// Company name.
	pub name: String,
	/// Last traded price.
	pub price: f64,
	/// Absolute change since the previous close.
	pub change: f64,
	/// Relative change since the previous close, in percent.
	pub change_percent: f64,
	/// Traded volume.
	pub volume: f64,
	/// Market capitalization.
	pub market_cap: f64,
	/// Quote time.
	#[serde(with = "time::serde::rfc3339")]
	pub last_updated: OffsetDateTime,
}

/// Full quote for a single symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDetail {
	/// Summary fields shared with [`Stock`].
	#[serde(flatten)]
	pub stock: Stock,
	/// Session open.
	pub open: f64,
	/// Session high.
	pub high: f64,
	/// Session low.
	pub low: f64,
	/// Previous session close.
	pub previous_close: f64,
	/// Listing exchange.
	pub exchange: String,
	/// Quote currency.
	pub currency: String,
}

/// Candle series for one symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockPriceHistory {
	/// Ticker symbol.
	pub symbol: String,
	/// Candles in chronological order.
	pub prices: Vec<PricePoint>,
	/// Candle width.
	pub interval: Interval,
}

/// One OHLCV candle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
	/// Candle open time.
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
	/// Open price.
	pub open: f64,
	/// High price.
	pub high: f64,
	/// Low price.
	pub low: f64,
	/// Close price.
	pub close: f64,
	/// Traded volume.
	pub volume: f64,
}

/// Candle width accepted by the history endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
	/// One minute.
	#[serde(rename = "1m")]
	OneMinute,
	/// Five minutes.
	#[serde(rename = "5m")]
	FiveMinutes,
	/// Fifteen minutes.
	#[serde(rename = "15m")]
	FifteenMinutes,
	/// One hour.
	#[serde(rename = "1h")]
	OneHour,
	/// One day.
	#[default]
	#[serde(rename = "1d")]
	OneDay,
	/// One week.
	#[serde(rename = "1w")]
	OneWeek,
	/// One month.
	#[serde(rename = "1M")]
	OneMonth,
}
impl Interval {
	/// Every interval, shortest first.
	pub const ALL: [Interval; 7] = [
		Interval::OneMinute,
		Interval::FiveMinutes,
		Interval::FifteenMinutes,
		Interval::OneHour,
		Interval::OneDay,
		Interval::OneWeek,
		Interval::OneMonth,
	];

	/// Wire label (`1m`, `5m`, ... `1M`).
	pub const fn as_str(self) -> &'static str {
		match self {
			Interval::OneMinute => "1m",
			Interval::FiveMinutes => "5m",
			Interval::FifteenMinutes => "15m",
			Interval::OneHour => "1h",
			Interval::OneDay => "1d",
			Interval::OneWeek => "1w",
			Interval::OneMonth => "1M",
		}
	}
}
impl Display for Interval {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Interval {
	type Err = UnknownInterval;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Interval::ALL
			.into_iter()
			.find(|interval| interval.as_str() == s)
			.ok_or_else(|| UnknownInterval(s.to_owned()))
	}
}

/// Returned when parsing a label that names no [`Interval`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown candle interval `{0}`.")]
pub struct UnknownInterval(pub String);

/// Filters for `GET /api/stocks`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StockQuery {
	/// 1-based page number.
	pub page: Option<u32>,
	/// Page size.
	pub limit: Option<u32>,
	/// Free-text filter on symbol or name.
	pub search: Option<String>,
}
