//! Market-data endpoints.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, RequestOptions},
	config::Destination,
	http::HttpTransport,
	model::{Interval, Paginated, Stock, StockDetail, StockPriceHistory, StockQuery},
	services,
};

const STOCKS_PATH: &str = "/api/stocks";
const SEARCH_PATH: &str = "/api/stocks/search";

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists quotes page by page, optionally filtered by `query.search`.
	pub async fn list_stocks(&self, query: StockQuery) -> Result<Paginated<Stock>> {
		let options = RequestOptions::new()
			.query_opt("page", query.page)
			.query_opt("limit", query.limit)
			.query_opt("search", query.search);

		self.get(Destination::MarketData, STOCKS_PATH, options).await
	}

	/// Full quote for `symbol`.
	pub async fn stock_detail(&self, symbol: &str) -> Result<StockDetail> {
		self.get(
			Destination::MarketData,
			format!("{STOCKS_PATH}/{}", services::segment(symbol)),
			RequestOptions::new(),
		)
		.await
	}

	/// Symbol or name search.
	pub async fn search_stocks(&self, query: &str) -> Result<Vec<Stock>> {
		self.get(Destination::MarketData, SEARCH_PATH, RequestOptions::new().query("q", query))
			.await
	}

	/// Candle series for `symbol`; pass [`Interval::default`] for daily candles.
	pub async fn stock_history(
		&self,
		symbol: &str,
		interval: Interval,
	) -> Result<StockPriceHistory> {
		self.get(
			Destination::MarketData,
			format!("{STOCKS_PATH}/{}/history", services::segment(symbol)),
			RequestOptions::new().query("interval", interval),
		)
		.await
	}
}
