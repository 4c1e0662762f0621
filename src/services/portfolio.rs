//! Portfolio endpoints.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, RequestOptions},
	config::Destination,
	http::HttpTransport,
	model::{CreateTransactionRequest, PageQuery, Paginated, Portfolio, Position, Transaction},
};

const PORTFOLIO_PATH: &str = "/api/portfolio";
const POSITIONS_PATH: &str = "/api/portfolio/positions";
const TRANSACTIONS_PATH: &str = "/api/portfolio/transactions";

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Portfolio of the signed-in user, positions included.
	pub async fn portfolio(&self) -> Result<Portfolio> {
		self.get(Destination::Portfolio, PORTFOLIO_PATH, RequestOptions::new()).await
	}

	/// Open positions only.
	pub async fn positions(&self) -> Result<Vec<Position>> {
		self.get(Destination::Portfolio, POSITIONS_PATH, RequestOptions::new()).await
	}

	/// Trade history, newest first.
	pub async fn transactions(&self, page: PageQuery) -> Result<Paginated<Transaction>> {
		let options =
			RequestOptions::new().query_opt("page", page.page).query_opt("limit", page.limit);

		self.get(Destination::Portfolio, TRANSACTIONS_PATH, options).await
	}

	/// Books a buy or sell.
	pub async fn create_transaction(
		&self,
		transaction: &CreateTransactionRequest,
	) -> Result<Transaction> {
		self.post(Destination::Portfolio, TRANSACTIONS_PATH, transaction, RequestOptions::new())
			.await
	}
}
