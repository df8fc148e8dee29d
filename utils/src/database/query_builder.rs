use std::future::Future;

use deadpool_postgres::PoolError;
use postgres_from_row::FromRow;
use postgres_types::ToSql;
use tokio_postgres::Row;

pub fn query<'a>(sql: impl Into<String>) -> QueryBuilder<'a> {
	QueryBuilder::new(sql)
}

/// A SQL statement and its positional parameters, built side by side so
/// every `push_bind` lands on the next `$n` placeholder.
#[derive(Default)]
pub struct QueryBuilder<'a> {
	sql: String,
	params: Vec<Box<dyn ToSql + Send + Sync + 'a>>,
}

impl<'a> QueryBuilder<'a> {
	pub fn new(sql: impl Into<String>) -> Self {
		Self {
			sql: sql.into(),
			params: Vec::new(),
		}
	}

	pub fn push(&mut self, sql: impl AsRef<str>) -> &mut Self {
		self.sql.push_str(sql.as_ref());
		self
	}

	pub fn push_bind(&mut self, param: impl ToSql + Send + Sync + 'a) -> &mut Self {
		self.params.push(Box::new(param));
		self.sql.push('$');
		self.sql.push_str(&self.params.len().to_string());
		self
	}

	pub fn sql(&self) -> &str {
		&self.sql
	}

	pub fn param_count(&self) -> usize {
		self.params.len()
	}

	fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
		self.params.iter().map(|param| param.as_ref() as _).collect()
	}

	/// Runs the statement and returns the number of affected rows.
	pub async fn execute(&self, conn: impl Executor) -> Result<u64, PoolError> {
		let client = conn.client().await?;
		Ok(client.execute(self.sql.as_str(), &self.params()).await?)
	}

	pub async fn fetch_all<T: FromRow>(&self, conn: impl Executor) -> Result<Vec<T>, PoolError> {
		let client = conn.client().await?;
		let rows = client.query(self.sql.as_str(), &self.params()).await?;

		Ok(rows.iter().map(T::try_from_row).collect::<Result<_, _>>()?)
	}

	pub async fn fetch_one<T: FromRow>(&self, conn: impl Executor) -> Result<T, PoolError> {
		let client = conn.client().await?;
		let row = client.query_one(self.sql.as_str(), &self.params()).await?;

		Ok(T::try_from_row(&row)?)
	}

	pub async fn fetch_optional<T: FromRow>(&self, conn: impl Executor) -> Result<Option<T>, PoolError> {
		let client = conn.client().await?;
		let row: Option<Row> = client.query_opt(self.sql.as_str(), &self.params()).await?;

		Ok(row.as_ref().map(T::try_from_row).transpose()?)
	}
}

/// Anything a query can check a connection out of for its duration.
pub trait Executor: Send + Sync {
	fn client(&self) -> impl Future<Output = Result<deadpool_postgres::Client, PoolError>> + Send;
}

impl Executor for deadpool_postgres::Pool {
	async fn client(&self) -> Result<deadpool_postgres::Client, PoolError> {
		self.get().await
	}
}

impl<T: Executor> Executor for &T {
	async fn client(&self) -> Result<deadpool_postgres::Client, PoolError> {
		(**self).client().await
	}
}
