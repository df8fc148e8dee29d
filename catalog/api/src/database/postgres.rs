use std::sync::Arc;

use utils::database::deadpool_postgres::PoolError;
use utils::database::tokio_postgres::error::SqlState;
use utils::database::{query, Pool, QueryBuilder};

use super::{Channel, ChannelRepository, Content, ContentRepository, RepositoryError, Result};
use crate::dto::{ChannelInput, ContentInput};

const SCHEMA: &str = include_str!("schema.sql");

const CHANNEL_COLUMNS: &str = "id, name, description, website_url, is_paid";
const CONTENT_COLUMNS: &str = "id, name, description, minimum_age, channel_id AS channel";

/// Channels and content in postgres, see `schema.sql` for the tables.
#[derive(Clone)]
pub struct PostgresStore {
	pool: Arc<Pool>,
}

impl PostgresStore {
	pub fn new(pool: Arc<Pool>) -> Self {
		Self { pool }
	}

	/// Creates the tables if they are missing. This is not a migration.
	pub async fn ensure_schema(&self) -> Result<()> {
		let client = self.pool.get().await?;
		client.batch_execute(SCHEMA).await?;
		Ok(())
	}
}

pub(crate) fn is_foreign_key_violation(code: Option<&SqlState>) -> bool {
	code == Some(&SqlState::FOREIGN_KEY_VIOLATION)
}

/// A foreign key violation on a content write means the channel is gone.
pub(crate) fn content_write_error(err: PoolError, channel: i64) -> RepositoryError {
	match err {
		PoolError::Backend(err) if is_foreign_key_violation(err.code()) => RepositoryError::MissingChannel(channel),
		err => err.into(),
	}
}

pub(crate) fn insert_channel(input: &ChannelInput) -> QueryBuilder<'_> {
	let mut qb = query("INSERT INTO channels (name, description, website_url, is_paid) VALUES (");
	qb.push_bind(input.name.as_str())
		.push(", ")
		.push_bind(input.description.as_str())
		.push(", ")
		.push_bind(input.website_url.as_deref())
		.push(", ")
		.push_bind(input.is_paid)
		.push(format!(") RETURNING {CHANNEL_COLUMNS}"));
	qb
}

pub(crate) fn update_channel(channel: &Channel) -> QueryBuilder<'_> {
	let mut qb = query("UPDATE channels SET name = ");
	qb.push_bind(channel.name.as_str())
		.push(", description = ")
		.push_bind(channel.description.as_str())
		.push(", website_url = ")
		.push_bind(channel.website_url.as_deref())
		.push(", is_paid = ")
		.push_bind(channel.is_paid)
		.push(" WHERE id = ")
		.push_bind(channel.id)
		.push(format!(" RETURNING {CHANNEL_COLUMNS}"));
	qb
}

pub(crate) fn contents_of_channel<'a>(channel: i64) -> QueryBuilder<'a> {
	let mut qb = query(format!("SELECT {CONTENT_COLUMNS} FROM contents WHERE channel_id = "));
	qb.push_bind(channel).push(" ORDER BY id");
	qb
}

pub(crate) fn insert_content(input: &ContentInput) -> QueryBuilder<'_> {
	let mut qb = query("INSERT INTO contents (name, description, minimum_age, channel_id) VALUES (");
	qb.push_bind(input.name.as_str())
		.push(", ")
		.push_bind(input.description.as_str())
		.push(", ")
		.push_bind(input.minimum_age)
		.push(", ")
		.push_bind(input.channel)
		.push(format!(") RETURNING {CONTENT_COLUMNS}"));
	qb
}

pub(crate) fn update_content(content: &Content) -> QueryBuilder<'_> {
	let mut qb = query("UPDATE contents SET name = ");
	qb.push_bind(content.name.as_str())
		.push(", description = ")
		.push_bind(content.description.as_str())
		.push(", minimum_age = ")
		.push_bind(content.minimum_age)
		.push(", channel_id = ")
		.push_bind(content.channel)
		.push(" WHERE id = ")
		.push_bind(content.id)
		.push(format!(" RETURNING {CONTENT_COLUMNS}"));
	qb
}

#[async_trait::async_trait]
impl ChannelRepository for PostgresStore {
	async fn list(&self) -> Result<Vec<Channel>> {
		Ok(query(format!("SELECT {CHANNEL_COLUMNS} FROM channels ORDER BY id"))
			.fetch_all(self.pool.as_ref())
			.await?)
	}

	async fn find(&self, id: i64) -> Result<Option<Channel>> {
		let mut qb = query(format!("SELECT {CHANNEL_COLUMNS} FROM channels WHERE id = "));
		qb.push_bind(id);

		Ok(qb.fetch_optional(self.pool.as_ref()).await?)
	}

	async fn insert(&self, input: &ChannelInput) -> Result<Channel> {
		Ok(insert_channel(input).fetch_one(self.pool.as_ref()).await?)
	}

	async fn update(&self, channel: &Channel) -> Result<Channel> {
		update_channel(channel)
			.fetch_optional(self.pool.as_ref())
			.await?
			.ok_or(RepositoryError::NotFound(channel.id))
	}

	async fn delete(&self, id: i64) -> Result<bool> {
		let mut qb = query("DELETE FROM channels WHERE id = ");
		qb.push_bind(id);

		Ok(qb.execute(self.pool.as_ref()).await? > 0)
	}
}

#[async_trait::async_trait]
impl ContentRepository for PostgresStore {
	async fn list(&self) -> Result<Vec<Content>> {
		Ok(query(format!("SELECT {CONTENT_COLUMNS} FROM contents ORDER BY id"))
			.fetch_all(self.pool.as_ref())
			.await?)
	}

	async fn list_by_channel(&self, channel: i64) -> Result<Vec<Content>> {
		Ok(contents_of_channel(channel).fetch_all(self.pool.as_ref()).await?)
	}

	async fn find(&self, id: i64) -> Result<Option<Content>> {
		let mut qb = query(format!("SELECT {CONTENT_COLUMNS} FROM contents WHERE id = "));
		qb.push_bind(id);

		Ok(qb.fetch_optional(self.pool.as_ref()).await?)
	}

	async fn insert(&self, input: &ContentInput) -> Result<Content> {
		insert_content(input)
			.fetch_one(self.pool.as_ref())
			.await
			.map_err(|err| content_write_error(err, input.channel))
	}

	async fn update(&self, content: &Content) -> Result<Content> {
		update_content(content)
			.fetch_optional(self.pool.as_ref())
			.await
			.map_err(|err| content_write_error(err, content.channel))?
			.ok_or(RepositoryError::NotFound(content.id))
	}

	async fn delete(&self, id: i64) -> Result<bool> {
		let mut qb = query("DELETE FROM contents WHERE id = ");
		qb.push_bind(id);

		Ok(qb.execute(self.pool.as_ref()).await? > 0)
	}
}
