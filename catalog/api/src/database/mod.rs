use utils::database::deadpool_postgres::PoolError;
use utils::database::tokio_postgres;

use crate::dto::{ChannelInput, ContentInput};

mod channel;
mod content;
mod memory;
pub(crate) mod postgres;

pub use channel::Channel;
pub use content::Content;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
	#[error("database pool error: {0}")]
	Pool(#[from] PoolError),
	#[error("database error: {0}")]
	Postgres(#[from] tokio_postgres::Error),
	#[error("channel {0} does not exist")]
	MissingChannel(i64),
	#[error("record {0} does not exist")]
	NotFound(i64),
}

pub type Result<T, E = RepositoryError> = std::result::Result<T, E>;

/// Storage for channels. Every write is committed before the call returns.
#[async_trait::async_trait]
pub trait ChannelRepository: Send + Sync {
	/// All channels, ascending by id.
	async fn list(&self) -> Result<Vec<Channel>>;

	async fn find(&self, id: i64) -> Result<Option<Channel>>;

	/// Stores a new channel under a freshly allocated id.
	async fn insert(&self, input: &ChannelInput) -> Result<Channel>;

	/// Overwrites every field of the stored channel with the same id.
	async fn update(&self, channel: &Channel) -> Result<Channel>;

	/// Removes the channel and its content. Returns false if nothing was
	/// removed.
	async fn delete(&self, id: i64) -> Result<bool>;
}

/// Storage for content. Writes referencing a channel that does not exist
/// fail with [`RepositoryError::MissingChannel`].
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
	async fn list(&self) -> Result<Vec<Content>>;

	async fn list_by_channel(&self, channel: i64) -> Result<Vec<Content>>;

	async fn find(&self, id: i64) -> Result<Option<Content>>;

	async fn insert(&self, input: &ContentInput) -> Result<Content>;

	async fn update(&self, content: &Content) -> Result<Content>;

	async fn delete(&self, id: i64) -> Result<bool>;
}
