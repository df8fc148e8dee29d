use std::sync::Arc;

use super::{Result, ServiceError};
use crate::database::{Channel, ChannelRepository, Content, ContentRepository, RepositoryError};
use crate::dto::ContentInput;

/// Content CRUD. Writes resolve the referenced channel first and fail with
/// [`ServiceError::ReferenceNotFound`] without writing when it is missing.
#[derive(Clone)]
pub struct ContentService {
	contents: Arc<dyn ContentRepository>,
	channels: Arc<dyn ChannelRepository>,
}

impl ContentService {
	pub fn new(contents: Arc<dyn ContentRepository>, channels: Arc<dyn ChannelRepository>) -> Self {
		Self { contents, channels }
	}

	pub async fn list(&self) -> Result<Vec<Content>> {
		Ok(self.contents.list().await?)
	}

	pub async fn list_by_channel(&self, channel: &Channel) -> Result<Vec<Content>> {
		Ok(self.contents.list_by_channel(channel.id).await?)
	}

	pub async fn get(&self, id: i64) -> Result<Option<Content>> {
		Ok(self.contents.find(id).await?)
	}

	pub async fn create(&self, input: ContentInput) -> Result<Content> {
		self.resolve_channel(input.channel).await?;

		let content = self.contents.insert(&input).await.map_err(write_error)?;

		tracing::debug!(id = content.id, channel = content.channel, "content created");

		Ok(content)
	}

	/// Full replace, the owning channel may change as well.
	pub async fn update(&self, input: ContentInput, mut existing: Content) -> Result<Content> {
		self.resolve_channel(input.channel).await?;

		existing.apply(&input);

		let content = self.contents.update(&existing).await.map_err(write_error)?;

		tracing::debug!(id = content.id, channel = content.channel, "content updated");

		Ok(content)
	}

	pub async fn delete(&self, existing: Content) -> Result<()> {
		if !self.contents.delete(existing.id).await? {
			return Err(ServiceError::NotFound);
		}

		tracing::debug!(id = existing.id, "content deleted");

		Ok(())
	}

	async fn resolve_channel(&self, id: i64) -> Result<Channel> {
		self.channels.find(id).await?.ok_or(ServiceError::ReferenceNotFound(id))
	}
}

/// The channel can vanish between the lookup and the write.
fn write_error(err: RepositoryError) -> ServiceError {
	match err {
		RepositoryError::MissingChannel(id) => ServiceError::ReferenceNotFound(id),
		RepositoryError::NotFound(_) => ServiceError::NotFound,
		err => err.into(),
	}
}
