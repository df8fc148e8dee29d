use std::sync::Arc;

use super::{Result, ServiceError};
use crate::database::{Channel, ChannelRepository, RepositoryError};
use crate::dto::ChannelInput;

/// Channel CRUD on top of a [`ChannelRepository`]. Inputs are expected to
/// be validated already.
#[derive(Clone)]
pub struct ChannelService {
	repository: Arc<dyn ChannelRepository>,
}

impl ChannelService {
	pub fn new(repository: Arc<dyn ChannelRepository>) -> Self {
		Self { repository }
	}

	pub async fn list(&self) -> Result<Vec<Channel>> {
		Ok(self.repository.list().await?)
	}

	pub async fn get(&self, id: i64) -> Result<Option<Channel>> {
		Ok(self.repository.find(id).await?)
	}

	pub async fn create(&self, input: ChannelInput) -> Result<Channel> {
		let channel = self.repository.insert(&input).await?;

		tracing::debug!(id = channel.id, "channel created");

		Ok(channel)
	}

	/// Full replace: every field of `existing` is overwritten by `input`.
	pub async fn update(&self, input: ChannelInput, mut existing: Channel) -> Result<Channel> {
		existing.apply(&input);

		match self.repository.update(&existing).await {
			Ok(channel) => {
				tracing::debug!(id = channel.id, "channel updated");
				Ok(channel)
			}
			Err(RepositoryError::NotFound(_)) => Err(ServiceError::NotFound),
			Err(err) => Err(err.into()),
		}
	}

	pub async fn delete(&self, existing: Channel) -> Result<()> {
		if !self.repository.delete(existing.id).await? {
			return Err(ServiceError::NotFound);
		}

		tracing::debug!(id = existing.id, "channel deleted");

		Ok(())
	}
}
