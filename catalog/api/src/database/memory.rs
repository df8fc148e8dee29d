use std::collections::BTreeMap;

use tokio::sync::RwLock;

use super::{Channel, ChannelRepository, Content, ContentRepository, RepositoryError, Result};
use crate::dto::{ChannelInput, ContentInput};

#[derive(Debug)]
struct State {
	channels: BTreeMap<i64, Channel>,
	contents: BTreeMap<i64, Content>,
	next_channel_id: i64,
	next_content_id: i64,
}

impl Default for State {
	fn default() -> Self {
		Self {
			channels: BTreeMap::new(),
			contents: BTreeMap::new(),
			next_channel_id: 1,
			next_content_id: 1,
		}
	}
}

/// Keeps everything in process memory. Ids start at 1 and are never
/// reused, deleting a channel removes its content like the postgres
/// foreign key does.
#[derive(Debug, Default)]
pub struct MemoryStore {
	state: RwLock<State>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait::async_trait]
impl ChannelRepository for MemoryStore {
	async fn list(&self) -> Result<Vec<Channel>> {
		Ok(self.state.read().await.channels.values().cloned().collect())
	}

	async fn find(&self, id: i64) -> Result<Option<Channel>> {
		Ok(self.state.read().await.channels.get(&id).cloned())
	}

	async fn insert(&self, input: &ChannelInput) -> Result<Channel> {
		let mut state = self.state.write().await;

		let id = state.next_channel_id;
		state.next_channel_id += 1;

		let channel = Channel::new(id, input);
		state.channels.insert(id, channel.clone());

		Ok(channel)
	}

	async fn update(&self, channel: &Channel) -> Result<Channel> {
		let mut state = self.state.write().await;

		let stored = state
			.channels
			.get_mut(&channel.id)
			.ok_or(RepositoryError::NotFound(channel.id))?;
		stored.clone_from(channel);

		Ok(stored.clone())
	}

	async fn delete(&self, id: i64) -> Result<bool> {
		let mut state = self.state.write().await;

		if state.channels.remove(&id).is_none() {
			return Ok(false);
		}

		state.contents.retain(|_, content| content.channel != id);

		Ok(true)
	}
}

#[async_trait::async_trait]
impl ContentRepository for MemoryStore {
	async fn list(&self) -> Result<Vec<Content>> {
		Ok(self.state.read().await.contents.values().cloned().collect())
	}

	async fn list_by_channel(&self, channel: i64) -> Result<Vec<Content>> {
		Ok(self
			.state
			.read()
			.await
			.contents
			.values()
			.filter(|content| content.channel == channel)
			.cloned()
			.collect())
	}

	async fn find(&self, id: i64) -> Result<Option<Content>> {
		Ok(self.state.read().await.contents.get(&id).cloned())
	}

	async fn insert(&self, input: &ContentInput) -> Result<Content> {
		let mut state = self.state.write().await;

		if !state.channels.contains_key(&input.channel) {
			return Err(RepositoryError::MissingChannel(input.channel));
		}

		let id = state.next_content_id;
		state.next_content_id += 1;

		let content = Content::new(id, input);
		state.contents.insert(id, content.clone());

		Ok(content)
	}

	async fn update(&self, content: &Content) -> Result<Content> {
		let mut state = self.state.write().await;

		if !state.channels.contains_key(&content.channel) {
			return Err(RepositoryError::MissingChannel(content.channel));
		}

		let stored = state
			.contents
			.get_mut(&content.id)
			.ok_or(RepositoryError::NotFound(content.id))?;
		stored.clone_from(content);

		Ok(stored.clone())
	}

	async fn delete(&self, id: i64) -> Result<bool> {
		Ok(self.state.write().await.contents.remove(&id).is_some())
	}
}
