use std::sync::Arc;

use crate::database::MemoryStore;
use crate::dto::{ChannelInput, ContentInput};
use crate::service::{ChannelService, ContentService, ServiceError};

fn services() -> (ChannelService, ContentService) {
	let store = Arc::new(MemoryStore::new());

	(
		ChannelService::new(store.clone()),
		ContentService::new(store.clone(), store),
	)
}

fn channel_input(name: &str) -> ChannelInput {
	ChannelInput {
		name: name.to_owned(),
		description: format!("{name} description"),
		website_url: Some(format!("https://{}.com", name.to_lowercase())),
		is_paid: true,
	}
}

fn content_input(name: &str, channel: i64) -> ContentInput {
	ContentInput {
		name: name.to_owned(),
		description: format!("{name} description"),
		minimum_age: 16,
		channel,
	}
}

#[tokio::test]
async fn test_channel_crud() {
	let (channels, _) = services();

	let created = channels.create(channel_input("HBO")).await.unwrap();
	assert_eq!(created.id, 1);
	assert_eq!(created.name, "HBO");
	assert_eq!(created.website_url.as_deref(), Some("https://hbo.com"));

	assert_eq!(channels.get(created.id).await.unwrap(), Some(created.clone()));

	let mut input = channel_input("HBO");
	input.description = "Home Box Office".to_owned();
	input.website_url = None;
	input.is_paid = false;

	let updated = channels.update(input, created.clone()).await.unwrap();
	assert_eq!(updated.id, created.id);
	assert_eq!(updated.description, "Home Box Office");
	assert_eq!(updated.website_url, None);
	assert!(!updated.is_paid);
	assert_eq!(channels.get(created.id).await.unwrap(), Some(updated.clone()));

	channels.delete(updated.clone()).await.unwrap();
	assert_eq!(channels.get(created.id).await.unwrap(), None);

	assert!(matches!(channels.delete(updated).await, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn test_channel_list_order_and_ids() {
	let (channels, _) = services();

	for name in ["HBO", "CNN", "BBC"] {
		channels.create(channel_input(name)).await.unwrap();
	}

	let listed = channels.list().await.unwrap();
	assert_eq!(listed.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);

	channels.delete(listed[2].clone()).await.unwrap();

	let created = channels.create(channel_input("ESPN")).await.unwrap();
	assert_eq!(created.id, 4);
}

#[tokio::test]
async fn test_channel_update_removed() {
	let (channels, _) = services();

	let created = channels.create(channel_input("HBO")).await.unwrap();
	channels.delete(created.clone()).await.unwrap();

	assert!(matches!(
		channels.update(channel_input("HBO"), created).await,
		Err(ServiceError::NotFound)
	));
}

#[tokio::test]
async fn test_content_crud() {
	let (channels, contents) = services();

	let hbo = channels.create(channel_input("HBO")).await.unwrap();
	let cnn = channels.create(channel_input("CNN")).await.unwrap();

	let created = contents.create(content_input("Game of Thrones", hbo.id)).await.unwrap();
	assert_eq!(created.id, 1);
	assert_eq!(created.channel, hbo.id);
	assert_eq!(contents.get(created.id).await.unwrap(), Some(created.clone()));

	// moving content to another channel
	let updated = contents
		.update(content_input("Game of Thrones", cnn.id), created.clone())
		.await
		.unwrap();
	assert_eq!(updated.channel, cnn.id);
	assert!(contents.list_by_channel(&hbo).await.unwrap().is_empty());
	assert_eq!(contents.list_by_channel(&cnn).await.unwrap(), vec![updated.clone()]);

	contents.delete(updated.clone()).await.unwrap();
	assert_eq!(contents.get(updated.id).await.unwrap(), None);
	assert!(matches!(contents.delete(updated).await, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn test_content_missing_channel() {
	let (channels, contents) = services();

	assert!(matches!(
		contents.create(content_input("Game of Thrones", 42)).await,
		Err(ServiceError::ReferenceNotFound(42))
	));
	assert!(contents.list().await.unwrap().is_empty());

	let hbo = channels.create(channel_input("HBO")).await.unwrap();
	let created = contents.create(content_input("Game of Thrones", hbo.id)).await.unwrap();

	assert!(matches!(
		contents.update(content_input("Renamed", 42), created.clone()).await,
		Err(ServiceError::ReferenceNotFound(42))
	));

	// nothing was written
	assert_eq!(contents.get(created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn test_channel_delete_cascades() {
	let (channels, contents) = services();

	let hbo = channels.create(channel_input("HBO")).await.unwrap();
	let cnn = channels.create(channel_input("CNN")).await.unwrap();

	contents.create(content_input("Game of Thrones", hbo.id)).await.unwrap();
	contents.create(content_input("The Wire", hbo.id)).await.unwrap();
	let news = contents.create(content_input("Newsroom", cnn.id)).await.unwrap();

	channels.delete(hbo).await.unwrap();

	assert_eq!(contents.list().await.unwrap(), vec![news]);
}
