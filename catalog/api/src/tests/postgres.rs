use binary_helper::config::DatabaseConfig;
use binary_helper::global::setup_database;
use utils::database::deadpool_postgres::PoolError;
use utils::database::tokio_postgres::error::SqlState;

use crate::database::postgres::{
	content_write_error, contents_of_channel, insert_channel, insert_content, is_foreign_key_violation, update_channel,
	update_content,
};
use crate::database::{Channel, ChannelRepository, Content, ContentRepository, PostgresStore, RepositoryError};
use crate::dto::{ChannelInput, ContentInput};

fn channel_input() -> ChannelInput {
	ChannelInput {
		name: "HBO".to_owned(),
		description: "Home Box Office".to_owned(),
		website_url: None,
		is_paid: false,
	}
}

fn content_input() -> ContentInput {
	ContentInput {
		name: "Game of Thrones".to_owned(),
		description: "Dragons".to_owned(),
		minimum_age: 16,
		channel: 3,
	}
}

#[test]
fn test_channel_statements() {
	let input = channel_input();
	let qb = insert_channel(&input);
	assert_eq!(
		qb.sql(),
		"INSERT INTO channels (name, description, website_url, is_paid) VALUES ($1, $2, $3, $4) \
		 RETURNING id, name, description, website_url, is_paid"
	);
	assert_eq!(qb.param_count(), 4);

	let channel = Channel::new(7, &input);
	let qb = update_channel(&channel);
	assert_eq!(
		qb.sql(),
		"UPDATE channels SET name = $1, description = $2, website_url = $3, is_paid = $4 WHERE id = $5 \
		 RETURNING id, name, description, website_url, is_paid"
	);
	assert_eq!(qb.param_count(), 5);
}

#[test]
fn test_content_statements() {
	let input = content_input();
	let qb = insert_content(&input);
	assert_eq!(
		qb.sql(),
		"INSERT INTO contents (name, description, minimum_age, channel_id) VALUES ($1, $2, $3, $4) \
		 RETURNING id, name, description, minimum_age, channel_id AS channel"
	);
	assert_eq!(qb.param_count(), 4);

	let content = Content::new(2, &input);
	let qb = update_content(&content);
	assert_eq!(
		qb.sql(),
		"UPDATE contents SET name = $1, description = $2, minimum_age = $3, channel_id = $4 WHERE id = $5 \
		 RETURNING id, name, description, minimum_age, channel_id AS channel"
	);
	assert_eq!(qb.param_count(), 5);

	let qb = contents_of_channel(3);
	assert_eq!(
		qb.sql(),
		"SELECT id, name, description, minimum_age, channel_id AS channel FROM contents WHERE channel_id = $1 ORDER BY id"
	);
	assert_eq!(qb.param_count(), 1);
}

#[test]
fn test_missing_channel_detection() {
	assert!(is_foreign_key_violation(Some(&SqlState::FOREIGN_KEY_VIOLATION)));
	assert!(!is_foreign_key_violation(Some(&SqlState::UNIQUE_VIOLATION)));
	assert!(!is_foreign_key_violation(None));
}

#[test]
fn test_pool_errors_are_not_missing_channels() {
	assert!(matches!(
		content_write_error(PoolError::Closed, 3),
		RepositoryError::Pool(PoolError::Closed)
	));
}

#[tokio::test]
async fn test_unreachable_database() {
	let pool = setup_database(&DatabaseConfig {
		uri: "postgres://catalog@127.0.0.1:1/catalog".to_owned(),
		tls: None,
	})
	.await
	.unwrap();

	let store = PostgresStore::new(pool);

	assert!(matches!(
		ChannelRepository::list(&store).await,
		Err(RepositoryError::Pool(PoolError::Backend(_)))
	));

	// a connection failure carries no sql state, so it is not read as a
	// missing channel
	assert!(matches!(
		ContentRepository::insert(&store, &content_input()).await,
		Err(RepositoryError::Pool(PoolError::Backend(_)))
	));
}
