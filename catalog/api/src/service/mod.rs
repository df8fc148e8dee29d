use crate::database::RepositoryError;

mod channel;
mod content;

pub use channel::ChannelService;
pub use content::ContentService;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("record not found")]
	NotFound,
	#[error("channel {0} does not exist")]
	ReferenceNotFound(i64),
	#[error("repository error: {0}")]
	Repository(#[from] RepositoryError),
}

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;
