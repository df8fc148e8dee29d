pub mod channel;
pub mod content;

pub use channel::ChannelInput;
pub use content::ContentInput;
