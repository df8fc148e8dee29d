use crate::dto::ChannelInput;

#[derive(Debug, Clone, PartialEq, Eq, postgres_from_row::FromRow, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
	pub id: i64,
	pub name: String,
	pub description: String,
	pub website_url: Option<String>,
	pub is_paid: bool,
}

impl Channel {
	pub fn new(id: i64, input: &ChannelInput) -> Self {
		let mut channel = Self {
			id,
			name: String::new(),
			description: String::new(),
			website_url: None,
			is_paid: false,
		};

		channel.apply(input);
		channel
	}

	/// Replaces every field except the id.
	pub fn apply(&mut self, input: &ChannelInput) {
		self.name.clone_from(&input.name);
		self.description.clone_from(&input.description);
		self.website_url.clone_from(&input.website_url);
		self.is_paid = input.is_paid;
	}
}
