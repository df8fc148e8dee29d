use crate::dto::ContentInput;

#[derive(Debug, Clone, PartialEq, Eq, postgres_from_row::FromRow, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
	pub id: i64,
	pub name: String,
	pub description: String,
	pub minimum_age: i64,
	/// Id of the owning channel
	pub channel: i64,
}

impl Content {
	pub fn new(id: i64, input: &ContentInput) -> Self {
		let mut content = Self {
			id,
			name: String::new(),
			description: String::new(),
			minimum_age: 0,
			channel: 0,
		};

		content.apply(input);
		content
	}

	/// Replaces every field except the id.
	pub fn apply(&mut self, input: &ContentInput) {
		self.name.clone_from(&input.name);
		self.description.clone_from(&input.description);
		self.minimum_age = input.minimum_age;
		self.channel = input.channel;
	}
}
