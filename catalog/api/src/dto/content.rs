use crate::validation::constraints::{self, NOT_BLANK};
use crate::validation::{Decode, FieldReader, Rule, Validate};

pub const NAME_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;
pub const MINIMUM_AGE_MIN: i64 = 0;
pub const MINIMUM_AGE_MAX: i64 = 18;

/// The body of a content create or update. `channel` is the id of the
/// owning channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentInput {
	pub name: String,
	pub description: String,
	pub minimum_age: i64,
	pub channel: i64,
}

impl Decode for ContentInput {
	fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
		let name = fields.string("name");
		let description = fields.string("description");
		let minimum_age = fields.integer("minimumAge");
		let channel = fields.integer("channel");

		Some(Self {
			name: name?,
			description: description?,
			minimum_age: minimum_age?,
			channel: channel?,
		})
	}
}

impl Validate for ContentInput {
	const RULES: &'static [Rule<Self>] = &[
		Rule {
			property: "name",
			message: NOT_BLANK,
			check: |c| constraints::not_blank(&c.name),
		},
		Rule {
			property: "name",
			message: "This value is too long. It should have 255 characters or less.",
			check: |c| constraints::max_length(&c.name, NAME_MAX_LENGTH),
		},
		Rule {
			property: "description",
			message: NOT_BLANK,
			check: |c| constraints::not_blank(&c.description),
		},
		Rule {
			property: "description",
			message: "This value is too long. It should have 1000 characters or less.",
			check: |c| constraints::max_length(&c.description, DESCRIPTION_MAX_LENGTH),
		},
		Rule {
			property: "minimumAge",
			message: "This value should be greater than or equal to 0.",
			check: |c| constraints::greater_than_or_equal(c.minimum_age, MINIMUM_AGE_MIN),
		},
		Rule {
			property: "minimumAge",
			message: "This value should be less than or equal to 18.",
			check: |c| constraints::less_than_or_equal(c.minimum_age, MINIMUM_AGE_MAX),
		},
	];
}
