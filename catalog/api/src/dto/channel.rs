use crate::validation::constraints::{self, INVALID_URL, NOT_BLANK};
use crate::validation::{Decode, FieldReader, Rule, Validate};

pub const PAID_URL_NULL: &str = "URL should not be null if channel is paid";
pub const PAID_URL_EMPTY: &str = "URL should not be empty if channel is paid";

/// The body of a channel create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInput {
	pub name: String,
	pub description: String,
	pub website_url: Option<String>,
	pub is_paid: bool,
}

impl Decode for ChannelInput {
	fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
		let name = fields.string("name");
		let description = fields.string("description");
		let website_url = fields.nullable_string("websiteUrl");
		let is_paid = fields.bool_or("isPaid", false);

		Some(Self {
			name: name?,
			description: description?,
			website_url: website_url?,
			is_paid: is_paid?,
		})
	}
}

impl Validate for ChannelInput {
	const RULES: &'static [Rule<Self>] = &[
		Rule {
			property: "name",
			message: NOT_BLANK,
			check: |c| constraints::not_blank(&c.name),
		},
		Rule {
			property: "description",
			message: NOT_BLANK,
			check: |c| constraints::not_blank(&c.description),
		},
		Rule {
			property: "websiteUrl",
			message: INVALID_URL,
			check: |c| c.website_url.as_deref().and_then(constraints::url),
		},
		// a paid channel needs a url: null and blank get different messages
		Rule {
			property: "websiteUrl",
			message: PAID_URL_NULL,
			check: |c| match c.is_paid {
				true => constraints::not_null(c.website_url.as_ref()),
				false => None,
			},
		},
		Rule {
			property: "websiteUrl",
			message: PAID_URL_EMPTY,
			check: |c| match (c.is_paid, c.website_url.as_deref()) {
				(true, Some(url)) => constraints::not_blank(url),
				_ => None,
			},
		},
	];
}
