use crate::dto::channel::{PAID_URL_EMPTY, PAID_URL_NULL};
use crate::dto::{ChannelInput, ContentInput};
use crate::validation::constraints::{not_blank, INVALID_URL, NOT_BLANK};
use crate::validation::{Validate, ViolationList};

fn channel(website_url: Option<&str>, is_paid: bool) -> ChannelInput {
	ChannelInput {
		name: "HBO".to_owned(),
		description: "Home Box Office".to_owned(),
		website_url: website_url.map(ToOwned::to_owned),
		is_paid,
	}
}

fn content(name: &str, description: &str, minimum_age: i64) -> ContentInput {
	ContentInput {
		name: name.to_owned(),
		description: description.to_owned(),
		minimum_age,
		channel: 1,
	}
}

fn messages(violations: &ViolationList) -> Vec<(&str, &str)> {
	violations
		.iter()
		.map(|v| (v.property_path.as_str(), v.message.as_str()))
		.collect()
}

#[test]
fn test_channel_valid() {
	assert!(channel(None, false).validate().is_empty());
	assert!(channel(Some(""), false).validate().is_empty());
	assert!(channel(Some("https://hbo.com"), true).validate().is_empty());
	assert!(channel(Some("http://hbo.com/path?q=1"), false).validate().is_empty());
}

#[test]
fn test_channel_blank_fields() {
	let mut input = channel(None, false);
	input.name = String::new();
	input.description = String::new();

	let violations = input.validate();
	assert_eq!(messages(&violations), vec![("name", NOT_BLANK), ("description", NOT_BLANK)]);
	assert_eq!(violations.get(0).unwrap().parameters["{{ value }}"], "\"\"");
	assert_eq!(violations.to_string(), format!("name: {NOT_BLANK}\ndescription: {NOT_BLANK}"));
}

#[test]
fn test_whitespace_is_not_blank() {
	assert_eq!(not_blank("   "), None);
	assert_eq!(not_blank("\t\n"), None);
	assert!(not_blank("").is_some());

	let mut input = channel(None, false);
	input.name = "   ".to_owned();
	input.description = " ".to_owned();
	assert!(input.validate().is_empty());

	assert!(content("  ", "  ", 10).validate().is_empty());
}

#[test]
fn test_channel_paid_without_url() {
	let violations = channel(None, true).validate();
	assert_eq!(messages(&violations), vec![("websiteUrl", PAID_URL_NULL)]);
	assert_eq!(violations.get(0).unwrap().parameters["{{ value }}"], "null");

	let violations = channel(Some(""), true).validate();
	assert_eq!(messages(&violations), vec![("websiteUrl", PAID_URL_EMPTY)]);
}

#[test]
fn test_channel_invalid_url() {
	for url in ["not a url", "ftp://hbo.com", "https://", "mailto:someone@hbo.com"] {
		let violations = channel(Some(url), false).validate();
		assert_eq!(messages(&violations), vec![("websiteUrl", INVALID_URL)], "{url}");
	}
}

#[test]
fn test_channel_paid_whitespace_url() {
	let violations = channel(Some("  "), true).validate();
	assert_eq!(messages(&violations), vec![("websiteUrl", INVALID_URL)]);
}

#[test]
fn test_content_valid_bounds() {
	assert!(content("Game of Thrones", "Dragons", 0).validate().is_empty());
	assert!(content("Game of Thrones", "Dragons", 18).validate().is_empty());
	assert!(content(&"a".repeat(255), &"b".repeat(1000), 12).validate().is_empty());
}

#[test]
fn test_content_minimum_age() {
	let violations = content("Game of Thrones", "Dragons", 19).validate();
	assert_eq!(
		messages(&violations),
		vec![("minimumAge", "This value should be less than or equal to 18.")]
	);

	let parameters = &violations.get(0).unwrap().parameters;
	assert_eq!(parameters["{{ value }}"], "19");
	assert_eq!(parameters["{{ compared_value }}"], "18");

	let violations = content("Game of Thrones", "Dragons", -1).validate();
	assert_eq!(
		messages(&violations),
		vec![("minimumAge", "This value should be greater than or equal to 0.")]
	);
}

#[test]
fn test_content_lengths() {
	let violations = content(&"a".repeat(256), &"b".repeat(1001), 10).validate();
	assert_eq!(
		messages(&violations),
		vec![
			("name", "This value is too long. It should have 255 characters or less."),
			("description", "This value is too long. It should have 1000 characters or less."),
		]
	);
	assert_eq!(violations.get(0).unwrap().parameters["{{ limit }}"], "255");

	// counted in characters, not bytes
	assert!(content(&"é".repeat(255), "Dragons", 10).validate().is_empty());
}

#[test]
fn test_content_every_rule_runs() {
	let violations = content("", "", 40).validate();
	assert_eq!(
		messages(&violations),
		vec![
			("name", NOT_BLANK),
			("description", NOT_BLANK),
			("minimumAge", "This value should be less than or equal to 18."),
		]
	);
}
