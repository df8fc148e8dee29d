//! Reusable checks. Each returns `None` when the value passes and the
//! message parameters describing the failure otherwise.

use super::Parameters;

pub const NOT_BLANK: &str = "This value should not be blank.";
pub const INVALID_URL: &str = "This value is not a valid URL.";

pub fn format_str(value: &str) -> String {
	format!("\"{value}\"")
}

fn value_param(value: String) -> Parameters {
	Parameters::from([("{{ value }}".to_owned(), value)])
}

/// Only the empty string is blank, whitespace is kept as given.
pub fn not_blank(value: &str) -> Option<Parameters> {
	value.is_empty().then(|| value_param(format_str(value)))
}

pub fn not_null<T>(value: Option<&T>) -> Option<Parameters> {
	value.is_none().then(|| value_param("null".to_owned()))
}

/// Passes on values of at most `limit` characters.
pub fn max_length(value: &str, limit: usize) -> Option<Parameters> {
	let length = value.chars().count();

	(length > limit).then(|| {
		let mut parameters = value_param(format_str(value));
		parameters.insert("{{ limit }}".to_owned(), limit.to_string());
		parameters.insert("{{ value_length }}".to_owned(), length.to_string());
		parameters
	})
}

fn comparison(value: i64, compared: i64) -> Parameters {
	let mut parameters = value_param(value.to_string());
	parameters.insert("{{ compared_value }}".to_owned(), compared.to_string());
	parameters.insert("{{ compared_value_type }}".to_owned(), "int".to_owned());
	parameters
}

pub fn greater_than_or_equal(value: i64, compared: i64) -> Option<Parameters> {
	(value < compared).then(|| comparison(value, compared))
}

pub fn less_than_or_equal(value: i64, compared: i64) -> Option<Parameters> {
	(value > compared).then(|| comparison(value, compared))
}

/// An absolute http or https URL with a host. Empty strings pass, they are
/// left to the blank checks.
pub fn url(value: &str) -> Option<Parameters> {
	if value.is_empty() {
		return None;
	}

	let valid = url::Url::parse(value)
		.map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|host| !host.is_empty()))
		.unwrap_or(false);

	(!valid).then(|| value_param(format_str(value)))
}
