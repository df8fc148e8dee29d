use std::collections::BTreeMap;
use std::fmt;

/// Message template parameters, keyed like `{{ value }}`.
pub type Parameters = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
	/// The field the violation is about, empty when it concerns the whole body
	pub property_path: String,
	pub message: String,
	pub parameters: Parameters,
}

impl Violation {
	pub fn new(property_path: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			property_path: property_path.into(),
			message: message.into(),
			parameters: Parameters::new(),
		}
	}

	pub fn with_parameters(mut self, parameters: Parameters) -> Self {
		self.parameters = parameters;
		self
	}

	pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.parameters.insert(key.into(), value.into());
		self
	}
}

impl fmt::Display for Violation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.property_path.is_empty() {
			write!(f, "{}", self.message)
		} else {
			write!(f, "{}: {}", self.property_path, self.message)
		}
	}
}

/// Violations in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ViolationList(Vec<Violation>);

impl ViolationList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, violation: Violation) {
		self.0.push(violation);
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
		self.0.iter()
	}

	pub fn get(&self, idx: usize) -> Option<&Violation> {
		self.0.get(idx)
	}
}

impl fmt::Display for ViolationList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (idx, violation) in self.0.iter().enumerate() {
			if idx > 0 {
				writeln!(f)?;
			}

			write!(f, "{violation}")?;
		}

		Ok(())
	}
}

impl From<Vec<Violation>> for ViolationList {
	fn from(violations: Vec<Violation>) -> Self {
		Self(violations)
	}
}

impl FromIterator<Violation> for ViolationList {
	fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl IntoIterator for ViolationList {
	type IntoIter = std::vec::IntoIter<Violation>;
	type Item = Violation;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a ViolationList {
	type IntoIter = std::slice::Iter<'a, Violation>;
	type Item = &'a Violation;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
