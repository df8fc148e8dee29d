use serde_json::{Map, Value};

use super::{Violation, ViolationList};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("body is not valid json: {0}")]
	Malformed(#[from] serde_json::Error),
	#[error("body is not a json object")]
	NotAnObject,
	#[error("body failed validation:\n{0}")]
	Invalid(ViolationList),
}

/// A request input that can be read field by field out of a JSON object.
pub trait Decode: Sized {
	/// Reads every field, even after one has failed, so all failures get
	/// reported. Returns `None` if any field failed.
	fn read(fields: &mut FieldReader<'_>) -> Option<Self>;
}

pub fn decode<T: Decode>(body: &[u8]) -> Result<T, DecodeError> {
	let Value::Object(object) = serde_json::from_slice::<Value>(body)? else {
		return Err(DecodeError::NotAnObject);
	};

	let mut fields = FieldReader::new(&object);
	let candidate = T::read(&mut fields);

	fields.finish(candidate)
}

const FRACTIONAL_HINT: &str = "Only whole numbers are accepted.";
const OUT_OF_RANGE_HINT: &str = "The number does not fit in a 64-bit signed integer.";

/// Collects missing fields and type mismatches while a [`Decode`] impl
/// pulls values out of the body.
pub struct FieldReader<'a> {
	object: &'a Map<String, Value>,
	missing: Vec<&'static str>,
	violations: ViolationList,
}

impl<'a> FieldReader<'a> {
	pub fn new(object: &'a Map<String, Value>) -> Self {
		Self {
			object,
			missing: Vec::new(),
			violations: ViolationList::new(),
		}
	}

	fn required(&mut self, name: &'static str) -> Option<&'a Value> {
		let value = self.object.get(name);
		if value.is_none() {
			self.missing.push(name);
		}

		value
	}

	fn mismatch(&mut self, name: &'static str, expected: &str, actual: &Value, hint: Option<&str>) {
		let mut violation = Violation::new(
			name,
			format!(r#"The type must be one of "{expected}" ("{}" given)."#, type_name(actual)),
		);

		if let Some(hint) = hint {
			violation = violation.with_parameter("hint", hint);
		}

		self.violations.push(violation);
	}

	pub fn string(&mut self, name: &'static str) -> Option<String> {
		match self.required(name)? {
			Value::String(value) => Some(value.clone()),
			other => {
				self.mismatch(name, "string", other, None);
				None
			}
		}
	}

	/// An optional string, absent and `null` both read as `None`.
	pub fn nullable_string(&mut self, name: &'static str) -> Option<Option<String>> {
		match self.object.get(name) {
			None | Some(Value::Null) => Some(None),
			Some(Value::String(value)) => Some(Some(value.clone())),
			Some(other) => {
				self.mismatch(name, "string, null", other, None);
				None
			}
		}
	}

	pub fn integer(&mut self, name: &'static str) -> Option<i64> {
		let value = self.required(name)?;

		match value {
			Value::Number(number) => {
				if let Some(value) = number.as_i64() {
					return Some(value);
				}

				let hint = if number.is_u64() { OUT_OF_RANGE_HINT } else { FRACTIONAL_HINT };
				self.mismatch(name, "int", value, Some(hint));
				None
			}
			other => {
				self.mismatch(name, "int", other, None);
				None
			}
		}
	}

	/// An optional boolean, `default` when absent. `null` is rejected.
	pub fn bool_or(&mut self, name: &'static str, default: bool) -> Option<bool> {
		match self.object.get(name) {
			None => Some(default),
			Some(Value::Bool(value)) => Some(*value),
			Some(other) => {
				self.mismatch(name, "bool", other, None);
				None
			}
		}
	}

	/// Missing fields win over type mismatches: when any are missing only a
	/// single violation naming them is reported.
	pub fn finish<T>(self, candidate: Option<T>) -> Result<T, DecodeError> {
		if !self.missing.is_empty() {
			return Err(DecodeError::Invalid(
				vec![Violation::new("", format!("Missing fields: {}", self.missing.join(",")))].into(),
			));
		}

		match candidate {
			Some(candidate) if self.violations.is_empty() => Ok(candidate),
			_ => Err(DecodeError::Invalid(self.violations)),
		}
	}
}

pub fn type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(number) if number.is_f64() => "float",
		Value::Number(_) => "int",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
