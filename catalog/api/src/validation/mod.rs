//! Turns untrusted request bodies into validated inputs.
//!
//! Decoding and rule checks both report through [`ViolationList`], so a
//! caller sees one list of field level failures whichever stage rejected the
//! input.

pub mod constraints;
pub mod decode;
pub mod rules;
pub mod violation;

pub use decode::{decode, Decode, DecodeError, FieldReader};
pub use rules::{Rule, Validate};
pub use violation::{Parameters, Violation, ViolationList};

/// Decodes `body` and runs the rules of `T` over the result.
pub fn decode_valid<T: Decode + Validate>(body: &[u8]) -> Result<T, DecodeError> {
	let candidate = decode::<T>(body)?;

	let violations = candidate.validate();
	if violations.is_empty() {
		Ok(candidate)
	} else {
		Err(DecodeError::Invalid(violations))
	}
}
