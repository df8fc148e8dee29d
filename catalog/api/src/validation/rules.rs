use super::{Parameters, Violation, ViolationList};

/// One named check over a whole candidate. `check` returns the message
/// parameters when the candidate fails.
pub struct Rule<T> {
	pub property: &'static str,
	pub message: &'static str,
	pub check: fn(&T) -> Option<Parameters>,
}

impl<T> Rule<T> {
	pub fn apply(&self, candidate: &T) -> Option<Violation> {
		(self.check)(candidate).map(|parameters| Violation::new(self.property, self.message).with_parameters(parameters))
	}
}

pub trait Validate: Sized + 'static {
	const RULES: &'static [Rule<Self>];

	/// Runs every rule, in declaration order, without stopping at the first
	/// failure.
	fn validate(&self) -> ViolationList {
		Self::RULES.iter().filter_map(|rule| rule.apply(self)).collect()
	}
}
