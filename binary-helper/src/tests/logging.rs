use crate::logging::{self, LoggingError, Mode};

#[test]
fn test_logging_init_and_reload() {
	logging::init("info", Mode::Compact).expect("failed to init logging");
	// the second call only swaps the filter
	logging::init("debug,hyper=warn", Mode::Json).expect("failed to reload logging");

	assert!(matches!(
		logging::init("info,catalog=notalevel", Mode::Default),
		Err(LoggingError::InvalidLevel(_))
	));
}

#[test]
fn test_logging_mode_names() {
	let mode: Mode = serde_json::from_str("\"pretty\"").unwrap();
	assert_eq!(mode, Mode::Pretty);
	assert_eq!(serde_json::to_string(&Mode::Default).unwrap(), "\"default\"");
}
