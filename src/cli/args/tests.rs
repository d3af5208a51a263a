use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use super::CliArgs;

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn file_argument_is_optional() {
	let parsed = CliArgs::parse_from(["tview"]);
	assert_eq!(parsed.file, None);
	assert!(!parsed.no_cache);
}

#[test]
fn geometry_flags_are_parsed() {
	let parsed = CliArgs::parse_from([
		"tview", "-W", "120", "--height", "40", "-x", "3", "-y", "7", "notes.md",
	]);
	assert_eq!(parsed.width, Some(120));
	assert_eq!(parsed.height, Some(40));
	assert_eq!(parsed.x, Some(3));
	assert_eq!(parsed.y, Some(7));
	assert_eq!(parsed.file, Some(PathBuf::from("notes.md")));
}

#[test]
fn negative_geometry_is_rejected() {
	assert!(CliArgs::try_parse_from(["tview", "--width", "-5", "file"]).is_err());
}
